//! Attempt a resolved action, looping on operator-approved retries.

use crate::config::{ActionDecl, RunSettings};
use crate::error::Result;
use crate::executor::ResolvedAction;
use crate::operator::{Decision, Operator};

/// How a single declaration finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded { attempts: u32 },
    Skipped { attempts: u32 },
}

impl AttemptOutcome {
    pub fn attempts(self) -> u32 {
        match self {
            AttemptOutcome::Succeeded { attempts } | AttemptOutcome::Skipped { attempts } => {
                attempts
            }
        }
    }
}

pub struct RetryController<'a, O: Operator> {
    settings: RunSettings,
    operator: &'a mut O,
    prompts: u32,
}

impl<'a, O: Operator> RetryController<'a, O> {
    pub fn new(settings: RunSettings, operator: &'a mut O) -> Self {
        Self {
            settings,
            operator,
            prompts: 0,
        }
    }

    pub fn operator(&mut self) -> &mut O {
        &mut *self.operator
    }

    /// Number of retry/skip questions asked so far.
    pub fn prompts(&self) -> u32 {
        self.prompts
    }

    /// Run `action` until it succeeds or the operator stops retrying.
    ///
    /// Filesystem failures are reported and, with manual resolution on, put to
    /// the operator. Any other error, including a failure to read the
    /// operator's answer, is returned immediately.
    pub fn attempt(&mut self, decl: &ActionDecl, action: &ResolvedAction) -> Result<AttemptOutcome> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            tracing::debug!(action = %action.kind, src = %action.src.display(), attempts, "attempting");

            let err = match action.execute() {
                Ok(()) => return Ok(AttemptOutcome::Succeeded { attempts }),
                Err(e) if e.is_retryable() => e,
                Err(e) => return Err(e),
            };

            let manual = self.settings.manual_resolve;
            tracing::info!(action = %action.kind, attempts, error = %err, "attempt failed");
            self.operator.failed(decl, &err, attempts, manual)?;
            if !manual {
                return Ok(AttemptOutcome::Skipped { attempts });
            }

            self.prompts += 1;
            match self.operator.decide(decl)? {
                Decision::Retry => continue,
                Decision::Skip => return Ok(AttemptOutcome::Skipped { attempts }),
            }
        }
    }
}
