//! Drive a whole action list from start to finish.

use std::path::PathBuf;

use crate::config::{ActionDecl, RunSettings};
use crate::error::Result;
use crate::executor::{self, DeclarationError};
use crate::operator::Operator;
use crate::retry::{AttemptOutcome, RetryController};

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Rejected(DeclarationError),
    Completed(AttemptOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub index: usize,
    /// The declared action name, as written, if any.
    pub action: Option<String>,
    pub outcome: EntryOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub entries: Vec<EntryReport>,
    pub prompts: u32,
    pub self_removed: bool,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Completed(AttemptOutcome::Succeeded { .. })))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Completed(AttemptOutcome::Skipped { .. })))
    }

    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Rejected(_)))
    }

    /// Total filesystem attempts across all entries.
    pub fn attempts(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| match e.outcome {
                EntryOutcome::Completed(outcome) => outcome.attempts(),
                EntryOutcome::Rejected(_) => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

pub struct Runner<'a, O: Operator> {
    settings: RunSettings,
    operator: &'a mut O,
    self_artifact: Option<PathBuf>,
}

impl<'a, O: Operator> Runner<'a, O> {
    pub fn new(settings: RunSettings, operator: &'a mut O) -> Self {
        Self {
            settings,
            operator,
            self_artifact: None,
        }
    }

    /// The file deleted at the end of the run when `remove_self` is set.
    pub fn with_self_artifact(mut self, path: impl Into<PathBuf>) -> Self {
        self.self_artifact = Some(path.into());
        self
    }

    /// Process every declaration in order.
    ///
    /// Malformed entries and skipped actions are recorded and the run moves
    /// on. Only errors the retry loop does not absorb end the run early.
    pub fn run(self, actions: &[ActionDecl]) -> Result<RunReport> {
        let Runner {
            settings,
            operator,
            self_artifact,
        } = self;

        let mut report = RunReport::default();
        let mut controller = RetryController::new(settings, operator);

        for (index, decl) in actions.iter().enumerate() {
            let outcome = match executor::resolve(decl) {
                Ok(action) => EntryOutcome::Completed(controller.attempt(decl, &action)?),
                Err(reason) => {
                    tracing::debug!(index, %decl, %reason, "skipping declaration");
                    controller.operator().rejected(index, decl, &reason)?;
                    EntryOutcome::Rejected(reason)
                }
            };
            report.entries.push(EntryReport {
                index,
                action: decl.action.clone(),
                outcome,
            });
        }
        report.prompts = controller.prompts();

        if settings.remove_self {
            match self_artifact {
                Some(path) => {
                    tracing::info!(path = %path.display(), "removing own artifact");
                    std::fs::remove_file(&path)?;
                    report.self_removed = true;
                }
                None => tracing::warn!("remove-self is set but the program's own path is unknown"),
            }
        }

        Ok(report)
    }
}
