//! The person (or script) watching a run.
//!
//! The runner reports skipped declarations and failed attempts through
//! [`Operator`], and asks it whether a failed action should be retried.
//! [`ConsoleOperator`] is the terminal implementation used by the CLI.

use std::error::Error;
use std::io::{self, BufRead, Write};

use crate::config::ActionDecl;
use crate::error::ReleasifyError;
use crate::executor::DeclarationError;

pub const RETRY_HINT: &str = "Use \"retry\", or \"skip\"";

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Retry,
    Skip,
}

impl Decision {
    /// `retry` in any case retries; every other answer, blank included, skips.
    pub fn from_input(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("retry") {
            Decision::Retry
        } else {
            Decision::Skip
        }
    }
}

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

pub trait Operator {
    /// A declaration was skipped without touching the filesystem.
    fn rejected(
        &mut self,
        index: usize,
        decl: &ActionDecl,
        reason: &DeclarationError,
    ) -> io::Result<()>;

    /// An attempt failed. `will_prompt` is set when [`Operator::decide`]
    /// is about to be called for this failure.
    fn failed(
        &mut self,
        decl: &ActionDecl,
        error: &ReleasifyError,
        attempt: u32,
        will_prompt: bool,
    ) -> io::Result<()>;

    /// Block until the operator chooses to retry or skip.
    fn decide(&mut self, decl: &ActionDecl) -> io::Result<Decision>;
}

/// Render an error followed by every cause in its source chain.
pub fn format_trace(error: &dyn Error) -> String {
    let mut trace = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        trace.push_str("\n  caused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    trace
}

// ---------------------------------------------------------------------------
// ConsoleOperator
// ---------------------------------------------------------------------------

pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
}

impl ConsoleOperator<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn rejected(
        &mut self,
        index: usize,
        decl: &ActionDecl,
        reason: &DeclarationError,
    ) -> io::Result<()> {
        writeln!(self.output, "Skipping action #{}: {reason} in {decl}.", index + 1)?;
        self.output.flush()
    }

    fn failed(
        &mut self,
        decl: &ActionDecl,
        error: &ReleasifyError,
        attempt: u32,
        will_prompt: bool,
    ) -> io::Result<()> {
        writeln!(
            self.output,
            "There was an error executing {decl} (attempt {attempt}).\n{}",
            format_trace(error)
        )?;
        if will_prompt {
            writeln!(self.output, "{RETRY_HINT}")?;
        }
        self.output.flush()
    }

    fn decide(&mut self, _decl: &ActionDecl) -> io::Result<Decision> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Decision::Skip);
        }
        Ok(Decision::from_input(&line))
    }
}
