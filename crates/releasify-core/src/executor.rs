//! Turns an [`ActionDecl`] into something the registry can run.

use std::path::PathBuf;
use thiserror::Error;

use crate::action::ActionKind;
use crate::config::ActionDecl;
use crate::error::Result;

/// Why a declaration was skipped before reaching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("no action specified")]
    MissingAction,

    #[error("action does not exist: {0}")]
    UnknownAction(String),

    #[error("no source specified")]
    MissingSource,
}

/// A declaration whose action and arguments have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAction {
    pub kind: ActionKind,
    pub src: PathBuf,
    pub dst: Option<PathBuf>,
}

impl ResolvedAction {
    /// Run the operation once. Filesystem errors are returned untouched.
    pub fn execute(&self) -> Result<()> {
        self.kind.run(&self.src, self.dst.as_deref())
    }
}

/// Resolve a declaration, checking in order: action present, action
/// registered, source present.
pub fn resolve(decl: &ActionDecl) -> std::result::Result<ResolvedAction, DeclarationError> {
    let name = decl.action.as_deref().ok_or(DeclarationError::MissingAction)?;
    let kind = ActionKind::lookup(name)
        .ok_or_else(|| DeclarationError::UnknownAction(name.to_string()))?;
    let src = decl.source().ok_or(DeclarationError::MissingSource)?;

    Ok(ResolvedAction {
        kind,
        src: PathBuf::from(src),
        dst: decl.dst.as_deref().map(PathBuf::from),
    })
}
