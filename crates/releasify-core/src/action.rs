//! The registry of file-system operations a declaration can name.

use std::fmt;
use std::path::Path;

use crate::error::{ReleasifyError, Result};
use crate::io;

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Move,
    Copy,
    Delete,
    Mkdir,
    Touch,
}

impl ActionKind {
    pub fn all() -> &'static [ActionKind] {
        &[
            ActionKind::Move,
            ActionKind::Copy,
            ActionKind::Delete,
            ActionKind::Mkdir,
            ActionKind::Touch,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::Copy => "copy",
            ActionKind::Delete => "delete",
            ActionKind::Mkdir => "mkdir",
            ActionKind::Touch => "touch",
        }
    }

    /// Look up a registered action by name. Names are case-sensitive.
    pub fn lookup(name: &str) -> Option<ActionKind> {
        ActionKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
    }

    /// Perform the operation against the filesystem.
    ///
    /// `path` is the source for `move`/`copy` and the target for the others;
    /// `dst` is ignored by operations that take a single path.
    pub fn run(self, path: &Path, dst: Option<&Path>) -> Result<()> {
        let destination = || dst.ok_or(ReleasifyError::MissingDestination(self));

        let outcome = match self {
            ActionKind::Move => io::move_path(path, destination()?),
            ActionKind::Copy if path.is_file() => io::copy_file(path, destination()?),
            ActionKind::Copy => io::copy_tree(path, destination()?),
            ActionKind::Delete => io::remove_path(path),
            ActionKind::Mkdir => std::fs::create_dir(path),
            ActionKind::Touch => io::touch(path),
        };

        outcome.map_err(|source| ReleasifyError::Operation {
            action: self,
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
