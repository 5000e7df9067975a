use std::path::PathBuf;
use thiserror::Error;

use crate::action::ActionKind;

#[derive(Debug, Error)]
pub enum ReleasifyError {
    #[error("config file does not exist: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("action '{0}' requires a 'dst' path")]
    MissingDestination(ActionKind),

    #[error("failed to {action} '{}'", .path.display())]
    Operation {
        action: ActionKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ReleasifyError {
    /// Only filesystem failures raised by an operation are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ReleasifyError::Operation { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReleasifyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn operation_errors_are_retryable() {
        let err = ReleasifyError::Operation {
            action: ActionKind::Mkdir,
            path: PathBuf::from("out"),
            source: Error::new(ErrorKind::AlreadyExists, "exists"),
        };
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "failed to mkdir 'out'");
    }

    #[test]
    fn other_errors_are_fatal() {
        assert!(!ReleasifyError::MissingDestination(ActionKind::Copy).is_retryable());
        assert!(!ReleasifyError::Io(Error::new(ErrorKind::BrokenPipe, "stdin")).is_retryable());
        assert!(!ReleasifyError::ConfigNotFound(PathBuf::from("releasify.yaml")).is_retryable());
    }
}
