//! Error types for relay transport failures.

use thiserror::Error;

/// Errors raised when a relay command cannot be delivered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The byte-command channel rejected the write.
    #[error("relay transport write failed: {0}")]
    Transport(String),
}

impl From<std::io::Error> for RelayError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RelayError::Transport("broken pipe".to_string());
        assert!(err.to_string().contains("relay transport write failed"));
        assert!(err.to_string().contains("broken pipe"));
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "port stalled");
        let err: RelayError = io_err.into();
        assert!(matches!(err, RelayError::Transport(_)));
    }
}
