//! Server error types.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;

/// Why the server could not start or stopped unexpectedly.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the configured address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The server loop failed while serving.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Suggests how to resolve the error, if a common cause is known.
    pub fn suggestion(&self) -> Option<&'static str> {
        let source = match self {
            Self::Bind { source, .. } | Self::Runtime(source) => source,
        };

        match source.kind() {
            io::ErrorKind::PermissionDenied => {
                Some("Try using a port above 1024 or run with appropriate privileges")
            }
            io::ErrorKind::AddrInUse => Some(
                "The port is already in use. Try a different port or stop the conflicting service",
            ),
            io::ErrorKind::AddrNotAvailable => {
                Some("The address is not available. Check network interface configuration")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_errors_suggest_fixes() {
        let error = ServerError::Bind {
            address: "127.0.0.1:3000".into(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };

        assert!(error.to_string().contains("127.0.0.1:3000"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn unknown_causes_have_no_suggestion() {
        let error = ServerError::Runtime(io::Error::other("boom"));
        assert!(error.suggestion().is_none());
    }
}
