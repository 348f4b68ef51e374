//! Error types for cloudcall-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for cloudcall-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cloudcall-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request rejected locally before submission
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication or authorization failure
    #[error("Access denied: {0}")]
    Auth(String),

    /// Resource not found (alarm, bucket, object or key)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// Request throttled by the remote service (retryable)
    #[error("Throttled: {0}")]
    Throttled(String),

    /// Ciphertext could not be decrypted
    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidRequest(_) => 2,                 // UsageError
            Error::Config(_) | Error::InvalidUrl(_) => 2,  // UsageError
            Error::TomlParse(_) => 2,                      // UsageError
            Error::Network(_) | Error::Throttled(_) => 3,  // NetworkError
            Error::Auth(_) => 4,                           // AuthError
            Error::NotFound(_) => 5,                       // NotFound
            Error::InvalidCiphertext(_) => 6,              // InvalidCiphertext
            _ => 1,                                        // GeneralError
        }
    }

    /// Whether the failure happened on the remote side of a call
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Auth(_)
                | Error::NotFound(_)
                | Error::Network(_)
                | Error::Throttled(_)
                | Error::InvalidCiphertext(_)
                | Error::General(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::InvalidRequest("test".into()).exit_code(), 2);
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::Throttled("test".into()).exit_code(), 3);
        assert_eq!(Error::Auth("test".into()).exit_code(), 4);
        assert_eq!(Error::NotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::InvalidCiphertext("test".into()).exit_code(), 6);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("my_bucket/my_item".into());
        assert_eq!(err.to_string(), "Not found: my_bucket/my_item");

        let err = Error::InvalidRequest("at least one alarm name is required".into());
        assert_eq!(
            err.to_string(),
            "Invalid request: at least one alarm name is required"
        );
    }

    #[test]
    fn test_remote_errors() {
        assert!(Error::Auth("x".into()).is_remote());
        assert!(Error::Throttled("x".into()).is_remote());
        assert!(!Error::InvalidRequest("x".into()).is_remote());
        assert!(!Error::Config("x".into()).is_remote());
    }
}
