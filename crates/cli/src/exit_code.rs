//! Exit code definitions for the cloudcall binaries
//!
//! Scripts depend on these values; existing codes keep their meaning.

use cloudcall_core::Error;

/// Exit codes shared by `delete-alarms` and `decrypt-object`.
///
/// These codes follow a consistent convention to allow scripts and automation
/// to handle different error scenarios appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully, or its failure was suppressed
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// User input error: invalid arguments, empty request fields, bad config
    UsageError = 2,

    /// Retryable network error: timeout, connection reset, throttling, etc.
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// Resource not found: alarm, bucket, object or key does not exist
    NotFound = 5,

    /// Ciphertext rejected by the key-management service
    InvalidCiphertext = 6,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            5 => Some(Self::NotFound),
            6 => Some(Self::InvalidCiphertext),
            _ => None,
        }
    }

    /// Exit code for a failed operation
    pub const fn from_error(error: &Error) -> Self {
        match Self::from_i32(error.exit_code()) {
            Some(code) => code,
            None => Self::GeneralError,
        }
    }
}
