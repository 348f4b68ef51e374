//! What a flow does when its remote call fails

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Error policy for a one-shot call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log remote failures and report "no result"
    Suppress,
    /// Return remote failures to the caller
    Propagate,
}

impl ErrorPolicy {
    /// Apply the policy to the outcome of a remote call
    ///
    /// Local errors (invalid request, configuration) are always returned,
    /// whatever the policy.
    pub fn settle<T>(self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if self == ErrorPolicy::Suppress && e.is_remote() => {
                tracing::error!(error = %e, "Remote call failed; error suppressed");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorPolicy::Suppress => "suppress",
            ErrorPolicy::Propagate => "propagate",
        }
    }
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
