//! Request and response values passed to and from the remote services
//!
//! All values are created per invocation and are not retained after the call
//! that consumes them returns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Names of the alarms to delete, in submission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmDeletionRequest {
    alarm_names: Vec<String>,
}

impl AlarmDeletionRequest {
    /// Build a request, rejecting an empty sequence or an empty name
    ///
    /// Names are otherwise opaque; the monitoring service validates them.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let alarm_names: Vec<String> = names.into_iter().map(Into::into).collect();

        if alarm_names.is_empty() {
            return Err(Error::InvalidRequest(
                "at least one alarm name is required".into(),
            ));
        }

        if let Some(pos) = alarm_names.iter().position(|n| n.is_empty()) {
            return Err(Error::InvalidRequest(format!(
                "alarm name at position {pos} is empty"
            )));
        }

        Ok(Self { alarm_names })
    }

    pub fn alarm_names(&self) -> &[String] {
        &self.alarm_names
    }
}

/// Acknowledgment returned by the monitoring service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAlarmsResponse {
    /// Request identifier assigned by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl DeleteAlarmsResponse {
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
        }
    }
}

/// Location of a stored blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectLocator {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocator {
    /// Create a locator, rejecting an empty bucket or key
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let bucket = bucket.into();
        let key = key.into();

        if bucket.is_empty() {
            return Err(Error::InvalidRequest("Bucket name cannot be empty".into()));
        }

        if key.is_empty() {
            return Err(Error::InvalidRequest("Object key cannot be empty".into()));
        }

        Ok(Self { bucket, key })
    }

    /// Parse a `bucket/key` string
    ///
    /// The first `/` separates the bucket; the remainder, slashes included,
    /// is the key.
    pub fn parse(path: &str) -> Result<Self> {
        match path.split_once('/') {
            Some((bucket, key)) => Self::new(bucket, key),
            None => Err(Error::InvalidRequest(format!(
                "Invalid object path: '{path}'. Expected: bucket/key"
            ))),
        }
    }
}

impl fmt::Display for ObjectLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Encrypted bytes exactly as read from storage
#[derive(Clone, PartialEq, Eq)]
pub struct CiphertextBlob(Vec<u8>);

impl CiphertextBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Ciphertext can be large; only its length is useful in logs.
impl fmt::Debug for CiphertextBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CiphertextBlob({} bytes)", self.0.len())
    }
}

/// Bytes recovered by the key-management service
#[derive(Clone, PartialEq, Eq)]
pub struct PlaintextResult {
    pub bytes: Vec<u8>,

    /// Key the service reports having used, when it says
    pub key_id: Option<String>,
}

impl PlaintextResult {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            key_id: None,
        }
    }

    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    /// Plaintext as UTF-8, if it is valid UTF-8
    pub fn as_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

// Never print secret material through Debug.
impl fmt::Debug for PlaintextResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaintextResult")
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("key_id", &self.key_id)
            .finish()
    }
}
