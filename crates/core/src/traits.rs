//! Service trait definitions
//!
//! These traits are the seams between the call flows and the remote services.
//! The AWS adapter crate implements them; tests substitute mockall mocks
//! (`MockAlarmService`, `MockObjectStore`, `MockKeyService`), which other
//! crates can use through the `mocks` feature.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    AlarmDeletionRequest, CiphertextBlob, DeleteAlarmsResponse, ObjectLocator, PlaintextResult,
};

/// Monitoring service: deletes alarms by name
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait AlarmService: Send + Sync {
    /// Delete the named alarms in a single request
    async fn delete_alarms(&self, request: &AlarmDeletionRequest) -> Result<DeleteAlarmsResponse>;
}

/// Storage service: reads whole objects
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read the full object content into memory
    async fn get_object(&self, locator: &ObjectLocator) -> Result<Vec<u8>>;
}

/// Key-management service: decrypts ciphertext blobs
///
/// No key identifier is supplied; the service selects the key from metadata
/// embedded in the ciphertext.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait KeyService: Send + Sync {
    async fn decrypt(&self, ciphertext: CiphertextBlob) -> Result<PlaintextResult>;
}
