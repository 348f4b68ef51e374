//! cloudcall-core: Core library for the cloudcall example flows
//!
//! This crate provides the pieces shared by both flows:
//! - Request/response data model
//! - Service traits for the monitoring, storage and key-management clients
//! - The alarm-deletion invoker and the fetch/decrypt pipeline
//! - Error policy and configuration management
//!
//! This crate is independent of any specific cloud SDK, so the flows can be
//! exercised against mock services.

pub mod alarm;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod policy;
pub mod traits;

pub use alarm::AlarmDeletionInvoker;
pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use model::{
    AlarmDeletionRequest, CiphertextBlob, DeleteAlarmsResponse, ObjectLocator, PlaintextResult,
};
pub use pipeline::{DecryptPipeline, Stage};
pub use policy::ErrorPolicy;
pub use traits::{AlarmService, KeyService, ObjectStore};

#[cfg(any(test, feature = "mocks"))]
pub use traits::{MockAlarmService, MockKeyService, MockObjectStore};
