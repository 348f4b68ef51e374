//! cloudcall-aws: AWS SDK adapters for cloudcall
//!
//! This crate implements the cloudcall-core service traits with the
//! CloudWatch, S3 and KMS SDK clients. It is the only crate that directly
//! depends on the AWS SDK.

pub mod cloudwatch;
mod error;
pub mod kms;
pub mod s3;
pub mod sdk;

pub use cloudwatch::CloudWatchClient;
pub use kms::KmsClient;
pub use s3::S3Client;
pub use sdk::{FALLBACK_REGION, load_sdk_config};
