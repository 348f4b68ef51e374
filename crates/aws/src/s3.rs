//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from cloudcall-core.

use async_trait::async_trait;
use aws_config::SdkConfig;

use cloudcall_core::{Error, ObjectLocator, ObjectStore, Result};

use crate::error::from_sdk_error;

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a client from a loaded SDK config
    ///
    /// Path-style addressing is forced when an endpoint override is in use,
    /// since local emulators rarely resolve virtual-hosted bucket names.
    pub fn new(config: &SdkConfig) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(config)
            .force_path_style(config.endpoint_url().is_some())
            .build();

        Self::from_client(aws_sdk_s3::Client::from_conf(s3_config))
    }

    /// Wrap an already configured SDK client
    pub fn from_client(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn get_object(&self, locator: &ObjectLocator) -> Result<Vec<u8>> {
        let response = self
            .inner
            .get_object()
            .bucket(&locator.bucket)
            .key(&locator.key)
            .send()
            .await
            .map_err(|e| from_sdk_error(e, &locator.to_string()))?;

        // Whole body in memory; partial reads are not supported
        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .into_bytes()
            .to_vec();

        tracing::debug!(object = %locator, bytes = data.len(), "Read object body");

        Ok(data)
    }
}
