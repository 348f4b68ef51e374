//! CloudWatch client implementation
//!
//! Wraps aws-sdk-cloudwatch and implements the AlarmService trait.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudwatch::operation::RequestId as _;

use cloudcall_core::{AlarmDeletionRequest, AlarmService, DeleteAlarmsResponse, Result};

use crate::error::from_sdk_error;

/// CloudWatch client wrapper
pub struct CloudWatchClient {
    inner: aws_sdk_cloudwatch::Client,
}

impl CloudWatchClient {
    /// Create a client from a loaded SDK config
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_cloudwatch::Client::new(config))
    }

    /// Wrap an already configured SDK client
    pub fn from_client(inner: aws_sdk_cloudwatch::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl AlarmService for CloudWatchClient {
    async fn delete_alarms(&self, request: &AlarmDeletionRequest) -> Result<DeleteAlarmsResponse> {
        let names = request.alarm_names();

        let response = self
            .inner
            .delete_alarms()
            .set_alarm_names(Some(names.to_vec()))
            .send()
            .await
            .map_err(|e| from_sdk_error(e, &names.join(", ")))?;

        Ok(DeleteAlarmsResponse {
            request_id: response.request_id().map(str::to_string),
        })
    }
}
