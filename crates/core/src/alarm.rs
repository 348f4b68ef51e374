//! Alarm-deletion invoker
//!
//! Submits one delete request to the monitoring service and settles the
//! outcome according to the configured [`ErrorPolicy`].

use crate::error::Result;
use crate::model::{AlarmDeletionRequest, DeleteAlarmsResponse};
use crate::policy::ErrorPolicy;
use crate::traits::AlarmService;

/// Deletes alarms through an [`AlarmService`]
pub struct AlarmDeletionInvoker<'a, S: AlarmService + ?Sized> {
    service: &'a S,
    policy: ErrorPolicy,
}

impl<'a, S: AlarmService + ?Sized> AlarmDeletionInvoker<'a, S> {
    pub fn new(service: &'a S, policy: ErrorPolicy) -> Self {
        Self { service, policy }
    }

    /// Delete the given alarms
    ///
    /// Returns `Ok(Some(response))` on success. A remote failure is logged and
    /// yields `Ok(None)` under [`ErrorPolicy::Suppress`], or is returned under
    /// [`ErrorPolicy::Propagate`].
    pub async fn invoke(
        &self,
        request: &AlarmDeletionRequest,
    ) -> Result<Option<DeleteAlarmsResponse>> {
        tracing::debug!(
            alarm_count = request.alarm_names().len(),
            policy = %self.policy,
            "Deleting alarms"
        );

        let outcome = self.service.delete_alarms(request).await;

        if let Ok(response) = &outcome {
            tracing::info!(
                request_id = response.request_id.as_deref().unwrap_or("-"),
                alarms = ?request.alarm_names(),
                "Alarms deleted"
            );
        }

        self.policy.settle(outcome)
    }
}
