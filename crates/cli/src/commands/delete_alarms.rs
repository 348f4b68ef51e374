//! delete-alarms command - Delete CloudWatch alarms by name
//!
//! Sends a single DeleteAlarms request. Under the default `suppress` policy a
//! remote failure is logged and the command still exits 0.

use std::fmt;

use clap::Parser;
use cloudcall_aws::{CloudWatchClient, load_sdk_config};
use cloudcall_core::{AlarmDeletionInvoker, AlarmDeletionRequest, AlarmService, ErrorPolicy};
use serde::Serialize;

use super::GlobalArgs;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// delete-alarms - Delete CloudWatch alarms
///
/// Alarm names come from the command line, or from `[alarms] names` in the
/// configuration file when none are given.
#[derive(Parser, Debug)]
#[command(name = "delete-alarms")]
#[command(author, version, about, long_about = None)]
pub struct DeleteAlarmsCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Names of the alarms to delete
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,
}

#[derive(Debug, Serialize)]
struct DeleteAlarmsOutput {
    status: &'static str,
    alarms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
}

impl fmt::Display for DeleteAlarmsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deleted {} alarm(s): {}",
            self.alarms.len(),
            self.alarms.join(", ")
        )?;
        if let Some(request_id) = &self.request_id {
            write!(f, "\nRequest ID: {request_id}")?;
        }
        Ok(())
    }
}

/// Execute the delete-alarms command
pub async fn execute(cli: DeleteAlarmsCli) -> ExitCode {
    let formatter = Formatter::new(cli.global.output_config());

    let config = match cli.global.load_config() {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let request = if cli.names.is_empty() {
        config.alarms.request()
    } else {
        AlarmDeletionRequest::new(cli.names)
    };

    let request = match request {
        Ok(r) => r,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let sdk_config = match load_sdk_config(&config.service).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to load AWS configuration: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    formatter.detail("CloudWatch client", env!("CARGO_PKG_VERSION"));
    formatter.detail(
        "AWS Region",
        sdk_config.region().map(|r| r.as_ref()).unwrap_or("-"),
    );
    formatter.detail("Alarms", &request.alarm_names().join(", "));
    formatter.detail("On error", config.alarms.on_error.as_str());

    let client = CloudWatchClient::new(&sdk_config);
    run(&client, &request, config.alarms.on_error, &formatter).await
}

/// Delete the alarms through `service` and report the outcome
pub async fn run<S>(
    service: &S,
    request: &AlarmDeletionRequest,
    policy: ErrorPolicy,
    formatter: &Formatter,
) -> ExitCode
where
    S: AlarmService + ?Sized,
{
    let invoker = AlarmDeletionInvoker::new(service, policy);

    match invoker.invoke(request).await {
        Ok(Some(response)) => {
            formatter.output(&DeleteAlarmsOutput {
                status: "success",
                alarms: request.alarm_names().to_vec(),
                request_id: response.request_id,
            });
            ExitCode::Success
        }
        Ok(None) => {
            if formatter.is_json() {
                formatter.json(&DeleteAlarmsOutput {
                    status: "error_suppressed",
                    alarms: request.alarm_names().to_vec(),
                    request_id: None,
                });
            } else {
                formatter.warning("Failed to delete alarms; error suppressed (on_error = suppress)");
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to delete alarms: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
