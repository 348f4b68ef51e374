//! delete-alarms - Delete CloudWatch alarms by name
//!
//! Remote failures are suppressed by default (`--on-error propagate` to
//! change that).

use clap::Parser;

use cloudcall_cli::commands::delete_alarms::{self, DeleteAlarmsCli};
use cloudcall_cli::logging;

#[tokio::main]
async fn main() {
    let cli = DeleteAlarmsCli::parse();
    logging::init(
        cli.global.debug,
        cli.global.output_config().colors_enabled(),
    );

    let exit_code = delete_alarms::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
