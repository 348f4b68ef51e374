//! decrypt-object - Fetch an encrypted S3 object and decrypt it with KMS

use clap::Parser;

use cloudcall_cli::commands::decrypt_object::{self, DecryptObjectCli};
use cloudcall_cli::logging;

#[tokio::main]
async fn main() {
    let cli = DecryptObjectCli::parse();
    logging::init(
        cli.global.debug,
        cli.global.output_config().colors_enabled(),
    );

    let exit_code = decrypt_object::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
