//! decrypt-object command - Fetch an S3 object and decrypt it with KMS
//!
//! Reads the whole object, passes its bytes to KMS Decrypt, and writes the
//! plaintext unmodified to stdout (or to a file with `--output`). Under the
//! default `propagate` policy any failure ends the command with a non-zero
//! exit code.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use cloudcall_aws::{KmsClient, S3Client, load_sdk_config};
use cloudcall_core::config::ObjectSettings;
use cloudcall_core::{
    DecryptPipeline, ErrorPolicy, KeyService, ObjectLocator, ObjectStore, PlaintextResult, Result,
};
use serde::Serialize;

use super::GlobalArgs;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// decrypt-object - Fetch an encrypted S3 object and decrypt it with KMS
///
/// Bucket and key come from the command line, or from the `[object]` section
/// of the configuration file.
#[derive(Parser, Debug)]
#[command(name = "decrypt-object")]
#[command(author, version, about, long_about = None)]
pub struct DecryptObjectCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Object to decrypt, as bucket/key
    #[arg(value_name = "BUCKET/KEY", conflicts_with_all = ["bucket", "key"])]
    pub object: Option<String>,

    /// Bucket holding the ciphertext
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Key of the ciphertext object
    #[arg(short, long)]
    pub key: Option<String>,

    /// Write the plaintext to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DecryptOutput {
    status: &'static str,
    bucket: String,
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plaintext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

impl DecryptOutput {
    /// Report for a failure suppressed by policy
    fn suppressed(locator: &ObjectLocator) -> Self {
        Self {
            status: "error_suppressed",
            bucket: locator.bucket.clone(),
            key: locator.key.clone(),
            key_id: None,
            size_bytes: None,
            plaintext: None,
            output: None,
        }
    }
}

/// Resolve the object locator: positional path, then flags, then the
/// `[object]` settings
fn resolve_locator(
    object: Option<&str>,
    bucket: Option<String>,
    key: Option<String>,
    settings: &ObjectSettings,
) -> Result<ObjectLocator> {
    if let Some(path) = object {
        return ObjectLocator::parse(path);
    }

    ObjectLocator::new(
        bucket.unwrap_or_else(|| settings.bucket.clone()),
        key.unwrap_or_else(|| settings.key.clone()),
    )
}

/// Execute the decrypt-object command
pub async fn execute(cli: DecryptObjectCli) -> ExitCode {
    let formatter = Formatter::new(cli.global.output_config());

    let config = match cli.global.load_config() {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let locator = match resolve_locator(cli.object.as_deref(), cli.bucket, cli.key, &config.object) {
        Ok(l) => l,
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

    formatter.detail("S3/KMS client", env!("CARGO_PKG_VERSION"));
    formatter.detail(
        "AWS Region",
        sdk_config.region().map(|r| r.as_ref()).unwrap_or("-"),
    );
    formatter.detail("Bucket", &locator.bucket);
    formatter.detail("Key", &locator.key);
    formatter.detail("On error", config.object.on_error.as_str());

    let store = S3Client::new(&sdk_config);
    let keys = KmsClient::new(&sdk_config);

    let plaintext = match run(&store, &keys, &locator, config.object.on_error, &formatter).await {
        Ok(Some(p)) => p,
        Ok(None) => return ExitCode::Success,
        Err(code) => return code,
    };

    emit(
        &plaintext,
        &locator,
        cli.output.as_deref(),
        &formatter,
        &mut io::stdout(),
    )
    .await
}

/// Run the fetch/decrypt pipeline
///
/// `Ok(None)` means a remote failure was suppressed by policy; `Err` carries
/// the exit code for a propagated failure.
pub async fn run<S, K>(
    store: &S,
    keys: &K,
    locator: &ObjectLocator,
    policy: ErrorPolicy,
    formatter: &Formatter,
) -> std::result::Result<Option<PlaintextResult>, ExitCode>
where
    S: ObjectStore + ?Sized,
    K: KeyService + ?Sized,
{
    let pipeline = DecryptPipeline::new(store, keys, policy);

    match pipeline.run(locator).await {
        Ok(Some(plaintext)) => Ok(Some(plaintext)),
        Ok(None) => {
            if formatter.is_json() {
                formatter.json(&DecryptOutput::suppressed(locator));
            } else {
                formatter.warning(&format!(
                    "Failed to decrypt '{locator}'; error suppressed (on_error = suppress)"
                ));
            }
            Ok(None)
        }
        Err(e) => {
            formatter.error(&format!("Failed to decrypt '{locator}': {e}"));
            Err(ExitCode::from_error(&e))
        }
    }
}

/// Deliver the plaintext to `stdout` or to `destination`
pub async fn emit<W: Write>(
    plaintext: &PlaintextResult,
    locator: &ObjectLocator,
    destination: Option<&Path>,
    formatter: &Formatter,
    stdout: &mut W,
) -> ExitCode {
    if let Some(path) = destination {
        if let Err(e) = tokio::fs::write(path, &plaintext.bytes).await {
            formatter.error(&format!("Failed to write '{}': {e}", path.display()));
            return ExitCode::GeneralError;
        }
        tracing::debug!(path = %path.display(), bytes = plaintext.bytes.len(), "Wrote plaintext");
    }

    if formatter.is_json() {
        formatter.json(&DecryptOutput {
            status: "success",
            bucket: locator.bucket.clone(),
            key: locator.key.clone(),
            key_id: plaintext.key_id.clone(),
            size_bytes: Some(plaintext.bytes.len()),
            plaintext: match destination {
                Some(_) => None,
                None => plaintext.as_utf8().map(str::to_string),
            },
            output: destination.map(|p| p.display().to_string()),
        });
        return ExitCode::Success;
    }

    if let Some(path) = destination {
        formatter.success(&format!(
            "Wrote {} bytes of plaintext to '{}'",
            plaintext.bytes.len(),
            path.display()
        ));
        return ExitCode::Success;
    }

    // Write directly to stdout (not through formatter to preserve binary data)
    if let Err(e) = stdout.write_all(&plaintext.bytes).and_then(|()| stdout.flush()) {
        formatter.error(&format!("Failed to write to stdout: {e}"));
        return ExitCode::GeneralError;
    }

    ExitCode::Success
}
