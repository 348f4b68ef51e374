//! Shared SDK configuration
//!
//! All three clients are built from one [`SdkConfig`], loaded once per run.

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};

use cloudcall_core::Result;
use cloudcall_core::config::ServiceSettings;

/// Region used when neither the caller nor the environment names one
pub const FALLBACK_REGION: &str = "us-west-2";

/// Load the SDK configuration for the given settings
///
/// Region order: explicit setting, the AWS default provider chain
/// (environment, profile, IMDS), then [`FALLBACK_REGION`]. Credentials
/// always come from the default provider chain.
pub async fn load_sdk_config(settings: &ServiceSettings) -> Result<SdkConfig> {
    // Validate only; the SDK is given the endpoint as written
    settings.endpoint_url()?;

    let region_provider = RegionProviderChain::first_try(settings.region.clone().map(Region::new))
        .or_default_provider()
        .or_else(Region::new(FALLBACK_REGION));

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

    if let Some(endpoint) = settings.endpoint.as_deref() {
        loader = loader.endpoint_url(endpoint);
    }

    let config = loader.load().await;

    tracing::debug!(
        region = config.region().map(|r| r.as_ref()).unwrap_or("-"),
        endpoint = settings.endpoint.as_deref().unwrap_or("-"),
        "Loaded SDK config"
    );

    Ok(config)
}
