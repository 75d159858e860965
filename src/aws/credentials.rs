use aws_config::{
    BehaviorVersion, Region, SdkConfig,
    default_provider::credentials::DefaultCredentialsChain, profile::ProfileFileCredentialsProvider,
    retry::RetryConfig,
};
use aws_credential_types::provider::SharedCredentialsProvider;
use tracing::{debug, info};

use crate::constants::DEFAULT_AWS_REGION;

/// Treat an empty or blank profile name the same as no profile at all
pub fn normalize_profile(profile: Option<&str>) -> Option<&str> {
    profile.map(str::trim).filter(|name| !name.is_empty())
}

/// Build the credentials provider for the caller identity.
/// A named profile reads the shared credentials file; otherwise the SDK default chain applies.
pub async fn credentials_provider(profile: Option<&str>) -> SharedCredentialsProvider {
    match normalize_profile(profile) {
        Some(name) => {
            debug!("Using credentials from profile: {}", name);
            SharedCredentialsProvider::new(
                ProfileFileCredentialsProvider::builder()
                    .profile_name(name)
                    .build(),
            )
        }
        None => {
            debug!("Using default credential provider chain");
            SharedCredentialsProvider::new(DefaultCredentialsChain::builder().build().await)
        }
    }
}

/// Load the SDK configuration used for the STS call.
///
/// Nothing is validated here. A profile that does not exist only fails once STS
/// tries to resolve credentials for the request.
pub async fn load_sdk_config(profile: Option<&str>) -> SdkConfig {
    let profile = normalize_profile(profile);
    let provider = credentials_provider(profile).await;

    let loader = || {
        let loader = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(provider.clone())
            .retry_config(RetryConfig::disabled());
        match profile {
            Some(name) => loader.profile_name(name),
            None => loader,
        }
    };

    // Priority: ENV vars -> Config file -> EC2 metadata -> DEFAULT_AWS_REGION
    let loaded = loader().load().await;
    match loaded.region() {
        Some(region) => {
            info!("Using region: {}", region);
            loaded
        }
        None => {
            info!(
                "No region configured, using default {} for STS",
                DEFAULT_AWS_REGION
            );
            loader()
                .region(Region::new(DEFAULT_AWS_REGION))
                .load()
                .await
        }
    }
}
