use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::{Credentials, provider::SharedCredentialsProvider};
use tracing::{debug, info};

use crate::{
    constants::{ASSUMED_CREDENTIALS_PROVIDER, DEFAULT_AWS_REGION},
    provider::TemporaryCredentials,
};

/// Load the base identity the tool starts from.
/// Priority: ENV vars -> Config file -> EC2 metadata -> DEFAULT_AWS_REGION
pub async fn load_base_config(profile: Option<&str>) -> SdkConfig {
    let loader = || {
        let defaults = aws_config::defaults(BehaviorVersion::latest());
        match profile {
            Some(name) => defaults.profile_name(name),
            None => defaults,
        }
    };

    let loaded = loader().load().await;

    match loaded.region() {
        Some(region) => {
            info!("Using region: {}", region);
            loaded
        }
        None => {
            info!(
                "No region configured, using default {}",
                DEFAULT_AWS_REGION
            );
            loader()
                .region(Region::new(DEFAULT_AWS_REGION))
                .load()
                .await
        }
    }
}

/// Derive a config that acts with assumed credentials instead of the base
/// identity. Region and retry settings are kept from `base`.
pub fn scoped_config(base: &SdkConfig, creds: &TemporaryCredentials) -> SdkConfig {
    debug!("Scoping client to access key {}", creds.access_key_id);

    let provider = Credentials::new(
        &creds.access_key_id,
        &creds.secret_access_key,
        Some(creds.session_token.clone()),
        None,
        ASSUMED_CREDENTIALS_PROVIDER,
    );

    base.to_builder()
        .credentials_provider(SharedCredentialsProvider::new(provider))
        .build()
}
