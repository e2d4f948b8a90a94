use async_trait::async_trait;
use aws_sdk_sts::Client as StsClient;
use aws_smithy_types::date_time::Format;
use tracing::{debug, info};

use crate::{
    error::ProviderError,
    provider::{CredentialBroker, TemporaryCredentials},
};

const OPERATION: &str = "sts:AssumeRole";

/// Credential broker backed by sts:AssumeRole
#[derive(Clone)]
pub struct StsBroker {
    client: StsClient,
    session_name: String,
}

impl StsBroker {
    pub fn new(client: StsClient, session_name: impl Into<String>) -> Self {
        Self {
            client,
            session_name: session_name.into(),
        }
    }
}

#[async_trait]
impl CredentialBroker for StsBroker {
    async fn assume_role(&self, role_arn: &str) -> Result<TemporaryCredentials, ProviderError> {
        info!("Calling AWS STS AssumeRole");
        debug!("Role ARN: {}", role_arn);
        debug!("Session name: {}", self.session_name);

        let response = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(&self.session_name)
            .send()
            .await
            .map_err(|err| ProviderError::from_sdk(OPERATION, role_arn, &err))?;

        let sts_creds = response
            .credentials()
            .ok_or_else(|| ProviderError::malformed(OPERATION, "AWS STS returned no credentials"))?;

        let expiration = *sts_creds.expiration();
        debug!(
            "Credentials for {} expire at {}",
            role_arn,
            expiration
                .fmt(Format::DateTime)
                .unwrap_or_else(|_| "unknown".to_string())
        );

        Ok(TemporaryCredentials {
            access_key_id: sts_creds.access_key_id().to_string(),
            secret_access_key: sts_creds.secret_access_key().to_string(),
            session_token: sts_creds.session_token().to_string(),
            expiration: Some(expiration),
        })
    }
}
