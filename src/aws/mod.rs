use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_iam::Client as IamClient;
use aws_sdk_organizations::Client as OrganizationsClient;
use aws_sdk_sts::Client as StsClient;

use crate::{
    error::ProviderError,
    provider::{CloudProvider, CredentialBroker, TemporaryCredentials},
};

pub mod credentials;
pub mod organizations;
pub mod roles;
pub mod sts;

pub use organizations::OrganizationsDirectory;
pub use roles::IamRoleInspector;
pub use sts::StsBroker;

/// The AWS-backed provider: STS for role assumption, Organizations and IAM
/// clients built from the assumed credentials.
#[derive(Clone)]
pub struct AwsProvider {
    base: SdkConfig,
    broker: StsBroker,
}

impl AwsProvider {
    /// Resolve the base identity (optionally from a named profile) and set up
    /// STS with it.
    pub async fn load(profile: Option<&str>, session_name: impl Into<String>) -> Self {
        let base = credentials::load_base_config(profile).await;
        Self::from_config(base, session_name)
    }

    pub fn from_config(base: SdkConfig, session_name: impl Into<String>) -> Self {
        let broker = StsBroker::new(StsClient::new(&base), session_name);
        Self { base, broker }
    }
}

#[async_trait]
impl CredentialBroker for AwsProvider {
    async fn assume_role(&self, role_arn: &str) -> Result<TemporaryCredentials, ProviderError> {
        self.broker.assume_role(role_arn).await
    }
}

impl CloudProvider for AwsProvider {
    type Accounts = OrganizationsDirectory;
    type Roles = IamRoleInspector;

    fn organizations(&self, credentials: &TemporaryCredentials) -> Self::Accounts {
        let config = credentials::scoped_config(&self.base, credentials);
        OrganizationsDirectory::new(OrganizationsClient::new(&config))
    }

    fn iam(&self, credentials: &TemporaryCredentials) -> Self::Roles {
        let config = credentials::scoped_config(&self.base, credentials);
        IamRoleInspector::new(IamClient::new(&config))
    }
}
