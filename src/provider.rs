//! Narrow views of the cloud provider used by the audit.
//!
//! The orchestrator only ever talks to these traits, so the AWS-backed
//! implementation in [`crate::aws`] can be swapped for an in-memory one.

use async_trait::async_trait;
use aws_smithy_types::DateTime;
use serde_json::Value;

use crate::error::ProviderError;

/// Member account of an organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRef {
    pub id: String,
    pub name: String,
}

/// Temporary credentials returned by a role assumption
#[derive(Clone)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<DateTime>,
}

impl std::fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// A role as returned by the role listing, before inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHandle {
    pub name: String,
    /// Trust policy as delivered by IAM (URL-encoded JSON)
    pub trust_policy_document: Option<String>,
}

/// Inspected IAM role
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRecord {
    pub name: String,
    pub trust_statements: Vec<Value>,
    pub policy_names: Vec<String>,
}

#[async_trait]
pub trait CredentialBroker: Send + Sync {
    /// Exchange the base identity for credentials scoped to `role_arn`.
    /// Every call performs a fresh assumption.
    async fn assume_role(&self, role_arn: &str) -> Result<TemporaryCredentials, ProviderError>;
}

#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Every account of the organization, in listing order
    async fn list_accounts(&self) -> Result<Vec<AccountRef>, ProviderError>;
}

#[async_trait]
pub trait RoleInspector: Send + Sync {
    /// Every IAM role visible in the account, in listing order
    async fn list_roles(&self) -> Result<Vec<RoleHandle>, ProviderError>;

    /// Trust statements and attached managed policy names of one role
    async fn describe_role(&self, handle: &RoleHandle) -> Result<RoleRecord, ProviderError>;
}

/// Entry point the orchestrator is generic over
pub trait CloudProvider: CredentialBroker {
    type Accounts: AccountDirectory;
    type Roles: RoleInspector;

    /// Organizations client acting with `credentials`
    fn organizations(&self, credentials: &TemporaryCredentials) -> Self::Accounts;

    /// IAM client acting with `credentials`
    fn iam(&self, credentials: &TemporaryCredentials) -> Self::Roles;
}
