#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use calamine::{Reader, Xlsx, open_workbook};
use org_role_audit::{
    config::AuditConfig,
    error::ProviderError,
    provider::{
        AccountDirectory, AccountRef, CloudProvider, CredentialBroker, RoleHandle, RoleInspector,
        RoleRecord, TemporaryCredentials,
    },
};
use serde_json::{Value, json};

pub const MANAGEMENT_ACCOUNT_ID: &str = "000000000000";

/// A role living in the fake backend
#[derive(Debug, Clone)]
pub struct FakeRole {
    pub name: String,
    pub trust_statements: Vec<Value>,
    pub policy_names: Vec<String>,
    pub broken: bool,
}

impl FakeRole {
    pub fn new(name: &str, policies: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            trust_statements: vec![trust_statement(MANAGEMENT_ACCOUNT_ID)],
            policy_names: policies.iter().map(|p| p.to_string()).collect(),
            broken: false,
        }
    }

    /// A role whose attached-policy listing fails
    pub fn broken(name: &str) -> Self {
        Self {
            broken: true,
            ..Self::new(name, &[])
        }
    }
}

pub fn trust_statement(account_id: &str) -> Value {
    json!({
        "Effect": "Allow",
        "Principal": {"AWS": format!("arn:aws:iam::{account_id}:root")},
        "Action": "sts:AssumeRole"
    })
}

#[derive(Debug, Default)]
struct Backend {
    accounts: Vec<AccountRef>,
    roles: HashMap<String, Vec<FakeRole>>,
    denied_role_arns: HashSet<String>,
    account_listing_fails: bool,
    role_listing_fails: HashSet<String>,
}

/// In-memory organization. Credentials issued by the fake carry the account
/// id of the assumed role as their access key id.
#[derive(Debug, Clone, Default)]
pub struct FakeOrganization {
    backend: Arc<Backend>,
    assumed: Arc<Mutex<Vec<String>>>,
}

#[derive(Debug, Default)]
pub struct FakeOrganizationBuilder {
    backend: Backend,
}

impl FakeOrganization {
    pub fn builder() -> FakeOrganizationBuilder {
        FakeOrganizationBuilder::default()
    }

    /// Role ARNs passed to assume_role, in call order
    pub fn assumed_role_arns(&self) -> Vec<String> {
        self.assumed.lock().unwrap().clone()
    }
}

impl FakeOrganizationBuilder {
    pub fn account(mut self, id: &str, name: &str, roles: Vec<FakeRole>) -> Self {
        self.backend.accounts.push(AccountRef {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.backend.roles.insert(id.to_string(), roles);
        self
    }

    pub fn deny_role(mut self, role_arn: &str) -> Self {
        self.backend.denied_role_arns.insert(role_arn.to_string());
        self
    }

    pub fn fail_account_listing(mut self) -> Self {
        self.backend.account_listing_fails = true;
        self
    }

    pub fn fail_role_listing(mut self, account_id: &str) -> Self {
        self.backend.role_listing_fails.insert(account_id.to_string());
        self
    }

    pub fn build(self) -> FakeOrganization {
        FakeOrganization {
            backend: Arc::new(self.backend),
            assumed: Arc::default(),
        }
    }
}

fn account_of(role_arn: &str) -> String {
    role_arn.split(':').nth(4).unwrap_or_default().to_string()
}

#[async_trait]
impl CredentialBroker for FakeOrganization {
    async fn assume_role(&self, role_arn: &str) -> Result<TemporaryCredentials, ProviderError> {
        self.assumed.lock().unwrap().push(role_arn.to_string());

        if self.backend.denied_role_arns.contains(role_arn) {
            return Err(ProviderError::Authorization {
                target: role_arn.to_string(),
                message: "AccessDenied: not authorized to perform sts:AssumeRole".to_string(),
            });
        }

        Ok(TemporaryCredentials {
            access_key_id: account_of(role_arn),
            secret_access_key: "fake-secret".to_string(),
            session_token: "fake-token".to_string(),
            expiration: None,
        })
    }
}

impl CloudProvider for FakeOrganization {
    type Accounts = FakeAccounts;
    type Roles = FakeRoles;

    fn organizations(&self, _credentials: &TemporaryCredentials) -> Self::Accounts {
        FakeAccounts {
            backend: Arc::clone(&self.backend),
        }
    }

    fn iam(&self, credentials: &TemporaryCredentials) -> Self::Roles {
        FakeRoles {
            backend: Arc::clone(&self.backend),
            account_id: credentials.access_key_id.clone(),
        }
    }
}

pub struct FakeAccounts {
    backend: Arc<Backend>,
}

#[async_trait]
impl AccountDirectory for FakeAccounts {
    async fn list_accounts(&self) -> Result<Vec<AccountRef>, ProviderError> {
        if self.backend.account_listing_fails {
            return Err(ProviderError::Service {
                operation: "organizations:ListAccounts".to_string(),
                target: "organization".to_string(),
                message: "ServiceException: organization unavailable".to_string(),
            });
        }
        Ok(self.backend.accounts.clone())
    }
}

pub struct FakeRoles {
    backend: Arc<Backend>,
    account_id: String,
}

impl FakeRoles {
    fn roles(&self) -> &[FakeRole] {
        self.backend
            .roles
            .get(&self.account_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[async_trait]
impl RoleInspector for FakeRoles {
    async fn list_roles(&self) -> Result<Vec<RoleHandle>, ProviderError> {
        if self.backend.role_listing_fails.contains(&self.account_id) {
            return Err(ProviderError::Service {
                operation: "iam:ListRoles".to_string(),
                target: "account".to_string(),
                message: "Throttling: rate exceeded".to_string(),
            });
        }

        Ok(self
            .roles()
            .iter()
            .map(|role| RoleHandle {
                name: role.name.clone(),
                trust_policy_document: None,
            })
            .collect())
    }

    async fn describe_role(&self, handle: &RoleHandle) -> Result<RoleRecord, ProviderError> {
        let role = self
            .roles()
            .iter()
            .find(|role| role.name == handle.name)
            .ok_or_else(|| ProviderError::malformed("iam:GetRole", "unknown role"))?;

        if role.broken {
            return Err(ProviderError::Service {
                operation: "iam:ListAttachedRolePolicies".to_string(),
                target: role.name.clone(),
                message: "ServiceFailure: internal error".to_string(),
            });
        }

        Ok(RoleRecord {
            name: role.name.clone(),
            trust_statements: role.trust_statements.clone(),
            policy_names: role.policy_names.clone(),
        })
    }
}

/// Default config writing into `dir`
pub fn config_in(dir: &Path) -> AuditConfig {
    AuditConfig {
        output_path: dir.join("all-role-details.xlsx"),
        ..AuditConfig::default()
    }
}

pub fn member_arn(account_id: &str) -> String {
    format!("arn:aws:iam::{account_id}:role/read-only-role")
}

pub fn management_arn() -> String {
    format!("arn:aws:iam::{MANAGEMENT_ACCOUNT_ID}:role/list-accounts-role")
}

/// Cell texts of the first worksheet, header row included
pub fn read_sheet(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// Collects formatted tracing output for the current thread
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// Route this thread's events into the buffer until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(String::from)
            .collect()
    }
}
