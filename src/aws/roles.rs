use async_trait::async_trait;
use aws_sdk_iam::Client as IamClient;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::ProviderError,
    provider::{RoleHandle, RoleInspector, RoleRecord},
};

const LIST_ROLES: &str = "iam:ListRoles";
const LIST_ATTACHED_ROLE_POLICIES: &str = "iam:ListAttachedRolePolicies";
const TRUST_POLICY: &str = "iam:AssumeRolePolicyDocument";

/// IAM role inspection inside one member account
#[derive(Clone)]
pub struct IamRoleInspector {
    client: IamClient,
}

impl IamRoleInspector {
    pub fn new(client: IamClient) -> Self {
        Self { client }
    }

    async fn attached_policy_names(&self, role_name: &str) -> Result<Vec<String>, ProviderError> {
        let mut names = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let page = self
                .client
                .list_attached_role_policies()
                .role_name(role_name)
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|err| {
                    ProviderError::from_sdk(LIST_ATTACHED_ROLE_POLICIES, role_name, &err)
                })?;

            names.extend(
                page.attached_policies()
                    .iter()
                    .filter_map(|policy| policy.policy_name())
                    .map(String::from),
            );

            match (page.is_truncated(), page.marker()) {
                (true, Some(next)) => marker = Some(next.to_string()),
                _ => break,
            }
        }

        Ok(names)
    }
}

#[async_trait]
impl RoleInspector for IamRoleInspector {
    async fn list_roles(&self) -> Result<Vec<RoleHandle>, ProviderError> {
        let mut roles = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let page = self
                .client
                .list_roles()
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|err| ProviderError::from_sdk(LIST_ROLES, "account", &err))?;

            roles.extend(page.roles().iter().map(|role| RoleHandle {
                name: role.role_name().to_string(),
                trust_policy_document: role.assume_role_policy_document().map(String::from),
            }));

            match (page.is_truncated(), page.marker()) {
                (true, Some(next)) => marker = Some(next.to_string()),
                _ => break,
            }
        }

        debug!("Listed {} IAM roles", roles.len());
        Ok(roles)
    }

    async fn describe_role(&self, handle: &RoleHandle) -> Result<RoleRecord, ProviderError> {
        debug!("Inspecting role {}", handle.name);

        let trust_statements = trust_statements(handle.trust_policy_document.as_deref())?;
        let policy_names = self.attached_policy_names(&handle.name).await?;

        Ok(RoleRecord {
            name: handle.name.clone(),
            trust_statements,
            policy_names,
        })
    }
}

/// Extract the `Statement` list of a trust policy document.
///
/// IAM returns the document URL-encoded. A single statement object becomes a
/// one-element list; a missing document or `Statement` yields an empty list.
pub fn trust_statements(document: Option<&str>) -> Result<Vec<Value>, ProviderError> {
    let Some(raw) = document else {
        return Ok(Vec::new());
    };

    let decoded = urlencoding::decode(raw).map_err(|e| {
        ProviderError::malformed(TRUST_POLICY, format!("invalid URL encoding: {e}"))
    })?;

    let policy: Value = serde_json::from_str(&decoded)
        .map_err(|e| ProviderError::malformed(TRUST_POLICY, format!("invalid JSON: {e}")))?;

    let Value::Object(mut policy) = policy else {
        return Err(ProviderError::malformed(
            TRUST_POLICY,
            "policy document is not a JSON object",
        ));
    };

    Ok(match policy.remove("Statement") {
        Some(Value::Array(statements)) => statements,
        Some(Value::Null) | None => Vec::new(),
        Some(statement) => vec![statement],
    })
}
