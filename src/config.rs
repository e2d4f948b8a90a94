use std::path::PathBuf;

use crate::constants::{
    DEFAULT_MANAGEMENT_ACCOUNT_ID, DEFAULT_MANAGEMENT_ROLE_NAME, DEFAULT_MEMBER_ROLE_NAME,
    DEFAULT_OUTPUT_FILE_NAME, DEFAULT_ROLE_SESSION_NAME,
};

/// Fixed names the audit runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub management_account_id: String,
    pub management_role_name: String,
    pub member_role_name: String,
    pub session_name: String,
    pub output_path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            management_account_id: DEFAULT_MANAGEMENT_ACCOUNT_ID.to_string(),
            management_role_name: DEFAULT_MANAGEMENT_ROLE_NAME.to_string(),
            member_role_name: DEFAULT_MEMBER_ROLE_NAME.to_string(),
            session_name: DEFAULT_ROLE_SESSION_NAME.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE_NAME),
        }
    }
}

impl AuditConfig {
    /// ARN of the organization listing role in the management account
    pub fn management_role_arn(&self) -> String {
        role_arn(&self.management_account_id, &self.management_role_name)
    }

    /// ARN of the read-only role in a member account
    pub fn member_role_arn(&self, account_id: &str) -> String {
        role_arn(account_id, &self.member_role_name)
    }
}

/// Build `arn:aws:iam::<account>:role/<name>`. The result is not validated
/// here; AWS rejects malformed ARNs.
pub fn role_arn(account_id: &str, role_name: &str) -> String {
    format!("arn:aws:iam::{account_id}:role/{role_name}")
}
