use serde_json::Value;

use crate::provider::RoleRecord;

/// Column titles, in output order
pub const COLUMNS: [&str; 5] = [
    "Account ID",
    "Account Name",
    "Role Name",
    "Policy Name",
    "Trust Relationship",
];

/// One IAM role of one account
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub account_id: String,
    pub account_name: String,
    pub role_name: String,
    pub policy_names: Vec<String>,
    pub trust_statements: Vec<Value>,
}

impl ReportRow {
    /// Cell texts in [`COLUMNS`] order. List columns are rendered as compact
    /// JSON.
    pub fn cells(&self) -> [String; 5] {
        [
            self.account_id.clone(),
            self.account_name.clone(),
            self.role_name.clone(),
            Value::from(self.policy_names.clone()).to_string(),
            Value::Array(self.trust_statements.clone()).to_string(),
        ]
    }
}

/// Rows in enumeration order: accounts outer, roles inner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the report with one more row for `role` in the given account
    pub fn append_row(mut self, role: &RoleRecord, account_id: &str, account_name: &str) -> Self {
        self.rows.push(ReportRow {
            account_id: account_id.to_string(),
            account_name: account_name.to_string(),
            role_name: role.name.clone(),
            policy_names: role.policy_names.clone(),
            trust_statements: role.trust_statements.clone(),
        });
        self
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows contributed by one account
    pub fn rows_for<'a>(&'a self, account_id: &'a str) -> impl Iterator<Item = &'a ReportRow> {
        self.rows.iter().filter(move |row| row.account_id == account_id)
    }
}
