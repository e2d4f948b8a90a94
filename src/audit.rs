//! Runs the audit: management role -> account listing -> per-account
//! inspection -> export.
//!
//! Failures for one member account are contained in the per-account
//! inspection and only remove that account from the report. Failures before
//! or after the account loop abort the run.

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::{
    config::AuditConfig,
    error::ProviderError,
    export,
    provider::{AccountDirectory, AccountRef, CloudProvider, RoleInspector, RoleRecord},
    report::Report,
};

/// Account that was skipped because its inspection failed
#[derive(Debug)]
pub struct AccountFailure {
    pub account: AccountRef,
    pub role_arn: String,
    pub error: ProviderError,
}

/// Outcome of the account loop
#[derive(Debug, Default)]
pub struct AuditSummary {
    pub accounts_total: usize,
    pub accounts_succeeded: usize,
    pub rows: usize,
    pub failures: Vec<AccountFailure>,
}

impl AuditSummary {
    pub fn failed_account_ids(&self) -> Vec<&str> {
        self.failures
            .iter()
            .map(|failure| failure.account.id.as_str())
            .collect()
    }
}

pub struct Auditor<P> {
    provider: P,
    config: AuditConfig,
}

impl<P: CloudProvider> Auditor<P> {
    pub fn new(provider: P, config: AuditConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Collect the report and write it to the configured output path
    pub async fn run(&self) -> Result<AuditSummary> {
        let (report, summary) = self.collect().await?;

        info!(
            "Exporting {} rows to {}",
            report.len(),
            self.config.output_path.display()
        );
        export::write(&report, &self.config.output_path).context("Failed to export report")?;

        Ok(summary)
    }

    /// Walk every account of the organization without exporting
    pub async fn collect(&self) -> Result<(Report, AuditSummary)> {
        let accounts = self.list_accounts().await?;

        let mut report = Report::new();
        let mut summary = AuditSummary {
            accounts_total: accounts.len(),
            ..AuditSummary::default()
        };

        for account in accounts {
            let role_arn = self.config.member_role_arn(&account.id);
            info!("Auditing account {} ({})", account.id, account.name);

            match self.inspect_account(&role_arn).await {
                Ok(roles) => {
                    info!("Found {} roles in account {}", roles.len(), account.id);
                    for role in &roles {
                        report = report.append_row(role, &account.id, &account.name);
                    }
                    summary.accounts_succeeded += 1;
                }
                Err(err) => {
                    error!(
                        "Skipping account {} via role {}: {}",
                        account.id, role_arn, err
                    );
                    summary.failures.push(AccountFailure {
                        account,
                        role_arn,
                        error: err,
                    });
                }
            }
        }

        summary.rows = report.len();
        if !summary.failures.is_empty() {
            warn!(
                "{} of {} accounts were skipped: {}",
                summary.failures.len(),
                summary.accounts_total,
                summary.failed_account_ids().join(", ")
            );
        }

        Ok((report, summary))
    }

    async fn list_accounts(&self) -> Result<Vec<AccountRef>> {
        let management_arn = self.config.management_role_arn();
        info!("Assuming management role {}", management_arn);

        let credentials = self
            .provider
            .assume_role(&management_arn)
            .await
            .with_context(|| format!("Failed to assume management role {management_arn}"))?;

        let accounts = self
            .provider
            .organizations(&credentials)
            .list_accounts()
            .await
            .context("Failed to list organization accounts")?;

        info!("Organization has {} accounts", accounts.len());
        Ok(accounts)
    }

    /// Assume the read-only role and inspect every role of one account.
    /// The first failing call aborts the account.
    async fn inspect_account(&self, role_arn: &str) -> Result<Vec<RoleRecord>, ProviderError> {
        let credentials = self.provider.assume_role(role_arn).await?;
        let iam = self.provider.iam(&credentials);

        let handles = iam.list_roles().await?;
        let mut roles = Vec::with_capacity(handles.len());
        for handle in &handles {
            roles.push(iam.describe_role(handle).await?);
        }

        Ok(roles)
    }
}
