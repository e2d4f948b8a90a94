use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::{
    audit::Auditor,
    aws::AwsProvider,
    config::AuditConfig,
    constants::{
        DEFAULT_MANAGEMENT_ACCOUNT_ID, DEFAULT_MANAGEMENT_ROLE_NAME, DEFAULT_MEMBER_ROLE_NAME,
        DEFAULT_OUTPUT_FILE_NAME, DEFAULT_ROLE_SESSION_NAME,
    },
};

#[derive(Debug, Clone, Args)]
pub struct AuditCommand {
    #[arg(
        long,
        default_value = DEFAULT_MANAGEMENT_ACCOUNT_ID,
        help = "Management account that owns the organization"
    )]
    pub management_account_id: String,

    #[arg(
        long,
        default_value = DEFAULT_MANAGEMENT_ROLE_NAME,
        help = "Role in the management account allowed to list accounts"
    )]
    pub management_role: String,

    #[arg(
        long,
        default_value = DEFAULT_MEMBER_ROLE_NAME,
        help = "Read-only role assumed in every member account"
    )]
    pub member_role: String,

    #[arg(
        long,
        default_value = DEFAULT_ROLE_SESSION_NAME,
        help = "Session name used for every role assumption"
    )]
    pub session_name: String,

    #[arg(
        short = 'o',
        long,
        default_value = DEFAULT_OUTPUT_FILE_NAME,
        help = "Spreadsheet to write (overwritten if present)"
    )]
    pub output: PathBuf,
}

impl Default for AuditCommand {
    fn default() -> Self {
        let config = AuditConfig::default();
        Self {
            management_account_id: config.management_account_id,
            management_role: config.management_role_name,
            member_role: config.member_role_name,
            session_name: config.session_name,
            output: config.output_path,
        }
    }
}

impl AuditCommand {
    pub fn config(&self) -> AuditConfig {
        AuditConfig {
            management_account_id: self.management_account_id.clone(),
            management_role_name: self.management_role.clone(),
            member_role_name: self.member_role.clone(),
            session_name: self.session_name.clone(),
            output_path: self.output.clone(),
        }
    }

    pub async fn execute(self, profile: Option<&str>) -> Result<()> {
        let config = self.config();
        info!(
            "Starting IAM role audit from management account {}",
            config.management_account_id
        );

        let provider = AwsProvider::load(profile, config.session_name.clone()).await;
        let auditor = Auditor::new(provider, config);
        let summary = auditor.run().await?;

        println!(
            "Audited {}/{} accounts, {} roles written to {}",
            summary.accounts_succeeded,
            summary.accounts_total,
            summary.rows,
            auditor.config().output_path.display()
        );
        for failure in &summary.failures {
            println!(
                "Skipped account {} ({}): {}",
                failure.account.id, failure.account.name, failure.error
            );
        }

        Ok(())
    }
}
