use anyhow::Result;
use clap::{ArgAction, Parser};

use crate::commands::AuditCommand;

#[derive(Debug, Clone, Parser)]
#[command(name = "org-role-audit", version, about = "Export the IAM roles of every account in an AWS organization to a spreadsheet", long_about = None)]
pub struct Cli {
    #[arg(
        short = 'p',
        long,
        help = "AWS profile providing the base identity (default credential chain if omitted)"
    )]
    pub profile: Option<String>,

    #[arg(short = 'v', long, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(flatten)]
    pub audit: AuditCommand,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        self.audit.execute(self.profile.as_deref()).await
    }
}
