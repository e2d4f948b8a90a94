/// Account that owns the organization and hosts the account-listing role
pub const DEFAULT_MANAGEMENT_ACCOUNT_ID: &str = "000000000000";

/// Role in the management account allowed to call organizations:ListAccounts
pub const DEFAULT_MANAGEMENT_ROLE_NAME: &str = "list-accounts-role";

/// Read-only role deployed in every member account
pub const DEFAULT_MEMBER_ROLE_NAME: &str = "read-only-role";

/// Session name attached to every sts:AssumeRole call
pub const DEFAULT_ROLE_SESSION_NAME: &str = "all-iam-roles";

/// Spreadsheet written at the end of the run
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "all-role-details.xlsx";

/// Default AWS region when none is configured. STS, IAM and Organizations
/// all answer on their global endpoints from here.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Provider name recorded on credentials obtained through role assumption
pub const ASSUMED_CREDENTIALS_PROVIDER: &str = "org-role-audit";
