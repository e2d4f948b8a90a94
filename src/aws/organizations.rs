use async_trait::async_trait;
use aws_sdk_organizations::Client as OrganizationsClient;
use tracing::debug;

use crate::{
    error::ProviderError,
    provider::{AccountDirectory, AccountRef},
};

const OPERATION: &str = "organizations:ListAccounts";

/// Account listing through AWS Organizations
#[derive(Clone)]
pub struct OrganizationsDirectory {
    client: OrganizationsClient,
}

impl OrganizationsDirectory {
    pub fn new(client: OrganizationsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountDirectory for OrganizationsDirectory {
    async fn list_accounts(&self) -> Result<Vec<AccountRef>, ProviderError> {
        let mut accounts = Vec::new();
        let mut next_token: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            let page = self
                .client
                .list_accounts()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|err| ProviderError::from_sdk(OPERATION, "organization", &err))?;
            page_count += 1;

            for account in page.accounts() {
                let id = account
                    .id()
                    .ok_or_else(|| ProviderError::malformed(OPERATION, "account without an id"))?;
                accounts.push(AccountRef {
                    id: id.to_string(),
                    name: account.name().unwrap_or_default().to_string(),
                });
            }

            match page.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(
            "Listed {} accounts over {} pages",
            accounts.len(),
            page_count
        );
        Ok(accounts)
    }
}
