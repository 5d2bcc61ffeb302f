use crate::client::Client;
use crate::error::Form3Error;
use crate::models::{Account, AccountFilter, Resource};
use crate::page::Page;
use uuid::Uuid;

pub const ACCOUNTS_PATH: &str = "v1/organisation/accounts";
pub const ACCOUNTS_TYPE: &str = "accounts";

/// Account resources of the organisation API.
#[derive(Debug, Clone)]
pub struct Accounts {
    client: Client,
}

impl Accounts {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, account: &Account) -> Result<Resource<Account>, Form3Error> {
        self.client
            .create(ACCOUNTS_PATH, ACCOUNTS_TYPE, account)
            .await
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Resource<Account>, Form3Error> {
        self.client.fetch(ACCOUNTS_PATH, id).await
    }

    /// Fetch page `page_number` (zero based) of `page_size` accounts,
    /// optionally narrowed by `filter`.
    pub async fn list(
        &self,
        page_number: u32,
        page_size: u32,
        filter: Option<&AccountFilter>,
    ) -> Result<Page<Account>, Form3Error> {
        self.client
            .list(ACCOUNTS_PATH, page_number, page_size, filter)
            .await
    }

    /// Delete account `id`; `version` must be the account's current version.
    pub async fn delete(&self, id: Uuid, version: i64) -> Result<(), Form3Error> {
        self.client.delete(ACCOUNTS_PATH, id, version).await
    }
}
