//! Wallet-based account lookup with auto-registration.

use std::sync::Arc;

use studentchain_providers::common_models::account::{
    Account, AccountId, AccountRole, WalletAddress,
};
use studentchain_providers::storage::AccountStorage;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::service::error::AccountServiceError;

pub struct AccountService {
    storage: Arc<dyn AccountStorage>,
}

impl AccountService {
    pub fn new(storage: Arc<dyn AccountStorage>) -> Self {
        Self { storage }
    }

    /// Logs in by wallet address, case-insensitively. A previously unseen
    /// address is auto-registered as a student account with a placeholder
    /// email derived from the address. Accounts are never deleted.
    pub async fn wallet_login(&self, address: &str) -> Result<Account, AccountServiceError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AccountServiceError::Validation(
                "missing wallet address".to_string(),
            ));
        }

        if let Some(account) = self.storage.get_by_wallet(address).await? {
            return Ok(account);
        }

        let wallet_address = WalletAddress::new(address);
        let prefix = &wallet_address.as_str()[..wallet_address.as_str().len().min(6)];
        let account = Account {
            id: AccountId::from(Uuid::new_v4()),
            email: format!("{prefix}@blockchain.local"),
            wallet_address,
            role: AccountRole::Student,
            created_date: OffsetDateTime::now_utc(),
            records: vec![],
        };

        tracing::info!(
            "auto-registered account {} for wallet {}",
            account.id,
            account.wallet_address
        );
        self.storage.insert(account.clone()).await?;

        Ok(account)
    }
}
