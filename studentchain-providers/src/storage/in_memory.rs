use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::common_models::account::{Account, AccountId};
use crate::common_models::record::{Record, RecordId, RecordStatus};
use crate::storage::{AccountStorage, OwnedRecord, StorageError};

pub struct InMemoryStorage {
    accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
}

impl InMemoryStorage {
    pub fn new(accounts: HashMap<AccountId, Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }
}

#[async_trait]
impl AccountStorage for InMemoryStorage {
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, StorageError> {
        let accounts = self.accounts.lock().await;

        Ok(accounts.get(id).cloned())
    }

    async fn get_by_wallet(&self, address: &str) -> Result<Option<Account>, StorageError> {
        let accounts = self.accounts.lock().await;

        Ok(accounts
            .values()
            .find(|account| account.wallet_address.matches(address))
            .cloned())
    }

    async fn insert(&self, account: Account) -> Result<(), StorageError> {
        let mut accounts = self.accounts.lock().await;

        accounts.insert(account.id, account);

        Ok(())
    }

    async fn push_record(&self, owner: &AccountId, record: Record) -> Result<(), StorageError> {
        let mut accounts = self.accounts.lock().await;

        let account = accounts
            .get_mut(owner)
            .ok_or(StorageError::AccountNotFound(*owner))?;
        account.records.push(record);

        Ok(())
    }

    async fn find_record(&self, id: &RecordId) -> Result<Option<OwnedRecord>, StorageError> {
        let accounts = self.accounts.lock().await;

        Ok(accounts.values().find_map(|account| {
            account
                .records
                .iter()
                .find(|record| record.id == *id)
                .map(|record| OwnedRecord {
                    owner_id: account.id,
                    owner_wallet: account.wallet_address.clone(),
                    record: record.clone(),
                })
        }))
    }

    async fn update_record(&self, owner: &AccountId, record: Record) -> Result<(), StorageError> {
        let mut accounts = self.accounts.lock().await;

        let account = accounts
            .get_mut(owner)
            .ok_or(StorageError::AccountNotFound(*owner))?;
        let stored = account
            .records
            .iter_mut()
            .find(|stored| stored.id == record.id)
            .ok_or_else(|| StorageError::Update(format!("record `{}` not found", record.id)))?;
        *stored = record;

        Ok(())
    }

    async fn remove_record(
        &self,
        owner: &AccountId,
        id: &RecordId,
    ) -> Result<bool, StorageError> {
        let mut accounts = self.accounts.lock().await;

        let account = accounts
            .get_mut(owner)
            .ok_or(StorageError::AccountNotFound(*owner))?;
        let before = account.records.len();
        account.records.retain(|record| record.id != *id);

        Ok(account.records.len() != before)
    }

    async fn list_records_by_status(
        &self,
        statuses: &[RecordStatus],
    ) -> Result<Vec<OwnedRecord>, StorageError> {
        let accounts = self.accounts.lock().await;

        Ok(accounts
            .values()
            .flat_map(|account| {
                account
                    .records
                    .iter()
                    .filter(|record| statuses.contains(&record.status))
                    .map(|record| OwnedRecord {
                        owner_id: account.id,
                        owner_wallet: account.wallet_address.clone(),
                        record: record.clone(),
                    })
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::common_models::account::{AccountRole, WalletAddress};
    use crate::util::canonical::canonicalize;

    fn account(wallet: &str) -> Account {
        Account {
            id: AccountId::from(Uuid::new_v4()),
            email: "student@blockchain.local".to_string(),
            wallet_address: WalletAddress::new(wallet),
            role: AccountRole::Student,
            created_date: OffsetDateTime::now_utc(),
            records: vec![],
        }
    }

    fn record(status: RecordStatus) -> Record {
        Record {
            id: RecordId::from(Uuid::new_v4()),
            file_name: "diploma.pdf".to_string(),
            content_hash: canonicalize("abcd"),
            file_data: vec![1, 2, 3],
            status,
            verified_by: None,
            created_date: OffsetDateTime::now_utc(),
            verified_date: None,
        }
    }

    #[tokio::test]
    async fn test_wallet_lookup_is_case_insensitive() {
        let storage = InMemoryStorage::new(HashMap::new());
        let account = account("0xAbCd1234");
        storage.insert(account.clone()).await.unwrap();

        let found = storage.get_by_wallet("0XABCD1234").await.unwrap();

        assert_eq!(found, Some(account));
    }

    #[tokio::test]
    async fn test_push_find_remove_record() {
        let storage = InMemoryStorage::new(HashMap::new());
        let account = account("0xabcd");
        let owner_id = account.id;
        storage.insert(account).await.unwrap();

        let record = record(RecordStatus::Pending);
        let record_id = record.id;
        storage.push_record(&owner_id, record).await.unwrap();

        let found = storage.find_record(&record_id).await.unwrap().unwrap();
        assert_eq!(found.owner_id, owner_id);
        assert_eq!(found.record.status, RecordStatus::Pending);

        assert!(storage.remove_record(&owner_id, &record_id).await.unwrap());
        assert!(storage.find_record(&record_id).await.unwrap().is_none());
        // Second removal reports the record as already gone.
        assert!(!storage.remove_record(&owner_id, &record_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_records_by_status_spans_accounts() {
        let storage = InMemoryStorage::new(HashMap::new());
        let first = account("0x01");
        let second = account("0x02");
        let (first_id, second_id) = (first.id, second.id);
        storage.insert(first).await.unwrap();
        storage.insert(second).await.unwrap();

        storage
            .push_record(&first_id, record(RecordStatus::Pending))
            .await
            .unwrap();
        storage
            .push_record(&second_id, record(RecordStatus::Verified))
            .await
            .unwrap();
        storage
            .push_record(&second_id, record(RecordStatus::Revoked))
            .await
            .unwrap();

        let pending = storage
            .list_records_by_status(&[RecordStatus::Pending])
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].owner_id, first_id);

        let approved = storage
            .list_records_by_status(&[RecordStatus::Verified, RecordStatus::Revoked])
            .await
            .unwrap();
        assert_eq!(approved.len(), 2);
    }

    #[tokio::test]
    async fn test_push_record_unknown_account() {
        let storage = InMemoryStorage::new(HashMap::new());
        let unknown = AccountId::from(Uuid::new_v4());

        let result = storage.push_record(&unknown, record(RecordStatus::Pending)).await;

        assert!(matches!(result, Err(StorageError::AccountNotFound(_))));
    }
}
