//! **StudentChain Core** is a library for managing student-submitted
//! document records and their anchoring on a public ledger.
//!
//! Students upload documents, school accounts approve, reject or revoke
//! them, and each approved document's content hash is recorded on a ledger
//! smart contract so third parties can verify authenticity from a QR code
//! without trusting the application database.
//!
//! ## Repository structure
//!
//! The library consists of three crates:
//!
//! * **Providers**: the data model, hash canonicalization, the ledger
//!   client, account storage and the reconciliation layer.
//! * **Crypto**: content hashing, delimited in its own crate so the digest
//!   primitive can be audited independently.
//! * **Core**: a service layer orchestrating the providers — account
//!   auto-registration, the record lifecycle state machine, and the public
//!   verification path.
//!
//! ## Getting started
//!
//! Initialize the core (`None` uses the default configuration):
//!
//! ```ignore rust
//! let core = StudentChainCore::new(None, Arc::new(ReqwestClient::default())).unwrap();
//! ```
//!
//! Then start using the services, e.g.:
//!
//! ```ignore rust
//! let account = core.account_service.wallet_login("0xAbC…").await?;
//! let hash = core.hasher.hash_hex(&file_bytes)?;
//! let record_id = core
//!     .record_service
//!     .submit(&account.id, "diploma.pdf", &hash, file_bytes)
//!     .await?;
//! ```

use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

use studentchain_crypto::imp::hasher::sha256::SHA256;
use studentchain_crypto::Hasher;
use studentchain_providers::http_client::imp::reqwest_client::ReqwestClient;
use studentchain_providers::http_client::HttpClient;
use studentchain_providers::ledger::imp::rpc_client::{JsonRpcLedgerClient, Params};
use studentchain_providers::reconciliation::status_cache::StatusCache;
use studentchain_providers::reconciliation::LedgerReconciler;
use studentchain_providers::storage::in_memory::InMemoryStorage;

use config::CoreConfig;
use service::account_service::AccountService;
use service::record_service::RecordService;
use service::verification_service::VerificationService;

pub mod config;
pub mod service;

pub struct StudentChainCore {
    pub account_service: AccountService,
    pub record_service: RecordService,
    pub verification_service: VerificationService,
    /// Digest used for file ingestion; always computed over the raw
    /// uploaded bytes.
    pub hasher: Arc<dyn Hasher>,
}

impl Default for StudentChainCore {
    fn default() -> Self {
        Self::new(None, Arc::new(ReqwestClient::default())).unwrap()
    }
}

impl StudentChainCore {
    pub fn new(
        config: Option<CoreConfig>,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self, Box<dyn Error>> {
        let config = config.unwrap_or_default();

        let hasher: Arc<dyn Hasher> = Arc::new(SHA256 {});

        let storage = Arc::new(InMemoryStorage::new(HashMap::new()));

        // initialize ledger client
        let ledger = Arc::new(JsonRpcLedgerClient::new(
            client,
            Params {
                rpc_url: config.ledger_config.rpc_url,
                contract_address: config.ledger_config.contract_address,
                call_timeout: config.ledger_config.call_timeout,
            },
        ));

        // initialize reconciliation
        let status_cache = StatusCache::new(
            config.caching_config.cache_size,
            config.caching_config.refresh_after,
        );
        let reconciler = Arc::new(LedgerReconciler::new(ledger.clone(), status_cache));

        let account_service = AccountService::new(storage.clone());
        let record_service = RecordService::new(storage, ledger);
        let verification_service = VerificationService::new(reconciler);

        Ok(Self {
            account_service,
            record_service,
            verification_service,
            hasher,
        })
    }
}
