use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::common_models::account::WalletAddress;
use crate::http_client::HttpClient;
use crate::ledger::error::LedgerError;
use crate::ledger::model::{LedgerRecord, TransactionHandle};
use crate::ledger::LedgerClient;
use crate::util::canonical::CanonicalHash;

/// JSON-RPC error code wallet providers use when the user declines to sign
/// a transaction.
const USER_REJECTED_REQUEST: i64 = 4001;

const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_secs(2);

pub struct Params {
    pub rpc_url: String,
    pub contract_address: String,
    /// Applied to every RPC call and to the confirmation wait as a whole.
    pub call_timeout: Duration,
}

/// Ledger client speaking JSON-RPC 2.0 to the contract gateway.
pub struct JsonRpcLedgerClient {
    client: Arc<dyn HttpClient>,
    params: Params,
    request_id: AtomicU64,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

impl JsonRpcLedgerClient {
    pub fn new(client: Arc<dyn HttpClient>, params: Params) -> Self {
        Self {
            client,
            params,
            request_id: AtomicU64::new(0),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, LedgerError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.request_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        let body = serde_json::to_vec(&request)
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;

        let response = tokio::time::timeout(
            self.params.call_timeout,
            self.client.post_json(&self.params.rpc_url, body),
        )
        .await
        .map_err(|_| LedgerError::Timeout)??;

        let response: JsonRpcResponse<T> = response
            .error_for_status()?
            .json()
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(match error.code {
                USER_REJECTED_REQUEST => LedgerError::Rejected(error.message),
                code => LedgerError::Unavailable(format!("RPC error {code}: {}", error.message)),
            });
        }

        response
            .result
            .ok_or_else(|| LedgerError::InvalidResponse("missing result".to_string()))
    }
}

#[async_trait::async_trait]
impl LedgerClient for JsonRpcLedgerClient {
    async fn verify_record(&self, hash: &str) -> Result<LedgerRecord, LedgerError> {
        self.call(
            "verifyRecord",
            json!([self.params.contract_address, hash]),
        )
        .await
    }

    async fn add_record(
        &self,
        hash: &CanonicalHash,
        owner: &WalletAddress,
    ) -> Result<TransactionHandle, LedgerError> {
        tracing::info!("anchoring record hash {hash} for wallet {owner}");
        self.call(
            "addRecord",
            json!([self.params.contract_address, hash.as_str(), owner.as_str()]),
        )
        .await
    }

    async fn revoke_record(&self, hash: &CanonicalHash) -> Result<TransactionHandle, LedgerError> {
        tracing::info!("revoking record hash {hash} on the ledger");
        self.call(
            "revokeRecord",
            json!([self.params.contract_address, hash.as_str()]),
        )
        .await
    }

    async fn await_confirmation(&self, transaction: TransactionHandle) -> Result<(), LedgerError> {
        let deadline = tokio::time::Instant::now() + self.params.call_timeout;
        loop {
            let status: TransactionStatus = self
                .call("getTransactionStatus", json!([transaction.0]))
                .await?;

            match status {
                TransactionStatus::Confirmed => return Ok(()),
                TransactionStatus::Failed => {
                    return Err(LedgerError::Rejected(format!(
                        "transaction {} failed on the ledger",
                        transaction.0
                    )));
                }
                TransactionStatus::Pending => {
                    if tokio::time::Instant::now() >= deadline {
                        tracing::warn!(
                            "confirmation wait for transaction {} timed out",
                            transaction.0
                        );
                        return Err(LedgerError::Timeout);
                    }
                    tokio::time::sleep(CONFIRMATION_POLL_INTERVAL).await;
                }
            }
        }
    }
}
