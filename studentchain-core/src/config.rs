use std::time::Duration;

pub struct CoreConfig {
    pub ledger_config: LedgerConfig,
    pub caching_config: CachingConfig,
}

pub struct LedgerConfig {
    pub rpc_url: String,
    pub contract_address: String,
    /// Upper bound for every ledger call, including the confirmation wait.
    pub call_timeout: Duration,
}

pub struct CachingConfig {
    pub cache_size: usize,
    /// Reconciliation results older than this are re-checked on the next
    /// refresh cycle.
    pub refresh_after: time::Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            ledger_config: LedgerConfig {
                rpc_url: "https://evm-t3.cronos.org".to_string(),
                contract_address: "0xc574902660d1a42bf9565c4033b08b4f52f9a6a4".to_string(),
                call_timeout: Duration::from_secs(30),
            },
            caching_config: CachingConfig {
                cache_size: 100,
                refresh_after: time::Duration::seconds(60),
            },
        }
    }
}
