//! Traits and implementations for the student record submission, approval
//! and ledger verification workflow.

pub mod common_models;
pub mod http_client;
pub mod ledger;
pub mod reconciliation;
pub mod storage;
pub mod util;
