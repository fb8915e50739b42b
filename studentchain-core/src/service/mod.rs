//! Services orchestrating the providers:
//!
//! - [`account_service::AccountService`] — wallet login with
//!   auto-registration
//! - [`record_service::RecordService`] — the record lifecycle state machine
//! - [`verification_service::VerificationService`] — ledger reconciliation
//!   and the public verification path

pub mod account_service;
pub mod error;
pub mod record_service;
pub mod verification_service;
