//! Errors surfaced by the orchestration layer.

use crate::core::{AccountNumber, BankingError};
use crate::snapshot::SnapshotError;
use thiserror::Error;

/// Errors that can occur while orchestrating ledger operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Banking(#[from] BankingError),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountNumber),

    #[error("Account already exists: {0}")]
    AccountExists(AccountNumber),

    #[error("Ledger is not empty; refusing to restore snapshot {0}")]
    LedgerNotEmpty(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
