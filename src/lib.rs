//! Banking Ledger: an append-only ledger for bank accounts
//!
//! Built on Stillwater's "pure core, imperative shell" philosophy. The core
//! decides whether an operation is allowed and produces immutable transaction
//! records; balances are never stored, only derived from history. Lookups,
//! persistence and locking live in the effectful service layer.
//!
//! # Core Concepts
//!
//! - **Account**: Identity plus a lifecycle state (`ACTIVE`, `PENDING`, `FROZEN`, `CLOSED`)
//! - **Transaction**: Immutable entry; transfers are a linked debit/credit pair
//! - **Balance**: Signed sum of an account's entries
//! - **Audit**: Accumulating integrity checks over a whole ledger
//!
//! # Example
//!
//! ```rust
//! use banking_ledger::core::{calculate_balance, Account, AccountState, BankingOperation};
//! use rust_decimal::Decimal;
//!
//! let engine = BankingOperation::default();
//! let a1 = Account::new("A1", AccountState::Active);
//! let b1 = Account::new("B1", AccountState::Frozen);
//!
//! let mut ledger = vec![engine.deposit(&a1, Decimal::new(50000, 2)).unwrap()];
//! let pair = engine.transfer(&a1, &b1, Decimal::new(40000, 2), &ledger).unwrap();
//! ledger.extend(pair.into_vec());
//!
//! assert_eq!(calculate_balance(a1.account_number(), &ledger), Ok(Decimal::new(10000, 2)));
//! assert_eq!(calculate_balance(b1.account_number(), &ledger), Ok(Decimal::new(40000, 2)));
//! ```

pub mod audit;
pub mod config;
pub mod core;
pub mod service;
pub mod snapshot;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{
    Account, AccountNumber, AccountState, BankingError, BankingOperation, Transaction,
    TransactionType, TransferPair,
};
pub use service::{LedgerEnv, ServiceError};
