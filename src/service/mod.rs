//! Orchestration boundary.
//!
//! This is the imperative shell around [`crate::core`]: it resolves account
//! numbers through repositories, serializes access per account, and appends
//! whatever the engine produces. Every operation is a Stillwater effect that
//! runs against a [`LedgerEnv`].
//!
//! # Example
//!
//! ```rust
//! use banking_ledger::core::AccountState;
//! use banking_ledger::service::{self, LedgerEnv};
//! use rust_decimal::Decimal;
//! use stillwater::effect::Effect;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let env = LedgerEnv::in_memory();
//! service::open_account("A1", AccountState::Active).run(&env).await.unwrap();
//! service::deposit("A1", Decimal::new(2500, 2)).run(&env).await.unwrap();
//!
//! let balance = service::balance("A1").run(&env).await.unwrap();
//! assert_eq!(balance.to_string(), "25.00");
//! # }
//! ```

pub mod env;
pub mod error;
pub mod ledger;
pub mod locks;
pub mod repository;

pub use env::LedgerEnv;
pub use error::{ServiceError, ServiceResult};
pub use ledger::{
    balance, change_account_state, deposit, export_snapshot, history, import_snapshot,
    open_account, restore, snapshot, transfer, withdraw,
};
pub use locks::AccountLocks;
pub use repository::{
    AccountRepository, InMemoryAccountRepository, InMemoryTransactionRepository,
    TransactionRepository,
};
