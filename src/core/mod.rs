//! Core ledger types and logic.
//!
//! This module contains the pure functional core of the ledger:
//! - Account lifecycle states and the `Account` state machine
//! - Immutable transaction records
//! - Balance derivation from history
//! - The operation engine that produces new records
//!
//! Nothing in this module performs I/O or lookups. Identifiers and
//! timestamps come from injected [`Clock`] and [`IdGenerator`] values.

mod account;
mod balance;
mod clock;
mod error;
mod operation;
mod state;
mod transaction;

pub use account::Account;
pub use balance::{balances_by_account, calculate_balance};
pub use clock::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidGenerator};
pub use error::{BankingError, BankingResult};
pub use operation::BankingOperation;
pub use state::{AccountState, Operation};
pub use transaction::{
    AccountNumber, Transaction, TransactionId, TransactionType, TransferId, TransferPair,
};
