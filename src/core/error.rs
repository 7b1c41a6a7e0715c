//! Rejections raised by the pure core.

use super::state::{AccountState, Operation};
use super::transaction::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that reject an attempted banking operation.
///
/// None of these leave partial state behind: a rejected operation builds no
/// transaction record.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BankingError {
    #[error("Amount must be greater than 0 (got {amount})")]
    InvalidAmount { amount: Decimal },

    #[error("{operation} not allowed when account {account} is {state}")]
    InvalidAccountState {
        account: AccountNumber,
        state: AccountState,
        operation: Operation,
    },

    #[error("Cannot change state of account {account} from {from} to {to}")]
    InvalidStateTransition {
        account: AccountNumber,
        from: AccountState,
        to: AccountState,
    },

    #[error("Insufficient funds in account {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        account: AccountNumber,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Cannot transfer from account {account} to itself")]
    SelfTransfer { account: AccountNumber },

    #[error("Balance of account {account} is outside the representable range")]
    BalanceOverflow { account: AccountNumber },
}

/// Result alias for core operations.
pub type BankingResult<T> = Result<T, BankingError>;
