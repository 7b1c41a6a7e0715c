//! Integrity violations found in a ledger.

use crate::core::{AccountNumber, TransactionId, TransactionType, TransferId};
use rust_decimal::Decimal;
use thiserror::Error;

/// A single broken ledger invariant.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerViolation {
    #[error("Transaction {transaction_id} has non-positive amount {amount}")]
    NonPositiveAmount {
        transaction_id: TransactionId,
        amount: Decimal,
    },

    #[error("Transaction id {transaction_id} appears {occurrences} times")]
    DuplicateTransactionId {
        transaction_id: TransactionId,
        occurrences: usize,
    },

    #[error("{transaction_type} transaction {transaction_id} has no transfer id")]
    MissingTransferId {
        transaction_id: TransactionId,
        transaction_type: TransactionType,
    },

    #[error("{transaction_type} transaction {transaction_id} carries transfer id {transfer_id}")]
    UnexpectedTransferId {
        transaction_id: TransactionId,
        transaction_type: TransactionType,
        transfer_id: TransferId,
    },

    #[error("Transfer {transfer_id} has {debits} debit(s) and {credits} credit(s)")]
    UnpairedTransfer {
        transfer_id: TransferId,
        debits: usize,
        credits: usize,
    },

    #[error("Transfer {transfer_id} moves {debit} out but {credit} in")]
    TransferAmountMismatch {
        transfer_id: TransferId,
        debit: Decimal,
        credit: Decimal,
    },

    #[error("Transfer {transfer_id} sides carry different timestamps")]
    TransferTimestampMismatch { transfer_id: TransferId },

    #[error("Transfer {transfer_id} debits and credits the same account {account}")]
    TransferWithinAccount {
        transfer_id: TransferId,
        account: AccountNumber,
    },

    #[error("Transaction {transaction_id} references unknown account {account}")]
    UnknownAccount {
        transaction_id: TransactionId,
        account: AccountNumber,
    },

    #[error("Account {account} has negative balance {balance}")]
    NegativeBalance {
        account: AccountNumber,
        balance: Decimal,
    },

    #[error("Account {account} has a balance outside the representable range")]
    BalanceOverflow { account: AccountNumber },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
