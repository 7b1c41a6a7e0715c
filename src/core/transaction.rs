//! Immutable ledger entries.
//!
//! A [`Transaction`] is a fact: once built it is never changed, only read.
//! The two sides of a transfer are tied together by a shared [`TransferId`]
//! and handed out as a single [`TransferPair`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id! {
    /// Opaque, unique account identifier.
    AccountNumber
}

string_id! {
    /// Unique identity of a single ledger entry.
    TransactionId
}

string_id! {
    /// Links the debit and credit sides of one transfer.
    TransferId
}

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdraw,
    TransferDebit,
    TransferCredit,
}

impl TransactionType {
    /// Whether this entry is one side of a transfer.
    pub fn is_transfer(self) -> bool {
        match self {
            TransactionType::TransferDebit | TransactionType::TransferCredit => true,
            TransactionType::Deposit | TransactionType::Withdraw => false,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdraw => "WITHDRAW",
            TransactionType::TransferDebit => "TRANSFER_DEBIT",
            TransactionType::TransferCredit => "TRANSFER_CREDIT",
        };
        f.write_str(label)
    }
}

/// A single immutable ledger entry.
///
/// Only [`BankingOperation`](crate::core::BankingOperation) builds records, so
/// every record it hands out has a positive amount and a transfer id exactly
/// when it is a transfer side. Stored ledgers come back through serde and are
/// re-checked with [`LedgerAudit`](crate::audit::LedgerAudit).
///
/// ```compile_fail
/// use banking_ledger::core::{AccountNumber, Transaction, TransactionId, TransactionType};
/// use rust_decimal::Decimal;
///
/// let forged = Transaction::new(
///     AccountNumber::from("A1"),
///     chrono::Utc::now(),
///     TransactionType::Deposit,
///     Decimal::NEGATIVE_ONE,
///     TransactionId::from("t-1"),
///     None,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    account_number: AccountNumber,
    occurred_at: DateTime<Utc>,
    transaction_type: TransactionType,
    amount: Decimal,
    transaction_id: TransactionId,
    transfer_id: Option<TransferId>,
}

impl Transaction {
    pub(crate) fn new(
        account_number: AccountNumber,
        occurred_at: DateTime<Utc>,
        transaction_type: TransactionType,
        amount: Decimal,
        transaction_id: TransactionId,
        transfer_id: Option<TransferId>,
    ) -> Self {
        Self {
            account_number,
            occurred_at,
            transaction_type,
            amount,
            transaction_id,
            transfer_id,
        }
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn transfer_id(&self) -> Option<&TransferId> {
        self.transfer_id.as_ref()
    }

    /// Amount with the sign it contributes to its account's balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Deposit | TransactionType::TransferCredit => self.amount,
            TransactionType::Withdraw | TransactionType::TransferDebit => -self.amount,
        }
    }
}

/// The two linked entries produced by one transfer.
///
/// Only the operation engine builds pairs, so a pair always holds a debit and
/// a credit with the same transfer id, timestamp and amount.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPair {
    debit: Transaction,
    credit: Transaction,
}

impl TransferPair {
    pub(crate) fn new(debit: Transaction, credit: Transaction) -> Self {
        Self { debit, credit }
    }

    pub fn debit(&self) -> &Transaction {
        &self.debit
    }

    pub fn credit(&self) -> &Transaction {
        &self.credit
    }

    pub fn transfer_id(&self) -> Option<&TransferId> {
        self.debit.transfer_id()
    }

    /// Consumes the pair, debit first.
    pub fn into_vec(self) -> Vec<Transaction> {
        vec![self.debit, self.credit]
    }
}
