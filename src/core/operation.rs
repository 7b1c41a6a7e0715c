//! The banking operation engine.
//!
//! [`BankingOperation`] is the only producer of [`Transaction`] records. It
//! never looks anything up: callers hand it the accounts involved and the
//! relevant history, and get back new records or a [`BankingError`].
//!
//! Checks run in a fixed order: amount, then account state, then balance.

use super::account::Account;
use super::balance::calculate_balance;
use super::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use super::error::{BankingError, BankingResult};
use super::state::AccountState;
use super::transaction::{
    AccountNumber, Transaction, TransactionId, TransactionType, TransferId, TransferPair,
};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Stateless producer of transaction records.
///
/// # Example
///
/// ```rust
/// use banking_ledger::core::{Account, AccountState, BankingOperation, TransactionType};
/// use rust_decimal::Decimal;
///
/// let engine = BankingOperation::default();
/// let account = Account::new("A1", AccountState::Active);
///
/// let deposit = engine.deposit(&account, Decimal::new(10000, 2)).unwrap();
/// assert_eq!(deposit.transaction_type(), TransactionType::Deposit);
/// assert_eq!(deposit.amount().to_string(), "100.00");
///
/// let history = vec![deposit];
/// assert!(engine.withdraw(&account, Decimal::new(15000, 2), &history).is_err());
/// ```
#[derive(Clone)]
pub struct BankingOperation {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for BankingOperation {
    fn default() -> Self {
        Self::new(SystemClock, UuidGenerator)
    }
}

impl fmt::Debug for BankingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankingOperation").finish_non_exhaustive()
    }
}

impl BankingOperation {
    pub fn new(clock: impl Clock + 'static, ids: impl IdGenerator + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
            ids: Arc::new(ids),
        }
    }

    /// New account stamped by the engine's clock.
    pub fn open_account(
        &self,
        account_number: impl Into<AccountNumber>,
        state: AccountState,
    ) -> Account {
        Account::opened_at(account_number, state, self.clock.now())
    }

    /// Rejects anything that is not strictly positive.
    pub fn validate_amount(&self, amount: Decimal) -> BankingResult<()> {
        if amount > Decimal::ZERO {
            Ok(())
        } else {
            debug!(%amount, "rejected non-positive amount");
            Err(BankingError::InvalidAmount { amount })
        }
    }

    /// Build a DEPOSIT record. Deposits never check the balance.
    pub fn deposit(&self, account: &Account, amount: Decimal) -> BankingResult<Transaction> {
        self.validate_amount(amount)?;
        account.assert_can_deposit()?;

        let tx = self.record(account, TransactionType::Deposit, amount, None);
        debug!(
            account = %account.account_number(),
            %amount,
            transaction_id = %tx.transaction_id(),
            "deposit produced"
        );
        Ok(tx)
    }

    /// Build a WITHDRAW record if `history` covers the amount.
    ///
    /// `history` may contain other accounts' entries; only the account's own
    /// entries count towards its balance.
    pub fn withdraw(
        &self,
        account: &Account,
        amount: Decimal,
        history: &[Transaction],
    ) -> BankingResult<Transaction> {
        self.validate_amount(amount)?;
        account.assert_can_withdraw()?;
        self.ensure_funds(account, amount, history)?;

        let tx = self.record(account, TransactionType::Withdraw, amount, None);
        debug!(
            account = %account.account_number(),
            %amount,
            transaction_id = %tx.transaction_id(),
            "withdrawal produced"
        );
        Ok(tx)
    }

    /// Build the debit/credit pair for moving `amount` from `from` to `to`.
    ///
    /// Both sides share one transfer id and one timestamp. Either both records
    /// come back or neither does.
    pub fn transfer(
        &self,
        from: &Account,
        to: &Account,
        amount: Decimal,
        from_history: &[Transaction],
    ) -> BankingResult<TransferPair> {
        self.validate_amount(amount)?;
        if from.account_number() == to.account_number() {
            return Err(BankingError::SelfTransfer {
                account: from.account_number().clone(),
            });
        }
        from.assert_can_transfer()?;
        to.assert_can_deposit()?;
        self.ensure_funds(from, amount, from_history)?;

        let transfer_id = TransferId::new(self.ids.next_id());
        let occurred_at = self.clock.now();

        let debit = Transaction::new(
            from.account_number().clone(),
            occurred_at,
            TransactionType::TransferDebit,
            amount,
            TransactionId::new(self.ids.next_id()),
            Some(transfer_id.clone()),
        );
        let credit = Transaction::new(
            to.account_number().clone(),
            occurred_at,
            TransactionType::TransferCredit,
            amount,
            TransactionId::new(self.ids.next_id()),
            Some(transfer_id.clone()),
        );

        debug!(
            from = %from.account_number(),
            to = %to.account_number(),
            %amount,
            %transfer_id,
            "transfer produced"
        );
        Ok(TransferPair::new(debit, credit))
    }

    fn ensure_funds(
        &self,
        account: &Account,
        amount: Decimal,
        history: &[Transaction],
    ) -> BankingResult<()> {
        let available = calculate_balance(account.account_number(), history)?;
        if amount > available {
            debug!(
                account = %account.account_number(),
                requested = %amount,
                %available,
                "insufficient funds"
            );
            return Err(BankingError::InsufficientFunds {
                account: account.account_number().clone(),
                requested: amount,
                available,
            });
        }
        Ok(())
    }

    fn record(
        &self,
        account: &Account,
        transaction_type: TransactionType,
        amount: Decimal,
        transfer_id: Option<TransferId>,
    ) -> Transaction {
        Transaction::new(
            account.account_number().clone(),
            self.clock.now(),
            transaction_type,
            amount,
            TransactionId::new(self.ids.next_id()),
            transfer_id,
        )
    }
}
