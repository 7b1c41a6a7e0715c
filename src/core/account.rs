//! Accounts and their lifecycle state machine.

use super::error::{BankingError, BankingResult};
use super::state::{AccountState, Operation};
use super::transaction::AccountNumber;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ledger account.
///
/// The account number and creation timestamp are fixed at construction.
/// The state changes only through [`Account::change_state`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    account_number: AccountNumber,
    created_at: DateTime<Utc>,
    state: AccountState,
}

impl Account {
    /// Create an account stamped with the current time.
    pub fn new(account_number: impl Into<AccountNumber>, state: AccountState) -> Self {
        Self::opened_at(account_number, state, Utc::now())
    }

    /// Create an account with an explicit creation timestamp.
    pub fn opened_at(
        account_number: impl Into<AccountNumber>,
        state: AccountState,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            created_at,
            state,
        }
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> AccountState {
        self.state
    }

    /// Move the account to `target`.
    ///
    /// Fails with [`BankingError::InvalidStateTransition`] when the transition
    /// graph forbids it; the state is left untouched in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use banking_ledger::core::{Account, AccountState};
    ///
    /// let mut account = Account::new("A1", AccountState::Pending);
    /// account.change_state(AccountState::Active).unwrap();
    /// assert_eq!(account.state(), AccountState::Active);
    ///
    /// assert!(account.change_state(AccountState::Pending).is_err());
    /// assert_eq!(account.state(), AccountState::Active);
    /// ```
    pub fn change_state(&mut self, target: AccountState) -> BankingResult<()> {
        if !self.state.can_transition_to(target) {
            return Err(BankingError::InvalidStateTransition {
                account: self.account_number.clone(),
                from: self.state,
                to: target,
            });
        }
        self.state = target;
        Ok(())
    }

    pub fn assert_can_deposit(&self) -> BankingResult<()> {
        self.assert_permits(Operation::Deposit)
    }

    pub fn assert_can_withdraw(&self) -> BankingResult<()> {
        self.assert_permits(Operation::Withdraw)
    }

    /// Checks the account as the source of a transfer.
    pub fn assert_can_transfer(&self) -> BankingResult<()> {
        self.assert_permits(Operation::Transfer)
    }

    fn assert_permits(&self, operation: Operation) -> BankingResult<()> {
        if self.state.permits(operation) {
            Ok(())
        } else {
            Err(BankingError::InvalidAccountState {
                account: self.account_number.clone(),
                state: self.state,
                operation,
            })
        }
    }
}
