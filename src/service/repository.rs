//! Storage seams for accounts and transactions, plus in-memory stores.

use crate::core::{Account, AccountNumber, Transaction};
use crate::service::error::ServiceResult;
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Keyed account storage.
pub trait AccountRepository: Send + Sync {
    /// Insert or replace the account stored under its number.
    fn save(&self, account: Account) -> ServiceResult<()>;

    fn find(&self, account_number: &AccountNumber) -> ServiceResult<Option<Account>>;

    /// Every stored account, ordered by account number.
    fn all(&self) -> ServiceResult<Vec<Account>>;
}

/// Append-only transaction storage.
pub trait TransactionRepository: Send + Sync {
    fn save(&self, transaction: Transaction) -> ServiceResult<()>;

    /// Append every transaction or none of them.
    fn save_all(&self, transactions: Vec<Transaction>) -> ServiceResult<()>;

    /// The account's entries in append order.
    fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> ServiceResult<Vec<Transaction>>;

    /// Every stored entry in append order.
    fn all(&self) -> ServiceResult<Vec<Transaction>>;
}

/// Accounts held in a map keyed by account number.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<BTreeMap<AccountNumber, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn save(&self, account: Account) -> ServiceResult<()> {
        self.accounts.lock().insert(account.account_number().clone(), account);
        Ok(())
    }

    fn find(&self, account_number: &AccountNumber) -> ServiceResult<Option<Account>> {
        Ok(self.accounts.lock().get(account_number).cloned())
    }

    fn all(&self) -> ServiceResult<Vec<Account>> {
        Ok(self.accounts.lock().values().cloned().collect())
    }
}

/// Transactions held in a single append-only vector.
#[derive(Debug, Default)]
pub struct InMemoryTransactionRepository {
    transactions: Mutex<Vec<Transaction>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionRepository for InMemoryTransactionRepository {
    fn save(&self, transaction: Transaction) -> ServiceResult<()> {
        self.transactions.lock().push(transaction);
        Ok(())
    }

    fn save_all(&self, transactions: Vec<Transaction>) -> ServiceResult<()> {
        self.transactions.lock().extend(transactions);
        Ok(())
    }

    fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> ServiceResult<Vec<Transaction>> {
        Ok(self
            .transactions
            .lock()
            .iter()
            .filter(|tx| tx.account_number() == account_number)
            .cloned()
            .collect())
    }

    fn all(&self) -> ServiceResult<Vec<Transaction>> {
        Ok(self.transactions.lock().clone())
    }
}
