//! Environment threaded through every ledger effect.

use crate::audit::LedgerAudit;
use crate::config::LedgerConfig;
use crate::core::{Account, AccountNumber, BankingOperation};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::locks::AccountLocks;
use crate::service::repository::{
    AccountRepository, InMemoryAccountRepository, InMemoryTransactionRepository,
    TransactionRepository,
};
use std::fmt;
use std::sync::Arc;

/// Stores, engine and settings shared by all ledger effects.
///
/// Cloning is cheap; clones share the same stores and locks.
#[derive(Clone)]
pub struct LedgerEnv {
    accounts: Arc<dyn AccountRepository>,
    transactions: Arc<dyn TransactionRepository>,
    engine: BankingOperation,
    locks: AccountLocks,
    audit: Arc<LedgerAudit>,
    config: LedgerConfig,
}

impl fmt::Debug for LedgerEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerEnv")
            .field("engine", &self.engine)
            .field("audit_checks", &self.audit.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LedgerEnv {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        transactions: Arc<dyn TransactionRepository>,
        engine: BankingOperation,
        config: LedgerConfig,
    ) -> Self {
        Self {
            accounts,
            transactions,
            engine,
            locks: AccountLocks::new(),
            audit: Arc::new(LedgerAudit::standard()),
            config,
        }
    }

    /// Empty in-memory ledger with the system clock and UUID identifiers.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryTransactionRepository::new()),
            BankingOperation::default(),
            LedgerConfig::default(),
        )
    }

    pub fn with_engine(mut self, engine: BankingOperation) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the audit run on restore.
    pub fn with_audit(mut self, audit: LedgerAudit) -> Self {
        self.audit = Arc::new(audit);
        self
    }

    pub fn accounts(&self) -> &dyn AccountRepository {
        self.accounts.as_ref()
    }

    pub fn transactions(&self) -> &dyn TransactionRepository {
        self.transactions.as_ref()
    }

    pub fn engine(&self) -> &BankingOperation {
        &self.engine
    }

    pub fn locks(&self) -> &AccountLocks {
        &self.locks
    }

    pub fn audit(&self) -> &LedgerAudit {
        &self.audit
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Look up an account or fail with [`ServiceError::AccountNotFound`].
    pub fn require_account(&self, account_number: &AccountNumber) -> ServiceResult<Account> {
        self.accounts
            .find(account_number)?
            .ok_or_else(|| ServiceError::AccountNotFound(account_number.clone()))
    }
}
