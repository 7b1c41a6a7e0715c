//! Per-account serialization.
//!
//! Every operation that reads an account's history and then appends to it
//! runs while holding that account's lock, so two writers can never both
//! pass a balance check against the same stale history. Whole-ledger work
//! (snapshots and restores) takes the ledger gate exclusively and so sees no
//! account operation in flight.

use crate::core::AccountNumber;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::sync::Arc;

/// Registry of one mutex per account number, behind a ledger-wide gate.
///
/// Entries exist only while some caller holds or waits for them.
#[derive(Clone, Debug, Default)]
pub struct AccountLocks {
    gate: Arc<RwLock<()>>,
    accounts: Arc<DashMap<AccountNumber, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the locks of every account in `accounts`.
    ///
    /// Locks are taken in sorted order and duplicates are collapsed, so
    /// overlapping callers cannot deadlock.
    pub fn with_locked<T>(&self, accounts: &[&AccountNumber], f: impl FnOnce() -> T) -> T {
        let mut keys = accounts.to_vec();
        keys.sort();
        keys.dedup();

        let _shared = self.gate.read();
        let handles: Vec<Arc<Mutex<()>>> = keys.iter().map(|key| self.handle(key)).collect();
        let result = {
            let _guards: Vec<MutexGuard<'_, ()>> =
                handles.iter().map(|handle| handle.lock()).collect();
            f()
        };
        drop(handles);
        for key in keys {
            self.release(key);
        }
        result
    }

    /// Run `f` while no account lock is held by anyone else.
    pub fn with_exclusive<T>(&self, f: impl FnOnce() -> T) -> T {
        let _exclusive = self.gate.write();
        f()
    }

    fn handle(&self, account_number: &AccountNumber) -> Arc<Mutex<()>> {
        Arc::clone(self.accounts.entry(account_number.clone()).or_default().value())
    }

    fn release(&self, account_number: &AccountNumber) {
        self.accounts
            .remove_if(account_number, |_, handle| Arc::strong_count(handle) == 1);
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> usize {
        self.accounts.len()
    }
}
