//! Input handed to every audit check.

use crate::core::{Account, Transaction};

/// Borrowed view of the ledger being audited.
#[derive(Clone, Copy, Debug)]
pub struct AuditContext<'a> {
    pub accounts: &'a [Account],
    pub transactions: &'a [Transaction],
}

impl<'a> AuditContext<'a> {
    pub fn new(accounts: &'a [Account], transactions: &'a [Transaction]) -> Self {
        Self {
            accounts,
            transactions,
        }
    }
}
