//! Audit rules for whole ledgers using Validation.

use crate::audit::context::AuditContext;
use crate::audit::violations::LedgerViolation;
use crate::core::{Account, Transaction};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single audit check.
pub type AuditValidation = Validation<(), NonEmptyVec<LedgerViolation>>;

/// Type alias for audit check functions
pub type AuditCheck = Box<dyn Fn(&AuditContext<'_>) -> AuditValidation + Send + Sync>;

/// A set of ledger integrity checks.
/// Uses Validation to accumulate ALL violations.
pub struct LedgerAudit {
    pub(crate) checks: Vec<AuditCheck>,
}

impl LedgerAudit {
    /// Every standard check, in a fixed order.
    pub fn standard() -> Self {
        crate::audit::AuditBuilder::new().standard().build()
    }

    /// Run all checks, accumulating ALL violations.
    /// Returns Validation::Success(()) if all checks pass.
    pub fn enforce(&self, context: &AuditContext<'_>) -> AuditValidation {
        let results: Vec<AuditValidation> =
            self.checks.iter().map(|check| check(context)).collect();
        Validation::all_vec(results).map(|_| ())
    }

    /// Audit `accounts` and `transactions`, returning every violation found.
    pub fn check(
        &self,
        accounts: &[Account],
        transactions: &[Transaction],
    ) -> Result<(), Vec<LedgerViolation>> {
        match self.enforce(&AuditContext::new(accounts, transactions)) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for LedgerAudit {
    fn default() -> Self {
        Self::standard()
    }
}
