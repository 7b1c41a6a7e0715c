//! Builder API for composing ledger audits.

use crate::audit::checks;
use crate::audit::context::AuditContext;
use crate::audit::rules::{AuditCheck, AuditValidation, LedgerAudit};
use crate::audit::violations::LedgerViolation;
use stillwater::validation::Validation;

/// Builder for creating ledger audits
pub struct AuditBuilder {
    checks: Vec<AuditCheck>,
}

impl AuditBuilder {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add every standard integrity check
    pub fn standard(self) -> Self {
        self.require(checks::positive_amounts)
            .require(checks::unique_transaction_ids)
            .require(checks::transfer_ids_match_types)
            .require(checks::transfers_paired)
            .require(checks::known_accounts)
            .require(checks::no_negative_balances)
    }

    /// Add a check that reports its own violations
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&AuditContext<'_>) -> AuditValidation + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a pass/fail check; failure reports `error_msg` as a custom violation
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&AuditContext<'_>) -> bool + Send + Sync + 'static,
    {
        let check = move |ctx: &AuditContext<'_>| -> AuditValidation {
            if predicate(ctx) {
                Validation::success(())
            } else {
                Validation::fail(LedgerViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.checks.push(Box::new(check));
        self
    }

    /// Build the audit
    pub fn build(self) -> LedgerAudit {
        LedgerAudit {
            checks: self.checks,
        }
    }
}

impl Default for AuditBuilder {
    fn default() -> Self {
        Self::new()
    }
}
