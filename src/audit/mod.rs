//! Validation-based integrity audit for whole ledgers.
//!
//! The operation engine guarantees its own output, but ledgers also arrive
//! from elsewhere: restored snapshots, hand-built fixtures, other writers.
//! An audit re-checks the ledger invariants over such data using
//! Stillwater's `Validation` type, so a single pass reports every violation
//! instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use banking_ledger::audit::{AuditBuilder, LedgerAudit};
//! use banking_ledger::core::{Account, AccountState, BankingOperation};
//! use rust_decimal::Decimal;
//!
//! let engine = BankingOperation::default();
//! let account = Account::new("A1", AccountState::Active);
//! let ledger = vec![engine.deposit(&account, Decimal::ONE).unwrap()];
//!
//! assert!(LedgerAudit::standard().check(&[account.clone()], &ledger).is_ok());
//!
//! let strict = AuditBuilder::new()
//!     .standard()
//!     .require_pred(|ctx| ctx.transactions.is_empty(), "ledger must be empty".to_string())
//!     .build();
//! assert!(strict.check(&[account], &ledger).is_err());
//! ```

pub mod builder;
pub mod checks;
pub mod context;
pub mod rules;
pub mod violations;

// Re-export commonly used types
pub use builder::AuditBuilder;
pub use context::AuditContext;
pub use rules::{AuditCheck, AuditValidation, LedgerAudit};
pub use violations::LedgerViolation;
