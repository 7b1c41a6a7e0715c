//! Snapshot error types.

use crate::audit::LedgerViolation;
use thiserror::Error;

/// Errors that can occur while encoding, decoding or restoring snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot could not be encoded
    #[error("Snapshot encoding failed: {0}")]
    SerializationFailed(String),

    /// Input bytes are not a snapshot in the expected format
    #[error("Snapshot decoding failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot contents broke ledger invariants
    #[error("Snapshot failed audit with {} violation(s)", .0.len())]
    AuditFailed(Vec<LedgerViolation>),
}
