//! Point-in-time snapshots of a whole ledger.
//!
//! A snapshot captures every account and every transaction so a ledger can be
//! moved between stores or rebuilt after a restart. Snapshots are versioned
//! and can be encoded as JSON or as compact binary.

use crate::audit::LedgerAudit;
use crate::core::{Account, Transaction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Encoding used for a snapshot on the wire or on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    #[default]
    Json,
    Binary,
}

/// Serializable copy of a ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Every account, in store order
    pub accounts: Vec<Account>,

    /// Every transaction, in append order
    pub transactions: Vec<Transaction>,
}

impl LedgerSnapshot {
    pub fn new(accounts: Vec<Account>, transactions: Vec<Transaction>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            accounts,
            transactions,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    /// Encode in the given format.
    pub fn encode(&self, format: SnapshotFormat) -> Result<Vec<u8>, SnapshotError> {
        match format {
            SnapshotFormat::Json => self.to_json().map(String::into_bytes),
            SnapshotFormat::Binary => self.to_bytes(),
        }
    }

    /// Decode from the given format, rejecting unknown versions.
    pub fn decode(bytes: &[u8], format: SnapshotFormat) -> Result<Self, SnapshotError> {
        match format {
            SnapshotFormat::Json => {
                let json = std::str::from_utf8(bytes)
                    .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
                Self::from_json(json)
            }
            SnapshotFormat::Binary => Self::from_bytes(bytes),
        }
    }

    /// Run `audit` over the snapshot contents.
    pub fn audit(&self, audit: &LedgerAudit) -> Result<(), SnapshotError> {
        audit
            .check(&self.accounts, &self.transactions)
            .map_err(|violations| {
                for violation in &violations {
                    warn!(snapshot = %self.id, %violation, "snapshot audit violation");
                }
                SnapshotError::AuditFailed(violations)
            })
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(self)
        } else {
            Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            })
        }
    }
}
