//! Point-in-time backup metadata.
//!
//! A backup is a set of per-table snapshots stored together under one
//! numeric id; these types describe the request and the bookkeeping row, not
//! the snapshot payloads themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for creating a full backup. All fields are optional; the store
/// fills documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRequest {
    /// Backup category, defaulting to `full`.
    pub backup_type: Option<String>,
    /// Operator or subsystem that initiated the backup.
    pub created_by: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Metadata describing an existing backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSummary {
    /// Backup identifier.
    pub id: i64,
    /// Backup category.
    pub backup_type: String,
    /// Operator or subsystem that initiated the backup.
    pub created_by: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Number of tables captured.
    pub tables_count: i32,
    /// Total rows captured across all tables.
    pub total_records: i64,
    /// When the backup was taken.
    pub created_at: DateTime<Utc>,
}
