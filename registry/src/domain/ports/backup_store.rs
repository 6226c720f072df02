//! Port for the point-in-time snapshot store.
//!
//! One backup captures every snapshot-eligible table under a single numeric
//! id. Restores are atomic per table: a failed table restore must leave every
//! other table untouched.

use async_trait::async_trait;

use crate::domain::backup::{BackupRequest, BackupSummary};

/// Errors raised by backup store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackupStoreError {
    /// Store connection could not be established.
    #[error("backup store connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("backup store query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
    /// The targeted backup, or the targeted table within it, does not exist.
    #[error("backup {backup_id} has no snapshot for the requested target")]
    SnapshotMissing {
        /// The backup that was addressed.
        backup_id: i64,
    },
    /// The requested table is not part of the snapshot set.
    #[error("table is not eligible for snapshots: {table}")]
    UnknownTable {
        /// The rejected table name.
        table: String,
    },
}

impl BackupStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a missing-snapshot error for the given backup.
    pub fn snapshot_missing(backup_id: i64) -> Self {
        Self::SnapshotMissing { backup_id }
    }

    /// Create an unknown-table error for the given name.
    pub fn unknown_table(table: impl Into<String>) -> Self {
        Self::UnknownTable {
            table: table.into(),
        }
    }
}

/// Port for backup creation, listing, restore, and retention.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackupStore: Send + Sync {
    /// Capture a full backup of every snapshot-eligible table, returning the
    /// new backup's id.
    async fn create(&self, request: &BackupRequest) -> Result<i64, BackupStoreError>;

    /// List existing backups, newest first.
    async fn list(&self) -> Result<Vec<BackupSummary>, BackupStoreError>;

    /// Restore one table — or, when `table` is `None`, every table — from a
    /// backup. Returns the number of rows restored.
    async fn restore(
        &self,
        backup_id: i64,
        table: Option<String>,
    ) -> Result<u64, BackupStoreError>;

    /// Delete backups older than the given number of days, including their
    /// snapshot records. Returns backups removed.
    async fn purge_older_than(&self, days: u32) -> Result<u64, BackupStoreError>;
}

/// Fixture implementation with no backups.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBackupStore;

#[async_trait]
impl BackupStore for FixtureBackupStore {
    async fn create(&self, _request: &BackupRequest) -> Result<i64, BackupStoreError> {
        Ok(1)
    }

    async fn list(&self) -> Result<Vec<BackupSummary>, BackupStoreError> {
        Ok(Vec::new())
    }

    async fn restore(
        &self,
        backup_id: i64,
        _table: Option<String>,
    ) -> Result<u64, BackupStoreError> {
        Err(BackupStoreError::snapshot_missing(backup_id))
    }

    async fn purge_older_than(&self, _days: u32) -> Result<u64, BackupStoreError> {
        Ok(0)
    }
}
