//! Backup lifecycle procedures.

use std::sync::Arc;

use tracing::info;

use crate::domain::backup::{BackupRequest, BackupSummary};
use crate::domain::error::DomainError;
use crate::domain::ports::{BackupStore, BackupStoreError};

/// Service exposing backup creation, listing, restore, and retention.
#[derive(Clone)]
pub struct BackupService<S> {
    store: Arc<S>,
}

impl<S> BackupService<S> {
    /// Create a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> BackupService<S>
where
    S: BackupStore,
{
    /// Capture a full backup and return its id.
    pub async fn create_backup(&self, request: &BackupRequest) -> Result<i64, DomainError> {
        let backup_id = self
            .store
            .create(request)
            .await
            .map_err(map_store_error)?;
        info!(backup_id, "backup captured");
        Ok(backup_id)
    }

    /// List existing backups, newest first.
    pub async fn list_backups(&self) -> Result<Vec<BackupSummary>, DomainError> {
        self.store.list().await.map_err(map_store_error)
    }

    /// Restore one table, or every table when `table` is `None`. Returns rows
    /// restored.
    pub async fn restore_backup(
        &self,
        backup_id: i64,
        table: Option<String>,
    ) -> Result<u64, DomainError> {
        let restored = self
            .store
            .restore(backup_id, table.clone())
            .await
            .map_err(map_store_error)?;
        info!(backup_id, table = table.as_deref(), restored, "backup restored");
        Ok(restored)
    }

    /// Delete backups older than `days` days. A zero-day window would delete
    /// every backup and is rejected.
    pub async fn purge_backups(&self, days: u32) -> Result<u64, DomainError> {
        if days == 0 {
            return Err(DomainError::invalid_request(
                "retention window must be at least one day",
            ));
        }
        self.store
            .purge_older_than(days)
            .await
            .map_err(map_store_error)
    }
}

fn map_store_error(error: BackupStoreError) -> DomainError {
    match error {
        BackupStoreError::Connection { message } => {
            DomainError::service_unavailable(format!("backup store unavailable: {message}"))
        }
        BackupStoreError::Query { message } => {
            DomainError::internal(format!("backup store error: {message}"))
        }
        BackupStoreError::SnapshotMissing { .. } => DomainError::not_found(error.to_string()),
        BackupStoreError::UnknownTable { .. } => DomainError::invalid_request(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use super::BackupService;
    use crate::domain::backup::BackupRequest;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{BackupStoreError, MockBackupStore};

    #[tokio::test]
    async fn creating_a_backup_returns_its_id() {
        let mut store = MockBackupStore::new();
        store.expect_create().times(1).return_once(|_| Ok(42));

        let service = BackupService::new(Arc::new(store));
        let backup_id = service
            .create_backup(&BackupRequest::default())
            .await
            .expect("backup id");
        assert_eq!(backup_id, 42);
    }

    #[tokio::test]
    async fn restore_of_a_missing_snapshot_is_not_found() {
        let mut store = MockBackupStore::new();
        store
            .expect_restore()
            .with(eq(9), eq(None))
            .times(1)
            .return_once(|backup_id, _| Err(BackupStoreError::snapshot_missing(backup_id)));

        let service = BackupService::new(Arc::new(store));
        let error = service
            .restore_backup(9, None)
            .await
            .expect_err("missing snapshot");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn restore_of_an_ineligible_table_is_an_invalid_request() {
        let mut store = MockBackupStore::new();
        store
            .expect_restore()
            .times(1)
            .return_once(|_, _| Err(BackupStoreError::unknown_table("backup_records")));

        let service = BackupService::new(Arc::new(store));
        let error = service
            .restore_backup(9, Some("backup_records".to_owned()))
            .await
            .expect_err("ineligible table");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn zero_day_retention_is_rejected_without_touching_the_store() {
        let mut store = MockBackupStore::new();
        store.expect_purge_older_than().times(0);

        let service = BackupService::new(Arc::new(store));
        let error = service.purge_backups(0).await.expect_err("zero days");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn purge_reports_backups_removed() {
        let mut store = MockBackupStore::new();
        store
            .expect_purge_older_than()
            .with(eq(30))
            .times(1)
            .return_once(|_| Ok(3));

        let service = BackupService::new(Arc::new(store));
        assert_eq!(service.purge_backups(30).await.expect("purge"), 3);
    }

    #[tokio::test]
    async fn store_outage_surfaces_as_service_unavailable() {
        let mut store = MockBackupStore::new();
        store
            .expect_list()
            .times(1)
            .return_once(|| Err(BackupStoreError::connection("pool exhausted")));

        let service = BackupService::new(Arc::new(store));
        let error = service.list_backups().await.expect_err("outage");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
