//! PostgreSQL-backed `BackupStore` implementation.
//!
//! Snapshots are generic rather than per-table clones: each eligible table is
//! captured as one `backup_records` row holding a `jsonb` array of its rows
//! (`jsonb_agg(to_jsonb(t))`), and restored through
//! `jsonb_populate_recordset`, so new tables join the backup set by catalog
//! entry alone.
//!
//! Table identifiers interpolated into the raw SQL below come exclusively
//! from the static catalog, never from caller input.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::backup::{BackupRequest, BackupSummary};
use crate::domain::ports::{BackupStore, BackupStoreError};
use crate::domain::schema::SchemaCatalog;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DatabaseBackupRow, NewDatabaseBackupRow};
use super::pool::DbPool;
use super::schema::{backup_records, database_backups};

const DEFAULT_BACKUP_TYPE: &str = "full";

/// Diesel-backed implementation of the `BackupStore` port.
#[derive(Clone)]
pub struct PostgresBackupStore {
    pool: DbPool,
    catalog: SchemaCatalog,
}

impl PostgresBackupStore {
    /// Create a store over the given pool, snapshotting the tables the
    /// catalog marks eligible.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            catalog: SchemaCatalog::new(),
        }
    }
}

fn pool_error(error: super::pool::PoolError) -> BackupStoreError {
    map_pool_error(error, BackupStoreError::connection)
}

fn diesel_error(error: diesel::result::Error) -> BackupStoreError {
    map_diesel_error(error, BackupStoreError::query, BackupStoreError::connection)
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

/// Capture one table into `backup_records`. Empty tables record an empty
/// array so restores can still truncate them.
async fn snapshot_table(
    conn: &mut AsyncPgConnection,
    backup_id: i64,
    table: &str,
) -> Result<(), diesel::result::Error> {
    let statement = format!(
        "INSERT INTO backup_records (backup_id, table_name, row_count, payload) \
         SELECT $1, $2, count(*), coalesce(jsonb_agg(to_jsonb(t)), '[]'::jsonb) \
         FROM {table} t",
    );
    diesel::sql_query(statement)
        .bind::<BigInt, _>(backup_id)
        .bind::<Text, _>(table)
        .execute(conn)
        .await?;
    Ok(())
}

/// Statement realigning a restored table's id sequence with its rows, so the
/// next insert does not collide with a restored id.
fn resequence_statement(table: &str) -> String {
    format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
         coalesce(max(id), 1)) FROM {table}"
    )
}

/// Replace a table's contents from its snapshot record. Constraint checks
/// are relaxed for the session so tables can be restored independently.
async fn restore_table(
    conn: &mut AsyncPgConnection,
    backup_id: i64,
    table: &str,
) -> Result<u64, diesel::result::Error> {
    diesel::sql_query("SET LOCAL session_replication_role = replica")
        .execute(conn)
        .await?;
    let wipe = format!("DELETE FROM {table}");
    diesel::sql_query(wipe).execute(conn).await?;
    let refill = format!(
        "INSERT INTO {table} \
         SELECT rec.* FROM backup_records br \
         CROSS JOIN LATERAL jsonb_populate_recordset(NULL::{table}, br.payload) rec \
         WHERE br.backup_id = $1 AND br.table_name = $2",
    );
    let restored = diesel::sql_query(refill)
        .bind::<BigInt, _>(backup_id)
        .bind::<Text, _>(table)
        .execute(conn)
        .await?;
    diesel::sql_query(resequence_statement(table))
        .execute(conn)
        .await?;
    Ok(restored as u64)
}

#[async_trait]
impl BackupStore for PostgresBackupStore {
    async fn create(&self, request: &BackupRequest) -> Result<i64, BackupStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let snapshot_tables = self.catalog.snapshot_table_names();

        // One transaction for the whole capture keeps the snapshot a single
        // point in time across tables.
        let backup_id = conn
            .transaction::<i64, diesel::result::Error, _>(|conn| {
                let request = request.clone();
                let snapshot_tables = snapshot_tables.clone();
                async move {
                    let new_backup = NewDatabaseBackupRow {
                        backup_type: request
                            .backup_type
                            .as_deref()
                            .unwrap_or(DEFAULT_BACKUP_TYPE),
                        created_by: request.created_by.as_deref(),
                        notes: request.notes.as_deref(),
                    };
                    let backup_id: i64 = diesel::insert_into(database_backups::table)
                        .values(&new_backup)
                        .returning(database_backups::id)
                        .get_result(conn)
                        .await?;

                    for table in &snapshot_tables {
                        snapshot_table(conn, backup_id, table).await?;
                        debug!(backup_id, table, "table snapshot captured");
                    }

                    let totals: CountRow = diesel::sql_query(
                        "SELECT coalesce(sum(row_count), 0) AS total \
                         FROM backup_records WHERE backup_id = $1",
                    )
                    .bind::<BigInt, _>(backup_id)
                    .get_result(conn)
                    .await?;

                    diesel::update(database_backups::table.find(backup_id))
                        .set((
                            database_backups::tables_count
                                .eq(i32::try_from(snapshot_tables.len()).unwrap_or(i32::MAX)),
                            database_backups::total_records.eq(totals.total),
                        ))
                        .execute(conn)
                        .await?;

                    Ok(backup_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        Ok(backup_id)
    }

    async fn list(&self) -> Result<Vec<BackupSummary>, BackupStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<DatabaseBackupRow> = database_backups::table
            .order(database_backups::created_at.desc())
            .select(DatabaseBackupRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(BackupSummary::from).collect())
    }

    async fn restore(
        &self,
        backup_id: i64,
        table: Option<String>,
    ) -> Result<u64, BackupStoreError> {
        let eligible = self.catalog.snapshot_table_names();
        if let Some(requested) = &table {
            if !eligible.iter().any(|name| name == requested) {
                return Err(BackupStoreError::unknown_table(requested.clone()));
            }
        }

        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let recorded: Vec<String> = backup_records::table
            .filter(backup_records::backup_id.eq(backup_id))
            .select(backup_records::table_name)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        let targets: Vec<&str> = match &table {
            Some(requested) => {
                if !recorded.iter().any(|name| name == requested) {
                    return Err(BackupStoreError::snapshot_missing(backup_id));
                }
                vec![requested.as_str()]
            }
            None => {
                if recorded.is_empty() {
                    return Err(BackupStoreError::snapshot_missing(backup_id));
                }
                // Dependency order from the catalog, so parents land before
                // their referencing rows.
                eligible
                    .iter()
                    .copied()
                    .filter(|name| recorded.iter().any(|rec| rec == name))
                    .collect()
            }
        };

        // One transaction per table: a failed table leaves the others as
        // they were, restored or untouched.
        let mut total_restored = 0;
        for target in targets {
            let restored = conn
                .transaction::<u64, diesel::result::Error, _>(|conn| {
                    async move { restore_table(conn, backup_id, target).await }.scope_boxed()
                })
                .await
                .map_err(diesel_error)?;
            debug!(backup_id, table = target, restored, "table restored");
            total_restored += restored;
        }
        Ok(total_restored)
    }

    async fn purge_older_than(&self, days: u32) -> Result<u64, BackupStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let cutoff = Utc::now() - Duration::days(i64::from(days));

        let purged = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                async move {
                    let aged = database_backups::table
                        .filter(database_backups::created_at.lt(cutoff))
                        .select(database_backups::id);
                    diesel::delete(
                        backup_records::table.filter(backup_records::backup_id.eq_any(aged)),
                    )
                    .execute(conn)
                    .await?;
                    diesel::delete(
                        database_backups::table
                            .filter(database_backups::created_at.lt(cutoff)),
                    )
                    .execute(conn)
                    .await
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        Ok(purged as u64)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::outbound::persistence::pool::PoolError;

    #[rstest]
    fn pool_failures_surface_as_connection_errors() {
        let error = pool_error(PoolError::checkout("timed out"));
        assert!(matches!(error, BackupStoreError::Connection { .. }));
    }

    #[rstest]
    fn diesel_failures_surface_as_query_errors() {
        let error = diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(error, BackupStoreError::Query { .. }));
    }

    #[rstest]
    fn restores_realign_the_id_sequence_with_the_restored_rows() {
        let statement = resequence_statement("orders");
        assert_eq!(
            statement,
            "SELECT setval(pg_get_serial_sequence('orders', 'id'), \
             coalesce(max(id), 1)) FROM orders"
        );
    }

    #[rstest]
    fn the_snapshot_set_never_contains_the_bookkeeping_tables() {
        let catalog = SchemaCatalog::new();
        let names = catalog.snapshot_table_names();
        assert!(!names.contains(&"database_backups"));
        assert!(!names.contains(&"backup_records"));
    }
}
