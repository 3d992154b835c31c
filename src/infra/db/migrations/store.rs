//! Ledger persistence port and its PostgreSQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction, Statement,
    TransactionTrait,
};
use serde::Serialize;

use crate::config::MIGRATIONS_TABLE;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One applied migration, as recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRecord {
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

/// Ledger storage trait for dependency injection.
///
/// `apply` and `revert` each run the script and the ledger write as one
/// unit: either both take effect or neither does.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MigrationStore: Send + Sync {
    /// Create the ledger table if absent
    async fn ensure_ledger(&self) -> AppResult<()>;

    /// All records, oldest first
    async fn applied(&self) -> AppResult<Vec<MigrationRecord>>;

    /// Most recently applied record
    async fn latest(&self) -> AppResult<Option<MigrationRecord>>;

    /// Execute forward SQL and insert a record for `name`
    async fn apply(&self, name: &str, sql: &str) -> AppResult<()>;

    /// Execute reverse SQL and delete the record for `name`
    async fn revert(&self, name: &str, sql: &str) -> AppResult<()>;
}

/// `MigrationStore` backed by a borrowed PostgreSQL connection.
pub struct PostgresMigrationStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostgresMigrationStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(sql: String, name: &str) -> Statement {
        Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, [name.into()])
    }

    fn record_from_row(row: &sea_orm::QueryResult) -> AppResult<MigrationRecord> {
        Ok(MigrationRecord {
            name: row.try_get("", "name")?,
            applied_at: row.try_get("", "run_on")?,
        })
    }

    /// Run `script` then `ledger_write` in one transaction.
    async fn in_transaction(&self, script: &str, ledger_write: Statement) -> AppResult<()> {
        let txn = self.db.begin().await?;

        match Self::run_in(&txn, script, ledger_write).await {
            Ok(()) => {
                txn.commit().await?;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Migration rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn run_in(
        txn: &DatabaseTransaction,
        script: &str,
        ledger_write: Statement,
    ) -> AppResult<()> {
        txn.execute_unprepared(script).await?;
        txn.execute(ledger_write).await?;
        Ok(())
    }
}

#[async_trait]
impl<'a> MigrationStore for PostgresMigrationStore<'a> {
    async fn ensure_ledger(&self) -> AppResult<()> {
        self.db
            .execute_unprepared(&format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id SERIAL PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE,
                    run_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
                MIGRATIONS_TABLE
            ))
            .await?;
        Ok(())
    }

    async fn applied(&self) -> AppResult<Vec<MigrationRecord>> {
        let rows = self
            .db
            .query_all(Statement::from_string(
                DatabaseBackend::Postgres,
                format!(
                    "SELECT name, run_on FROM {} ORDER BY run_on ASC, id ASC",
                    MIGRATIONS_TABLE
                ),
            ))
            .await?;

        rows.iter().map(Self::record_from_row).collect()
    }

    async fn latest(&self) -> AppResult<Option<MigrationRecord>> {
        let row = self
            .db
            .query_one(Statement::from_string(
                DatabaseBackend::Postgres,
                format!(
                    "SELECT name, run_on FROM {} ORDER BY run_on DESC, id DESC LIMIT 1",
                    MIGRATIONS_TABLE
                ),
            ))
            .await?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn apply(&self, name: &str, sql: &str) -> AppResult<()> {
        let insert = Self::statement(
            format!("INSERT INTO {} (name) VALUES ($1)", MIGRATIONS_TABLE),
            name,
        );
        self.in_transaction(sql, insert).await
    }

    async fn revert(&self, name: &str, sql: &str) -> AppResult<()> {
        let delete = Self::statement(
            format!("DELETE FROM {} WHERE name = $1", MIGRATIONS_TABLE),
            name,
        );
        self.in_transaction(sql, delete).await
    }
}
