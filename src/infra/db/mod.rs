//! Database connection and initialization.

use sea_orm::{ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement};

use crate::config::Config;

pub mod migrations;

pub use migrations::{MigrationLedger, PostgresMigrationStore};

/// Database wrapper for connection management.
///
/// Owns the pool; ledgers and seeders borrow it so `close` can run last.
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection to the configured database.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        tracing::debug!("Database connected");
        Ok(Self { connection })
    }

    /// Get a reference to the database connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Build a migration ledger over this connection.
    pub fn ledger(&self, config: &Config) -> MigrationLedger<PostgresMigrationStore<'_>> {
        MigrationLedger::new(
            PostgresMigrationStore::new(&self.connection),
            config.migrations_dir.clone(),
        )
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Close the underlying connection pool.
    pub async fn close(self) -> Result<(), DbErr> {
        self.connection.close().await
    }
}
