//! Seed service - Minimal reference data for local environments.

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::config::SEED_REFERENCE_EMAIL;
use crate::errors::AppResult;

/// Idempotent insert of the reference account.
pub const SEED_REFERENCE_USER_SQL: &str =
    "INSERT INTO seed_users (email) VALUES ($1) ON CONFLICT (email) DO NOTHING";

/// Applies seed data; safe to run repeatedly.
pub struct Seeder<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> Seeder<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run every seed step, returning the number of rows inserted.
    pub async fn run(&self) -> AppResult<u64> {
        tracing::info!("Running base seeds...");
        let inserted = self.seed_reference_user().await?;
        tracing::info!(inserted, "Seed completed");
        Ok(inserted)
    }

    async fn seed_reference_user(&self) -> AppResult<u64> {
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                SEED_REFERENCE_USER_SQL,
                [SEED_REFERENCE_EMAIL.into()],
            ))
            .await?;
        Ok(result.rows_affected())
    }
}
