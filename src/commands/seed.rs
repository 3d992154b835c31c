//! Seed command - Inserts base seed data.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::Seeder;

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;

    let result = Seeder::new(db.connection()).run().await;

    if let Err(e) = db.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }

    let inserted = result?;
    println!("Seed completed ({} new rows)", inserted);
    Ok(())
}
