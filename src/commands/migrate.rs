//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::db::migrations::{
    script, ApplyReport, MigrationLedger, MigrationState, MigrationStatus, MigrationStore,
    RevertOutcome, ScriptOutcome,
};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    tracing::info!("Running migration command...");

    let action = match args.action.unwrap_or(MigrateAction::Up) {
        MigrateAction::Create { name } => {
            let created = script::create_script(&config.migrations_dir, name.as_deref())?;
            println!("{}", created.path().display());
            return Ok(());
        }
        MigrateAction::Other(words) => {
            let verb = words.into_iter().next().unwrap_or_default();
            return Err(AppError::UnsupportedAction(verb));
        }
        action => action,
    };

    let db = Database::connect(&config).await?;

    let result = match db.ping().await {
        Ok(()) => run(&db.ledger(&config), action).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = db.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }

    result
}

/// Run a database-backed action against `ledger` and print its result.
pub async fn run<S: MigrationStore>(
    ledger: &MigrationLedger<S>,
    action: MigrateAction,
) -> AppResult<()> {
    match action {
        MigrateAction::Up => {
            tracing::info!("Running pending migrations...");
            let report = ledger.apply_pending().await?;
            for line in render_report(&report) {
                println!("{}", line);
            }
            tracing::info!(applied = report.applied().len(), "Migrations completed");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            let outcome = ledger.revert_latest().await?;
            println!("{}", render_revert(&outcome));
        }
        MigrateAction::Status { json } => {
            let status = ledger.status().await?;
            if json {
                let rendered = serde_json::to_string_pretty(&status)
                    .map_err(|e| AppError::internal(e.to_string()))?;
                println!("{}", rendered);
            } else {
                for line in render_status(&status) {
                    println!("{}", line);
                }
            }
        }
        MigrateAction::Create { .. } | MigrateAction::Other(_) => {
            return Err(AppError::internal("action does not use the database"));
        }
    }

    Ok(())
}

fn render_report(report: &ApplyReport) -> Vec<String> {
    if report.outcomes.is_empty() {
        return vec!["No pending migrations".to_string()];
    }

    report
        .outcomes
        .iter()
        .map(|outcome| match outcome {
            ScriptOutcome::Applied { name } => format!("applied: {}", name),
            ScriptOutcome::Skipped { name, reason } => format!("skipped: {} ({})", name, reason),
        })
        .collect()
}

fn render_revert(outcome: &RevertOutcome) -> String {
    match outcome {
        RevertOutcome::Reverted { name } => format!("reverted: {}", name),
        RevertOutcome::NothingToRevert => "No migrations to revert".to_string(),
    }
}

fn render_status(status: &[MigrationStatus]) -> Vec<String> {
    status
        .iter()
        .map(|entry| match &entry.state {
            MigrationState::Applied { at } => format!("{}: applied ({})", entry.name, at),
            MigrationState::Pending => format!("{}: pending", entry.name),
            MigrationState::Orphaned { at } => {
                format!("{}: orphaned, file missing ({})", entry.name, at)
            }
        })
        .collect()
}
