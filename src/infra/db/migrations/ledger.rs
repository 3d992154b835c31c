//! Migration ledger - applies pending scripts and reverts the latest one.
//!
//! Scripts run strictly one after another; each is recorded before the next
//! one starts. There is no locking: only one process may drive a given
//! database's ledger at a time.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::script::{self, MigrationScript};
use super::store::MigrationStore;
use crate::errors::{AppError, AppResult};

/// What happened to one pending script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ScriptOutcome {
    Applied { name: String },
    Skipped { name: String, reason: String },
}

impl ScriptOutcome {
    pub fn name(&self) -> &str {
        match self {
            ScriptOutcome::Applied { name } | ScriptOutcome::Skipped { name, .. } => name,
        }
    }
}

/// Result of `apply_pending`, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub outcomes: Vec<ScriptOutcome>,
}

impl ApplyReport {
    /// Names of the scripts applied by this run
    pub fn applied(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ScriptOutcome::Applied { .. }))
            .map(ScriptOutcome::name)
            .collect()
    }

    /// Names of the scripts skipped by this run
    pub fn skipped(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ScriptOutcome::Skipped { .. }))
            .map(ScriptOutcome::name)
            .collect()
    }
}

/// Result of `revert_latest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RevertOutcome {
    Reverted { name: String },
    NothingToRevert,
}

/// State of a migration as seen by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum MigrationState {
    Applied { at: DateTime<Utc> },
    Pending,
    /// Recorded in the ledger, but the file is gone
    Orphaned { at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub name: String,
    #[serde(flatten)]
    pub state: MigrationState,
}

/// Applies `.sql` scripts from a directory against a `MigrationStore`.
pub struct MigrationLedger<S: MigrationStore> {
    store: S,
    dir: PathBuf,
}

impl<S: MigrationStore> MigrationLedger<S> {
    pub fn new(store: S, dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            dir: dir.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create the ledger table if it does not exist yet.
    pub async fn ensure_ledger(&self) -> AppResult<()> {
        self.store.ensure_ledger().await
    }

    /// Scripts in the migrations directory, oldest first.
    pub fn list_scripts(&self) -> AppResult<Vec<MigrationScript>> {
        script::list_scripts(&self.dir)
    }

    /// Create a new empty script in the migrations directory.
    pub fn create_script(&self, name: Option<&str>) -> AppResult<MigrationScript> {
        script::create_script(&self.dir, name)
    }

    /// Apply every script not yet recorded, in order.
    ///
    /// # Errors
    /// Stops at the first failing script and returns `MigrationFailed`;
    /// scripts applied before it stay recorded.
    pub async fn apply_pending(&self) -> AppResult<ApplyReport> {
        self.store.ensure_ledger().await?;

        let applied: HashSet<String> = self
            .store
            .applied()
            .await?
            .into_iter()
            .map(|record| record.name)
            .collect();

        let mut report = ApplyReport::default();

        for script in self.list_scripts()? {
            if applied.contains(script.name()) {
                continue;
            }

            let sections = script.sections()?;
            if sections.forward.is_empty() {
                tracing::warn!(migration = script.name(), "No -- up block, skipping");
                report.outcomes.push(ScriptOutcome::Skipped {
                    name: script.name().to_string(),
                    reason: "no -- up block".to_string(),
                });
                continue;
            }

            tracing::info!(migration = script.name(), "Applying migration");
            if let Err(e) = self.store.apply(script.name(), &sections.forward).await {
                tracing::error!(migration = script.name(), error = %e, "Migration failed");
                return Err(AppError::migration_failed(script.name(), e));
            }

            report.outcomes.push(ScriptOutcome::Applied {
                name: script.name().to_string(),
            });
        }

        tracing::info!(applied = report.applied().len(), "Migrations up to date");
        Ok(report)
    }

    /// Revert the most recently applied migration, and only that one.
    ///
    /// # Errors
    /// `MissingMigrationFile` if its file is gone, `NoDownBlock` if it has
    /// no reverse section. The ledger is untouched in both cases.
    pub async fn revert_latest(&self) -> AppResult<RevertOutcome> {
        self.store.ensure_ledger().await?;

        let Some(latest) = self.store.latest().await? else {
            tracing::info!("No migrations to revert");
            return Ok(RevertOutcome::NothingToRevert);
        };

        let script = script::find_script(&self.dir, &latest.name)
            .ok_or_else(|| AppError::MissingMigrationFile(latest.name.clone()))?;

        let reverse = script
            .sections()?
            .reverse
            .ok_or_else(|| AppError::NoDownBlock(latest.name.clone()))?;

        tracing::info!(migration = %latest.name, "Reverting migration");
        if let Err(e) = self.store.revert(&latest.name, &reverse).await {
            tracing::error!(migration = %latest.name, error = %e, "Revert failed");
            return Err(AppError::migration_failed(latest.name, e));
        }

        Ok(RevertOutcome::Reverted { name: latest.name })
    }

    /// Every script on disk with its state, followed by orphaned records.
    pub async fn status(&self) -> AppResult<Vec<MigrationStatus>> {
        self.store.ensure_ledger().await?;

        let records = self.store.applied().await?;
        let mut applied: HashMap<&str, DateTime<Utc>> = records
            .iter()
            .map(|r| (r.name.as_str(), r.applied_at))
            .collect();

        let mut statuses: Vec<MigrationStatus> = self
            .list_scripts()?
            .into_iter()
            .map(|script| {
                let state = match applied.remove(script.name()) {
                    Some(at) => MigrationState::Applied { at },
                    None => MigrationState::Pending,
                };
                MigrationStatus {
                    name: script.name().to_string(),
                    state,
                }
            })
            .collect();

        statuses.extend(
            records
                .iter()
                .filter(|r| applied.contains_key(r.name.as_str()))
                .map(|r| MigrationStatus {
                    name: r.name.clone(),
                    state: MigrationState::Orphaned { at: r.applied_at },
                }),
        );

        Ok(statuses)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::infra::db::migrations::store::{MigrationRecord, MockMigrationStore};

    fn record(name: &str) -> MigrationRecord {
        MigrationRecord {
            name: name.to_string(),
            applied_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_revert_on_empty_ledger_is_noop() {
        let tmp = TempDir::new().unwrap();
        let mut store = MockMigrationStore::new();
        store.expect_ensure_ledger().returning(|| Ok(()));
        store.expect_latest().returning(|| Ok(None));
        store.expect_revert().never();

        let ledger = MigrationLedger::new(store, tmp.path());
        let outcome = ledger.revert_latest().await.unwrap();

        assert_eq!(outcome, RevertOutcome::NothingToRevert);
    }

    #[tokio::test]
    async fn test_revert_missing_file() {
        let tmp = TempDir::new().unwrap();
        let mut store = MockMigrationStore::new();
        store.expect_ensure_ledger().returning(|| Ok(()));
        store
            .expect_latest()
            .returning(|| Ok(Some(record("202501010000__gone.sql"))));
        store.expect_revert().never();

        let ledger = MigrationLedger::new(store, tmp.path());
        let err = ledger.revert_latest().await.unwrap_err();

        assert!(matches!(err, AppError::MissingMigrationFile(ref n) if n == "202501010000__gone.sql"));
    }

    #[tokio::test]
    async fn test_revert_without_down_block_leaves_ledger() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.sql"), "-- up\nCREATE TABLE t ();").unwrap();

        let mut store = MockMigrationStore::new();
        store.expect_ensure_ledger().returning(|| Ok(()));
        store.expect_latest().returning(|| Ok(Some(record("a.sql"))));
        store.expect_revert().never();

        let ledger = MigrationLedger::new(store, tmp.path());
        let err = ledger.revert_latest().await.unwrap_err();

        assert!(matches!(err, AppError::NoDownBlock(ref n) if n == "a.sql"));
    }

    #[tokio::test]
    async fn test_revert_runs_down_block_for_latest_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.sql"), "-- up\nA;\n-- down\nUNDO A;").unwrap();

        let mut store = MockMigrationStore::new();
        store.expect_ensure_ledger().returning(|| Ok(()));
        store.expect_latest().returning(|| Ok(Some(record("a.sql"))));
        store
            .expect_revert()
            .withf(|name, sql| name == "a.sql" && sql == "UNDO A;")
            .times(1)
            .returning(|_, _| Ok(()));

        let ledger = MigrationLedger::new(store, tmp.path());
        let outcome = ledger.revert_latest().await.unwrap();

        assert_eq!(
            outcome,
            RevertOutcome::Reverted {
                name: "a.sql".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_apply_failure_stops_and_names_script() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("1__ok.sql"), "-- up\nOK;").unwrap();
        fs::write(tmp.path().join("2__bad.sql"), "-- up\nBAD;").unwrap();
        fs::write(tmp.path().join("3__later.sql"), "-- up\nLATER;").unwrap();

        let mut store = MockMigrationStore::new();
        store.expect_ensure_ledger().returning(|| Ok(()));
        store.expect_applied().returning(|| Ok(vec![]));
        store
            .expect_apply()
            .withf(|name, _| name == "1__ok.sql")
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_apply()
            .withf(|name, _| name == "2__bad.sql")
            .times(1)
            .returning(|_, _| Err(AppError::internal("syntax error")));
        store
            .expect_apply()
            .withf(|name, _| name == "3__later.sql")
            .never();

        let ledger = MigrationLedger::new(store, tmp.path());
        let err = ledger.apply_pending().await.unwrap_err();

        assert!(matches!(err, AppError::MigrationFailed { ref name, .. } if name == "2__bad.sql"));
    }

    #[tokio::test]
    async fn test_status_reports_pending_applied_and_orphaned() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("1__a.sql"), "-- up\nA;").unwrap();
        fs::write(tmp.path().join("2__b.sql"), "-- up\nB;").unwrap();

        let mut store = MockMigrationStore::new();
        store.expect_ensure_ledger().returning(|| Ok(()));
        store
            .expect_applied()
            .returning(|| Ok(vec![record("0__gone.sql"), record("1__a.sql")]));

        let ledger = MigrationLedger::new(store, tmp.path());
        let statuses = ledger.status().await.unwrap();

        let summary: Vec<(&str, &str)> = statuses
            .iter()
            .map(|s| {
                let state = match s.state {
                    MigrationState::Applied { .. } => "applied",
                    MigrationState::Pending => "pending",
                    MigrationState::Orphaned { .. } => "orphaned",
                };
                (s.name.as_str(), state)
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("1__a.sql", "applied"),
                ("2__b.sql", "pending"),
                ("0__gone.sql", "orphaned"),
            ]
        );
    }
}
