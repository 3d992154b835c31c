//! SQL migration ledger.
//!
//! Migrations are plain `.sql` files named `{YYYYMMDDHHMM}__{slug}.sql`,
//! split into `-- up` / `-- down` sections. Applied files are recorded in
//! the `kit_migrations` table.

pub mod ledger;
pub mod script;
pub mod store;

pub use ledger::{
    ApplyReport, MigrationLedger, MigrationState, MigrationStatus, RevertOutcome, ScriptOutcome,
};
pub use script::{parse_script, MigrationScript, MigrationSections};
pub use store::{MigrationRecord, MigrationStore, PostgresMigrationStore};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockMigrationStore;
