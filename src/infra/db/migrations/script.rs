//! Migration script files: discovery, parsing and creation.
//!
//! File format:
//!
//! ```sql
//! -- up
//! CREATE TABLE t (...);
//!
//! -- down
//! DROP TABLE t;
//! ```
//!
//! Names follow `<YYYYMMDDHHMM>__<slug>.sql` so lexicographic order is
//! creation order.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{
    DEFAULT_MIGRATION_NAME, FALLBACK_MIGRATION_SLUG, MIGRATION_FILE_EXTENSION, MIGRATION_TEMPLATE,
};
use crate::errors::{AppError, AppResult};

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// One migration file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    name: String,
    path: PathBuf,
}

impl MigrationScript {
    fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }

    /// File name, as recorded in the ledger.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name without the `.sql` extension.
    pub fn identifier(&self) -> &str {
        self.name
            .strip_suffix(&format!(".{}", MIGRATION_FILE_EXTENSION))
            .unwrap_or(&self.name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and split the file into its sections.
    pub fn sections(&self) -> AppResult<MigrationSections> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(parse_script(&raw))
    }
}

/// Forward and optional reverse SQL of a migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSections {
    pub forward: String,
    pub reverse: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Marker {
    Up,
    Down,
}

/// Recognize `-- up` / `-- down` lines, case-insensitive, whitespace-tolerant.
fn marker(line: &str) -> Option<Marker> {
    let word = line.trim().strip_prefix("--")?.trim();
    if word.eq_ignore_ascii_case("up") {
        Some(Marker::Up)
    } else if word.eq_ignore_ascii_case("down") {
        Some(Marker::Down)
    } else {
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Forward,
    Reverse,
}

/// Split raw file content into forward and reverse sections.
///
/// The first `-- down` line switches to the reverse section; everything after it,
/// further markers included, belongs to the reverse section. A leading `-- up`
/// line is dropped. No `-- down` line means a forward-only migration.
pub fn parse_script(raw: &str) -> MigrationSections {
    let mut section = Section::Forward;
    let mut seen_forward_content = false;
    let mut forward: Vec<&str> = Vec::new();
    let mut reverse: Vec<&str> = Vec::new();
    let mut has_down = false;

    for line in raw.lines() {
        match section {
            Section::Forward => match marker(line) {
                Some(Marker::Down) => {
                    section = Section::Reverse;
                    has_down = true;
                }
                Some(Marker::Up) if !seen_forward_content => {
                    seen_forward_content = true;
                }
                _ => {
                    if !line.trim().is_empty() {
                        seen_forward_content = true;
                    }
                    forward.push(line);
                }
            },
            Section::Reverse => reverse.push(line),
        }
    }

    let reverse = if has_down {
        Some(reverse.join("\n").trim().to_string()).filter(|sql| !sql.is_empty())
    } else {
        None
    };

    MigrationSections {
        forward: forward.join("\n").trim().to_string(),
        reverse,
    }
}

/// List `.sql` files in `dir`, sorted by name. Creates `dir` if missing.
pub fn list_scripts(dir: &Path) -> AppResult<Vec<MigrationScript>> {
    fs::create_dir_all(dir)?;

    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let is_sql = Path::new(&name)
            .extension()
            .is_some_and(|ext| ext == MIGRATION_FILE_EXTENSION);
        if is_sql {
            scripts.push(MigrationScript::new(name, entry.path()));
        }
    }

    scripts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(scripts)
}

/// Locate a script by its recorded file name.
pub fn find_script(dir: &Path, name: &str) -> Option<MigrationScript> {
    let path = dir.join(name);
    path.is_file()
        .then(|| MigrationScript::new(name.to_string(), path))
}

/// Lowercase, collapse non-alphanumerics to `_`, trim underscores.
pub fn to_slug(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Create an empty migration template stamped with the current minute.
pub fn create_script(dir: &Path, name: Option<&str>) -> AppResult<MigrationScript> {
    create_script_at(dir, name, Utc::now())
}

/// Create an empty migration template stamped with `now`.
///
/// # Errors
/// Returns `Conflict` if a file with the generated name already exists.
pub fn create_script_at(
    dir: &Path,
    name: Option<&str>,
    now: DateTime<Utc>,
) -> AppResult<MigrationScript> {
    fs::create_dir_all(dir)?;

    let mut slug = to_slug(name.unwrap_or(DEFAULT_MIGRATION_NAME));
    if slug.is_empty() {
        slug = FALLBACK_MIGRATION_SLUG.to_string();
    }

    let file_name = format!(
        "{}__{}.{}",
        now.format("%Y%m%d%H%M"),
        slug,
        MIGRATION_FILE_EXTENSION
    );
    let path = dir.join(&file_name);

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => AppError::conflict(format!("Migration {}", file_name)),
            _ => AppError::Io(e),
        })?;
    file.write_all(MIGRATION_TEMPLATE.as_bytes())?;

    tracing::info!(file = %path.display(), "Created migration");

    Ok(MigrationScript::new(file_name, path))
}
