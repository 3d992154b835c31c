//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Database
// =============================================================================

/// Fallback database user when DATABASE_URL is not set
pub const DEFAULT_DB_USER: &str = "dev";

/// Fallback database password when DATABASE_URL is not set
pub const DEFAULT_DB_PASSWORD: &str = "devpass";

/// Fallback database name when DATABASE_URL is not set
pub const DEFAULT_DB_NAME: &str = "myapp_dev";

/// Fallback database host and port
pub const DEFAULT_DB_HOST: &str = "localhost:5432";

// =============================================================================
// Migrations
// =============================================================================

/// Default directory scanned for `.sql` migration files
pub const DEFAULT_MIGRATIONS_DIR: &str = "db/migrations";

/// Table recording applied migrations
pub const MIGRATIONS_TABLE: &str = "kit_migrations";

/// Extension of recognized migration files
pub const MIGRATION_FILE_EXTENSION: &str = "sql";

/// Name used by `migrate create` when none is given
pub const DEFAULT_MIGRATION_NAME: &str = "new_migration";

/// Slug used when the given name has no usable characters
pub const FALLBACK_MIGRATION_SLUG: &str = "migration";

/// Body written into freshly created migration files
pub const MIGRATION_TEMPLATE: &str = "-- up\n-- down\n";

// =============================================================================
// Password hashing
// =============================================================================

/// Minimum password length requirement (trimmed, in characters)
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Default bcrypt cost factor
pub const DEFAULT_SALT_ROUNDS: u32 = 12;

/// Lowest bcrypt cost accepted
pub const MIN_SALT_ROUNDS: u32 = 4;

/// Highest bcrypt cost accepted
pub const MAX_SALT_ROUNDS: u32 = 31;

// =============================================================================
// Users
// =============================================================================

/// Maximum email length
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Maximum user name length
pub const MAX_NAME_LENGTH: usize = 255;

/// Email domains rejected at registration
pub const BLOCKED_EMAIL_DOMAINS: &[&str] = &["tempmail.com", "throwaway.email"];

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

/// Guest role with read-only access
pub const ROLE_GUEST: &str = "guest";

// =============================================================================
// Seed
// =============================================================================

/// Reference account inserted by `seed`
pub const SEED_REFERENCE_EMAIL: &str = "founder@example.com";
