//! Password value object - Domain layer password handling.
//!
//! DDD: Encapsulates password hashing as a domain value object.
//! SOLID (SRP): Single responsibility - password operations only.
//! DRY: Cost factor is validated once in `HasherConfig` and passed in explicitly.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{
    DEFAULT_SALT_ROUNDS, MAX_PASSWORD_BYTES, MAX_SALT_ROUNDS, MIN_PASSWORD_LENGTH,
    MIN_SALT_ROUNDS,
};
use crate::errors::{AppError, AppResult};

/// Packed bcrypt digest: `$2b$12$` followed by 22 salt and 31 hash characters.
/// The cost field is limited to 04..=31.
static BCRYPT_DIGEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$2[abxy]\$(0[4-9]|[12]\d|3[01])\$[./A-Za-z0-9]{53}$")
        .expect("bcrypt digest pattern is valid")
});

/// Hashing parameters for new passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasherConfig {
    salt_rounds: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            salt_rounds: DEFAULT_SALT_ROUNDS,
        }
    }
}

impl HasherConfig {
    /// Create a config with an explicit bcrypt cost.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the cost is outside 4..=31.
    pub fn new(salt_rounds: u32) -> AppResult<Self> {
        if !(MIN_SALT_ROUNDS..=MAX_SALT_ROUNDS).contains(&salt_rounds) {
            return Err(AppError::salt_rounds_out_of_range(&salt_rounds.to_string()));
        }
        Ok(Self { salt_rounds })
    }

    /// Parse a cost factor coming from an external source such as the environment.
    ///
    /// Rejects decimals, non-numeric values and anything outside 4..=31.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let value = raw.trim();

        if value.contains('.') {
            return Err(AppError::invalid_configuration(format!(
                "PASSWORD_SALT_ROUNDS must be an integer, got '{}'",
                value
            )));
        }

        let rounds: i64 = value
            .parse()
            .map_err(|_| AppError::salt_rounds_out_of_range(value))?;

        if rounds < MIN_SALT_ROUNDS as i64 || rounds > MAX_SALT_ROUNDS as i64 {
            return Err(AppError::salt_rounds_out_of_range(value));
        }

        Ok(Self {
            salt_rounds: rounds as u32,
        })
    }

    /// Parse an optional value; missing or blank means the default cost.
    pub fn from_optional(raw: Option<&str>) -> AppResult<Self> {
        match raw {
            Some(value) if !value.trim().is_empty() => Self::parse(value),
            _ => Ok(Self::default()),
        }
    }

    /// Get the bcrypt cost factor.
    pub fn salt_rounds(&self) -> u32 {
        self.salt_rounds
    }
}

/// Password value object that handles hashing and verification.
///
/// DDD: Value object - immutable, compared by value.
/// The wrapped digest is always a well-formed bcrypt string.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// Hashing runs on the blocking pool since its cost grows with 2^rounds.
    ///
    /// # Errors
    /// Returns `WeakSecret` if the trimmed password is shorter than 12 characters.
    pub async fn hash(plain_text: &str, config: &HasherConfig) -> AppResult<Self> {
        if plain_text.trim().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::WeakSecret {
                min_length: MIN_PASSWORD_LENGTH,
            });
        }
        if plain_text.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::SecretTooLong {
                max_bytes: MAX_PASSWORD_BYTES,
            });
        }

        let plain = plain_text.to_owned();
        let cost = config.salt_rounds();
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hash task failed: {}", e)))?
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self { hash })
    }

    /// Create a Password from an existing digest (from database).
    ///
    /// # Errors
    /// Returns `EmptySecret` for an empty string and `InvalidDigestFormat`
    /// for anything that is not a packed bcrypt digest.
    pub fn from_digest(digest: impl Into<String>) -> AppResult<Self> {
        let hash = digest.into();

        if hash.is_empty() {
            return Err(AppError::EmptySecret);
        }
        if !BCRYPT_DIGEST.is_match(&hash) {
            return Err(AppError::InvalidDigestFormat);
        }

        Ok(Self { hash })
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Cost factor encoded in the digest.
    pub fn salt_rounds(&self) -> u32 {
        self.hash
            .get(4..6)
            .and_then(|rounds| rounds.parse().ok())
            .unwrap_or_default()
    }

    /// Verify a plain text password against this hash.
    ///
    /// Never fails: malformed, empty or over-long candidates simply don't match.
    pub fn verify(&self, plain_text: &str) -> bool {
        if plain_text.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        bcrypt::verify(plain_text, &self.hash).unwrap_or(false)
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
