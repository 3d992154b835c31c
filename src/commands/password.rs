//! Password command - Offline hashing and verification.

use std::io::{self, Read};

use crate::cli::args::{PasswordAction, PasswordArgs};
use crate::config::Config;
use crate::domain::Password;
use crate::errors::{AppError, AppResult};

/// Execute the password command
pub async fn execute(args: PasswordArgs, config: Config) -> AppResult<()> {
    match args.action {
        PasswordAction::Hash { plaintext, stdin } => {
            let plain_text = match plaintext {
                Some(value) if !stdin => value,
                _ => read_stdin()?,
            };
            let password = Password::hash(&plain_text, &config.hasher).await?;
            println!("{}", password.as_str());
        }
        PasswordAction::Verify { digest, candidate } => {
            println!("{}", verify_line(&digest, &candidate)?);
        }
    }

    Ok(())
}

/// `match` / `no match` for a well-formed digest.
pub fn verify_line(digest: &str, candidate: &str) -> AppResult<&'static str> {
    let password = Password::from_digest(digest)?;
    Ok(if password.verify(candidate) {
        "match"
    } else {
        "no match"
    })
}

fn read_stdin() -> AppResult<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;

    let line = buf.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Err(AppError::EmptySecret);
    }
    Ok(line.to_string())
}
