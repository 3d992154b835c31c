//! Password value object tests through the public API.

use kit_fundador::config::Config;
use kit_fundador::{AppError, HasherConfig, Password};

fn fast() -> HasherConfig {
    HasherConfig::new(4).unwrap()
}

#[tokio::test]
async fn test_hash_and_verify() {
    let password = Password::hash("correct horse battery", &fast()).await.unwrap();

    assert!(password.as_str().starts_with("$2b$04$"));
    assert_eq!(password.as_str().len(), 60);
    assert!(password.verify("correct horse battery"));
    assert!(!password.verify("correct horse batteryX"));
}

#[tokio::test]
async fn test_digest_round_trips_through_storage() {
    let password = Password::hash("correct horse battery", &fast()).await.unwrap();
    let stored: String = password.into();

    let restored = Password::from_digest(stored).unwrap();
    assert!(restored.verify("correct horse battery"));
    assert_eq!(restored.salt_rounds(), 4);
}

#[tokio::test]
async fn test_weak_secret_is_rejected() {
    let err = Password::hash("   short     ", &fast()).await.unwrap_err();
    assert!(matches!(err, AppError::WeakSecret { min_length: 12 }));
}

#[test]
fn test_plaintext_is_not_a_digest() {
    assert!(matches!(
        Password::from_digest("correct horse battery"),
        Err(AppError::InvalidDigestFormat)
    ));
}

#[tokio::test]
async fn test_configured_salt_rounds_flow_into_digest() {
    let config = Config::from_lookup(|key| match key {
        "PASSWORD_SALT_ROUNDS" => Some("5".to_string()),
        "DATABASE_URL" => Some("postgres://localhost/test".to_string()),
        _ => None,
    })
    .unwrap();

    let password = Password::hash("correct horse battery", &config.hasher)
        .await
        .unwrap();
    assert_eq!(password.salt_rounds(), 5);
}

#[test]
fn test_invalid_salt_rounds_fail_configuration() {
    let err = Config::from_lookup(|key| {
        (key == "PASSWORD_SALT_ROUNDS").then(|| "99".to_string())
    })
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidConfiguration(_)));
}
