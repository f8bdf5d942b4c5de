mod common;

use common::fixture_path;
use zen_crypto::AuthenticationError;
use zen_crypto::Authenticator;
use zen_crypto::KeyError;
use zen_crypto::Settings;
use zen_crypto::TokenError;

fn write_settings(dir: &std::path::Path, private_key_path: &str, public_key_path: &str) {
    write_settings_with_ttl(dir, private_key_path, public_key_path, 900);
}

fn write_settings_with_ttl(
    dir: &std::path::Path,
    private_key_path: &str,
    public_key_path: &str,
    time_to_live_secs: i64,
) {
    let contents = format!(
        r#"
[password]
pepper = "integration-pepper"

[password.argon2]
memory = 4096
iterations = 1
parallelism = 1
salt_length = 16
key_length = 32

[jwt]
private_key_path = "{}"
public_key_path = "{}"
issuer = "zen"
subject = "zen-service"
audience = ["api"]
time_to_live_secs = {}
"#,
        private_key_path, public_key_path, time_to_live_secs
    );

    std::fs::write(dir.join("default.toml"), contents).expect("Failed to write settings");
}

#[test]
fn test_login_flow_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(
        dir.path(),
        &fixture_path("private.pem"),
        &fixture_path("public.pem"),
    );

    let settings = Settings::load_from(dir.path()).expect("Failed to load settings");
    let authenticator =
        Authenticator::from_settings(&settings).expect("Failed to build authenticator");

    let hash = authenticator.hash_password("pass_word!").unwrap();
    assert!(hash.starts_with("$argon2id$v=19$m=4096,t=1,p=1$"));

    let result = authenticator
        .authenticate("pass_word!", &hash, "user-42")
        .expect("Authentication failed");

    let claims = authenticator.validate_token(&result.access_token).unwrap();
    assert_eq!(claims.sub, "user-42");
    assert_eq!(claims.iss, "zen");
    assert_eq!(claims.aud, vec!["api"]);
    assert_eq!(claims.exp - claims.iat, 900);
}

#[test]
fn test_wrong_password_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(
        dir.path(),
        &fixture_path("private.pem"),
        &fixture_path("public.pem"),
    );

    let settings = Settings::load_from(dir.path()).unwrap();
    let authenticator = Authenticator::from_settings(&settings).unwrap();

    let hash = authenticator.hash_password("pass_word!").unwrap();
    let result = authenticator.authenticate("not_it", &hash, "user-42");
    assert!(matches!(
        result,
        Err(AuthenticationError::InvalidCredentials)
    ));
}

#[test]
fn test_missing_key_file_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(
        dir.path(),
        &fixture_path("does-not-exist.pem"),
        &fixture_path("public.pem"),
    );

    let settings = Settings::load_from(dir.path()).unwrap();
    let result = Authenticator::from_settings(&settings);
    assert!(matches!(
        result,
        Err(AuthenticationError::KeyError(KeyError::FileRead { .. }))
    ));
}

#[test]
fn test_out_of_range_time_to_live_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    write_settings_with_ttl(
        dir.path(),
        &fixture_path("private.pem"),
        &fixture_path("public.pem"),
        i64::MAX,
    );

    let settings = Settings::load_from(dir.path()).unwrap();
    let result = Authenticator::from_settings(&settings);
    assert!(matches!(
        result,
        Err(AuthenticationError::TokenError(
            TokenError::TimeToLiveOutOfRange(_)
        ))
    ));
}
