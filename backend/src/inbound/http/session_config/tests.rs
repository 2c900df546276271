//! Session settings under release and debug rules.

use std::collections::HashMap;

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct KeyDir {
    _dir: TempDir,
    path: String,
}

fn key_file(len: usize) -> KeyDir {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("session_key");
    std::fs::write(&path, vec![b'k'; len]).expect("write key");
    KeyDir {
        path: path.to_string_lossy().into_owned(),
        _dir: dir,
    }
}

#[fixture]
fn full_key() -> KeyDir {
    key_file(MIN_KEY_LEN)
}

fn env_with(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

fn release_env(key: &KeyDir, overrides: &[(&'static str, Option<&str>)]) -> MockEnv {
    let mut vars = vec![
        (KEY_FILE_ENV, key.path.as_str()),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ];
    for (name, value) in overrides {
        vars.retain(|(existing, _)| existing != name);
        if let Some(value) = value {
            vars.push((name, value));
        }
    }
    env_with(&vars)
}

fn release_error(env: &MockEnv) -> SessionConfigError {
    match session_settings_from_env(env, BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_complete_settings(full_key: KeyDir) {
    let env = release_env(&full_key, &[]);
    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(full_key: KeyDir, #[case] missing: &'static str) {
    let env = release_env(&full_key, &[(missing, None)]);
    let error = release_error(&env);
    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "2")]
fn release_rejects_malformed_toggles(
    full_key: KeyDir,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let env = release_env(&full_key, &[(name, Some(value))]);
    let error = release_error(&env);
    assert!(matches!(error, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_refuses_ephemeral_keys(full_key: KeyDir) {
    let env = release_env(&full_key, &[(ALLOW_EPHEMERAL_ENV, Some("yes"))]);
    assert!(matches!(
        release_error(&env),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_refuses_none_without_secure(full_key: KeyDir) {
    let env = release_env(
        &full_key,
        &[(COOKIE_SECURE_ENV, Some("0")), (SAMESITE_ENV, Some("None"))],
    );
    assert!(matches!(
        release_error(&env),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_needs_a_readable_key(full_key: KeyDir) {
    let missing = format!("{}.absent", full_key.path);
    let env = release_env(&full_key, &[(KEY_FILE_ENV, Some(missing.as_str()))]);
    assert!(matches!(
        release_error(&env),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_needs_a_long_key() {
    let short = key_file(32);
    let env = release_env(&short, &[]);
    assert!(matches!(
        release_error(&env),
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));
}

#[rstest]
fn debug_starts_without_any_configuration() {
    let env = env_with(&[]);
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_falls_back_on_malformed_same_site(full_key: KeyDir) {
    let env = release_env(&full_key, &[(SAMESITE_ENV, Some("sometimes"))]);
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug fallback");
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_short_keys() {
    let short = key_file(16);
    let env = release_env(&short, &[]);
    assert!(session_settings_from_env(&env, BuildMode::Debug).is_ok());
}

#[rstest]
#[case("1", Some(true))]
#[case(" YES ", Some(true))]
#[case("n", Some(false))]
#[case("False", Some(false))]
#[case("on", None)]
fn booleans_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
