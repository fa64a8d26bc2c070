//! Unit tests for session configuration parsing.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temporary key file");
    file.write_all(&vec![b'k'; len]).expect("write key bytes");
    file
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

struct ReleaseEnv {
    vars: HashMap<&'static str, String>,
    _key: NamedTempFile,
}

impl ReleaseEnv {
    fn set(mut self, name: &'static str, value: &str) -> Self {
        self.vars.insert(name, value.to_owned());
        self
    }

    fn unset(mut self, name: &'static str) -> Self {
        self.vars.remove(name);
        self
    }

    fn load(&self, mode: BuildMode) -> Result<SessionSettings, SessionConfigError> {
        session_settings_from_env(&mock_env(self.vars.clone()), mode)
    }
}

#[fixture]
fn release_env() -> ReleaseEnv {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let vars = HashMap::from([
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);
    ReleaseEnv { vars, _key: key }
}

fn expect_error(result: Result<SessionSettings, SessionConfigError>) -> SessionConfigError {
    match result {
        Ok(_) => panic!("expected session configuration to be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_valid_settings_succeed(release_env: ReleaseEnv) {
    let settings = release_env
        .load(BuildMode::Release)
        .expect("valid release settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(release_env: ReleaseEnv, #[case] name: &'static str) {
    let err = expect_error(release_env.unset(name).load(BuildMode::Release));
    assert!(matches!(err, SessionConfigError::MissingEnv { name: missing } if missing == name));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "perhaps")]
fn release_rejects_invalid_values(
    release_env: ReleaseEnv,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let err = expect_error(release_env.set(name, value).load(BuildMode::Release));
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: invalid, .. } if invalid == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(release_env: ReleaseEnv) {
    let err = expect_error(
        release_env
            .set(ALLOW_EPHEMERAL_ENV, "yes")
            .load(BuildMode::Release),
    );
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_missing_key_file(release_env: ReleaseEnv) {
    let err = expect_error(
        release_env
            .set(KEY_FILE_ENV, "/nonexistent/session_key")
            .load(BuildMode::Release),
    );
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_rejects_short_key(release_env: ReleaseEnv) {
    let short = key_file(40);
    let path = short.path().to_string_lossy().into_owned();

    let err = expect_error(release_env.set(KEY_FILE_ENV, &path).load(BuildMode::Release));

    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort {
            length: 40,
            min_len: SESSION_KEY_MIN_LEN,
            ..
        }
    ));
}

#[rstest]
fn release_rejects_insecure_same_site_none(release_env: ReleaseEnv) {
    let err = expect_error(
        release_env
            .set(COOKIE_SECURE_ENV, "0")
            .set(SAMESITE_ENV, "None")
            .load(BuildMode::Release),
    );
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn secure_same_site_none_is_accepted(release_env: ReleaseEnv) {
    let settings = release_env
        .set(SAMESITE_ENV, "none")
        .load(BuildMode::Release)
        .expect("secure SameSite=None is valid");
    assert_eq!(settings.same_site, SameSite::None);
}

#[rstest]
fn debug_defaults_allow_ephemeral_key() {
    let mut vars = HashMap::new();
    vars.insert(KEY_FILE_ENV, "/nonexistent/session_key".to_owned());

    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug defaults succeed");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case(SAMESITE_ENV, "unexpected")]
#[case(COOKIE_SECURE_ENV, "maybe")]
fn debug_invalid_values_fall_back(
    release_env: ReleaseEnv,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let settings = release_env
        .set(name, value)
        .load(BuildMode::Debug)
        .expect("debug falls back to defaults");
    assert!(settings.cookie_secure);
    assert_ne!(settings.same_site, SameSite::None);
}

#[rstest]
fn debug_tolerates_key_too_short_to_derive(release_env: ReleaseEnv) {
    let tiny = key_file(8);
    let path = tiny.path().to_string_lossy().into_owned();

    let settings = release_env.set(KEY_FILE_ENV, &path).load(BuildMode::Debug);

    assert!(settings.is_ok());
}

#[rstest]
#[case("TRUE", Some(true))]
#[case(" y ", Some(true))]
#[case("No", Some(false))]
#[case("0", Some(false))]
#[case("2", None)]
fn parses_boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
