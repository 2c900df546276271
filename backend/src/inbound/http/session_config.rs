//! Cookie session settings read from the process environment.
//!
//! Release builds insist on every toggle being present and valid. Debug
//! builds fall back to safe defaults and log a warning instead, so a fresh
//! checkout can start without any secrets on disk.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

pub mod fingerprint;

pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
const MIN_KEY_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Which validation regime applies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or malformed toggles fall back with a warning.
    Debug,
    /// Missing or malformed toggles are startup errors.
    Release,
}

impl BuildMode {
    /// The mode matching `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kitchen::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) {
    ///     BuildMode::Debug
    /// } else {
    ///     BuildMode::Release
    /// };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Accept `fallback` in debug builds, otherwise surface `error`.
    fn tolerate<T>(self, error: SessionConfigError, fallback: T) -> Result<T, SessionConfigError> {
        match self {
            Self::Debug => {
                warn!(%error, "session setting ignored in debug build");
                Ok(fallback)
            }
            Self::Release => Err(error),
        }
    }
}

/// Resolved cookie session settings.
pub struct SessionSettings {
    /// Signing and encryption key.
    pub key: Key,
    /// `Secure` attribute on the session cookie.
    pub cookie_secure: bool,
    /// `SameSite` attribute on the session cookie.
    pub same_site: SameSite,
}

/// Reasons the session settings cannot be built.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A toggle required in release builds is unset.
    #[error("{name} must be set")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// A toggle holds a value outside its accepted set.
    #[error("{name}='{value}' is not one of {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Accepted values.
        expected: &'static str,
    },
    /// The key file could not be read.
    #[error("cannot read session key {path}: {source}")]
    KeyRead {
        /// Key file location.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The key file holds fewer bytes than required.
    #[error("session key {path} holds {length} bytes; at least {min_len} required")]
    KeyTooShort {
        /// Key file location.
        path: PathBuf,
        /// Bytes read.
        length: usize,
        /// Required minimum.
        min_len: usize,
    },
    /// `SameSite=None` without `Secure`.
    #[error("SESSION_SAMESITE=None needs SESSION_COOKIE_SECURE enabled")]
    InsecureSameSiteNone,
    /// Generated keys are refused outside debug builds.
    #[error("SESSION_ALLOW_EPHEMERAL cannot be enabled in release builds")]
    EphemeralNotAllowed,
}

/// Resolve session settings from `env` under `mode`.
///
/// # Errors
///
/// Returns [`SessionConfigError`] in release builds when a toggle is missing
/// or invalid, when the key file cannot be read or is too short, or when the
/// combination of toggles is unsafe.
///
/// # Examples
///
/// ```rust
/// use kitchen::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let key_path = dir.path().join("session_key");
/// std::fs::write(&key_path, [7_u8; 64])?;
/// let key_path = key_path.to_string_lossy().into_owned();
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(key_path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("yes".to_owned()),
///     "SESSION_SAMESITE" => Some("Lax".to_owned()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = flag(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = same_site(env, mode, cookie_secure)?;
    let allow_ephemeral = flag(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(env, mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn flag<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    fallback: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return mode.tolerate(SessionConfigError::MissingEnv { name }, fallback);
    };
    match parse_bool(&value) {
        Some(parsed) => Ok(parsed),
        None => mode.tolerate(
            SessionConfigError::InvalidEnv {
                name,
                value,
                expected: BOOL_EXPECTED,
            },
            fallback,
        ),
    }
}

fn same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = match mode {
        BuildMode::Debug => SameSite::Lax,
        BuildMode::Release => SameSite::Strict,
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return mode.tolerate(SessionConfigError::MissingEnv { name: SAMESITE_ENV }, fallback);
    };
    match value.to_ascii_lowercase().as_str() {
        "strict" => Ok(SameSite::Strict),
        "lax" => Ok(SameSite::Lax),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => mode.tolerate(SessionConfigError::InsecureSameSiteNone, SameSite::None),
        _ => mode.tolerate(
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            },
            fallback,
        ),
    }
}

fn session_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = env
        .string(KEY_FILE_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_KEY_PATH), PathBuf::from);
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(source) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "generating throwaway session key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };
    if bytes.len() < MIN_KEY_LEN {
        let error = SessionConfigError::KeyTooShort {
            path,
            length: bytes.len(),
            min_len: MIN_KEY_LEN,
        };
        return mode.tolerate(error, Key::generate());
    }
    Ok(Key::derive_from(&bytes))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
