//! Session cookie settings for the dashboard login.
//!
//! Only dashboard routes rely on the cookie; the widget is anonymous. Debug
//! builds fall back to safe defaults with a warning, release builds refuse to
//! start with a missing or malformed toggle.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroizing;

mod parsing;

use parsing::{BoolToggle, fallback_or_fail, parse_bool_toggle, parse_same_site};

pub const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
pub const TTL_HOURS_ENV: &str = "SESSION_TTL_HOURS";

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key length accepted by release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
const DEFAULT_TTL_HOURS: i64 = 2;

/// Read access to environment variables.
///
/// Production uses [`ProcessEnv`]; tests supply a mock.
pub trait SessionEnv {
    fn string(&self, name: &str) -> Option<String>;
}

/// [`SessionEnv`] backed by the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl SessionEnv for ProcessEnv {
    fn string(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates defaults and warns.
    Debug,
    /// Requires explicit, valid toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    pub(crate) fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie session settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    /// Lifetime of a dashboard session in hours.
    pub ttl_hours: i64,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use credx_backend::inbound::http::session_config::{
///     BuildMode, SessionEnv, session_settings_from_env,
/// };
///
/// struct Empty;
/// impl SessionEnv for Empty {
///     fn string(&self, _name: &str) -> Option<String> { None }
/// }
///
/// let settings = session_settings_from_env(&Empty, BuildMode::Debug)
///     .expect("debug builds fall back to defaults");
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.ttl_hours, 2);
/// ```
pub fn session_settings_from_env<E: SessionEnv>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = parse_bool_toggle(env, mode, BoolToggle::new(COOKIE_SECURE_ENV, true))?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral =
        parse_bool_toggle(env, mode, BoolToggle::new(ALLOW_EPHEMERAL_ENV, false))?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl_hours: ttl_from_env(env),
    })
}

fn same_site_from_env<E: SessionEnv>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    match env.string(SAMESITE_ENV) {
        Some(value) => parse_same_site(value, mode, cookie_secure, default_same_site),
        None => fallback_or_fail(
            mode,
            default_same_site,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using default"),
        ),
    }
}

fn ttl_from_env<E: SessionEnv>(env: &E) -> i64 {
    match env.string(TTL_HOURS_ENV) {
        None => DEFAULT_TTL_HOURS,
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(hours) if hours > 0 => hours,
            _ => {
                warn!(value = %raw, "invalid SESSION_TTL_HOURS; using default");
                DEFAULT_TTL_HOURS
            }
        },
    }
}

fn session_key_from_env<E: SessionEnv>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path).map(Zeroizing::new) {
        Ok(bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            Ok(Key::derive_from(&bytes))
        }
        Err(source) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %source,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}
