//! Value parsing shared by the session toggles.

use actix_web::cookie::SameSite;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError, SessionEnv};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean variable and the value debug builds assume when it is unusable.
pub(super) struct BoolToggle {
    name: &'static str,
    debug_default: bool,
}

impl BoolToggle {
    pub(super) const fn new(name: &'static str, debug_default: bool) -> Self {
        Self {
            name,
            debug_default,
        }
    }
}

pub(super) fn parse_bool_toggle<E: SessionEnv>(
    env: &E,
    mode: BuildMode,
    toggle: BoolToggle,
) -> Result<bool, SessionConfigError> {
    let BoolToggle {
        name,
        debug_default,
    } = toggle;
    let Some(value) = env.string(name) else {
        return fallback_or_fail(
            mode,
            debug_default,
            SessionConfigError::MissingEnv { name },
            || warn!(variable = name, fallback = debug_default, "session toggle not set"),
        );
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => fallback_or_fail(
            mode,
            debug_default,
            SessionConfigError::InvalidEnv {
                name,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            },
            || {
                warn!(
                    variable = name,
                    value = %value,
                    fallback = debug_default,
                    "invalid session toggle"
                );
            },
        ),
    }
}

/// Return `fallback` in debug builds (after warning), otherwise `error`.
pub(super) fn fallback_or_fail<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_same_site(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    default_same_site: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => fallback_or_fail(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it"),
        ),
        _ => fallback_or_fail(
            mode,
            default_same_site,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(value = %value, "invalid SESSION_SAMESITE, using default"),
        ),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
