//! Session configuration validation.
//!
//! Turns [`BookstoreSettings`] into the key and cookie flags the session
//! middleware needs. Release builds refuse ambiguous or insecure
//! combinations; debug builds log a warning and fall back to a default.

pub mod fingerprint;

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

use crate::settings::BookstoreSettings;

const SESSION_KEY_MIN_LEN: usize = 64;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require explicit, valid session settings.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bookstore::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session settings ready for the cookie session middleware.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
    /// Whether `key` was generated for this process only.
    pub ephemeral: bool,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A setting is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file holds too little key material.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie in release builds.
    #[error("BOOKSTORE_SESSION_SAME_SITE=None requires BOOKSTORE_COOKIE_SECURE=true")]
    InsecureSameSiteNone,
}

/// Build session settings from loaded configuration and build mode.
///
/// # Examples
///
/// ```rust
/// use bookstore::inbound::http::session_config::{BuildMode, session_settings};
/// use bookstore::settings::BookstoreSettings;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("bookstore_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let config = BookstoreSettings {
///     session_key_file: Some(key_path.clone()),
///     session_same_site: Some("Strict".to_owned()),
///     ..BookstoreSettings::default()
/// };
/// let settings = session_settings(&config, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// assert!(!settings.ephemeral);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    config: &BookstoreSettings,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = config.cookie_secure;
    let same_site = same_site(config.session_same_site.as_deref(), mode, cookie_secure)?;
    let (key, ephemeral) = session_key(config, mode)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ephemeral,
    })
}

fn same_site(
    raw: Option<&str>,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = raw else {
        return Ok(default_same_site);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("SameSite=None without a Secure cookie; browsers may reject the session");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid session SameSite policy, using default");
            Ok(default_same_site)
        }
        _ => Err(SessionConfigError::InvalidValue {
            name: "BOOKSTORE_SESSION_SAME_SITE",
            value: value.to_owned(),
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn session_key(
    config: &BookstoreSettings,
    mode: BuildMode,
) -> Result<(Key, bool), SessionConfigError> {
    let path = config.session_key_file().to_path_buf();

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok((key, false))
        }
        Err(error) => {
            if mode.is_debug() || config.session_allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key; sessions will not survive a restart"
                );
                Ok((Key::generate(), true))
            } else {
                Err(SessionConfigError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}
