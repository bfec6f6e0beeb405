//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, a configuration file or `BOOKSTORE_*`
//! environment variables; unset values fall back to the defaults below.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_SECTIONS: [&str; 5] = ["Fiction", "Technology", "Travel", "Business", "Religion"];

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration values for the bookstore service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSTORE")]
pub struct BookstoreSettings {
    /// Listen address, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// Permit a generated session key when the key file is unreadable.
    #[ortho_config(default = false, skip_cli)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    ///
    /// Neither toggle has a CLI flag; set them through the environment or
    /// the configuration file.
    #[ortho_config(default = true, skip_cli)]
    pub cookie_secure: bool,
    /// `SameSite` policy for the session cookie: `Strict`, `Lax` or `None`.
    pub session_same_site: Option<String>,
    /// Section names seeded at start-up, e.g. `BOOKSTORE_SECTIONS=Poetry,Drama`.
    #[serde(default, deserialize_with = "one_or_many")]
    pub sections: Option<Vec<String>>,
}

impl Default for BookstoreSettings {
    fn default() -> Self {
        Self {
            bind_addr: None,
            session_key_file: None,
            session_allow_ephemeral: false,
            cookie_secure: true,
            session_same_site: None,
            sections: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accept a lone name as well as a list; the environment layer only splits
/// values that contain a comma.
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let names = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(names.map(|names| match names {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
    }))
}

impl BookstoreSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    /// Session key path, falling back to the mounted secret location.
    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Section names to seed, in order, with blanks dropped.
    ///
    /// # Examples
    /// ```
    /// use bookstore::settings::BookstoreSettings;
    ///
    /// let settings = BookstoreSettings {
    ///     sections: Some(vec!["Poetry".to_owned(), " ".to_owned(), "Drama ".to_owned()]),
    ///     ..BookstoreSettings::default()
    /// };
    /// assert_eq!(settings.sections(), vec!["Poetry", "Drama"]);
    /// ```
    pub fn sections(&self) -> Vec<String> {
        match self.sections.as_deref() {
            Some(names) => names
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect(),
            None => DEFAULT_SECTIONS.iter().map(|name| (*name).to_owned()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "BOOKSTORE_BIND_ADDR",
        "BOOKSTORE_SESSION_KEY_FILE",
        "BOOKSTORE_SESSION_ALLOW_EPHEMERAL",
        "BOOKSTORE_COOKIE_SECURE",
        "BOOKSTORE_SESSION_SAME_SITE",
        "BOOKSTORE_SECTIONS",
    ];

    fn load_from_empty_args() -> BookstoreSettings {
        BookstoreSettings::load_from_iter([OsString::from("bookstore")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal addr")
        );
        assert_eq!(
            settings.session_key_file(),
            Path::new(DEFAULT_SESSION_KEY_FILE)
        );
        assert!(!settings.session_allow_ephemeral);
        assert!(settings.cookie_secure);
        assert!(settings.session_same_site.is_none());
        assert_eq!(
            settings.sections(),
            vec!["Fiction", "Technology", "Travel", "Business", "Religion"]
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BOOKSTORE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "BOOKSTORE_SESSION_KEY_FILE",
                Some("/tmp/bookstore_key".to_owned()),
            ),
            ("BOOKSTORE_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
            ("BOOKSTORE_COOKIE_SECURE", Some("false".to_owned())),
            ("BOOKSTORE_SESSION_SAME_SITE", Some("Strict".to_owned())),
            ("BOOKSTORE_SECTIONS", Some("Poetry,Drama".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override addr").port(),
            9000
        );
        assert_eq!(
            settings.session_key_file(),
            Path::new("/tmp/bookstore_key")
        );
        assert!(settings.session_allow_ephemeral);
        assert!(!settings.cookie_secure);
        assert_eq!(settings.session_same_site.as_deref(), Some("Strict"));
        assert_eq!(settings.sections(), vec!["Poetry", "Drama"]);
    }

    #[rstest]
    #[case("Poetry", vec!["Poetry"])]
    #[case("Poetry, Drama ,", vec!["Poetry", "Drama"])]
    fn section_names_load_from_the_environment(
        #[case] raw: &str,
        #[case] expected: Vec<&str>,
    ) {
        let mut vars = VARS.map(|name| (name, None::<String>));
        vars[5].1 = Some(raw.to_owned());
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(settings.sections(), expected);
        assert!(settings.cookie_secure);
    }

    #[rstest]
    fn cookie_secure_stays_on_when_other_toggles_are_set() {
        let mut vars = VARS.map(|name| (name, None::<String>));
        vars[2].1 = Some("true".to_owned());
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert!(settings.session_allow_ephemeral);
        assert!(settings.cookie_secure);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = BookstoreSettings {
            bind_addr: Some("not-an-addr".to_owned()),
            ..BookstoreSettings::default()
        };
        let err = settings.bind_addr().expect_err("must fail");
        assert!(err.to_string().contains("not-an-addr"));
    }
}
