//! Environment-driven configuration.
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | `API_URL` | none | Upstream price feed endpoint |
//! | `API_TOKEN` | none | Telegram bot token (bot only) |
//! | `ZARARZ_UTC_OFFSET` | `+03:30` | Clock offset for report headers |
//! | `ZARARZ_DATA_DIR` | `logs` | Directory holding `users.json` |

use std::path::PathBuf;
use std::time::Duration;

use time::format_description;
use time::UtcOffset;

use crate::error::ConfigError;

pub const API_URL_VAR: &str = "API_URL";
pub const API_TOKEN_VAR: &str = "API_TOKEN";
pub const UTC_OFFSET_VAR: &str = "ZARARZ_UTC_OFFSET";
pub const DATA_DIR_VAR: &str = "ZARARZ_DATA_DIR";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT: &str = "application/json, text/plain, */*";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DATA_DIR: &str = "logs";

/// Upstream request settings. Only the endpoint is configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub api_url: Option<String>,
    pub user_agent: String,
    pub accept: String,
    pub timeout: Duration,
}

impl FetchSettings {
    pub fn new(api_url: Option<String>) -> Self {
        Self {
            api_url: api_url.filter(|url| !url.trim().is_empty()),
            user_agent: String::from(DEFAULT_USER_AGENT),
            accept: String::from(DEFAULT_ACCEPT),
            timeout: FETCH_TIMEOUT,
        }
    }

    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self::new(Some(api_url.into()))
    }

    pub fn unconfigured() -> Self {
        Self::new(None)
    }
}

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fetch: FetchSettings,
    pub bot_token: Option<String>,
    pub utc_offset: UtcOffset,
    pub data_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let utc_offset = match lookup(UTC_OFFSET_VAR) {
            Some(raw) if !raw.trim().is_empty() => parse_utc_offset(&raw)?,
            _ => iran_standard_time(),
        };
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        Ok(Self {
            fetch: FetchSettings::new(lookup(API_URL_VAR)),
            bot_token: lookup(API_TOKEN_VAR).filter(|token| !token.trim().is_empty()),
            utc_offset,
            data_dir,
        })
    }

    pub fn require_bot_token(&self) -> Result<&str, ConfigError> {
        self.bot_token.as_deref().ok_or(ConfigError::Missing {
            name: API_TOKEN_VAR,
        })
    }
}

/// UTC+03:30.
pub fn iran_standard_time() -> UtcOffset {
    UtcOffset::from_hms(3, 30, 0).unwrap_or(UtcOffset::UTC)
}

/// Parses `+HH:MM` / `-HH:MM`.
pub fn parse_utc_offset(raw: &str) -> Result<UtcOffset, ConfigError> {
    let invalid = || ConfigError::Invalid {
        name: UTC_OFFSET_VAR,
        value: raw.to_owned(),
        expected: "an offset like +03:30",
    };
    let description = format_description::parse("[offset_hour sign:mandatory]:[offset_minute]")
        .map_err(|_| invalid())?;
    UtcOffset::parse(raw.trim(), &description).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let settings = Settings::from_lookup(lookup(&[])).expect("defaults are valid");

        assert_eq!(settings.fetch.api_url, None);
        assert_eq!(settings.fetch.timeout, Duration::from_secs(10));
        assert_eq!(settings.utc_offset, iran_standard_time());
        assert_eq!(settings.data_dir, PathBuf::from("logs"));
        assert!(settings.require_bot_token().is_err());
    }

    #[test]
    fn blank_api_url_counts_as_missing() {
        let settings =
            Settings::from_lookup(lookup(&[(API_URL_VAR, "   ")])).expect("valid settings");
        assert_eq!(settings.fetch.api_url, None);
    }

    #[test]
    fn reads_all_variables() {
        let settings = Settings::from_lookup(lookup(&[
            (API_URL_VAR, "https://prices.example/api"),
            (API_TOKEN_VAR, "123:abc"),
            (UTC_OFFSET_VAR, "-05:00"),
            (DATA_DIR_VAR, "/var/lib/zararz"),
        ]))
        .expect("valid settings");

        assert_eq!(
            settings.fetch.api_url.as_deref(),
            Some("https://prices.example/api")
        );
        assert_eq!(settings.require_bot_token(), Ok("123:abc"));
        assert_eq!(settings.utc_offset.whole_hours(), -5);
        assert_eq!(settings.data_dir, PathBuf::from("/var/lib/zararz"));
    }

    #[test]
    fn rejects_malformed_offset() {
        let error = Settings::from_lookup(lookup(&[(UTC_OFFSET_VAR, "tehran")]))
            .expect_err("offset must be rejected");
        assert!(matches!(error, ConfigError::Invalid { name: UTC_OFFSET_VAR, .. }));
    }
}
