use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_SESSION_DB: &str = "sqlite://learnup-session.db";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub session_db_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_db_url: DEFAULT_SESSION_DB.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            request_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("LEARNUP_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "LEARNUP_API_URL must be an http(s) url, got {}",
                api_url
            )));
        }

        let session_db_url =
            lookup("LEARNUP_SESSION_DB").unwrap_or_else(|| DEFAULT_SESSION_DB.to_string());

        let poll_secs = match lookup("LEARNUP_POLL_INTERVAL_SECS") {
            Some(raw) => parse_secs("LEARNUP_POLL_INTERVAL_SECS", &raw)?,
            None => DEFAULT_POLL_INTERVAL_SECS,
        };
        if poll_secs == 0 {
            return Err(AppError::Config(
                "LEARNUP_POLL_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        let request_timeout = lookup("LEARNUP_REQUEST_TIMEOUT_SECS")
            .map(|raw| parse_secs("LEARNUP_REQUEST_TIMEOUT_SECS", &raw))
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            api_url,
            session_db_url,
            poll_interval: Duration::from_secs(poll_secs),
            request_timeout,
        })
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| AppError::Config(format!("{} is not a number of seconds: {}", key, raw)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(|_| None).expect("defaults are valid");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn reads_overrides_and_strips_trailing_slash() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("LEARNUP_API_URL", "https://school.example/"),
            ("LEARNUP_POLL_INTERVAL_SECS", "5"),
            ("LEARNUP_REQUEST_TIMEOUT_SECS", "12"),
        ]))
        .expect("valid config");
        assert_eq!(config.api_url, "https://school.example");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(12)));
    }

    #[test]
    fn rejects_bad_numbers() {
        let result =
            AppConfig::from_lookup(lookup_from(&[("LEARNUP_POLL_INTERVAL_SECS", "soon")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
