use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const HEADHUNTER_BASE_URL: &str = "https://api.hh.ru";
pub const SUPERJOB_BASE_URL: &str = "https://api.superjob.ru";

/// Settings read once at startup and shared read-only by both platforms.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub headhunter: HeadHunterConfig,
    pub superjob: SuperJobConfig,
    pub city_label: String,
    pub period_days: u32,
    pub request_timeout: Duration,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct HeadHunterConfig {
    pub base_url: String,
    pub area: String,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct SuperJobConfig {
    pub base_url: String,
    pub town: String,
    pub token: Option<String>,
}

impl AppConfig {
    /// Reads `.env` (when present) into the process environment, then
    /// builds the configuration from it.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let period_days = parse_var("SEARCH_PERIOD_DAYS", 30)?;
        let timeout_secs = parse_var("HTTP_TIMEOUT_SECS", 10)?;

        Ok(Self {
            headhunter: HeadHunterConfig {
                base_url: HEADHUNTER_BASE_URL.to_string(),
                area: var_or("HH_AREA", "1"),
                user_agent: var_or("HH_USER_AGENT", "vacancy-salary-stats/0.1"),
            },
            superjob: SuperJobConfig {
                base_url: SUPERJOB_BASE_URL.to_string(),
                town: var_or("SJ_TOWN", "Москва"),
                token: env::var("SJ_TOKEN")
                    .ok()
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty()),
            },
            city_label: var_or("CITY_LABEL", "Moscow"),
            period_days,
            request_timeout: Duration::from_secs(u64::from(timeout_secs)),
            log_level: var_or("LOG_LEVEL", "warn"),
        })
    }

    /// Fails fast when SuperJob is about to be queried without its key.
    pub fn require_superjob_token(&self) -> Result<&str, ConfigError> {
        self.superjob
            .token
            .as_deref()
            .ok_or(ConfigError::Missing { key: "SJ_TOKEN" })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::Invalid { key, value })
        }
        _ => Ok(default),
    }
}
