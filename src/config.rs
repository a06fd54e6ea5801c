use chrono::Weekday;
use std::{env, net::SocketAddr, path::PathBuf};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/weights.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("WEEK_START must name a weekday, got '{0}'")]
    InvalidWeekStart(String),
}

/// Runtime settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub week_start: Weekday,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            week_start: Weekday::Sun,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        // An unparsable port falls back to the default.
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let week_start = match lookup("WEEK_START") {
            Some(value) => value
                .trim()
                .parse::<Weekday>()
                .map_err(|_| ConfigError::InvalidWeekStart(value))?,
            None => defaults.week_start,
        };

        Ok(Self {
            port,
            data_path,
            week_start,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
