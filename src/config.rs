use crate::messages::DEFAULT_GEMINI_MODEL;
use crate::storage::JsonFileStore;
use chrono::NaiveDate;
use std::{env, path::PathBuf};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Fixed "today", for demos outside December.
    pub today: Option<NaiveDate>,
    pub season_year: Option<i32>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match value("PORT") {
            Some(raw) => parse("PORT", raw, |raw| raw.parse::<u16>().map_err(|err| err.to_string()))?,
            None => DEFAULT_PORT,
        };

        let data_path = value("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(JsonFileStore::default_path);

        let today = value("ADVENT_TODAY")
            .map(|raw| {
                parse("ADVENT_TODAY", raw, |raw| {
                    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| err.to_string())
                })
            })
            .transpose()?;

        let season_year = value("ADVENT_SEASON_YEAR")
            .map(|raw| parse("ADVENT_SEASON_YEAR", raw, |raw| raw.parse::<i32>().map_err(|err| err.to_string())))
            .transpose()?;

        Ok(Self {
            port,
            data_path,
            gemini_api_key: value("GEMINI_API_KEY").or_else(|| value("API_KEY")),
            gemini_model: value("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            today,
            season_year,
        })
    }
}

fn parse<T>(
    key: &'static str,
    raw: String,
    parser: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    parser(&raw).map_err(|reason| ConfigError::Invalid {
        key,
        value: raw,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/mg_advent_calendar_data.json"));
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.today, None);
        assert_eq!(config.season_year, None);
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("APP_DATA_PATH", "/tmp/advent.json"),
            ("API_KEY", "legacy"),
            ("ADVENT_TODAY", "2025-12-10"),
            ("ADVENT_SEASON_YEAR", "2025"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/advent.json"));
        assert_eq!(config.gemini_api_key.as_deref(), Some("legacy"));
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2025, 12, 10));
        assert_eq!(config.season_year, Some(2025));
    }

    #[test]
    fn gemini_key_wins_over_legacy_key() {
        let config = config_from(&[("GEMINI_API_KEY", "new"), ("API_KEY", "old")]).unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("new"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = config_from(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert_eq!(config.gemini_api_key, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("ADVENT_TODAY", "10/12/2025")]).is_err());
        assert!(config_from(&[("ADVENT_SEASON_YEAR", "soon")]).is_err());
    }
}
