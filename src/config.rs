use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::classify::Thresholds;

pub const DEFAULT_PORT: u16 = 3050;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Postgres storage when set, in-memory otherwise.
    pub database_url: Option<String>,
    pub thresholds: Thresholds,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Thresholds::default();
        let thresholds = Thresholds {
            max_deviation_days: parse_or(&lookup, "CYCLE_MAX_DEVIATION_DAYS", defaults.max_deviation_days)?,
            typical_min_days: parse_or(&lookup, "CYCLE_TYPICAL_MIN_DAYS", defaults.typical_min_days)?,
            typical_max_days: parse_or(&lookup, "CYCLE_TYPICAL_MAX_DAYS", defaults.typical_max_days)?,
        };
        if thresholds.typical_min_days > thresholds.typical_max_days {
            anyhow::bail!(
                "CYCLE_TYPICAL_MIN_DAYS ({}) is greater than CYCLE_TYPICAL_MAX_DAYS ({})",
                thresholds.typical_min_days,
                thresholds.typical_max_days
            );
        }

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            thresholds,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.database_url.is_none());
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn overrides_are_read() {
        let config = config_with(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/menomap"),
            ("CYCLE_MAX_DEVIATION_DAYS", "7"),
            ("CYCLE_TYPICAL_MAX_DAYS", "38"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/menomap"));
        assert_eq!(config.thresholds.max_deviation_days, 7);
        assert_eq!(config.thresholds.typical_min_days, 21);
        assert_eq!(config.thresholds.typical_max_days, 38);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(config_with(&[("PORT", "eighty")]).is_err());
        assert!(config_with(&[("CYCLE_TYPICAL_MIN_DAYS", "40")]).is_err());
    }

    #[test]
    fn blank_database_url_means_memory() {
        let config = config_with(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }
}
