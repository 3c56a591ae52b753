//! Configuration management

use anyhow::{Context, Result};

use crate::services::rules::HosRules;

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Directory for the daily rolling log file (file logging is off when unset)
    pub logs_dir: Option<String>,

    /// HOS rules with any environment overrides applied
    pub rules: HosRules,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let logs_dir = lookup("LOGS_DIR").filter(|dir| !dir.trim().is_empty());

        let mut rules = HosRules::default();
        if let Some(miles) = parse_var(&lookup, "HOS_FUEL_INTERVAL_MILES")? {
            rules.fuel_interval_miles = miles;
        }
        if let Some(hours) = parse_var(&lookup, "HOS_PICKUP_HOURS")? {
            rules.pickup_hours = hours;
        }
        if let Some(hours) = parse_var(&lookup, "HOS_DROPOFF_HOURS")? {
            rules.dropoff_hours = hours;
        }
        rules.validate().context("Invalid HOS rule overrides")?;

        Ok(Self { logs_dir, rules })
    }
}

fn parse_var<F>(lookup: &F, key: &str) -> Result<Option<f64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{} must be a number (got {:?})", key, raw))?;
            Ok(Some(value))
        }
        None => Ok(None),
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
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_defaults_when_nothing_set() {
        let config = config_with(&[]).unwrap();
        assert!(config.logs_dir.is_none());
        assert_eq!(config.rules, HosRules::default());
    }

    #[test]
    fn test_config_logs_dir_some_when_set() {
        let config = config_with(&[("LOGS_DIR", "/var/log/hos")]).unwrap();
        assert_eq!(config.logs_dir, Some("/var/log/hos".to_string()));

        let config = config_with(&[("LOGS_DIR", "  ")]).unwrap();
        assert!(config.logs_dir.is_none());
    }

    #[test]
    fn test_config_rule_overrides() {
        let config = config_with(&[
            ("HOS_FUEL_INTERVAL_MILES", "800"),
            ("HOS_PICKUP_HOURS", "2.5"),
            ("HOS_DROPOFF_HOURS", " 0.75 "),
        ])
        .unwrap();
        assert_eq!(config.rules.fuel_interval_miles, 800.0);
        assert_eq!(config.rules.pickup_hours, 2.5);
        assert_eq!(config.rules.dropoff_hours, 0.75);
    }

    #[test]
    fn test_config_rejects_unparsable_override() {
        let err = config_with(&[("HOS_PICKUP_HOURS", "an hour")]).unwrap_err();
        assert!(err.to_string().contains("HOS_PICKUP_HOURS"));
    }

    #[test]
    fn test_config_rejects_invalid_rules() {
        let err = config_with(&[("HOS_FUEL_INTERVAL_MILES", "0")]).unwrap_err();
        assert!(err.to_string().contains("Invalid HOS rule overrides"));
    }
}
