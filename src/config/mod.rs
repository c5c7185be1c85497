use serde::{Deserialize, Deserializer, Serialize};
use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

use crate::{
    currency::{default_rates, Currency, RateTable},
    errors::{ConfigError, ConversionError},
    utils::persistence::write_atomic,
};

pub const CONFIG_ENV: &str = "SALES_REPORT_CONFIG";
pub const SALES_FILE_ENV: &str = "SALES_REPORT_SALES_FILE";
pub const OUTPUT_DIR_ENV: &str = "SALES_REPORT_OUTPUT_DIR";

pub const DEFAULT_CONFIG_FILE: &str = "sales_report.json";
pub const DEFAULT_SALES_FILE: &str = "sales.json";
pub const DEFAULT_REPORT_FILE_PATTERN: &str = "report_{year}_{month}.txt";

/// What the loader does with a record whose currency tag is not supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCurrencyPolicy {
    /// Fail the whole load.
    #[default]
    Reject,
    /// Drop the record and keep loading.
    Skip,
}

/// Rates, file locations and loader behavior for one report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub reference_currency: Currency,
    /// Rates from the file override the built-in ones per currency.
    #[serde(deserialize_with = "rates_over_defaults")]
    pub rates: BTreeMap<Currency, f64>,
    pub sales_file: PathBuf,
    pub output_dir: PathBuf,
    pub report_file_pattern: String,
    pub unknown_currency_policy: UnknownCurrencyPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reference_currency: Currency::Usd,
            rates: default_rates(),
            sales_file: PathBuf::from(DEFAULT_SALES_FILE),
            output_dir: PathBuf::from("."),
            report_file_pattern: DEFAULT_REPORT_FILE_PATTERN.into(),
            unknown_currency_policy: UnknownCurrencyPolicy::default(),
        }
    }
}

fn rates_over_defaults<'de, D>(deserializer: D) -> Result<BTreeMap<Currency, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<Currency, f64>::deserialize(deserializer)?;
    let mut rates = default_rates();
    rates.extend(overrides);
    Ok(rates)
}

impl ReportConfig {
    pub fn rate_table(&self) -> Result<RateTable, ConversionError> {
        RateTable::new(self.reference_currency, self.rates.clone())
    }

    /// Rejects rates that are not positive, a rate table that leaves a
    /// non-reference currency without a rate, and a file pattern without
    /// both placeholders.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rate_table()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        for placeholder in ["{year}", "{month}"] {
            if !self.report_file_pattern.contains(placeholder) {
                return Err(ConfigError::Invalid(format!(
                    "report_file_pattern `{}` is missing `{}`",
                    self.report_file_pattern, placeholder
                )));
            }
        }
        Ok(())
    }

    /// Overrides file locations from `SALES_REPORT_SALES_FILE` and
    /// `SALES_REPORT_OUTPUT_DIR` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(sales_file) = env::var_os(SALES_FILE_ENV) {
            self.sales_file = PathBuf::from(sales_file);
        }
        if let Some(output_dir) = env::var_os(OUTPUT_DIR_ENV) {
            self.output_dir = PathBuf::from(output_dir);
        }
        self
    }
}

/// Handles persistence for [`ReportConfig`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses `SALES_REPORT_CONFIG`, falling back to `sales_report.json` in the
    /// working directory.
    pub fn from_env() -> Self {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the config; a missing file yields the defaults.
    pub fn load(&self) -> Result<ReportConfig, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(ReportConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: ReportConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ReportConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::tmp_path;
    use tempfile::tempdir;

    #[test]
    fn defaults_use_usd_and_fixed_rates() {
        let cfg = ReportConfig::default();
        assert_eq!(cfg.reference_currency, Currency::Usd);
        assert_eq!(cfg.rates.get(&Currency::Eur), Some(&1.1));
        assert_eq!(cfg.rates.get(&Currency::Gbp), Some(&1.3));
        assert_eq!(cfg.sales_file, PathBuf::from("sales.json"));
        assert_eq!(cfg.report_file_pattern, "report_{year}_{month}.txt");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join("absent.json"));
        assert_eq!(manager.load().unwrap(), ReportConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"rates":{"EUR":1.25},"unknown_currency_policy":"skip"}"#).unwrap();
        let cfg = ConfigManager::new(path).load().unwrap();
        assert_eq!(
            cfg.rates,
            BTreeMap::from([(Currency::Eur, 1.25), (Currency::Gbp, 1.3)])
        );
        assert_eq!(cfg.unknown_currency_policy, UnknownCurrencyPolicy::Skip);
        assert_eq!(cfg.sales_file, PathBuf::from(DEFAULT_SALES_FILE));
        assert!(cfg.rate_table().is_ok());
    }

    #[test]
    fn rejects_reference_without_rates_back() {
        let cfg = ReportConfig {
            reference_currency: Currency::Eur,
            ..ReportConfig::default()
        };
        let err = cfg.validate().expect_err("no USD rate");
        assert!(err.to_string().contains("USD"), "unexpected error: {err}");

        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"reference_currency":"EUR"}"#).unwrap();
        let err = ConfigManager::new(path.clone()).load().expect_err("no USD rate");
        assert!(matches!(err, ConfigError::Invalid(_)));

        fs::write(&path, r#"{"reference_currency":"EUR","rates":{"USD":0.9}}"#).unwrap();
        let cfg = ConfigManager::new(path).load().expect("USD rate supplied");
        let table = cfg.rate_table().unwrap();
        assert_eq!(table.rate_for(Currency::Usd), Ok(0.9));
        assert_eq!(table.rate_for(Currency::Gbp), Ok(1.3));
    }

    #[test]
    fn rejects_cleared_rate_table() {
        let cfg = ReportConfig {
            rates: BTreeMap::new(),
            ..ReportConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join("nested").join("config.json"));
        let cfg = ReportConfig {
            output_dir: dir.path().join("reports"),
            report_file_pattern: "sales-{year}-{month}.txt".into(),
            ..ReportConfig::default()
        };
        manager.save(&cfg).unwrap();
        assert_eq!(manager.load().unwrap(), cfg);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn rejects_pattern_without_placeholders() {
        let cfg = ReportConfig {
            report_file_pattern: "report.txt".into(),
            ..ReportConfig::default()
        };
        let err = cfg.validate().expect_err("pattern lacks placeholders");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_negative_rates_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"rates":{"GBP":-1.3}}"#).unwrap();
        let err = ConfigManager::new(path).load().expect_err("negative rate");
        assert!(err.to_string().contains("GBP"), "unexpected error: {err}");
    }

    #[test]
    fn rejects_unknown_currency_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"rates":{"JPY":0.007}}"#).unwrap();
        let err = ConfigManager::new(path).load().expect_err("unknown currency");
        assert!(matches!(err, ConfigError::Serde(_)));
    }
}
