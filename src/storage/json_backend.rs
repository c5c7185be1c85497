use chrono::NaiveDateTime;
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    config::UnknownCurrencyPolicy,
    currency::Currency,
    domain::{sale::sale_date, SaleRecord},
    errors::LoadError,
    utils::persistence::write_atomic,
};

use super::SalesSource;

/// Sales dataset stored as a JSON array of `{date, amount, currency}` objects.
#[derive(Debug, Clone)]
pub struct JsonSalesStore {
    path: PathBuf,
    unknown_currency: UnknownCurrencyPolicy,
}

/// A record whose currency tag has not been mapped yet.
#[derive(Debug, Deserialize)]
struct RawSale {
    #[serde(alias = "Date", with = "sale_date")]
    date: NaiveDateTime,
    #[serde(alias = "Amount")]
    amount: f64,
    #[serde(alias = "Currency")]
    currency: String,
}

impl JsonSalesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            unknown_currency: UnknownCurrencyPolicy::default(),
        }
    }

    pub fn with_unknown_currency_policy(mut self, policy: UnknownCurrencyPolicy) -> Self {
        self.unknown_currency = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `sales` as pretty JSON, replacing the current dataset.
    pub fn save(&self, sales: &[SaleRecord]) -> io::Result<()> {
        let json = serde_json::to_string_pretty(sales).map_err(io::Error::other)?;
        write_atomic(&self.path, &json)
    }

    fn read_contents(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound {
                path: self.path.clone(),
            },
            _ => LoadError::Io {
                path: self.path.clone(),
                source,
            },
        })
    }

    fn map_currencies(&self, raw: Vec<RawSale>) -> Result<Vec<SaleRecord>, LoadError> {
        let mut sales = Vec::with_capacity(raw.len());
        for (index, entry) in raw.into_iter().enumerate() {
            let currency = match entry.currency.parse::<Currency>() {
                Ok(currency) => currency,
                Err(_) if self.unknown_currency == UnknownCurrencyPolicy::Skip => {
                    tracing::warn!(
                        path = %self.path.display(),
                        index,
                        tag = %entry.currency,
                        "skipping sale with unknown currency"
                    );
                    continue;
                }
                Err(_) => {
                    return Err(LoadError::UnknownCurrency {
                        path: self.path.clone(),
                        index,
                        tag: entry.currency,
                    })
                }
            };
            sales.push(SaleRecord::new(entry.date, entry.amount, currency));
        }
        Ok(sales)
    }
}

impl SalesSource for JsonSalesStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<Vec<SaleRecord>, LoadError> {
        let contents = self.read_contents()?;
        if contents.trim().is_empty() {
            tracing::debug!(path = %self.path.display(), "sales file is empty");
            return Ok(Vec::new());
        }
        let raw: Option<Vec<RawSale>> =
            serde_json::from_str(&contents).map_err(|source| LoadError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        let sales = self.map_currencies(raw.unwrap_or_default())?;
        tracing::debug!(path = %self.path.display(), count = sales.len(), "loaded sales");
        Ok(sales)
    }
}
