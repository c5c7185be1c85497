use std::{io, path::PathBuf};

use thiserror::Error;

use crate::currency::Currency;

/// Failures raised while reading the persisted sales dataset.
///
/// The pipeline maps every variant to an empty dataset, but callers of
/// [`crate::storage::SalesSource::try_load`] can tell them apart.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("sales file `{}` not found", .path.display())]
    NotFound { path: PathBuf },
    #[error("sales file `{}` is malformed: {}", .path.display(), .source)]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("record {} in `{}` has unknown currency `{}`", .index, .path.display(), .tag)]
    UnknownCurrency {
        path: PathBuf,
        index: usize,
        tag: String,
    },
    #[error("failed to read sales file `{}`: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures converting an amount into the reference currency.
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("no exchange rate configured for {0}")]
    MissingRate(Currency),
    #[error("exchange rate for {currency} must be finite and positive, got {rate}")]
    InvalidRate { currency: Currency, rate: f64 },
}

/// Rejected reporting periods.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("`{0}` is not a whole number")]
    NotANumber(String),
    #[error("invalid year {year}: expected a four-digit year between {min} and {max}")]
    InvalidYear { year: i32, min: i32, max: i32 },
    #[error("invalid month {0}: expected a number between 1 and 12")]
    InvalidMonth(u32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors escaping the report pipeline.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write report `{}`: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Period(#[from] PeriodError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
