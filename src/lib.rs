#![doc(test(attr(deny(warnings))))]

//! Sales Report turns a JSON log of multi-currency sales into a plain-text
//! monthly revenue report expressed in a single reference currency.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::services::ReportService;
pub use config::ReportConfig;
pub use currency::{Currency, CurrencyConverter, RateTable};
pub use domain::{validate_period, Period, SaleRecord};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Sales Report tracing initialized.");
    });
}
