use std::path::PathBuf;

use crate::{
    config::ReportConfig,
    currency::CurrencyConverter,
    domain::Period,
    errors::Result,
    report::{aggregate_period, filter_period, ReportWriter},
    storage::{JsonSalesStore, SalesSource},
};

/// Runs the load, aggregate and write steps for one period.
pub struct ReportService {
    source: Box<dyn SalesSource>,
    converter: CurrencyConverter,
    writer: ReportWriter,
}

impl ReportService {
    pub fn new(
        source: Box<dyn SalesSource>,
        converter: CurrencyConverter,
        writer: ReportWriter,
    ) -> Self {
        Self {
            source,
            converter,
            writer,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        config.validate()?;
        let converter = CurrencyConverter::new(config.rate_table()?);
        let source = JsonSalesStore::new(&config.sales_file)
            .with_unknown_currency_policy(config.unknown_currency_policy);
        Ok(Self::new(
            Box::new(source),
            converter,
            ReportWriter::from_config(config),
        ))
    }

    /// Produces the report for `year`/`month` and returns where it was written.
    ///
    /// An unreadable dataset yields a zero report; write failures are
    /// returned to the caller.
    pub fn run(&self, year: i32, month: u32) -> Result<PathBuf> {
        let period = Period::new(year, month);
        let sales = self.source.load();
        let matched = filter_period(&sales, period).count();
        let total = aggregate_period(&sales, period, &self.converter)?;
        tracing::info!(
            %period,
            source = %self.source.location().display(),
            loaded = sales.len(),
            matched,
            total,
            currency = %self.converter.reference(),
            "aggregated sales"
        );
        let path = self.writer.write(year, month, total)?;
        tracing::info!(path = %path.display(), "report created");
        Ok(path)
    }
}
