use std::path::{Path, PathBuf};

use crate::{
    config::{ReportConfig, DEFAULT_REPORT_FILE_PATTERN},
    currency::Currency,
    domain::Period,
    errors::{ReportError, Result},
    utils::persistence::write_atomic,
};

pub const SEPARATOR: &str = "-------------------------------------";

/// Renders a period total into `report_{year}_{month}.txt`-style files.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    file_pattern: String,
    reference: Currency,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>, reference: Currency) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_pattern: DEFAULT_REPORT_FILE_PATTERN.into(),
            reference,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(&config.output_dir, config.reference_currency)
            .with_file_pattern(&config.report_file_pattern)
    }

    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn report_path(&self, year: i32, month: u32) -> PathBuf {
        let name = self
            .file_pattern
            .replace("{year}", &year.to_string())
            .replace("{month}", &month.to_string());
        self.output_dir.join(name)
    }

    pub fn render(&self, year: i32, month: u32, total: f64) -> String {
        format!(
            "Monthly Sales Report {period}\n{SEPARATOR}\nTotal revenue in {currency}: {total}\n",
            period = Period::new(year, month),
            currency = self.reference,
        )
    }

    /// Writes the report for `year`/`month`, replacing any earlier one.
    pub fn write(&self, year: i32, month: u32, total: f64) -> Result<PathBuf> {
        let path = self.report_path(year, month);
        let body = self.render(year, month, total);
        write_atomic(&path, &body).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "report written");
        Ok(path)
    }
}
