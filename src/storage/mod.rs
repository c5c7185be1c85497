pub mod json_backend;

use std::path::Path;

use crate::{domain::SaleRecord, errors::LoadError};

pub use json_backend::JsonSalesStore;

/// Abstraction over wherever the sales dataset lives.
pub trait SalesSource {
    /// Location used in log and error messages.
    fn location(&self) -> &Path;

    /// Reads the dataset, reporting exactly why it could not be read.
    fn try_load(&self) -> Result<Vec<SaleRecord>, LoadError>;

    /// Reads the dataset, degrading every failure to an empty dataset.
    ///
    /// A missing source is logged as a warning; anything else as an error.
    fn load(&self) -> Vec<SaleRecord> {
        match self.try_load() {
            Ok(sales) => sales,
            Err(err @ LoadError::NotFound { .. }) => {
                tracing::warn!(error = %err, "sales data missing, using an empty dataset");
                Vec::new()
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load sales data, using an empty dataset");
                Vec::new()
            }
        }
    }
}
