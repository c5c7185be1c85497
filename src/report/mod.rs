pub mod aggregator;
pub mod writer;

pub use aggregator::{aggregate, aggregate_period, filter_period};
pub use writer::ReportWriter;
