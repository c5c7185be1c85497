pub mod period;
pub mod sale;

pub use period::{max_year, validate_month, validate_period, validate_year, Period, MIN_YEAR};
pub use sale::{parse_sale_date, SaleRecord};
