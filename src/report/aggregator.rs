use crate::{
    currency::CurrencyConverter,
    domain::{Period, SaleRecord},
    errors::ConversionError,
};

/// Sales booked in `period`, compared on the naive calendar year and month.
pub fn filter_period<'a>(
    sales: &'a [SaleRecord],
    period: Period,
) -> impl Iterator<Item = &'a SaleRecord> + 'a {
    sales
        .iter()
        .filter(move |sale| period.contains(&sale.date()))
}

/// Total of the sales in `year`/`month`, in the converter's reference currency.
pub fn aggregate(
    sales: &[SaleRecord],
    year: i32,
    month: u32,
    converter: &CurrencyConverter,
) -> Result<f64, ConversionError> {
    aggregate_period(sales, Period::new(year, month), converter)
}

pub fn aggregate_period(
    sales: &[SaleRecord],
    period: Period,
    converter: &CurrencyConverter,
) -> Result<f64, ConversionError> {
    filter_period(sales, period).try_fold(0.0, |total, sale| {
        Ok(total + converter.convert(sale.amount(), sale.currency())?)
    })
}
