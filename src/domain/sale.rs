use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// One recorded sale. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(alias = "Date", with = "sale_date")]
    date: NaiveDateTime,
    #[serde(alias = "Amount")]
    amount: f64,
    #[serde(alias = "Currency")]
    currency: Currency,
}

impl SaleRecord {
    pub fn new(date: NaiveDateTime, amount: f64, currency: Currency) -> Self {
        Self {
            date,
            amount,
            currency,
        }
    }

    /// Convenience constructor for a sale booked at midnight.
    pub fn on_day(date: NaiveDate, amount: f64, currency: Currency) -> Self {
        Self::new(date.and_time(NaiveTime::MIN), amount, currency)
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

const SERIALIZED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses a sale timestamp.
///
/// Accepts naive ISO-8601 date-times (optional fractional seconds), RFC 3339
/// timestamps with an offset, and bare dates. Offsets are discarded and the
/// wall-clock fields kept as written, so a sale always lands in the calendar
/// month printed in the source file.
pub fn parse_sale_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

pub(crate) mod sale_date {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{parse_sale_date, SERIALIZED_FORMAT};

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(SERIALIZED_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_sale_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid sale date `{raw}`")))
    }
}
