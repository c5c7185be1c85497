use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ConversionError;

pub const DEFAULT_EUR_RATE: f64 = 1.1;
pub const DEFAULT_GBP_RATE: f64 = 1.3;

/// Closed set of currencies a sale may be recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Gbp];

    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a textual tag does not name a supported currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrencyTag(pub String);

impl fmt::Display for UnknownCurrencyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown currency `{}`", self.0)
    }
}

impl std::error::Error for UnknownCurrencyTag {}

impl FromStr for Currency {
    type Err = UnknownCurrencyTag;

    /// Tags match case-insensitively; surrounding whitespace is not accepted.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            _ => Err(UnknownCurrencyTag(tag.to_string())),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = UnknownCurrencyTag;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

/// Fixed exchange rates into a single reference currency.
///
/// Every currency other than the reference has a rate, so conversion never
/// fails on a table that was built through [`RateTable::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    reference: Currency,
    rates: BTreeMap<Currency, f64>,
}

impl RateTable {
    pub fn new(
        reference: Currency,
        rates: BTreeMap<Currency, f64>,
    ) -> Result<Self, ConversionError> {
        for (&currency, &rate) in &rates {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ConversionError::InvalidRate { currency, rate });
            }
        }
        if let Some(&missing) = Currency::ALL
            .iter()
            .find(|&&currency| currency != reference && !rates.contains_key(&currency))
        {
            return Err(ConversionError::MissingRate(missing));
        }
        Ok(Self { reference, rates })
    }

    pub fn reference(&self) -> Currency {
        self.reference
    }

    /// Rate that turns one unit of `currency` into the reference currency.
    pub fn rate_for(&self, currency: Currency) -> Result<f64, ConversionError> {
        if currency == self.reference {
            return Ok(1.0);
        }
        self.rates
            .get(&currency)
            .copied()
            .ok_or(ConversionError::MissingRate(currency))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            reference: Currency::Usd,
            rates: default_rates(),
        }
    }
}

pub fn default_rates() -> BTreeMap<Currency, f64> {
    BTreeMap::from([
        (Currency::Eur, DEFAULT_EUR_RATE),
        (Currency::Gbp, DEFAULT_GBP_RATE),
    ])
}

/// Normalizes amounts into the reference currency of its [`RateTable`].
#[derive(Debug, Clone, Default)]
pub struct CurrencyConverter {
    rates: RateTable,
}

impl CurrencyConverter {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn reference(&self) -> Currency {
        self.rates.reference()
    }

    pub fn convert(&self, amount: f64, currency: Currency) -> Result<f64, ConversionError> {
        if currency == self.rates.reference() {
            return Ok(amount);
        }
        Ok(amount * self.rates.rate_for(currency)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!("usd".parse::<Currency>(), Ok(Currency::Usd));
        assert_eq!("Eur".parse::<Currency>(), Ok(Currency::Eur));
        assert_eq!("GBP".parse::<Currency>(), Ok(Currency::Gbp));
    }

    #[test]
    fn rejects_unknown_tags() {
        let err = "JPY".parse::<Currency>().expect_err("JPY is not supported");
        assert_eq!(err, UnknownCurrencyTag("JPY".into()));
        assert!(" USD".parse::<Currency>().is_err());
    }

    #[test]
    fn serializes_as_upper_case_code() {
        let json = serde_json::to_string(&Currency::Gbp).unwrap();
        assert_eq!(json, "\"GBP\"");
        let parsed: Currency = serde_json::from_str("\"eur\"").unwrap();
        assert_eq!(parsed, Currency::Eur);
        assert!(serde_json::from_str::<Currency>("\"CHF\"").is_err());
    }

    #[test]
    fn reference_currency_is_identity() {
        let converter = CurrencyConverter::default();
        for amount in [0.0, 1.0, -42.5, 123_456.789, f64::MIN_POSITIVE] {
            assert_eq!(converter.convert(amount, Currency::Usd), Ok(amount));
        }
    }

    #[test]
    fn applies_configured_rates_exactly() {
        let converter = CurrencyConverter::default();
        assert_eq!(
            converter.convert(50.0, Currency::Eur),
            Ok(50.0 * DEFAULT_EUR_RATE)
        );
        assert_eq!(
            converter.convert(-20.0, Currency::Gbp),
            Ok(-20.0 * DEFAULT_GBP_RATE)
        );
    }

    #[test]
    fn incomplete_table_is_rejected() {
        let err = RateTable::new(Currency::Usd, BTreeMap::from([(Currency::Eur, 1.1)]))
            .expect_err("no GBP rate");
        assert_eq!(err, ConversionError::MissingRate(Currency::Gbp));

        let err = RateTable::new(Currency::Eur, default_rates()).expect_err("no USD rate");
        assert_eq!(err, ConversionError::MissingRate(Currency::Usd));
    }

    #[test]
    fn reference_needs_no_rate_of_its_own() {
        let rates = RateTable::new(
            Currency::Gbp,
            BTreeMap::from([(Currency::Usd, 0.8), (Currency::Eur, 0.85)]),
        )
        .expect("complete table");
        assert_eq!(rates.rate_for(Currency::Gbp), Ok(1.0));
        assert_eq!(rates.rate_for(Currency::Eur), Ok(0.85));
    }

    #[test]
    fn rejects_non_positive_rates() {
        let err = RateTable::new(Currency::Usd, BTreeMap::from([(Currency::Gbp, 0.0)]))
            .expect_err("zero rate");
        assert_eq!(
            err,
            ConversionError::InvalidRate {
                currency: Currency::Gbp,
                rate: 0.0
            }
        );
        let nan = BTreeMap::from([(Currency::Eur, f64::NAN)]);
        assert!(RateTable::new(Currency::Usd, nan).is_err());
    }

    #[test]
    fn non_usd_reference_inverts_roles() {
        let rates = RateTable::new(
            Currency::Eur,
            BTreeMap::from([(Currency::Usd, 0.9), (Currency::Gbp, 1.2)]),
        )
        .unwrap();
        let converter = CurrencyConverter::new(rates);
        assert_eq!(converter.convert(10.0, Currency::Eur), Ok(10.0));
        assert_eq!(converter.convert(10.0, Currency::Usd), Ok(10.0 * 0.9));
    }
}
