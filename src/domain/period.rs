use std::fmt;

use chrono::{Datelike, Local, NaiveDateTime};

use crate::errors::PeriodError;

/// Years up to and including this one are rejected.
pub const MIN_YEAR: i32 = 1900;

/// A calendar month identifying one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn contains(&self, date: &NaiveDateTime) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Latest year a report may be requested for: next calendar year.
pub fn max_year() -> i32 {
    Local::now().year() + 1
}

pub fn validate_year(year: i32) -> Result<i32, PeriodError> {
    validate_year_up_to(year, max_year())
}

fn validate_year_up_to(year: i32, max: i32) -> Result<i32, PeriodError> {
    if year > MIN_YEAR && year <= max {
        Ok(year)
    } else {
        Err(PeriodError::InvalidYear {
            year,
            min: MIN_YEAR + 1,
            max,
        })
    }
}

pub fn validate_month(month: u32) -> Result<u32, PeriodError> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(PeriodError::InvalidMonth(month))
    }
}

/// Checks operator input before it reaches the report pipeline.
pub fn validate_period(year: i32, month: u32) -> Result<Period, PeriodError> {
    Ok(Period::new(validate_year(year)?, validate_month(month)?))
}
