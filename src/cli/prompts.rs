use std::io::BufRead;

use dialoguer::{theme::ColorfulTheme, Input};

use crate::{
    cli::output,
    domain::{validate_month, validate_year, Period},
    errors::{CliError, PeriodError},
};

pub const YEAR_PROMPT: &str = "Please enter the year for the report";
pub const MONTH_PROMPT: &str = "Please enter the month for the report (1-12)";

pub fn parse_year(input: &str) -> Result<i32, PeriodError> {
    let trimmed = input.trim();
    let year = trimmed
        .parse::<i32>()
        .map_err(|_| PeriodError::NotANumber(trimmed.to_string()))?;
    validate_year(year)
}

pub fn parse_month(input: &str) -> Result<u32, PeriodError> {
    let trimmed = input.trim();
    let month = trimmed
        .parse::<u32>()
        .map_err(|_| PeriodError::NotANumber(trimmed.to_string()))?;
    validate_month(month)
}

/// Asks for year and month with dialoguer, re-prompting until each is valid.
pub fn prompt_period(theme: &ColorfulTheme) -> Result<Period, CliError> {
    let year = Input::<String>::with_theme(theme)
        .with_prompt(YEAR_PROMPT)
        .validate_with(|input: &String| parse_year(input).map(|_| ()))
        .interact_text()?;
    let month = Input::<String>::with_theme(theme)
        .with_prompt(MONTH_PROMPT)
        .validate_with(|input: &String| parse_month(input).map(|_| ()))
        .interact_text()?;
    Ok(Period::new(parse_year(&year)?, parse_month(&month)?))
}

/// Reads year then month from line-oriented input, warning and retrying on
/// invalid lines. Running out of input first is an error.
pub fn read_period<R: BufRead>(input: R) -> Result<Period, CliError> {
    let mut lines = input.lines();
    let year = read_valid(&mut lines, YEAR_PROMPT, "year", parse_year)?;
    let month = read_valid(&mut lines, MONTH_PROMPT, "month", parse_month)?;
    Ok(Period::new(year, month))
}

fn read_valid<T, I>(
    lines: &mut I,
    prompt: &str,
    what: &str,
    parse: fn(&str) -> Result<T, PeriodError>,
) -> Result<T, CliError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    loop {
        output::prompt(format!("{prompt}:"));
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(CliError::Input(format!(
                    "input ended before a valid {what} was entered"
                )))
            }
        };
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(err) => output::warning(err),
        }
    }
}
