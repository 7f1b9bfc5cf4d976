use chrono::{Datelike, Local, NaiveDate};
use rand::{Rng, distr::Alphanumeric};

use crate::error::DateError;

/// Date pattern accepted at the prompt and used in chart URLs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `input` with `format` and rejects dates after `today`.
///
/// Only a trailing line ending is stripped. Whitespace, signs and a leading
/// non-digit are rejected even where chrono would skip over them.
pub fn validate_date(
    input: &str,
    format: &str,
    today: NaiveDate,
) -> Result<NaiveDate, DateError> {
    let line = input.trim_end_matches(['\r', '\n']);
    if !line.starts_with(|c: char| c.is_ascii_digit())
        || line.contains(|c: char| c.is_whitespace() || c == '+')
    {
        return Err(DateError::Format);
    }

    let date = NaiveDate::parse_from_str(line, format).map_err(|_| DateError::Format)?;
    if date > today {
        return Err(DateError::Future);
    }
    Ok(date)
}

/// Whether `input` parses under `format` and is not after the local date.
pub fn is_valid_date(input: &str, format: &str) -> bool {
    validate_date(input, format, today()).is_ok()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn playlist_name(date: NaiveDate) -> String {
    format!("{} Billboard 100", format_date(date))
}

pub fn playlist_description(date: NaiveDate) -> String {
    format!("Billboard 100 songs for the week of {}", format_date(date))
}

/// Search query restricting a chart title to the chart's year.
pub fn search_query(title: &str, date: NaiveDate) -> String {
    format!("track:{} year:{}", title, date.year())
}

/// Extracts the bare id from a `spotify:playlist:<id>` URI.
///
/// Values without a `:` are returned unchanged.
pub fn playlist_id(uri: &str) -> &str {
    uri.rsplit(':').next().unwrap_or(uri)
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
