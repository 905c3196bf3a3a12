// Parsing and formatting helpers shared by the loader, reshaper and console
// summary.
//
// Blank-ish cells come back as `None` so callers can decide whether absence
// means "skip", "zero" or "error"; anything else must parse.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};
use std::num::{ParseFloatError, ParseIntError};

/// Markers that CSV exports use for a missing value.
const BLANK_MARKERS: [&str; 8] = ["", "na", "n/a", "nan", "null", "none", "-nan", "#n/a"];

pub fn is_blank(s: &str) -> bool {
    let s = s.trim();
    BLANK_MARKERS.iter().any(|m| s.eq_ignore_ascii_case(m))
}

/// Parse a numeric cell, tolerating thousands separators.
///
/// - `None` for a missing or blank cell.
/// - `Some(Err(_))` when there is text but it is not a number.
pub fn parse_f64_cell(s: Option<&str>) -> Option<Result<f64, ParseFloatError>> {
    let s = s?.trim();
    if is_blank(s) {
        return None;
    }
    Some(s.replace(',', "").parse::<f64>())
}

pub fn parse_i32_cell(s: Option<&str>) -> Option<Result<i32, ParseIntError>> {
    let s = s?.trim();
    if is_blank(s) {
        return None;
    }
    Some(s.parse::<i32>())
}

/// `true` when (year, month) names a real calendar month.
pub fn is_calendar_month(year: i32, month: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, 1).is_some()
}

/// Render a period as `YYYY-MM`, the same shape as the exposure headers.
pub fn period_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%Y-%m").to_string(),
        None => format!("{}-{:02}", year, month),
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages, e.g. `9,855 rows`.
    n.to_formatted_string(&Locale::en)
}
