//! Payroll period keys (`YYYY-MM`) and their display labels.

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;
use crate::validation::ValidationResult;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month key for a date, e.g. `2023-10`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Parses a `YYYY-MM` key into `(year, month)`.
pub fn parse_month_key(key: &str) -> ValidationResult<(i32, u32)> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "month".to_string(),
        reason: reason.to_string(),
    };

    let (year, month) = key
        .trim()
        .split_once('-')
        .ok_or_else(|| invalid("expected YYYY-MM"))?;

    if year.len() != 4 || month.len() != 2 {
        return Err(invalid("expected YYYY-MM"));
    }

    let year: i32 = year.parse().map_err(|_| invalid("year is not a number"))?;
    let month: u32 = month.parse().map_err(|_| invalid("month is not a number"))?;

    if !(1..=12).contains(&month) {
        return Err(invalid("month must be between 01 and 12"));
    }

    Ok((year, month))
}

/// Long label for a month key: `2023-10` becomes `October 2023`.
///
/// ```rust
/// use oshud_core::period::format_month_label;
///
/// assert_eq!(format_month_label("2024-01").unwrap(), "January 2024");
/// assert!(format_month_label("2024-13").is_err());
/// ```
pub fn format_month_label(key: &str) -> ValidationResult<String> {
    let (year, month) = parse_month_key(key)?;
    Ok(format!("{} {}", MONTH_NAMES[(month - 1) as usize], year))
}
