//! Table and JSON rendering for command results.

use oshud_core::money::{format_currency, format_currency_magnitude};
use serde::Serialize;

use crate::error::ApiError;

/// Human-readable rendering of a command result.
pub trait Render {
    fn render(&self, currency_symbol: &str) -> String;
}

/// Prints `value` as pretty JSON or as text.
pub fn emit<T>(value: &T, json: bool, currency_symbol: &str) -> Result<(), ApiError>
where
    T: Serialize + Render,
{
    if json {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(format!("Failed to encode output: {}", e)))?;
        println!("{}", text);
    } else {
        println!("{}", value.render(currency_symbol));
    }
    Ok(())
}

/// `৳1,000`, or `-৳1,000` when the amount rounds below zero.
pub fn amount(symbol: &str, value: f64) -> String {
    format_currency(value, symbol)
}

/// `+৳500`.
pub fn bonus(symbol: &str, value: f64) -> String {
    format!("+{}{}", symbol, format_currency_magnitude(value))
}

/// `-৳200`.
pub fn deduction(symbol: &str, value: f64) -> String {
    format!("-{}{}", symbol, format_currency_magnitude(value))
}

/// Left-aligned columns separated by two spaces.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = vec![pad_line(headers, &widths)];
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(pad_line(&cells, &widths));
    }
    out.join("\n")
}

fn pad_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
