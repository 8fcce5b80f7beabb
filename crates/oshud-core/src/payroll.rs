//! # Payroll Module
//!
//! The payroll calculator: one canonical rule set for sanitizing numbers,
//! converting annual salaries to monthly pay, applying adjustments and
//! totalling a run. Every screen and command goes through these functions.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Employee, One Period                             │
//! │                                                                         │
//! │  salary (annual, loose) ──► to_safe_number ──► monthly_from_annual      │
//! │                                                 ≤ 0 → 0                 │
//! │                                                 else round(x / 12)      │
//! │                                                       │                 │
//! │  bonuses (loose) ───────► to_safe_number ──────► (+)  │                 │
//! │  deductions (loose) ────► to_safe_number ──────► (−)  ▼                 │
//! │                                                 final_payable           │
//! │                                                 (may be negative)       │
//! │                                                                         │
//! │  aggregate_run: the same three sums over the roster in one pass        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invalid Input Policy
//! Invalid or missing numbers are never an error. They become `0` so that a
//! half-populated roster still renders consistent totals.
//!
//! ## Example
//! ```rust
//! use oshud_core::payroll::{aggregate_run, final_payable, monthly_from_annual};
//! use oshud_core::RosterEntry;
//!
//! assert_eq!(monthly_from_annual(120_000.0), 10_000.0);
//!
//! let employee = RosterEntry::new("e1", "Rahim", 120_000.0).with_adjustments(500.0, 200.0);
//! assert_eq!(final_payable(&employee), 10_300.0);
//!
//! let totals = aggregate_run(&[employee]);
//! assert_eq!(totals.total_final, 10_300.0);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{AdjustmentKind, PayrollRun, RosterEntry};

/// Months in a salary year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

// =============================================================================
// Numeric Input
// =============================================================================

/// A value that may or may not hold a number.
///
/// Implemented for the shapes the upstream API hands us: plain numbers,
/// strings typed into forms, optional fields and raw JSON values.
pub trait NumericInput {
    /// Coerces to a float, or `None` when the value is not a number.
    fn coerce(&self) -> Option<f64>;
}

impl NumericInput for f64 {
    fn coerce(&self) -> Option<f64> {
        Some(*self)
    }
}

impl NumericInput for f32 {
    fn coerce(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl NumericInput for i32 {
    fn coerce(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl NumericInput for i64 {
    fn coerce(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl NumericInput for u32 {
    fn coerce(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl NumericInput for usize {
    fn coerce(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl NumericInput for bool {
    fn coerce(&self) -> Option<f64> {
        None
    }
}

/// Strings use their leading numeric prefix: `"12abc"` is 12.
impl NumericInput for str {
    fn coerce(&self) -> Option<f64> {
        parse_float_prefix(self)
    }
}

impl NumericInput for String {
    fn coerce(&self) -> Option<f64> {
        parse_float_prefix(self)
    }
}

impl<T: NumericInput> NumericInput for Option<T> {
    fn coerce(&self) -> Option<f64> {
        self.as_ref().and_then(NumericInput::coerce)
    }
}

/// JSON numbers and numeric strings coerce; null, booleans, arrays and
/// objects do not.
impl NumericInput for Value {
    fn coerce(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_float_prefix(s),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl<T: NumericInput + ?Sized> NumericInput for &T {
    fn coerce(&self) -> Option<f64> {
        (**self).coerce()
    }
}

/// Parses the longest float literal at the start of `s`.
///
/// Leading whitespace is skipped. At least one mantissa digit is required;
/// an exponent is only consumed when digits follow it.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

// =============================================================================
// Calculator
// =============================================================================

/// Returns a finite number usable for arithmetic.
///
/// Anything that does not coerce to a finite float becomes `0`. Never fails.
///
/// ## Example
/// ```rust
/// use oshud_core::payroll::to_safe_number;
///
/// assert_eq!(to_safe_number(-12.5), -12.5);
/// assert_eq!(to_safe_number("abc"), 0.0);
/// assert_eq!(to_safe_number(None::<f64>), 0.0);
/// assert_eq!(to_safe_number(f64::NAN), 0.0);
/// ```
pub fn to_safe_number(value: impl NumericInput) -> f64 {
    value
        .coerce()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Converts an annual salary to a whole monthly amount.
///
/// Non-positive salaries mean "no pay" and return `0`. Otherwise the salary
/// is divided by twelve and rounded half away from zero.
///
/// ## Example
/// ```rust
/// use oshud_core::payroll::monthly_from_annual;
///
/// assert_eq!(monthly_from_annual(100.0), 8.0);  // 8.33 → 8
/// assert_eq!(monthly_from_annual(-100.0), 0.0);
/// ```
pub fn monthly_from_annual(annual_salary: impl NumericInput) -> f64 {
    let salary = to_safe_number(annual_salary);
    if salary <= 0.0 {
        return 0.0;
    }

    (salary / MONTHS_PER_YEAR).round()
}

/// Monthly salary plus bonuses minus deductions for one employee.
///
/// The result is not clamped; callers render negative amounts with a sign.
pub fn final_payable(employee: &RosterEntry) -> f64 {
    monthly_from_annual(employee.salary) + to_safe_number(employee.bonuses)
        - to_safe_number(employee.deductions)
}

/// Returns a copy of `employee` with the adjustment added.
///
/// A sanitized amount `<= 0` is ignored and the copy is returned unchanged.
/// The adjusted field is sanitized before the amount is added.
///
/// ## Example
/// ```rust
/// use oshud_core::payroll::apply_adjustment;
/// use oshud_core::{AdjustmentKind, RosterEntry};
///
/// let employee = RosterEntry::new("e1", "Karim", 60_000.0);
/// let adjusted = apply_adjustment(&employee, AdjustmentKind::Deduction, 300.0);
/// assert_eq!(adjusted.deductions, 300.0);
///
/// let ignored = apply_adjustment(&employee, AdjustmentKind::Bonus, -5.0);
/// assert_eq!(ignored, employee);
/// ```
pub fn apply_adjustment(
    employee: &RosterEntry,
    kind: AdjustmentKind,
    amount: impl NumericInput,
) -> RosterEntry {
    let amount = to_safe_number(amount);
    let mut adjusted = employee.clone();

    if amount <= 0.0 {
        return adjusted;
    }

    match kind {
        AdjustmentKind::Bonus => {
            adjusted.bonuses = to_safe_number(employee.bonuses) + amount;
        }
        AdjustmentKind::Deduction => {
            adjusted.deductions = to_safe_number(employee.deductions) + amount;
        }
    }

    adjusted
}

/// Applies an adjustment to the roster entry with `employee_id`.
///
/// Returns a new roster; the input slice is untouched. Unknown ids leave
/// every entry as it was.
pub fn apply_to_roster(
    roster: &[RosterEntry],
    employee_id: &str,
    kind: AdjustmentKind,
    amount: impl NumericInput,
) -> Vec<RosterEntry> {
    let amount = to_safe_number(amount);

    roster
        .iter()
        .map(|entry| {
            if entry.id == employee_id {
                apply_adjustment(entry, kind, amount)
            } else {
                entry.clone()
            }
        })
        .collect()
}

/// Totals a payroll run in a single pass.
///
/// An empty roster yields all zeros. `total_final` matches the sum of
/// [`final_payable`] over the roster only up to float rounding, since the
/// two sides add the same amounts in a different order.
pub fn aggregate_run(employees: &[RosterEntry]) -> RunTotals {
    let mut totals = employees
        .iter()
        .fold(RunTotals::default(), |mut acc, employee| {
            acc.total_basic += monthly_from_annual(employee.salary);
            acc.total_bonuses += to_safe_number(employee.bonuses);
            acc.total_deductions += to_safe_number(employee.deductions);
            acc.employee_count += 1;
            acc
        });

    totals.total_final = totals.total_basic + totals.total_bonuses - totals.total_deductions;
    totals
}

/// Builds the body for `POST /salaries/process`.
pub fn build_process_payload(month: impl Into<String>, roster: &[RosterEntry]) -> ProcessRunPayload {
    ProcessRunPayload {
        month: month.into(),
        salaries: roster
            .iter()
            .map(|employee| ProcessedSalary {
                id: employee.id.clone(),
                name: employee.name.clone(),
                amount: final_payable(employee),
            })
            .collect(),
    }
}

/// Settles a roster into the payload, totals and history record of one run.
///
/// Payload and totals come from the same roster slice, so the recorded
/// `total_amount` always matches what was paid. The record's id is left at
/// 0 for the store to assign.
///
/// ## Errors
/// `CoreError::EmptyRoster` when there is nobody to pay.
pub fn settle_run(
    month: impl Into<String>,
    roster: &[RosterEntry],
    processed_date: NaiveDate,
) -> CoreResult<RunSettlement> {
    if roster.is_empty() {
        return Err(CoreError::EmptyRoster);
    }

    let month = month.into();
    let totals = aggregate_run(roster);

    Ok(RunSettlement {
        run: PayrollRun::from_totals(0, month.clone(), &totals, processed_date),
        payload: build_process_payload(month, roster),
        totals,
    })
}

// =============================================================================
// Calculator Outputs
// =============================================================================

/// Totals for one payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RunTotals {
    /// Sum of monthly salaries.
    pub total_basic: f64,
    pub total_bonuses: f64,
    pub total_deductions: f64,
    /// `total_basic + total_bonuses - total_deductions`.
    pub total_final: f64,
    pub employee_count: usize,
}

/// One row of the salary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PayrollLine {
    pub id: String,
    pub name: String,
    pub job_title: String,
    pub monthly_salary: f64,
    pub bonuses: f64,
    pub deductions: f64,
    pub final_amount: f64,
}

impl From<&RosterEntry> for PayrollLine {
    fn from(employee: &RosterEntry) -> Self {
        PayrollLine {
            id: employee.id.clone(),
            name: employee.name.clone(),
            job_title: employee.job_title.clone(),
            monthly_salary: monthly_from_annual(employee.salary),
            bonuses: to_safe_number(employee.bonuses),
            deductions: to_safe_number(employee.deductions),
            final_amount: final_payable(employee),
        }
    }
}

/// Amount paid to one employee in a processed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcessedSalary {
    pub id: String,
    pub name: String,
    pub amount: f64,
}

/// Request body handed to the REST client when a run is processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcessRunPayload {
    /// Period label, e.g. "October 2023".
    pub month: String,
    pub salaries: Vec<ProcessedSalary>,
}

/// Everything produced when a roster is paid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RunSettlement {
    pub payload: ProcessRunPayload,
    pub totals: RunTotals,
    pub run: PayrollRun,
}

// =============================================================================
// Unit Tests
// =============================================================================
