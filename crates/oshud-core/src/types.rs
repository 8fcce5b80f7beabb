//! # Domain Types
//!
//! Core domain types used throughout Oshud Kini payroll.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  RosterEntry    │   │   PayrollRun    │   │ AdjustmentKind  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (_id)       │   │  id             │   │  Bonus          │       │
//! │  │  name           │   │  month          │   │  Deduction      │       │
//! │  │  job_title      │   │  total_amount   │   └─────────────────┘       │
//! │  │  salary (annual)│   │  employee_count │                             │
//! │  │  bonuses        │   │  processed_date │                             │
//! │  │  deductions     │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Decoding
//! Records come from a loosely typed REST API. Numeric fields go through
//! [`to_safe_number`](crate::payroll::to_safe_number) while decoding, so a
//! `"salary": "abc"` or a missing `bonuses` decodes as `0` instead of failing
//! the whole roster.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::payroll::RunTotals;

// =============================================================================
// Adjustment Kind
// =============================================================================

/// Which side of the payslip an adjustment lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AdjustmentKind {
    /// Added to the monthly amount.
    Bonus,
    /// Subtracted from the monthly amount. Stored as a positive magnitude.
    Deduction,
}

impl std::fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentKind::Bonus => write!(f, "bonus"),
            AdjustmentKind::Deduction => write!(f, "deduction"),
        }
    }
}

// =============================================================================
// Roster Entry
// =============================================================================

/// An employee eligible for the current payroll period.
///
/// `salary` is the annual figure; monthly amounts are always derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RosterEntry {
    /// Opaque identifier, unique within a roster snapshot.
    #[serde(default, alias = "_id", deserialize_with = "lenient::text")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub job_title: String,

    /// Base annual compensation.
    #[serde(default, alias = "basicSalary", deserialize_with = "lenient::number")]
    pub salary: f64,

    /// Bonuses accumulated for the current period.
    #[serde(default, deserialize_with = "lenient::number")]
    pub bonuses: f64,

    /// Deductions accumulated for the current period (positive magnitude).
    #[serde(default, deserialize_with = "lenient::number")]
    pub deductions: f64,
}

impl RosterEntry {
    /// Creates an entry with no adjustments and an empty job title.
    pub fn new(id: impl Into<String>, name: impl Into<String>, salary: f64) -> Self {
        RosterEntry {
            id: id.into(),
            name: name.into(),
            job_title: String::new(),
            salary,
            bonuses: 0.0,
            deductions: 0.0,
        }
    }

    /// Sets the job title.
    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = job_title.into();
        self
    }

    /// Sets bonuses and deductions.
    pub fn with_adjustments(mut self, bonuses: f64, deductions: f64) -> Self {
        self.bonuses = bonuses;
        self.deductions = deductions;
        self
    }

    /// Returns a copy with bonuses and deductions reset to zero.
    pub fn without_adjustments(&self) -> Self {
        self.clone().with_adjustments(0.0, 0.0)
    }
}

// =============================================================================
// Payroll Run
// =============================================================================

/// A processed payroll run as kept in the salary history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PayrollRun {
    #[serde(default, deserialize_with = "lenient::record_id")]
    pub id: u32,

    /// Free-form period label, e.g. "October 2023".
    #[serde(default, deserialize_with = "lenient::text")]
    pub month: String,

    /// Sum of every employee's final payable amount.
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_amount: f64,

    #[serde(default, deserialize_with = "lenient::record_id")]
    pub employee_count: u32,

    /// Commit date. `None` when the stored value is missing or unparsable.
    #[serde(default, deserialize_with = "lenient::date")]
    #[ts(as = "Option<String>")]
    pub processed_date: Option<NaiveDate>,
}

impl PayrollRun {
    /// Builds the history record for a freshly processed run.
    pub fn from_totals(
        id: u32,
        month: impl Into<String>,
        totals: &RunTotals,
        processed_date: NaiveDate,
    ) -> Self {
        PayrollRun {
            id,
            month: month.into(),
            total_amount: totals.total_final,
            employee_count: u32::try_from(totals.employee_count).unwrap_or(u32::MAX),
            processed_date: Some(processed_date),
        }
    }

    /// Processed date as shown in lists: ISO date or `N/A`.
    pub fn processed_date_label(&self) -> String {
        self.processed_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// A validated salary record that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PayrollRunDraft {
    pub month: String,
    pub total_amount: f64,
    pub employee_count: u32,
    #[ts(as = "String")]
    pub processed_date: NaiveDate,
}

impl PayrollRunDraft {
    /// Attaches an id, producing a history record.
    pub fn into_run(self, id: u32) -> PayrollRun {
        PayrollRun {
            id,
            month: self.month,
            total_amount: self.total_amount,
            employee_count: self.employee_count,
            processed_date: Some(self.processed_date),
        }
    }
}

/// Raw salary record form fields, exactly as typed.
///
/// See [`validate_salary_record`](crate::validation::validate_salary_record).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
#[ts(export)]
pub struct SalaryRecordForm {
    pub month: String,
    pub total_amount: String,
    pub employee_count: String,
    /// `YYYY-MM-DD`; empty means today.
    pub processed_date: String,
}

// =============================================================================
// Lenient Field Decoders
// =============================================================================

pub(crate) mod lenient {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::payroll::to_safe_number;

    /// Any JSON value as a string; null becomes empty.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Any JSON value through `to_safe_number`.
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(to_safe_number(&value))
    }

    /// Non-negative integers; fractions truncate, everything else is 0.
    pub fn record_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let n = to_safe_number(&value).trunc();
        Ok(if n <= 0.0 { 0 } else { n.min(f64::from(u32::MAX)) as u32 })
    }

    /// `YYYY-MM-DD`, optionally followed by a time part.
    pub fn date<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => {
                let head = s.get(..10).unwrap_or(&s);
                NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
            }
            _ => None,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll::aggregate_run;
    use serde_json::json;

    #[test]
    fn test_adjustment_kind_display_matches_wire_name() {
        assert_eq!(AdjustmentKind::Bonus.to_string(), "bonus");
        assert_eq!(
            serde_json::to_value(AdjustmentKind::Deduction).unwrap(),
            json!("deduction")
        );
    }

    #[test]
    fn test_roster_entry_decodes_clean_record() {
        let entry: RosterEntry = serde_json::from_value(json!({
            "id": "e1",
            "name": "Rahim",
            "jobTitle": "Pharmacist",
            "salary": 120000,
            "bonuses": 500,
            "deductions": 200
        }))
        .unwrap();

        assert_eq!(entry.id, "e1");
        assert_eq!(entry.job_title, "Pharmacist");
        assert_eq!(entry.salary, 120_000.0);
        assert_eq!(entry.bonuses, 500.0);
    }

    #[test]
    fn test_roster_entry_decodes_loose_record() {
        let entry: RosterEntry = serde_json::from_value(json!({
            "_id": 17,
            "name": null,
            "basicSalary": "60000",
            "bonuses": "abc",
            "deductions": null
        }))
        .unwrap();

        assert_eq!(entry.id, "17");
        assert_eq!(entry.name, "");
        assert_eq!(entry.job_title, "");
        assert_eq!(entry.salary, 60_000.0);
        assert_eq!(entry.bonuses, 0.0);
        assert_eq!(entry.deductions, 0.0);
    }

    #[test]
    fn test_roster_entry_serializes_camel_case() {
        let entry = RosterEntry::new("e1", "Rahim", 1200.0).with_job_title("Cashier");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["jobTitle"], "Cashier");
        assert_eq!(value["salary"], 1200.0);
    }

    #[test]
    fn test_payroll_run_decodes_loose_record() {
        let run: PayrollRun = serde_json::from_value(json!({
            "id": 3,
            "month": "October 2023",
            "totalAmount": "45000",
            "employeeCount": "x",
            "processedDate": "2023-10-31T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(run.id, 3);
        assert_eq!(run.total_amount, 45_000.0);
        assert_eq!(run.employee_count, 0);
        assert_eq!(run.processed_date, NaiveDate::from_ymd_opt(2023, 10, 31));
    }

    #[test]
    fn test_payroll_run_bad_date_shows_na() {
        let run: PayrollRun = serde_json::from_value(json!({
            "id": 1,
            "month": "May 2024",
            "processedDate": "yesterday"
        }))
        .unwrap();

        assert_eq!(run.processed_date, None);
        assert_eq!(run.processed_date_label(), "N/A");
    }

    #[test]
    fn test_payroll_run_from_totals() {
        let roster = vec![
            RosterEntry::new("a", "A", 120_000.0).with_adjustments(500.0, 200.0),
            RosterEntry::new("b", "B", 60_000.0),
        ];
        let totals = aggregate_run(&roster);
        let date = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();
        let run = PayrollRun::from_totals(7, "October 2023", &totals, date);

        assert_eq!(run.total_amount, 15_300.0);
        assert_eq!(run.employee_count, 2);
        assert_eq!(run.processed_date_label(), "2023-10-31");
    }

    #[test]
    fn test_run_round_trips_through_json() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let run = PayrollRun::from_totals(1, "January 2024", &RunTotals::default(), date);
        let json = serde_json::to_string(&run).unwrap();
        let back: PayrollRun = serde_json::from_str(&json).unwrap();
        assert_eq!(back, run);
    }
}
