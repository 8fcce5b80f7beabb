//! # Validation Module
//!
//! Input validation for the salary record form, adjustments and checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Lenient decoding (types.rs)                                  │
//! │  └── Data from the API: bad numbers become 0, never an error           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (typed input)                                    │
//! │  ├── Strict parsing: "12abc" is NOT a number here                      │
//! │  └── All failing fields reported together                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                        │
//! │  └── Id assignment, not-found checks                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use oshud_core::types::SalaryRecordForm;
//! use oshud_core::validation::validate_salary_record;
//!
//! let today = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();
//! let form = SalaryRecordForm {
//!     month: "October 2023".into(),
//!     total_amount: "45000".into(),
//!     employee_count: "3".into(),
//!     processed_date: String::new(),
//! };
//! let draft = validate_salary_record(&form, today).unwrap();
//! assert_eq!(draft.processed_date, today);
//! ```

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{PayrollRunDraft, SalaryRecordForm};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Salary Record Form
// =============================================================================

/// Validates a salary record form and produces a draft.
///
/// ## Rules
/// - `month`: required (trimmed)
/// - `totalAmount`: required, a number, `> 0`
/// - `employeeCount`: required, a number whose integer part is `> 0`
/// - `processedDate`: optional `YYYY-MM-DD`, defaults to `today`
///
/// Every failing field ends up in [`CoreError::InvalidRecord`].
pub fn validate_salary_record(
    form: &SalaryRecordForm,
    today: NaiveDate,
) -> CoreResult<PayrollRunDraft> {
    let mut errors = Vec::new();

    let month = form.month.trim();
    if month.is_empty() {
        errors.push(ValidationError::Required {
            field: "month".to_string(),
        });
    }

    let total_amount = collect(
        parse_number("totalAmount", &form.total_amount).and_then(|n| {
            if n > 0.0 {
                Ok(n)
            } else {
                Err(ValidationError::MustBePositive {
                    field: "totalAmount".to_string(),
                })
            }
        }),
        &mut errors,
    );

    let employee_count = collect(
        parse_number("employeeCount", &form.employee_count).and_then(|n| {
            let whole = n.trunc();
            if whole > 0.0 {
                Ok(whole.min(f64::from(u32::MAX)) as u32)
            } else {
                Err(ValidationError::MustBePositive {
                    field: "employeeCount".to_string(),
                })
            }
        }),
        &mut errors,
    );

    let processed_date = collect(parse_processed_date(&form.processed_date, today), &mut errors);

    match (total_amount, employee_count, processed_date) {
        (Some(total_amount), Some(employee_count), Some(processed_date)) if errors.is_empty() => {
            Ok(PayrollRunDraft {
                month: month.to_string(),
                total_amount,
                employee_count,
                processed_date,
            })
        }
        _ => Err(CoreError::InvalidRecord { errors }),
    }
}

fn collect<T>(result: ValidationResult<T>, errors: &mut Vec<ValidationError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

/// Strict numeric parse: the whole trimmed string must be a finite number.
fn parse_number(field: &str, raw: &str) -> ValidationResult<f64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a number", raw),
        })
}

fn parse_processed_date(raw: &str, today: NaiveDate) -> ValidationResult<NaiveDate> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(today);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: "processedDate".to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

// =============================================================================
// Adjustments and Checkout
// =============================================================================

/// Rejects zero, negative and non-finite adjustment amounts.
///
/// The payroll calculator itself silently ignores such amounts; this check
/// is for callers that want an explicit error instead.
pub fn validate_adjustment_amount(amount: f64) -> ValidationResult<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        })
    }
}

/// Validates the customer name on checkout.
///
/// ## Returns
/// The trimmed name.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customerName".to_string(),
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
