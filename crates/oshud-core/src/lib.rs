//! # oshud-core: Pure Business Logic for Oshud Kini
//!
//! Payroll calculation, input sanitizing and the sell cart for the Oshud
//! Kini pharmacy back office. Everything here is a pure function of its
//! inputs: no I/O, no clock reads.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Oshud Kini Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    oshud CLI (apps/oshud-cli)                    │   │
//! │  │    roster, adjust, process, history, config                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ oshud-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  payroll  │  │   money   │  │   sale    │  │ validation│  │   │
//! │  │   │  monthly  │  │  format   │  │ SaleCart  │  │  record   │  │   │
//! │  │   │  totals   │  │  ৳1,000   │  │ checkout  │  │   form    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    oshud-store (Data Layer)                     │   │
//! │  │         salary history + current roster in a JSON file          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`payroll`] - Sanitizing, monthly salary, adjustments, run totals
//! - [`money`] - Currency formatting
//! - [`types`] - Roster entries and salary history records
//! - [`period`] - `YYYY-MM` keys and month labels
//! - [`validation`] - Salary record form and checkout checks
//! - [`sale`] - Sell screen cart
//! - [`dashboard`] - Stock, sales and expense totals
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use oshud_core::{aggregate_run, final_payable, RosterEntry};
//!
//! let roster = vec![
//!     RosterEntry::new("e1", "Rahim", 120_000.0).with_adjustments(500.0, 200.0),
//!     RosterEntry::new("e2", "Karima", 60_000.0),
//! ];
//!
//! assert_eq!(final_payable(&roster[0]), 10_300.0);
//!
//! let totals = aggregate_run(&roster);
//! assert_eq!(totals.total_basic, 15_000.0);
//! assert_eq!(totals.employee_count, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dashboard;
pub mod error;
pub mod money;
pub mod payroll;
pub mod period;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dashboard::{summarize_dashboard, DashboardTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_currency, format_currency_magnitude};
pub use payroll::{
    aggregate_run, apply_adjustment, apply_to_roster, build_process_payload, final_payable,
    monthly_from_annual, settle_run, to_safe_number, NumericInput, PayrollLine,
    ProcessRunPayload, ProcessedSalary, RunSettlement, RunTotals,
};
pub use types::*;
