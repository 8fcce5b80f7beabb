//! # Payroll Commands
//!
//! `roster` (show, import, clear-adjustments), `adjust` and `process`.
//!
//! ## Process Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  oshud process --month 2023-10                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  format_month_label("2023-10") ──► "October 2023"                      │
//! │       │                                                                 │
//! │       ├── --dry-run? ──► settle_run on a roster copy, print, stop      │
//! │       ▼                                                                 │
//! │  history.record_run() ──► settle + record + reset in one write         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use oshud_core::period::{format_month_label, month_key};
use oshud_core::validation::validate_adjustment_amount;
use std::path::Path;

use oshud_core::{
    aggregate_run, settle_run, AdjustmentKind, PayrollLine, PayrollRun, ProcessRunPayload,
    RosterEntry, RunSettlement, RunTotals,
};
use serde::Serialize;
use tracing::{debug, info};

use super::{read_json_list, AppContext};
use crate::error::ApiError;
use crate::output::{amount, bonus, deduction, table, Render};

// =============================================================================
// Roster
// =============================================================================

/// Salary table plus the run summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterView {
    pub lines: Vec<PayrollLine>,
    pub totals: RunTotals,
}

pub async fn show_roster(ctx: &AppContext) -> RosterView {
    let roster = ctx.store.roster().current_month_employees().await;
    debug!(count = roster.len(), "Rendering roster");

    RosterView {
        lines: roster.iter().map(PayrollLine::from).collect(),
        totals: aggregate_run(&roster),
    }
}

/// Replaces the roster with the employees listed in `file`.
///
/// Records decode leniently: `_id` and `basicSalary` are accepted and bad
/// numbers count as 0.
pub async fn import_roster(ctx: &AppContext, file: &Path) -> Result<RosterView, ApiError> {
    let roster: Vec<RosterEntry> = read_json_list(Some(file)).await?;
    info!(count = roster.len(), file = %file.display(), "Importing roster");

    ctx.store.roster().replace(roster).await?;
    Ok(show_roster(ctx).await)
}

/// Resets every pending bonus and deduction.
pub async fn clear_adjustments(ctx: &AppContext) -> Result<RosterView, ApiError> {
    ctx.store.roster().clear_adjustments().await?;
    Ok(show_roster(ctx).await)
}

impl Render for RosterView {
    fn render(&self, symbol: &str) -> String {
        if self.lines.is_empty() {
            return "No employees on the current roster.".to_string();
        }

        let rows: Vec<Vec<String>> = self
            .lines
            .iter()
            .map(|line| {
                vec![
                    line.id.clone(),
                    line.name.clone(),
                    line.job_title.clone(),
                    amount(symbol, line.monthly_salary),
                    bonus(symbol, line.bonuses),
                    deduction(symbol, line.deductions),
                    amount(symbol, line.final_amount),
                ]
            })
            .collect();

        let mut out = table(
            &["ID", "Name", "Job title", "Basic", "Bonuses", "Deductions", "Final"],
            &rows,
        );
        out.push_str("\n\n");
        out.push_str(&render_totals(symbol, &self.totals));
        out
    }
}

fn render_totals(symbol: &str, totals: &RunTotals) -> String {
    [
        format!("Employees:         {}", totals.employee_count),
        format!("Total basic:       {}", amount(symbol, totals.total_basic)),
        format!("Total bonuses:     {}", bonus(symbol, totals.total_bonuses)),
        format!("Total deductions:  {}", deduction(symbol, totals.total_deductions)),
        format!("Total payable:     {}", amount(symbol, totals.total_final)),
    ]
    .join("\n")
}

// =============================================================================
// Adjust
// =============================================================================

/// Adds a bonus or deduction and returns the employee's updated line.
///
/// Non-positive amounts are ignored unless
/// `payroll.reject_non_positive_adjustments` is set, in which case they are
/// a validation error.
pub async fn adjust(
    ctx: &AppContext,
    employee_id: &str,
    kind: AdjustmentKind,
    value: f64,
) -> Result<PayrollLine, ApiError> {
    if ctx.config.payroll.reject_non_positive_adjustments {
        validate_adjustment_amount(value)?;
    }

    let entry = ctx
        .store
        .roster()
        .add_adjustment(employee_id, kind, value)
        .await?;

    Ok(PayrollLine::from(&entry))
}

impl Render for PayrollLine {
    fn render(&self, symbol: &str) -> String {
        format!(
            "{} ({}): basic {}, bonuses {}, deductions {}, final {}",
            self.name,
            self.id,
            amount(symbol, self.monthly_salary),
            bonus(symbol, self.bonuses),
            deduction(symbol, self.deductions),
            amount(symbol, self.final_amount),
        )
    }
}

// =============================================================================
// Process
// =============================================================================

/// Result of `oshud process`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutcome {
    pub payload: ProcessRunPayload,
    pub totals: RunTotals,
    /// The recorded history entry; absent on a dry run.
    pub run: Option<PayrollRun>,
}

pub async fn process(
    ctx: &AppContext,
    month: Option<&str>,
    dry_run: bool,
) -> Result<ProcessOutcome, ApiError> {
    let key = month.map_or_else(|| month_key(ctx.today), str::to_string);
    let label = format_month_label(&key)?;

    if dry_run {
        let roster = ctx.store.roster().current_month_employees().await;
        let RunSettlement {
            payload, totals, ..
        } = settle_run(label.as_str(), &roster, ctx.today)?;

        info!(month = %label, employees = totals.employee_count, "Dry run, nothing recorded");
        return Ok(ProcessOutcome {
            payload,
            totals,
            run: None,
        });
    }

    let RunSettlement {
        payload,
        totals,
        run,
    } = ctx.store.history().record_run(label, ctx.today).await?;

    Ok(ProcessOutcome {
        payload,
        totals,
        run: Some(run),
    })
}

impl Render for ProcessOutcome {
    fn render(&self, symbol: &str) -> String {
        let rows: Vec<Vec<String>> = self
            .payload
            .salaries
            .iter()
            .map(|s| vec![s.id.clone(), s.name.clone(), amount(symbol, s.amount)])
            .collect();

        let header = match &self.run {
            Some(run) => format!("Processed {} as salary record #{}", self.payload.month, run.id),
            None => format!("Dry run for {} (nothing recorded)", self.payload.month),
        };

        format!(
            "{}\n\n{}\n\n{}",
            header,
            table(&["ID", "Name", "Amount"], &rows),
            render_totals(symbol, &self.totals)
        )
    }
}
