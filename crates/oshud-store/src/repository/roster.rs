//! # Roster Repository
//!
//! The current month's employees and their pending adjustments.

use oshud_core::{apply_to_roster, AdjustmentKind, RosterEntry};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::SalaryStore;

/// Repository for the current payroll roster.
#[derive(Debug, Clone)]
pub struct RosterRepository {
    store: SalaryStore,
}

impl RosterRepository {
    /// Creates a new RosterRepository.
    pub fn new(store: SalaryStore) -> Self {
        RosterRepository { store }
    }

    /// Employees eligible for the current period.
    pub async fn current_month_employees(&self) -> Vec<RosterEntry> {
        let roster = self
            .store
            .read(|doc| doc.current_month_employees.clone())
            .await;
        debug!(count = roster.len(), "Loaded roster");
        roster
    }

    /// Replaces the whole roster, e.g. after importing from the HR system.
    pub async fn replace(&self, roster: Vec<RosterEntry>) -> StoreResult<()> {
        let count = roster.len();
        self.store
            .mutate(|doc| {
                doc.current_month_employees = roster;
                Ok(())
            })
            .await?;

        info!(count, "Roster replaced");
        Ok(())
    }

    /// Adds a bonus or deduction to one employee and returns the updated entry.
    ///
    /// Zero or negative amounts leave the entry unchanged, exactly as
    /// [`apply_adjustment`](oshud_core::apply_adjustment) does. Unknown ids
    /// are an error here, unlike the pure roster update.
    pub async fn add_adjustment(
        &self,
        employee_id: &str,
        kind: AdjustmentKind,
        amount: f64,
    ) -> StoreResult<RosterEntry> {
        let entry = self
            .store
            .mutate(|doc| {
                if !doc.current_month_employees.iter().any(|e| e.id == employee_id) {
                    return Err(StoreError::not_found("Employee", employee_id));
                }

                doc.current_month_employees =
                    apply_to_roster(&doc.current_month_employees, employee_id, kind, amount);

                doc.current_month_employees
                    .iter()
                    .find(|e| e.id == employee_id)
                    .cloned()
                    .ok_or_else(|| StoreError::not_found("Employee", employee_id))
            })
            .await?;

        info!(
            employee_id,
            %kind,
            amount,
            bonuses = entry.bonuses,
            deductions = entry.deductions,
            "Adjustment applied"
        );
        Ok(entry)
    }

    /// Resets every employee's bonuses and deductions to zero.
    pub async fn clear_adjustments(&self) -> StoreResult<()> {
        self.store
            .mutate(|doc| {
                doc.clear_adjustments();
                Ok(())
            })
            .await?;

        info!("Roster adjustments cleared");
        Ok(())
    }
}
