//! # Salary History Repository
//!
//! CRUD over processed payroll runs.
//!
//! ## Id Assignment
//! New records get the highest existing id plus one (1 for an empty
//! history). Ids of deleted records at the top end may be reused.

use chrono::NaiveDate;
use oshud_core::{settle_run, PayrollRun, PayrollRunDraft, RunSettlement};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::SalaryStore;

const ENTITY: &str = "Salary record";

/// Repository for salary history records.
#[derive(Debug, Clone)]
pub struct SalaryHistoryRepository {
    store: SalaryStore,
}

impl SalaryHistoryRepository {
    /// Creates a new SalaryHistoryRepository.
    pub fn new(store: SalaryStore) -> Self {
        SalaryHistoryRepository { store }
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<PayrollRun> {
        let runs = self.store.read(|doc| doc.salaries.clone()).await;
        debug!(count = runs.len(), "Listed salary records");
        runs
    }

    /// Gets a record by id.
    pub async fn get_by_id(&self, id: u32) -> StoreResult<PayrollRun> {
        self.store
            .read(|doc| doc.salaries.iter().find(|run| run.id == id).cloned())
            .await
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    /// Stores a validated draft under a fresh id.
    pub async fn create(&self, draft: PayrollRunDraft) -> StoreResult<PayrollRun> {
        let run = self
            .store
            .mutate(|doc| {
                let run = draft.into_run(doc.next_salary_id());
                doc.salaries.push(run.clone());
                Ok(run)
            })
            .await?;

        info!(id = run.id, month = %run.month, "Salary record created");
        Ok(run)
    }

    /// Replaces the fields of an existing record, keeping its id.
    pub async fn update(&self, id: u32, draft: PayrollRunDraft) -> StoreResult<PayrollRun> {
        let run = self
            .store
            .mutate(|doc| {
                let slot = doc
                    .salaries
                    .iter_mut()
                    .find(|run| run.id == id)
                    .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
                *slot = draft.into_run(id);
                Ok(slot.clone())
            })
            .await?;

        info!(id, "Salary record updated");
        Ok(run)
    }

    /// Deletes a record.
    pub async fn delete(&self, id: u32) -> StoreResult<()> {
        self.store
            .mutate(|doc| {
                let before = doc.salaries.len();
                doc.salaries.retain(|run| run.id != id);
                if doc.salaries.len() == before {
                    return Err(StoreError::not_found(ENTITY, id));
                }
                Ok(())
            })
            .await?;

        info!(id, "Salary record deleted");
        Ok(())
    }

    /// Pays out the current roster: records the run and resets adjustments.
    ///
    /// Totals are taken from the roster held under the same write lock that
    /// clears it, so only adjustments that were paid get reset. Both changes
    /// land in a single write.
    ///
    /// ## Errors
    /// `StoreError::Core(CoreError::EmptyRoster)` when the roster is empty;
    /// nothing is written in that case.
    pub async fn record_run(
        &self,
        month: impl Into<String>,
        processed_date: NaiveDate,
    ) -> StoreResult<RunSettlement> {
        let month = month.into();
        let settlement = self
            .store
            .mutate(|doc| {
                let mut settlement =
                    settle_run(month, &doc.current_month_employees, processed_date)?;
                settlement.run.id = doc.next_salary_id();
                doc.salaries.push(settlement.run.clone());
                doc.clear_adjustments();
                Ok(settlement)
            })
            .await?;

        let run = &settlement.run;
        info!(
            id = run.id,
            month = %run.month,
            total = run.total_amount,
            employees = run.employee_count,
            "Payroll run recorded"
        );
        Ok(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SalaryDocument;
    use oshud_core::{AdjustmentKind, CoreError, RosterEntry};

    fn draft(month: &str, total: f64) -> PayrollRunDraft {
        PayrollRunDraft {
            month: month.to_string(),
            total_amount: total,
            employee_count: 2,
            processed_date: NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(),
        }
    }

    fn repo() -> SalaryHistoryRepository {
        SalaryStore::in_memory(SalaryDocument::default()).history()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = repo();

        let first = repo.create(draft("September 2023", 100.0)).await.unwrap();
        let second = repo.create(draft("October 2023", 200.0)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_id_follows_max_after_delete() {
        let repo = repo();
        for month in ["A", "B", "C"] {
            repo.create(draft(month, 1.0)).await.unwrap();
        }

        repo.delete(2).await.unwrap();
        let next = repo.create(draft("D", 1.0)).await.unwrap();

        assert_eq!(next.id, 4);
    }

    #[tokio::test]
    async fn test_get_update_delete_unknown_id() {
        let repo = repo();

        assert!(matches!(
            repo.get_by_id(5).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(repo.update(5, draft("X", 1.0)).await.is_err());
        assert!(repo.delete(5).await.is_err());
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let repo = repo();
        let created = repo.create(draft("October 2023", 100.0)).await.unwrap();

        let updated = repo
            .update(created.id, draft("October 2023 (fixed)", 150.0))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(repo.get_by_id(created.id).await.unwrap().total_amount, 150.0);
    }

    #[tokio::test]
    async fn test_record_run_clears_adjustments() {
        let store = SalaryStore::in_memory(SalaryDocument {
            salaries: Vec::new(),
            current_month_employees: vec![
                RosterEntry::new("e1", "Rahim", 120_000.0).with_adjustments(500.0, 200.0)
            ],
        });

        let date = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();
        let settlement = store.history().record_run("October 2023", date).await.unwrap();

        assert_eq!(settlement.run.id, 1);
        assert_eq!(settlement.run.total_amount, 10_300.0);
        let doc = store.snapshot().await;
        assert_eq!(doc.salaries.len(), 1);
        assert_eq!(doc.current_month_employees[0].bonuses, 0.0);
        assert_eq!(doc.current_month_employees[0].deductions, 0.0);
        assert_eq!(doc.current_month_employees[0].salary, 120_000.0);
    }

    #[tokio::test]
    async fn test_record_run_pays_adjustments_added_before_commit() {
        let store = SalaryStore::in_memory(SalaryDocument {
            salaries: Vec::new(),
            current_month_employees: vec![RosterEntry::new("e1", "Rahim", 120_000.0)],
        });

        let preview = store.roster().current_month_employees().await;
        assert_eq!(oshud_core::aggregate_run(&preview).total_final, 10_000.0);

        store
            .roster()
            .add_adjustment("e1", AdjustmentKind::Bonus, 750.0)
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();
        let settlement = store.history().record_run("October 2023", date).await.unwrap();

        assert_eq!(settlement.run.total_amount, 10_750.0);
        assert_eq!(settlement.payload.salaries[0].amount, 10_750.0);
        assert_eq!(store.snapshot().await.salaries[0].total_amount, 10_750.0);
    }

    #[tokio::test]
    async fn test_record_run_empty_roster_writes_nothing() {
        let store = SalaryStore::in_memory(SalaryDocument::default());
        let date = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();

        let err = store.history().record_run("October 2023", date).await.unwrap_err();

        assert!(matches!(err, StoreError::Core(CoreError::EmptyRoster)));
        assert!(store.snapshot().await.salaries.is_empty());
    }
}
