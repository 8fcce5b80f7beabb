//! Salary history commands: list, show, add, edit, delete.

use oshud_core::validation::validate_salary_record;
use oshud_core::{PayrollRun, SalaryRecordForm};
use serde::Serialize;

use super::AppContext;
use crate::cli::RecordArgs;
use crate::error::ApiError;
use crate::output::{amount, table, Render};

impl From<RecordArgs> for SalaryRecordForm {
    fn from(args: RecordArgs) -> Self {
        SalaryRecordForm {
            month: args.month,
            total_amount: args.total,
            employee_count: args.count,
            processed_date: args.date.unwrap_or_default(),
        }
    }
}

/// The full history, oldest first.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct HistoryView(pub Vec<PayrollRun>);

/// Confirmation for `history delete`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub id: u32,
    pub deleted: bool,
}

pub async fn list(ctx: &AppContext) -> HistoryView {
    HistoryView(ctx.store.history().list().await)
}

pub async fn show(ctx: &AppContext, id: u32) -> Result<PayrollRun, ApiError> {
    Ok(ctx.store.history().get_by_id(id).await?)
}

pub async fn add(ctx: &AppContext, record: RecordArgs) -> Result<PayrollRun, ApiError> {
    let draft = validate_salary_record(&record.into(), ctx.today)?;
    Ok(ctx.store.history().create(draft).await?)
}

pub async fn edit(ctx: &AppContext, id: u32, record: RecordArgs) -> Result<PayrollRun, ApiError> {
    let draft = validate_salary_record(&record.into(), ctx.today)?;
    Ok(ctx.store.history().update(id, draft).await?)
}

pub async fn delete(ctx: &AppContext, id: u32) -> Result<Deleted, ApiError> {
    ctx.store.history().delete(id).await?;
    Ok(Deleted { id, deleted: true })
}

impl Render for HistoryView {
    fn render(&self, symbol: &str) -> String {
        if self.0.is_empty() {
            return "No salary records.".to_string();
        }

        let rows: Vec<Vec<String>> = self
            .0
            .iter()
            .map(|run| {
                vec![
                    run.id.to_string(),
                    run.month.clone(),
                    amount(symbol, run.total_amount),
                    run.employee_count.to_string(),
                    run.processed_date_label(),
                ]
            })
            .collect();

        table(&["ID", "Month", "Total", "Employees", "Processed"], &rows)
    }
}

impl Render for PayrollRun {
    fn render(&self, symbol: &str) -> String {
        [
            format!("Salary record #{}", self.id),
            format!("Month:      {}", self.month),
            format!("Total:      {}", amount(symbol, self.total_amount)),
            format!("Employees:  {}", self.employee_count),
            format!("Processed:  {}", self.processed_date_label()),
        ]
        .join("\n")
    }
}

impl Render for Deleted {
    fn render(&self, _symbol: &str) -> String {
        format!("Salary record #{} deleted", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;

    fn record(month: &str, total: &str, count: &str, date: Option<&str>) -> RecordArgs {
        RecordArgs {
            month: month.to_string(),
            total: total.to_string(),
            count: count.to_string(),
            date: date.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_add_show_edit_delete() {
        let ctx = context();

        let created = add(&ctx, record("October 2023", "45000", "3", None)).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.processed_date, Some(ctx.today));

        let edited = edit(&ctx, 1, record("October 2023", "46000", "3", Some("2023-11-01")))
            .await
            .unwrap();
        assert_eq!(edited.total_amount, 46_000.0);
        assert_eq!(edited.processed_date, NaiveDate::from_ymd_opt(2023, 11, 1));

        let shown = show(&ctx, 1).await.unwrap();
        assert_eq!(shown, edited);
        assert!(shown.render("৳").contains("৳46,000"));

        delete(&ctx, 1).await.unwrap();
        assert!(list(&ctx).await.0.is_empty());
    }

    #[tokio::test]
    async fn test_add_invalid_record() {
        let err = add(&context(), record("", "0", "x", None)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("month is required"));
        assert!(err.message.contains("totalAmount must be positive"));
    }

    #[tokio::test]
    async fn test_missing_record() {
        let err = show(&context(), 42).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Salary record not found: 42");
    }

    #[test]
    fn test_list_render_shows_na_for_missing_date() {
        let view = HistoryView(vec![PayrollRun {
            id: 1,
            month: "May 2024".to_string(),
            total_amount: 1_000.0,
            employee_count: 1,
            processed_date: None,
        }]);
        let text = view.render("৳");
        assert!(text.contains("N/A"));
        assert!(text.contains("৳1,000"));
    }
}
