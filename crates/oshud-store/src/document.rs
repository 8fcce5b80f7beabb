//! The on-disk payroll document.

use oshud_core::{PayrollRun, RosterEntry};
use serde::{Deserialize, Serialize};

/// Everything the store persists, in one JSON object.
///
/// ```json
/// { "salaries": [ ... ], "currentMonthEmployees": [ ... ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryDocument {
    /// Processed payroll runs, in insertion order.
    #[serde(default)]
    pub salaries: Vec<PayrollRun>,

    /// Roster for the period being prepared.
    #[serde(default)]
    pub current_month_employees: Vec<RosterEntry>,
}

impl SalaryDocument {
    /// Next history id: highest existing id plus one, or 1 when empty.
    pub fn next_salary_id(&self) -> u32 {
        self.salaries
            .iter()
            .map(|run| run.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Resets every roster entry's bonuses and deductions to zero.
    pub(crate) fn clear_adjustments(&mut self) {
        for entry in self.current_month_employees.iter_mut() {
            *entry = entry.without_adjustments();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_sections_default_to_empty() {
        let doc: SalaryDocument = serde_json::from_value(json!({})).unwrap();
        assert!(doc.salaries.is_empty());
        assert!(doc.current_month_employees.is_empty());
        assert_eq!(doc.next_salary_id(), 1);
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        let doc: SalaryDocument = serde_json::from_value(json!({
            "salaries": [
                { "id": 1, "month": "A", "totalAmount": 1, "employeeCount": 1 },
                { "id": 9, "month": "B", "totalAmount": 1, "employeeCount": 1 }
            ],
            "currentMonthEmployees": [
                { "_id": "e1", "name": "Rahim", "basicSalary": 120000 }
            ]
        }))
        .unwrap();

        assert_eq!(doc.next_salary_id(), 10);
        assert_eq!(doc.current_month_employees[0].salary, 120_000.0);
    }
}
