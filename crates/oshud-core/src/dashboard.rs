//! # Dashboard Module
//!
//! Store-wide totals for the dashboard report: stock value, sales and
//! expenses. Records come from the same loosely typed API as the roster, so
//! every numeric field goes through [`to_safe_number`] and a bad value
//! counts as `0` instead of poisoning the sum.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products ──► Σ price × quantity ──► total_products_value               │
//! │  sales    ──► Σ final_amount     ──► total_sales_value                  │
//! │  expenses ──► Σ amount           ──► total_expenses_value               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::payroll::to_safe_number;
use crate::types::lenient;

// =============================================================================
// Records
// =============================================================================

/// A product row from the inventory list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockProduct {
    #[serde(default, alias = "_id", deserialize_with = "lenient::text")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    /// Unit price.
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,

    /// Units in stock.
    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: f64,
}

impl StockProduct {
    /// Stock value of this row; `0` when either factor is unusable.
    pub fn stock_value(&self) -> f64 {
        to_safe_number(to_safe_number(self.price) * to_safe_number(self.quantity))
    }
}

/// A completed sale as listed on the sales screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleRecord {
    #[serde(default, alias = "_id", deserialize_with = "lenient::text")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub customer_name: String,

    /// Amount charged after discount.
    #[serde(default, deserialize_with = "lenient::number")]
    pub final_amount: f64,
}

/// A shop expense.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseRecord {
    #[serde(default, alias = "_id", deserialize_with = "lenient::text")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub purpose: String,

    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
}

// =============================================================================
// Totals
// =============================================================================

/// Summary block of the dashboard report.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardTotals {
    pub total_products_value: f64,
    pub total_sales_value: f64,
    pub total_expenses_value: f64,
    pub product_count: usize,
    pub sale_count: usize,
    pub expense_count: usize,
}

/// Totals all three lists, one pass each. Empty lists give zeros.
///
/// ## Example
/// ```rust
/// use oshud_core::dashboard::{summarize_dashboard, ExpenseRecord, StockProduct};
///
/// let products = vec![StockProduct { price: 12.5, quantity: 4.0, ..Default::default() }];
/// let expenses = vec![ExpenseRecord { amount: 300.0, ..Default::default() }];
///
/// let totals = summarize_dashboard(&products, &[], &expenses);
/// assert_eq!(totals.total_products_value, 50.0);
/// assert_eq!(totals.total_sales_value, 0.0);
/// assert_eq!(totals.total_expenses_value, 300.0);
/// ```
pub fn summarize_dashboard(
    products: &[StockProduct],
    sales: &[SaleRecord],
    expenses: &[ExpenseRecord],
) -> DashboardTotals {
    DashboardTotals {
        total_products_value: products.iter().map(StockProduct::stock_value).sum(),
        total_sales_value: sales.iter().map(|s| to_safe_number(s.final_amount)).sum(),
        total_expenses_value: total_expenses(expenses),
        product_count: products.len(),
        sale_count: sales.len(),
        expense_count: expenses.len(),
    }
}

/// Sum of expense amounts, as shown under the expenses list.
pub fn total_expenses(expenses: &[ExpenseRecord]) -> f64 {
    expenses.iter().map(|e| to_safe_number(e.amount)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_lists() {
        assert_eq!(summarize_dashboard(&[], &[], &[]), DashboardTotals::default());
        assert_eq!(total_expenses(&[]), 0.0);
    }

    #[test]
    fn test_totals() {
        let products = vec![
            StockProduct { price: 10.0, quantity: 3.0, ..Default::default() },
            StockProduct { price: 2.5, quantity: 4.0, ..Default::default() },
        ];
        let sales = vec![
            SaleRecord { final_amount: 450.0, ..Default::default() },
            SaleRecord { final_amount: 50.0, ..Default::default() },
        ];
        let expenses = vec![ExpenseRecord { amount: 120.0, ..Default::default() }];

        let totals = summarize_dashboard(&products, &sales, &expenses);

        assert_eq!(totals.total_products_value, 40.0);
        assert_eq!(totals.total_sales_value, 500.0);
        assert_eq!(totals.total_expenses_value, 120.0);
        assert_eq!(totals.product_count, 2);
        assert_eq!(totals.sale_count, 2);
        assert_eq!(totals.expense_count, 1);
    }

    #[test]
    fn test_invalid_fields_count_as_zero() {
        let products: Vec<StockProduct> = serde_json::from_value(json!([
            { "_id": "p1", "name": "Napa", "price": "abc", "quantity": 10 },
            { "_id": "p2", "name": "Seclo", "price": 8, "quantity": null },
            { "_id": "p3", "name": "Ace", "price": "5", "quantity": "2" }
        ]))
        .unwrap();
        let sales: Vec<SaleRecord> = serde_json::from_value(json!([
            { "customerName": "Karim", "finalAmount": {} },
            { "customerName": "Rina", "finalAmount": 75 }
        ]))
        .unwrap();
        let expenses: Vec<ExpenseRecord> = serde_json::from_value(json!([
            { "purpose": "Rent" },
            { "purpose": "Power", "amount": "1200" }
        ]))
        .unwrap();

        let totals = summarize_dashboard(&products, &sales, &expenses);

        assert_eq!(totals.total_products_value, 10.0);
        assert_eq!(totals.total_sales_value, 75.0);
        assert_eq!(totals.total_expenses_value, 1200.0);
        assert_eq!(products[0].id, "p1");
    }

    #[test]
    fn test_overflowing_stock_value_is_zero() {
        let product = StockProduct { price: f64::MAX, quantity: 10.0, ..Default::default() };
        assert_eq!(product.stock_value(), 0.0);
    }
}
