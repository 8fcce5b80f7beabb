//! Shop-side commands: `sell` prices a cart, `dashboard` totals exported
//! lists. Neither touches the salary store.

use std::path::Path;

use oshud_core::dashboard::{ExpenseRecord, SaleRecord, StockProduct};
use oshud_core::sale::{SaleCart, SaleRequest, SaleTotals};
use oshud_core::{summarize_dashboard, DashboardTotals};
use serde::Serialize;
use tracing::debug;

use super::read_json_list;
use crate::cli::SellArgs;
use crate::error::ApiError;
use crate::output::{amount, deduction, table, Render};

// =============================================================================
// Sell
// =============================================================================

/// A priced cart: the create-sale request plus its totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleQuote {
    pub request: SaleRequest,
    pub totals: SaleTotals,
}

/// Builds the cart from the command line and checks it out.
///
/// Each `--item` adds one unit and then sets the line to its quantity.
/// Quantities below 1 keep the current quantity and negative price
/// overrides are ignored, as on the sell screen. `--remove` drops lines
/// before checkout.
pub fn sell(args: &SellArgs) -> Result<SaleQuote, ApiError> {
    let mut cart = SaleCart::new();

    for item in &args.items {
        cart.add_product(&item.product);
        cart.update_quantity(&item.product.id, item.quantity);
    }
    for over in &args.prices {
        cart.update_manual_price(&over.product_id, over.price);
    }
    for product_id in &args.removed {
        cart.remove(product_id);
    }
    cart.set_discount(args.discount);

    let request = cart.checkout(&args.customer)?;
    let totals = SaleTotals::from(&cart);

    debug!(
        lines = totals.line_count,
        final_total = totals.final_total,
        "Sale priced"
    );
    Ok(SaleQuote { request, totals })
}

impl Render for SaleQuote {
    fn render(&self, symbol: &str) -> String {
        let rows: Vec<Vec<String>> = self
            .request
            .items
            .iter()
            .map(|item| {
                vec![
                    item.product_id.clone(),
                    item.quantity.to_string(),
                    amount(symbol, item.price),
                    amount(symbol, f64::from(item.quantity) * item.price),
                ]
            })
            .collect();

        [
            format!("Sale for {}", self.request.customer_name),
            String::new(),
            table(&["Product", "Qty", "Price", "Total"], &rows),
            String::new(),
            format!("Subtotal:  {}", amount(symbol, self.totals.subtotal)),
            format!("Discount:  {}", deduction(symbol, self.totals.discount)),
            format!("Total:     {}", amount(symbol, self.totals.final_total)),
        ]
        .join("\n")
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Totals stock, sales and expenses from JSON array files.
///
/// A list that is not given counts as empty.
pub async fn dashboard(
    products: Option<&Path>,
    sales: Option<&Path>,
    expenses: Option<&Path>,
) -> Result<DashboardTotals, ApiError> {
    let products: Vec<StockProduct> = read_json_list(products).await?;
    let sales: Vec<SaleRecord> = read_json_list(sales).await?;
    let expenses: Vec<ExpenseRecord> = read_json_list(expenses).await?;

    Ok(summarize_dashboard(&products, &sales, &expenses))
}

impl Render for DashboardTotals {
    fn render(&self, symbol: &str) -> String {
        [
            format!(
                "Stock value:  {} ({} products)",
                amount(symbol, self.total_products_value),
                self.product_count
            ),
            format!(
                "Sales:        {} ({} sales)",
                amount(symbol, self.total_sales_value),
                self.sale_count
            ),
            format!(
                "Expenses:     {} ({} expenses)",
                amount(symbol, self.total_expenses_value),
                self.expense_count
            ),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::error::ErrorCode;
    use clap::Parser;

    fn sell_args(argv: &[&str]) -> SellArgs {
        let mut full = vec!["oshud", "sell"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Sell(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_sell_prices_cart() {
        let args = sell_args(&[
            "--customer", " Karim ", "--item", "p1:Napa:2.5:4", "--item", "p2:Seclo:8",
            "--price", "p2=7", "--discount", "3",
        ]);
        let quote = sell(&args).unwrap();

        assert_eq!(quote.request.customer_name, "Karim");
        assert_eq!(quote.request.items[1].price, 7.0);
        assert_eq!(quote.totals.subtotal, 17.0);
        assert_eq!(quote.totals.final_total, 14.0);

        let text = quote.render("৳");
        assert!(text.contains("Total:     ৳14"));
    }

    #[test]
    fn test_sell_ignores_bad_quantity_and_price() {
        let args = sell_args(&[
            "--customer", "Rina", "--item", "p1:Napa:5:0", "--price", "p1=-2",
        ]);
        let quote = sell(&args).unwrap();

        assert_eq!(quote.request.items[0].quantity, 1);
        assert_eq!(quote.request.items[0].price, 5.0);
    }

    #[test]
    fn test_sell_remove_line() {
        let args = sell_args(&[
            "--customer", "Rina", "--item", "p1:Napa:5", "--item", "p2:Ace:3", "--remove", "p1",
        ]);
        let quote = sell(&args).unwrap();

        assert_eq!(quote.request.items.len(), 1);
        assert_eq!(quote.request.items[0].product_id, "p2");
        assert_eq!(quote.totals.final_total, 3.0);
    }

    #[test]
    fn test_sell_rejects_empty_cart_and_blank_customer() {
        let err = sell(&sell_args(&["--customer", "Rina"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cart is empty");

        let err = sell(&sell_args(&["--item", "p1:Napa:5"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_dashboard_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let products = dir.path().join("products.json");
        let expenses = dir.path().join("expenses.json");
        std::fs::write(
            &products,
            r#"[{ "name": "Napa", "price": 2.5, "quantity": 100 }, { "name": "Ace", "price": "x" }]"#,
        )
        .unwrap();
        std::fs::write(&expenses, r#"[{ "purpose": "Rent", "amount": 15000 }]"#).unwrap();

        let totals = dashboard(Some(products.as_path()), None, Some(expenses.as_path())).await.unwrap();

        assert_eq!(totals.total_products_value, 250.0);
        assert_eq!(totals.product_count, 2);
        assert_eq!(totals.total_sales_value, 0.0);
        assert_eq!(totals.total_expenses_value, 15_000.0);

        assert!(totals.render("৳").contains("Expenses:     ৳15,000"));
    }
}
