//! # Sell Cart
//!
//! The counter-sale cart: catalog products in, a sale request out.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sell Cart Operations                                 │
//! │                                                                         │
//! │  Pick product ──────────► add_product() ────────► push or qty += 1     │
//! │  Change quantity ───────► update_quantity() ────► ignored if < 1       │
//! │  Override price ────────► update_manual_price() ► ignored if < 0       │
//! │  Remove ────────────────► remove()                                     │
//! │  Enter discount ────────► set_discount()                               │
//! │                                                                         │
//! │  subtotal    = Σ quantity × manual_price                               │
//! │  final_total = subtotal - discount                                     │
//! │                                                                         │
//! │  Sell ──────────────────► checkout(customer) ───► SaleRequest          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::payroll::{to_safe_number, NumericInput};
use crate::types::lenient;
use crate::validation::validate_customer_name;

/// A product as listed by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogProduct {
    #[serde(default, alias = "_id", deserialize_with = "lenient::text")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    /// List price per unit.
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,
}

/// One line in the cart.
///
/// `price` is the list price when added; `manual_price` is what the
/// customer is actually charged and starts out equal to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
    pub manual_price: f64,
}

impl SaleLine {
    fn from_product(product: &CatalogProduct) -> Self {
        let price = to_safe_number(product.price);
        SaleLine {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity: 1,
            price,
            manual_price: price,
        }
    }

    /// quantity × manual price.
    pub fn total(&self) -> f64 {
        f64::from(self.quantity) * self.manual_price
    }
}

/// The sell screen cart.
///
/// ## Invariants
/// - Lines are unique by `product_id`
/// - Quantity is always >= 1
/// - Manual price is always >= 0 and finite
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleCart {
    pub lines: Vec<SaleLine>,
    pub discount: f64,
}

impl SaleCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of a product, or bumps the quantity if it is already in.
    pub fn add_product(&mut self, product: &CatalogProduct) {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }

        self.lines.push(SaleLine::from_product(product));
    }

    /// Sets a line's quantity. Values below 1 are ignored.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity < 1 {
            return;
        }

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Overrides a line's charged price. Negative or invalid values are ignored.
    pub fn update_manual_price(&mut self, product_id: &str, price: impl NumericInput) {
        let Some(price) = price.coerce().filter(|p| p.is_finite() && *p >= 0.0) else {
            return;
        };

        if let Some(line) = self.line_mut(product_id) {
            line.manual_price = price;
        }
    }

    /// Removes a line. Unknown ids are a no-op.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Sets the discount; invalid input counts as no discount.
    pub fn set_discount(&mut self, discount: impl NumericInput) {
        self.discount = to_safe_number(discount);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(SaleLine::total).sum()
    }

    pub fn final_total(&self) -> f64 {
        self.subtotal() - self.discount
    }

    /// Builds the sale request for the sales API.
    ///
    /// ## Errors
    /// - `Validation` when the customer name is blank
    /// - `EmptyCart` when there are no lines
    pub fn checkout(&self, customer_name: &str) -> CoreResult<SaleRequest> {
        let customer_name = validate_customer_name(customer_name)?;

        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(SaleRequest {
            customer_name,
            items: self
                .lines
                .iter()
                .map(|line| SaleRequestItem {
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                    price: line.manual_price,
                })
                .collect(),
            discount: self.discount,
        })
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut SaleLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

/// Body of a create-sale request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleRequest {
    pub customer_name: String,
    pub items: Vec<SaleRequestItem>,
    pub discount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleRequestItem {
    pub product_id: String,
    pub quantity: u32,
    /// The manual (charged) price, not the list price.
    pub price: f64,
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleTotals {
    pub line_count: usize,
    pub subtotal: f64,
    pub discount: f64,
    pub final_total: f64,
}

impl From<&SaleCart> for SaleTotals {
    fn from(cart: &SaleCart) -> Self {
        SaleTotals {
            line_count: cart.lines.len(),
            subtotal: cart.subtotal(),
            discount: cart.discount,
            final_total: cart.final_total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(id: &str, price: f64) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            name: format!("Product {}", id),
            price,
        }
    }

    #[test]
    fn test_add_product() {
        let mut cart = SaleCart::new();
        cart.add_product(&product("p1", 25.0));

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 1);
        assert_eq!(cart.lines[0].manual_price, 25.0);
        assert_eq!(cart.subtotal(), 25.0);
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = SaleCart::new();
        let p = product("p1", 25.0);

        cart.add_product(&p);
        cart.add_product(&p);

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.subtotal(), 50.0);
    }

    #[test]
    fn test_update_quantity_ignores_below_one() {
        let mut cart = SaleCart::new();
        cart.add_product(&product("p1", 10.0));

        cart.update_quantity("p1", 4);
        assert_eq!(cart.lines[0].quantity, 4);

        cart.update_quantity("p1", 0);
        cart.update_quantity("p1", -3);
        assert_eq!(cart.lines[0].quantity, 4);
    }

    #[test]
    fn test_manual_price_drives_totals() {
        let mut cart = SaleCart::new();
        cart.add_product(&product("p1", 10.0));
        cart.add_product(&product("p2", 5.0));
        cart.update_quantity("p1", 3);

        cart.update_manual_price("p1", 8.0);
        cart.update_manual_price("p2", -1.0);
        cart.update_manual_price("p2", "abc");
        cart.set_discount("4");

        assert_eq!(cart.lines[0].price, 10.0);
        assert_eq!(cart.lines[1].manual_price, 5.0);
        assert_eq!(cart.subtotal(), 29.0);
        assert_eq!(cart.final_total(), 25.0);

        let totals = SaleTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.final_total, 25.0);
    }

    #[test]
    fn test_remove() {
        let mut cart = SaleCart::new();
        cart.add_product(&product("p1", 10.0));
        cart.remove("missing");
        assert_eq!(cart.lines.len(), 1);
        cart.remove("p1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_requires_customer_and_lines() {
        let mut cart = SaleCart::new();

        let err = cart.checkout("Karim").unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));

        cart.add_product(&product("p1", 10.0));
        let err = cart.checkout("   ").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_checkout_payload_uses_manual_price() {
        let mut cart = SaleCart::new();
        cart.add_product(&product("p1", 10.0));
        cart.update_quantity("p1", 2);
        cart.update_manual_price("p1", 9.5);
        cart.set_discount(1.0);

        let request = cart.checkout(" Karim ").unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "customerName": "Karim",
                "items": [{ "productId": "p1", "quantity": 2, "price": 9.5 }],
                "discount": 1.0
            })
        );
    }

    #[test]
    fn test_catalog_product_decodes_loose_record() {
        let p: CatalogProduct =
            serde_json::from_value(json!({ "_id": "x9", "name": "Napa", "price": "2.5" }))
                .unwrap();
        assert_eq!(p.id, "x9");
        assert_eq!(p.price, 2.5);
    }
}
