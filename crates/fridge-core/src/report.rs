//! # Supplier Order Report
//!
//! Pure function from an inventory snapshot to a supplier order.
//!
//! ## Report Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SUPPLIER ORDER                                                         │
//! │  =====================                                                  │
//! │  Restaurant: 'Gourmet'                                                  │
//! │  Date: 18.10.2026 14:30                                                 │
//! │  =====================                                                  │
//! │                                                                         │
//! │  PRODUCTS TO ORDER:            ◄── one line per product below its norm  │
//! │  -------------------                                                    │
//! │  Milk: 2 packs                                                          │
//! │                                                                         │
//! │  -------------------                                                    │
//! │  TOTAL: 2 packs                ◄── omitted when nothing is short        │
//! │                                                                         │
//! │  CURRENT STOCK:                ◄── every product                        │
//! │  -------------------                                                    │
//! │  Milk: 18 / 20 (NEED 2)                                                 │
//! │  Eggs: 30 / 30                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Same snapshot and timestamp always render the same text. Persisting the
//! text is the caller's job (see `fridge_export::report_file`).

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::types::Product;

/// Line printed instead of an empty order section.
pub const SUFFICIENT_STOCK_LINE: &str = "All products are sufficiently stocked.";

const RULE: &str = "=====================";
const THIN_RULE: &str = "-------------------";

// =============================================================================
// Lines
// =============================================================================

/// One product to order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub product_id: i64,
    pub name: String,
    pub packs: i64,
}

impl fmt::Display for OrderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} packs", self.name, self.packs)
    }
}

/// Stock level of one product at report time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLine {
    pub name: String,
    pub current_quantity: i64,
    pub norm_quantity: i64,
    /// Shortfall, `None` when the product is at or above its norm.
    pub need: Option<i64>,
}

impl fmt::Display for StockLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} / {}",
            self.name, self.current_quantity, self.norm_quantity
        )?;
        if let Some(need) = self.need {
            write!(f, " (NEED {})", need)?;
        }
        Ok(())
    }
}

// =============================================================================
// Order Report
// =============================================================================

/// A generated supplier order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReport {
    pub restaurant: String,
    pub generated_at: NaiveDateTime,
    /// Products below their norm, in snapshot order.
    pub lines: Vec<OrderLine>,
    /// Every product, in snapshot order.
    pub stock: Vec<StockLine>,
    /// Sum of all order quantities.
    pub total_packs: i64,
}

impl OrderReport {
    /// Derives the order from a snapshot.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use fridge_core::{OrderReport, Product};
    ///
    /// let at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let report = OrderReport::generate(&[Product::new(1, "Eggs", 30, 30)], "Gourmet", at);
    /// assert!(!report.has_orders());
    /// ```
    pub fn generate(products: &[Product], restaurant: &str, generated_at: NaiveDateTime) -> Self {
        let lines: Vec<OrderLine> = products
            .iter()
            .filter(|p| p.needs_order())
            .map(|p| OrderLine {
                product_id: p.id,
                name: p.name.clone(),
                packs: p.order_quantity(),
            })
            .collect();

        let stock = products
            .iter()
            .map(|p| StockLine {
                name: p.name.clone(),
                current_quantity: p.current_quantity,
                norm_quantity: p.norm_quantity,
                need: p.needs_order().then(|| p.order_quantity()),
            })
            .collect();

        let total_packs = lines.iter().map(|l| l.packs).sum();

        OrderReport {
            restaurant: restaurant.to_string(),
            generated_at,
            lines,
            stock,
            total_packs,
        }
    }

    /// True when at least one product is below its norm.
    pub fn has_orders(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Renders the report text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OrderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SUPPLIER ORDER")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Restaurant: '{}'", self.restaurant)?;
        writeln!(f, "Date: {}", self.generated_at.format("%d.%m.%Y %H:%M"))?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;

        writeln!(f, "PRODUCTS TO ORDER:")?;
        writeln!(f, "{THIN_RULE}")?;
        if self.has_orders() {
            for line in &self.lines {
                writeln!(f, "{line}")?;
            }
            writeln!(f)?;
            writeln!(f, "{THIN_RULE}")?;
            writeln!(f, "TOTAL: {} packs", self.total_packs)?;
        } else {
            writeln!(f, "{SUFFICIENT_STOCK_LINE}")?;
        }
        writeln!(f)?;

        writeln!(f, "CURRENT STOCK:")?;
        writeln!(f, "{THIN_RULE}")?;
        for line in &self.stock {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_milk_and_eggs() {
        let products = vec![Product::new(1, "Milk", 18, 20), Product::new(2, "Eggs", 30, 30)];
        let report = OrderReport::generate(&products, "Gourmet", at());

        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].to_string(), "Milk: 2 packs");
        assert_eq!(report.total_packs, 2);

        assert_eq!(report.stock[0].to_string(), "Milk: 18 / 20 (NEED 2)");
        assert_eq!(report.stock[1].to_string(), "Eggs: 30 / 30");
    }

    #[test]
    fn test_rendered_text() {
        let products = vec![Product::new(1, "Milk", 18, 20), Product::new(2, "Eggs", 30, 30)];
        let text = OrderReport::generate(&products, "Gourmet", at()).render();

        let expected = "\
SUPPLIER ORDER
=====================
Restaurant: 'Gourmet'
Date: 18.10.2026 14:30
=====================

PRODUCTS TO ORDER:
-------------------
Milk: 2 packs

-------------------
TOTAL: 2 packs

CURRENT STOCK:
-------------------
Milk: 18 / 20 (NEED 2)
Eggs: 30 / 30
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_sufficient_stock_replaces_empty_section() {
        let products = vec![Product::new(2, "Eggs", 30, 30), Product::new(3, "Cheese", 20, 15)];
        let report = OrderReport::generate(&products, "Gourmet", at());
        let text = report.render();

        assert!(!report.has_orders());
        assert_eq!(report.total_packs, 0);
        assert!(text.contains(SUFFICIENT_STOCK_LINE));
        assert!(!text.contains("TOTAL:"));
        assert!(text.contains("Cheese: 20 / 15\n"));
    }

    #[test]
    fn test_seed_data_total() {
        let report = OrderReport::generate(&seed::default_products(), "Gourmet", at());
        // 5 + 3 + 2 + 5 + 5
        assert_eq!(report.total_packs, 20);
        assert_eq!(report.lines.len(), 5);
    }

    #[test]
    fn test_deterministic() {
        let products = seed::default_products();
        let a = OrderReport::generate(&products, "Gourmet", at()).render();
        let b = OrderReport::generate(&products, "Gourmet", at()).render();
        assert_eq!(a, b);
    }
}
