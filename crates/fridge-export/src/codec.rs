//! # Protobuf Codec
//!
//! Binary export and import of product lists and supplier orders.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  &[Product] ──► ProductListProto ──► bytes ──► products.pb             │
//! │                                                                         │
//! │  products.pb ──► bytes ──► ProductListProto ──► validate ──► Vec<Product>
//! │                                                                         │
//! │  &[Product] ──► filter needs_order ──► OrderProto ──► order.pb         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use fridge_core::validation::{validate_product_name, validate_quantity};
use fridge_core::{OrderReport, Product};
use prost::Message;
use tracing::{debug, info};

use crate::error::{ExportError, ExportResult};
use crate::proto::{OrderProto, ProductListProto, ProductProto, FORMAT_VERSION};

const LIST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ORDER_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Encodes and decodes the `fridgemanager` protobuf messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtobufCodec;

impl ProtobufCodec {
    pub fn new() -> Self {
        ProtobufCodec
    }

    // =========================================================================
    // Product lists
    // =========================================================================

    /// Encodes a product list stamped with `at`.
    pub fn encode_products(&self, products: &[Product], at: NaiveDateTime) -> Vec<u8> {
        let list = ProductListProto {
            products: products.iter().map(ProductProto::from).collect(),
            timestamp: at.format(LIST_TIMESTAMP_FORMAT).to_string(),
            version: FORMAT_VERSION.to_string(),
        };
        list.encode_to_vec()
    }

    /// Decodes a product list and checks every product.
    pub fn decode_products(&self, bytes: &[u8]) -> ExportResult<Vec<Product>> {
        let list = ProductListProto::decode(bytes)?;
        debug!(
            count = list.products.len(),
            version = %list.version,
            timestamp = %list.timestamp,
            "Decoded product list"
        );

        let mut seen = HashSet::with_capacity(list.products.len());
        list.products
            .into_iter()
            .map(|proto| {
                let product = Product::from(proto);
                check_product(&product)?;
                if !seen.insert(product.id) {
                    return Err(ExportError::InvalidProduct {
                        id: product.id,
                        reason: "duplicate id".into(),
                    });
                }
                Ok(product)
            })
            .collect()
    }

    /// Writes the product list to `path`, stamped with the current local time.
    pub fn export_products(&self, products: &[Product], path: &Path) -> ExportResult<()> {
        let bytes = self.encode_products(products, Local::now().naive_local());
        write_bytes(path, &bytes)?;
        info!(path = %path.display(), count = products.len(), "Exported products");
        Ok(())
    }

    /// Reads a product list from `path`.
    pub fn import_products(&self, path: &Path) -> ExportResult<Vec<Product>> {
        let bytes = read_bytes(path)?;
        let products = self.decode_products(&bytes)?;
        info!(path = %path.display(), count = products.len(), "Imported products");
        Ok(products)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Encodes the supplier order for a snapshot.
    ///
    /// Only products below their norm are included; `total_packs` matches
    /// [`OrderReport::total_packs`] for the same snapshot.
    pub fn encode_order(&self, products: &[Product], restaurant: &str, at: NaiveDateTime) -> Vec<u8> {
        let report = OrderReport::generate(products, restaurant, at);
        let order = OrderProto {
            products_to_order: products
                .iter()
                .filter(|p| p.needs_order())
                .map(ProductProto::from)
                .collect(),
            order_date: at.format(ORDER_DATE_FORMAT).to_string(),
            restaurant_name: report.restaurant,
            total_packs: report.total_packs,
        };
        order.encode_to_vec()
    }

    /// Decodes a supplier order.
    pub fn decode_order(&self, bytes: &[u8]) -> ExportResult<OrderProto> {
        Ok(OrderProto::decode(bytes)?)
    }

    /// Writes the supplier order to `path`, dated with the current local time.
    pub fn export_order(&self, products: &[Product], restaurant: &str, path: &Path) -> ExportResult<()> {
        let bytes = self.encode_order(products, restaurant, Local::now().naive_local());
        write_bytes(path, &bytes)?;
        info!(path = %path.display(), "Exported order");
        Ok(())
    }
}

fn check_product(product: &Product) -> ExportResult<()> {
    let invalid = |e: fridge_core::ValidationError| ExportError::InvalidProduct {
        id: product.id,
        reason: e.to_string(),
    };
    validate_product_name(&product.name).map_err(invalid)?;
    validate_quantity(product.current_quantity).map_err(invalid)?;
    validate_quantity(product.norm_quantity).map_err(invalid)?;
    Ok(())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::write(path, e))?;
    }
    fs::write(path, bytes).map_err(|e| ExportError::write(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

fn read_bytes(path: &Path) -> ExportResult<Vec<u8>> {
    let bytes = fs::read(path).map_err(|e| ExportError::read(path, e))?;
    if bytes.is_empty() {
        return Err(ExportError::EmptyPayload {
            path: path.to_path_buf(),
        });
    }
    Ok(bytes)
}

// =============================================================================
// Unit Tests
// =============================================================================
