//! Protobuf messages of the `fridgemanager` package.
//!
//! Derived directly with `prost` instead of generated by a build script, so
//! building needs no `protoc`. Field numbers follow the schema:
//!
//! ```text
//! message ProductProto {
//!   int32  id               = 1;
//!   string name             = 2;
//!   int32  current_quantity = 3;
//!   int32  norm_quantity    = 4;
//! }
//! message ProductListProto {
//!   repeated ProductProto products = 1;
//!   string timestamp               = 2;
//!   string version                 = 3;
//! }
//! message OrderProto {
//!   repeated ProductProto products_to_order = 1;
//!   string order_date                       = 2;
//!   string restaurant_name                  = 3;
//!   int32  total_packs                      = 4;
//! }
//! ```
//!
//! Integers are carried as `int64`. For non-negative values the varint bytes
//! are identical to `int32`, so files stay interchangeable.

use fridge_core::Product;

/// Format version written into every product list.
pub const FORMAT_VERSION: &str = "1.0";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProductProto {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int64, tag = "3")]
    pub current_quantity: i64,
    #[prost(int64, tag = "4")]
    pub norm_quantity: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProductListProto {
    #[prost(message, repeated, tag = "1")]
    pub products: Vec<ProductProto>,
    /// `YYYY-MM-DD HH:MM:SS`, local time.
    #[prost(string, tag = "2")]
    pub timestamp: String,
    #[prost(string, tag = "3")]
    pub version: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OrderProto {
    #[prost(message, repeated, tag = "1")]
    pub products_to_order: Vec<ProductProto>,
    /// `DD.MM.YYYY HH:MM`, local time.
    #[prost(string, tag = "2")]
    pub order_date: String,
    #[prost(string, tag = "3")]
    pub restaurant_name: String,
    #[prost(int64, tag = "4")]
    pub total_packs: i64,
}

impl From<&Product> for ProductProto {
    fn from(p: &Product) -> Self {
        ProductProto {
            id: p.id,
            name: p.name.clone(),
            current_quantity: p.current_quantity,
            norm_quantity: p.norm_quantity,
        }
    }
}

impl From<ProductProto> for Product {
    fn from(p: ProductProto) -> Self {
        Product::new(p.id, p.name, p.current_quantity, p.norm_quantity)
    }
}
