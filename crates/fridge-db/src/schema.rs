//! # Schema Bootstrap
//!
//! Creates the `products` table on an empty database and fills it with the
//! default products.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  seed binary / missing_schema = "bootstrap"                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ensure_schema()  ── CREATE TABLE IF NOT EXISTS products (...)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  seed_defaults()  ── only when the table is empty                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is bootstrap only. Existing tables are never altered.

use tracing::info;

use crate::error::DbResult;
use crate::pool::{Backend, Database};
use fridge_core::seed;

const POSTGRES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    current_quantity BIGINT NOT NULL CHECK (current_quantity >= 0),
    norm_quantity BIGINT NOT NULL CHECK (norm_quantity >= 0)
)
"#;

// INTEGER PRIMARY KEY aliases the rowid, which gives auto-assigned ids.
const SQLITE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    current_quantity INTEGER NOT NULL CHECK (current_quantity >= 0),
    norm_quantity INTEGER NOT NULL CHECK (norm_quantity >= 0)
)
"#;

/// Creates the `products` table if it does not exist.
pub async fn ensure_schema(db: &Database) -> DbResult<()> {
    let ddl = match db.backend() {
        Backend::Postgres => POSTGRES_DDL,
        Backend::Sqlite => SQLITE_DDL,
    };
    sqlx::query(ddl).execute(db.pool()).await?;
    Ok(())
}

/// Inserts the default products when the table is empty.
///
/// ## Returns
/// Number of rows inserted (0 when the table already had data).
pub async fn seed_defaults(db: &Database) -> DbResult<usize> {
    let repo = db.products();
    if repo.count().await? > 0 {
        info!("products table already populated, skipping seed");
        return Ok(0);
    }

    let defaults = seed::default_new_products();
    for product in &defaults {
        repo.insert(product).await?;
    }

    info!(count = defaults.len(), "Seeded default products");
    Ok(defaults.len())
}

/// Creates the table and seeds it.
pub async fn bootstrap(db: &Database) -> DbResult<usize> {
    ensure_schema(db).await?;
    seed_defaults(db).await
}

// =============================================================================
// Unit Tests
// =============================================================================
