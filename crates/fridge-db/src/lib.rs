//! # fridge-db: Database Layer for Fridge Manager
//!
//! This crate provides database access for the inventory tracker: it finds a
//! working connection among several profiles and runs the product queries.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Fridge Manager Data Flow                           │
//! │                                                                         │
//! │  CLI startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     fridge-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Resolver    │    │   Database    │    │ Repositories │  │   │
//! │  │   │ (resolver.rs) │───►│   (pool.rs)   │◄───│ (product.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ peer → tcp →  │    │ AnyPool       │    │ list_all     │  │   │
//! │  │   │ socket        │    │ probe / close │    │ inc / dec    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 PostgreSQL  (database "fridgemanager")          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`profile`] - Connection profiles (peer / password / socket)
//! - [`resolver`] - Ordered connection fallback with liveness probing
//! - [`pool`] - The owned database handle
//! - [`repository`] - Product queries
//! - [`schema`] - `products` table bootstrap
//! - [`error`] - Database and resolution error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fridge_db::{ConnectionProfile, ConnectionResolver, PgConnector, Resolution};
//!
//! let resolver = ConnectionResolver::new(PgConnector, ConnectionProfile::defaults());
//! match resolver.resolve().await {
//!     Resolution::Live(live) => {
//!         let products = live.database.products().list_all().await?;
//!     }
//!     Resolution::LiveNoSchema(live) => live.database.close().await,
//!     Resolution::Failed(reason) => eprintln!("local mode: {reason}"),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod profile;
pub mod repository;
pub mod resolver;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{AttemptFailure, DbError, DbResult, ResolveError};
pub use pool::Database;
pub use profile::{AuthMode, ConnectionProfile};
pub use resolver::{ConnectionResolver, Connector, LiveConnection, PgConnector, Resolution};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
