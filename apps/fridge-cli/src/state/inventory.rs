//! # Inventory State
//!
//! The product source every command talks to: a live database or the
//! in-memory seed list.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Startup Decision                                     │
//! │                                                                         │
//! │  --offline? ──yes──────────────────────────────────► Local             │
//! │      │ no                                                               │
//! │      ▼                                                                  │
//! │  ConnectionResolver::resolve()                                         │
//! │      ├── Live          ─────────────────────────────► Live             │
//! │      ├── LiveNoSchema  ── policy "local"     ── close ► Local          │
//! │      │                 └─ policy "bootstrap" ── create + seed ► Live   │
//! │      └── Failed        ── log reason ─────────────────► Local          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed resolution is never an error for the user: the app keeps
//! working on seed data and says so in its status line.

use std::future::Future;

use fridge_core::{CoreResult, InventoryStore, LocalInventory, Product};
use fridge_db::schema;
use fridge_db::{
    ConnectionResolver, Connector, Database, LiveConnection, PgConnector, ProductRepository,
    Resolution,
};
use tracing::{info, warn};

use super::config::{AppConfig, MissingSchemaPolicy};

/// Status line shown while running on seed data.
pub const LOCAL_STATUS: &str = "Local mode (PostgreSQL unavailable)";

/// Where products currently come from.
#[derive(Debug)]
pub enum InventoryState {
    /// Backed by a database handle.
    Live {
        repo: ProductRepository,
        database: Database,
        profile: String,
    },
    /// Seed data held in memory for this process only.
    Local(LocalInventory),
}

impl InventoryState {
    /// Resolves a connection with the configured profiles.
    pub async fn connect(config: &AppConfig) -> Self {
        if config.offline {
            info!("Offline mode requested, using seed data");
            return InventoryState::local();
        }
        Self::connect_with(PgConnector, config).await
    }

    /// Same as [`connect`](Self::connect) with a custom connector.
    pub async fn connect_with<C: Connector>(connector: C, config: &AppConfig) -> Self {
        let resolver = ConnectionResolver::new(connector, config.profiles());
        Self::from_resolution(resolver.resolve().await, config.database.missing_schema).await
    }

    /// Applies the startup policy to a resolution outcome.
    pub async fn from_resolution(resolution: Resolution, policy: MissingSchemaPolicy) -> Self {
        match resolution {
            Resolution::Live(live) => InventoryState::live(live),
            Resolution::LiveNoSchema(live) => match policy {
                MissingSchemaPolicy::Local => {
                    warn!(profile = %live.profile.name, "products table missing, using seed data");
                    live.database.close().await;
                    InventoryState::local()
                }
                MissingSchemaPolicy::Bootstrap => match schema::bootstrap(&live.database).await {
                    Ok(inserted) => {
                        info!(profile = %live.profile.name, inserted, "Created products table");
                        InventoryState::live(live)
                    }
                    Err(e) => {
                        warn!(profile = %live.profile.name, error = %e, "Schema bootstrap failed, using seed data");
                        live.database.close().await;
                        InventoryState::local()
                    }
                },
            },
            Resolution::Failed(reason) => {
                warn!(%reason, "No database available, using seed data");
                InventoryState::local()
            }
        }
    }

    /// Local mode over the five default products.
    pub fn local() -> Self {
        InventoryState::Local(LocalInventory::seeded())
    }

    fn live(live: LiveConnection) -> Self {
        InventoryState::Live {
            repo: live.database.products(),
            database: live.database,
            profile: live.profile.name,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, InventoryState::Live { .. })
    }

    /// Human-readable source description.
    pub fn status(&self) -> String {
        match self {
            InventoryState::Live { profile, .. } => {
                format!("PostgreSQL connected (profile '{profile}')")
            }
            InventoryState::Local(_) => LOCAL_STATUS.to_string(),
        }
    }

    /// Replaces the whole product list. Local mode only.
    pub fn replace_local(&self, products: Vec<Product>) -> bool {
        match self {
            InventoryState::Local(store) => {
                store.replace_all(products);
                true
            }
            InventoryState::Live { .. } => false,
        }
    }

    /// Releases the database handle, if any.
    pub async fn close(&self) {
        if let InventoryState::Live { database, .. } = self {
            database.close().await;
        }
    }
}

impl InventoryStore for InventoryState {
    fn list_all(&self) -> impl Future<Output = CoreResult<Vec<Product>>> + Send {
        async move {
            match self {
                InventoryState::Live { repo, .. } => InventoryStore::list_all(repo).await,
                InventoryState::Local(store) => store.list_all().await,
            }
        }
    }

    fn set_quantity(&self, id: i64, quantity: i64) -> impl Future<Output = CoreResult<()>> + Send {
        async move {
            match self {
                InventoryState::Live { repo, .. } => {
                    InventoryStore::set_quantity(repo, id, quantity).await
                }
                InventoryState::Local(store) => store.set_quantity(id, quantity).await,
            }
        }
    }

    fn increment(&self, id: i64, amount: i64) -> impl Future<Output = CoreResult<()>> + Send {
        async move {
            match self {
                InventoryState::Live { repo, .. } => InventoryStore::increment(repo, id, amount).await,
                InventoryState::Local(store) => store.increment(id, amount).await,
            }
        }
    }

    fn decrement(&self, id: i64, amount: i64) -> impl Future<Output = CoreResult<()>> + Send {
        async move {
            match self {
                InventoryState::Live { repo, .. } => InventoryStore::decrement(repo, id, amount).await,
                InventoryState::Local(store) => store.decrement(id, amount).await,
            }
        }
    }
}
