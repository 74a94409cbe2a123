//! # Connection Resolver
//!
//! Walks an ordered list of [`ConnectionProfile`]s and returns the first
//! handle that opens and answers a liveness probe.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Ordered Fallback                                   │
//! │                                                                         │
//! │  for profile in profiles (each once, in order):                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  open (bounded by profile.connect_timeout)                             │
//! │       │ fail / timeout ──► ConnectionOpenFailed, next profile          │
//! │       ▼                                                                 │
//! │  probe: SELECT 1                                                       │
//! │       │ fail ──► close handle, ProbeFailed, next profile               │
//! │       ▼                                                                 │
//! │  products table present?                                               │
//! │       ├── yes ──► Live(handle)                                         │
//! │       └── no  ──► LiveNoSchema(handle)   caller decides                │
//! │                                                                         │
//! │  none left ──► Failed(AllProfilesExhausted { failures })               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolver never panics and never returns an `Err`: total failure is a
//! value, [`Resolution::Failed`], and the caller degrades to local mode.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::error::{AttemptFailure, DbResult, ResolveError};
use crate::pool::{Database, DbConfig};
use crate::profile::ConnectionProfile;

// =============================================================================
// Connector
// =============================================================================

/// Turns a profile into an open [`Database`].
///
/// Production code uses [`PgConnector`]; tests script the outcomes.
pub trait Connector: Send + Sync {
    fn open(&self, profile: &ConnectionProfile) -> impl Future<Output = DbResult<Database>> + Send;
}

/// Pool size for a live handle; one operator issues one query at a time.
const PG_MAX_CONNECTIONS: u32 = 2;

/// Opens PostgreSQL handles from a profile's URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

impl Connector for PgConnector {
    fn open(&self, profile: &ConnectionProfile) -> impl Future<Output = DbResult<Database>> + Send {
        let url = profile.connect_url();
        let connect_timeout = profile.connect_timeout;
        async move {
            let config = DbConfig::new(url?.as_str())
                .max_connections(PG_MAX_CONNECTIONS)
                .connect_timeout(connect_timeout);
            Database::new(config).await
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// An open handle plus the profile that produced it.
#[derive(Debug, Clone)]
pub struct LiveConnection {
    pub database: Database,
    pub profile: ConnectionProfile,
}

/// Outcome of [`ConnectionResolver::resolve`].
#[derive(Debug)]
pub enum Resolution {
    /// Connected and the `products` table is queryable.
    Live(LiveConnection),
    /// Connected, but the `products` table is missing. The handle is open.
    LiveNoSchema(LiveConnection),
    /// No profile produced a live handle.
    Failed(ResolveError),
}

impl Resolution {
    /// True for `Live` only.
    pub fn is_live(&self) -> bool {
        matches!(self, Resolution::Live(_))
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Ordered connection fallback.
///
/// ## Example
/// ```rust,ignore
/// let resolver = ConnectionResolver::new(PgConnector, ConnectionProfile::defaults());
/// if let Resolution::Live(live) = resolver.resolve().await {
///     println!("connected via {}", live.profile.name);
/// }
/// ```
#[derive(Debug)]
pub struct ConnectionResolver<C> {
    connector: C,
    profiles: Vec<ConnectionProfile>,
}

impl<C: Connector> ConnectionResolver<C> {
    pub fn new(connector: C, profiles: Vec<ConnectionProfile>) -> Self {
        ConnectionResolver {
            connector,
            profiles,
        }
    }

    /// Tries each profile once, in order, and stops at the first live one.
    pub async fn resolve(&self) -> Resolution {
        if self.profiles.is_empty() {
            warn!("No connection profiles configured");
            return Resolution::Failed(ResolveError::NoProfiles);
        }

        let mut failures = Vec::with_capacity(self.profiles.len());

        for profile in &self.profiles {
            let database = match self.attempt(profile).await {
                Ok(database) => database,
                Err(failure) => {
                    warn!(profile = %profile.name, mode = %profile.auth_mode, error = %failure, "Connection attempt failed");
                    failures.push(failure);
                    continue;
                }
            };

            let has_schema = match database.has_products_table().await {
                Ok(present) => present,
                Err(e) => {
                    database.close().await;
                    let failure = AttemptFailure::ProbeFailed {
                        profile: profile.name.clone(),
                        reason: e.to_string(),
                    };
                    warn!(profile = %profile.name, error = %failure, "Connection lost during schema check");
                    failures.push(failure);
                    continue;
                }
            };

            info!(
                profile = %profile.name,
                mode = %profile.auth_mode,
                target = %profile.target(),
                has_schema,
                "Connected to database"
            );

            let live = LiveConnection {
                database,
                profile: profile.clone(),
            };
            return if has_schema {
                Resolution::Live(live)
            } else {
                Resolution::LiveNoSchema(live)
            };
        }

        Resolution::Failed(ResolveError::AllProfilesExhausted { failures })
    }

    /// Opens and probes one profile. A handle that fails its probe is closed
    /// before this returns.
    async fn attempt(&self, profile: &ConnectionProfile) -> Result<Database, AttemptFailure> {
        let limit = profile.connect_timeout;

        let database = match timeout(limit, self.connector.open(profile)).await {
            Ok(Ok(database)) => database,
            Ok(Err(e)) => {
                return Err(AttemptFailure::ConnectionOpenFailed {
                    profile: profile.name.clone(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(AttemptFailure::ConnectionOpenFailed {
                    profile: profile.name.clone(),
                    reason: timed_out(limit),
                })
            }
        };

        let reason = match timeout(limit, database.probe()).await {
            Ok(Ok(())) => return Ok(database),
            Ok(Err(e)) => e.to_string(),
            Err(_) => timed_out(limit),
        };

        database.close().await;
        Err(AttemptFailure::ProbeFailed {
            profile: profile.name.clone(),
            reason,
        })
    }
}

fn timed_out(limit: Duration) -> String {
    format!("timed out after {}ms", limit.as_millis())
}

// =============================================================================
// Unit Tests
// =============================================================================
