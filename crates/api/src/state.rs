use std::sync::Arc;
use std::time::Instant;

use repairdesk_db::{EntityStore, OwnershipResolver, StatsAggregator, StoreError};

use crate::auth::session::Authenticator;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// The entity store (PostgreSQL or in-memory). Private: handlers reach
    /// records only through `resolver` and `stats`.
    store: Arc<dyn EntityStore>,
    /// Server configuration, read-only after startup.
    pub config: Arc<ServerConfig>,
    /// Session authenticator.
    pub auth: Authenticator,
    /// Ownership-scoped access to customers and repairs.
    pub resolver: OwnershipResolver,
    /// Per-user statistics.
    pub stats: StatsAggregator,
    /// Process start, for the status probe's uptime.
    pub started_at: Instant,
}

impl AppState {
    /// Wire the services over one store.
    pub fn new(
        store: Arc<dyn EntityStore>,
        config: ServerConfig,
        auth: Authenticator,
    ) -> Self {
        let resolver = OwnershipResolver::new(Arc::clone(&store));
        let stats = StatsAggregator::new(resolver.clone());
        Self {
            store,
            config: Arc::new(config),
            auth,
            resolver,
            stats,
            started_at: Instant::now(),
        }
    }

    /// Round-trip to the store, for the health and status probes.
    pub async fn ping_store(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}
