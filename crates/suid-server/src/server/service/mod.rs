//! HTTP surface of the id service.
//!
//! Two routes, both thin adapters over the `suid` core:
//!
//! - `GET /blocks?blocks=N` - allocate up to 8 fresh blocks, returned as a
//!   JSON array of tagged strings.
//! - `GET /next` - issue a single id from the shared server-side pool.

pub mod handler;
pub mod types;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use parking_lot::Mutex;

use crate::server::config::ServerConfig;
use types::{Allocator, Pool, Store};

/// Shared state handed to every request handler.
///
/// The allocator is stateless and shared directly. Single-id issuance uses
/// one process-wide pool behind a mutex: handlers are short-lived tasks, so
/// per-worker pools would leak most of each block's sequence space, and the
/// lock is only contended for the duration of an increment (or, once per 64
/// ids, a block refill).
#[derive(Clone)]
pub struct AppState {
    allocator: Arc<Allocator>,
    pool: Arc<Mutex<Pool>>,
}

impl AppState {
    /// Builds the store, allocator and pool from validated configuration.
    ///
    /// # Errors
    ///
    /// Fails when the store cannot be opened or the configured shard does
    /// not fit the id layout.
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "rocksdb")]
        let store = Store::open(&config.data_dir)?;
        #[cfg(not(feature = "rocksdb"))]
        let store = Store::new();

        let allocator = Arc::new(Allocator::new(store, config.shard)?);
        let pool = Arc::new(Mutex::new(Pool::new(Arc::clone(&allocator))));
        Ok(Self { allocator, pool })
    }

    pub(crate) fn allocator(&self) -> Arc<Allocator> {
        Arc::clone(&self.allocator)
    }

    pub(crate) fn pool(&self) -> Arc<Mutex<Pool>> {
        Arc::clone(&self.pool)
    }
}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/blocks", get(handler::next_blocks))
        .route("/next", get(handler::next_id))
        .with_state(state)
}
