use std::sync::Arc;

use sitebook_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: DbPool,
    /// Server configuration (immutable after startup).
    pub config: Arc<ServerConfig>,
}
