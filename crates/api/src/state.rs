use std::sync::Arc;

use crate::airtable::AirtableClient;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Every dependency is constructed once in `main` and injected here. This is
/// cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scout_db::DbPool,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Airtable records client used by the passthrough routes.
    pub airtable: Arc<AirtableClient>,
}
