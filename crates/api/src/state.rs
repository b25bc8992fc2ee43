use std::sync::Arc;

use ledgerd_core::tin::TinCipher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ledgerd_db::DbPool,
    /// Server configuration (accessed by extractors and handlers).
    pub config: Arc<ServerConfig>,
    /// TIN field cipher, keyed from `config.crypto_secret`.
    pub tin: Arc<TinCipher>,
}

impl AppState {
    /// Build state from a pool and configuration, deriving the TIN cipher.
    pub fn new(pool: ledgerd_db::DbPool, config: ServerConfig) -> Self {
        let tin = Arc::new(TinCipher::new(&config.crypto_secret));
        Self {
            pool,
            config: Arc::new(config),
            tin,
        }
    }
}
