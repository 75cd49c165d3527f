//! Server configuration assembled from the environment by `main`.

use std::net::SocketAddr;

use crate::outbound::persistence::DbPool;

/// Runtime configuration for [`create_server`](super::create_server).
///
/// When `db_pool` is absent the server runs on in-memory adapters; settings
/// then live only as long as the process. Intended for local development and
/// tests.
#[derive(Clone)]
pub struct ServerConfig {
    /// Socket address the listener binds to.
    pub bind_addr: SocketAddr,
    /// Optional PostgreSQL connection pool.
    pub db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration bound to the given address with no database.
    pub fn in_memory(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Configuration backed by a PostgreSQL pool.
    pub fn with_pool(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool: Some(db_pool),
        }
    }
}
