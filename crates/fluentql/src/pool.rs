//! Connection utilities

use crate::config::ConnectionConfig;
use crate::error::{QbError, QbResult};
use tokio_postgres::NoTls;

const TARGET: &str = "fluentql.sql";

/// Open a single connection and drive it on the tokio runtime.
///
/// The connection task logs and exits when the server closes the connection;
/// the returned client then fails every call with [`QbError::Query`].
pub async fn connect(config: &ConnectionConfig) -> QbResult<tokio_postgres::Client> {
    let pg_config = config.to_pg_config()?;
    let (client, connection) = pg_config
        .connect(NoTls)
        .await
        .map_err(|e| QbError::connection(e.to_string()))?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            tracing::error!(target: TARGET, error = %err, "connection closed with error");
        }
    });
    tracing::info!(target: TARGET, "database connected");
    Ok(client)
}

#[cfg(feature = "pool")]
pub use pooled::{create_pool, create_pool_with_manager_config};

#[cfg(feature = "pool")]
mod pooled {
    use super::*;
    use deadpool_postgres::{Manager, ManagerConfig, Pool, PoolBuilder, RecyclingMethod};

    /// Create a connection pool sized by `config.pool_size`.
    ///
    /// Uses `NoTls`. For tuning beyond the pool size, use
    /// [`create_pool_with_manager_config`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let pool = fluentql::create_pool(&ConnectionConfig::from_env()?)?;
    /// let rows = query.go(&pool).await?;
    /// ```
    pub fn create_pool(config: &ConnectionConfig) -> QbResult<Pool> {
        let max_size = config.pool_size;
        create_pool_with_manager_config(config, default_manager_config(), |builder| {
            builder.max_size(max_size)
        })
    }

    /// Create a connection pool with injected `deadpool_postgres::ManagerConfig` and `PoolBuilder` tuning.
    pub fn create_pool_with_manager_config(
        config: &ConnectionConfig,
        manager_config: ManagerConfig,
        configure_pool: impl FnOnce(PoolBuilder) -> PoolBuilder,
    ) -> QbResult<Pool> {
        let pg_config = config.to_pg_config()?;
        let mgr = Manager::from_config(pg_config, NoTls, manager_config);
        configure_pool(Pool::builder(mgr))
            .build()
            .map_err(|e| QbError::Pool(e.to_string()))
    }

    fn default_manager_config() -> ManagerConfig {
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        }
    }
}
