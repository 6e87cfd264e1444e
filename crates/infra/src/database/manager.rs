//! Postgres connection manager.

use std::sync::Arc;

use async_trait::async_trait;
use postgres_native_tls::MakeTlsConnector;
use skoo_core::HealthCheck;
use skoo_domain::{DatabaseConfig, Result, SkooError};
use tokio::sync::RwLock;
use tokio_postgres::{Client, NoTls};
use tracing::{error, info, warn};

use crate::errors::db_error;

/// Owns the `tokio_postgres` client shared by every repository.
///
/// The client pipelines concurrent queries over one connection; the driver
/// half runs on a spawned task. When that connection drops (database
/// restart, network cut) the next caller of [`PgManager::client`] opens a
/// new one, so the process recovers without a restart.
pub struct PgManager {
    config: DatabaseConfig,
    client: RwLock<Arc<Client>>,
}

impl PgManager {
    /// Connect using `config.url`, with TLS unless `config.tls` is false.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let client = open(config).await?;
        info!(tls = config.tls, "postgres connection established");
        Ok(Self { config: config.clone(), client: RwLock::new(Arc::new(client)) })
    }

    /// A live client, reconnecting first if the current one is closed.
    pub async fn client(&self) -> Result<Arc<Client>> {
        {
            let current = self.client.read().await;
            if !current.is_closed() {
                return Ok(Arc::clone(&current));
            }
        }

        let mut slot = self.client.write().await;
        // another caller may have reconnected while we waited for the lock
        if !slot.is_closed() {
            return Ok(Arc::clone(&slot));
        }

        warn!("postgres connection closed, reconnecting");
        let fresh = Arc::new(open(&self.config).await.map_err(|err| {
            SkooError::Database(format!("postgres connection closed; reconnect failed: {err}"))
        })?);
        *slot = Arc::clone(&fresh);
        info!("postgres connection re-established");
        Ok(fresh)
    }

    /// Whether the current connection has been dropped and not yet replaced.
    pub async fn is_closed(&self) -> bool {
        self.client.read().await.is_closed()
    }

    /// Verify connectivity, reconnecting if the connection was dropped.
    pub async fn health_check(&self) -> Result<()> {
        let row = self.client().await?.query_one("SELECT 1", &[]).await.map_err(db_error)?;
        let value: i32 = row.try_get(0).map_err(db_error)?;
        if value != 1 {
            return Err(SkooError::Database("health check query returned unexpected value".into()));
        }
        Ok(())
    }
}

async fn open(config: &DatabaseConfig) -> Result<Client> {
    if config.tls {
        let connector = native_tls::TlsConnector::builder()
            .build()
            .map_err(|err| SkooError::Database(format!("failed to build TLS connector: {err}")))?;
        let (client, connection) =
            tokio_postgres::connect(&config.url, MakeTlsConnector::new(connector))
                .await
                .map_err(db_error)?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                error!(error = %err, "postgres connection terminated");
            }
        });
        Ok(client)
    } else {
        let (client, connection) =
            tokio_postgres::connect(&config.url, NoTls).await.map_err(db_error)?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                error!(error = %err, "postgres connection terminated");
            }
        });
        Ok(client)
    }
}

#[async_trait]
impl HealthCheck for PgManager {
    async fn ping(&self) -> Result<()> {
        self.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn unreachable_database_is_a_database_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = DatabaseConfig {
            url: format!("postgres://skoo@127.0.0.1:{port}/skoo"),
            tls: false,
        };
        let result = PgManager::connect(&config).await;

        assert!(matches!(result, Err(SkooError::Database(_))));
    }
}
