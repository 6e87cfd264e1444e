//! Port interface for dependency health checks

use async_trait::async_trait;
use skoo_domain::Result;

/// A dependency that can be checked cheaply (e.g. `SELECT 1`)
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<()>;
}
