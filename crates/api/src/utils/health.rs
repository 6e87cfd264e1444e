//! Health report served by `GET /health`
//!
//! Each dependency contributes one [`ComponentHealth`]; the overall score is
//! the share of healthy components.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Share of healthy components required for the service to report healthy
const HEALTHY_THRESHOLD: f64 = 0.8;

/// Overall health of the service
///
/// # Example
/// ```
/// use skoo_api::utils::health::{ComponentHealth, HealthStatus};
///
/// let mut status = HealthStatus::new()
///     .add_component(ComponentHealth::healthy("database"))
///     .add_component(ComponentHealth::unhealthy("llm_gateway", "api key not configured"));
/// status.calculate_score();
///
/// assert_eq!(status.score, 0.5);
/// assert!(!status.is_healthy);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// Healthy components divided by total components, 1.0 when empty
    pub score: f64,

    pub message: Option<String>,

    pub components: Vec<ComponentHealth>,

    pub checked_at: DateTime<Utc>,
}

impl HealthStatus {
    pub fn new() -> Self {
        Self {
            is_healthy: true,
            score: 1.0,
            message: None,
            components: Vec::new(),
            checked_at: Utc::now(),
        }
    }

    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy` from the components added so far.
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy = self.components.iter().filter(|c| c.is_healthy).count();
        self.score = healthy as f64 / self.components.len() as f64;
        self.is_healthy = self.score >= HEALTHY_THRESHOLD;

        let failing: Vec<&str> =
            self.components.iter().filter(|c| !c.is_healthy).map(|c| c.name.as_str()).collect();
        self.message =
            if failing.is_empty() { None } else { Some(format!("degraded: {}", failing.join(", "))) };
    }

    /// 200 when healthy, 503 otherwise
    pub fn status_code(&self) -> StatusCode {
        if self.is_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health of a single dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component identifier (e.g. "database", "llm_gateway")
    pub name: String,
    pub is_healthy: bool,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}
