//! Application context - dependency injection container

use std::sync::Arc;

use skoo_core::{
    AccessCodeRepository, AccessCodeService, AccessRepository, AccessService, Authenticator,
    CalendarService, ChatModel, Clock, CoachService, CopilotService, GoogleCalendarApi,
    GoogleTokenRepository, HealthCheck, ReminderRepository, ReminderService, StudyRepository,
    StudyToolsService, SystemClock, ToolExecutor,
};
use skoo_domain::{Config, Result};
use skoo_infra::{
    GatewayClient, GoogleCalendarClient, HttpClient, PgAccessCodeRepository, PgAccessRepository,
    PgGoogleTokenRepository, PgManager, PgReminderRepository, PgStudyRepository,
    SupabaseAuthClient,
};
use tracing::{info, warn};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Every port the services are built from
///
/// Production wiring fills this from `skoo-infra`; router tests pass
/// in-memory implementations.
pub struct Ports {
    pub study: Arc<dyn StudyRepository>,
    pub reminders: Arc<dyn ReminderRepository>,
    pub google_tokens: Arc<dyn GoogleTokenRepository>,
    /// `None` when no Google OAuth client is configured
    pub google: Option<Arc<dyn GoogleCalendarApi>>,
    pub access_codes: Arc<dyn AccessCodeRepository>,
    pub access: Arc<dyn AccessRepository>,
    pub authenticator: Arc<dyn Authenticator>,
    pub model: Arc<dyn ChatModel>,
    pub database: Arc<dyn HealthCheck>,
    pub clock: Arc<dyn Clock>,
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub authenticator: Arc<dyn Authenticator>,
    pub copilot: CopilotService,
    pub study_tools: StudyToolsService,
    pub coach: CoachService,
    pub calendar: Option<CalendarService>,
    pub reminders: ReminderService,
    pub access_codes: AccessCodeService,
    pub access: AccessService,
    database: Arc<dyn HealthCheck>,
    gateway_configured: bool,
}

impl AppContext {
    /// Connect to Postgres and build every infrastructure client from
    /// `config`.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        let db = Arc::new(PgManager::connect(&config.database).await?);
        info!(tls = config.database.tls, "connected to postgres");

        let model = Arc::new(GatewayClient::from_config(&config.llm)?);
        let authenticator = Arc::new(SupabaseAuthClient::new(&config.supabase, HttpClient::new()?));

        let google: Option<Arc<dyn GoogleCalendarApi>> = match &config.google {
            Some(google) => Some(Arc::new(GoogleCalendarClient::new(google, HttpClient::new()?))),
            None => {
                warn!("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set; calendar routes disabled");
                None
            }
        };

        let ports = Ports {
            study: Arc::new(PgStudyRepository::new(Arc::clone(&db))),
            reminders: Arc::new(PgReminderRepository::new(Arc::clone(&db))),
            google_tokens: Arc::new(PgGoogleTokenRepository::new(Arc::clone(&db))),
            google,
            access_codes: Arc::new(PgAccessCodeRepository::new(Arc::clone(&db))),
            access: Arc::new(PgAccessRepository::new(Arc::clone(&db))),
            authenticator,
            model,
            database: db,
            clock: Arc::new(SystemClock),
        };

        Ok(Self::from_ports(&config, ports))
    }

    /// Build the services on top of already constructed ports.
    pub fn from_ports(config: &Config, ports: Ports) -> Self {
        let executor = ToolExecutor::new(ports.study, Arc::clone(&ports.clock));
        let copilot = CopilotService::new(
            Arc::clone(&ports.model),
            executor,
            Arc::clone(&ports.clock),
            &config.copilot,
        );

        let calendar = ports.google.map(|google| {
            CalendarService::new(ports.google_tokens, google, Arc::clone(&ports.clock))
        });

        Self {
            authenticator: ports.authenticator,
            copilot,
            study_tools: StudyToolsService::new(Arc::clone(&ports.model), config.llm.model.clone()),
            coach: CoachService::new(ports.model, config.llm.model.clone()),
            calendar,
            reminders: ReminderService::new(ports.reminders, Arc::clone(&ports.clock)),
            access_codes: AccessCodeService::new(ports.access_codes, Arc::clone(&ports.clock)),
            access: AccessService::new(
                ports.access,
                ports.clock,
                config.billing.major_product_id.clone(),
            ),
            database: ports.database,
            gateway_configured: !config.llm.api_key.trim().is_empty(),
        }
    }

    /// Perform health check on all components
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new();

        status = status.add_component(self.check_database_health().await);

        status = status.add_component(if self.gateway_configured {
            ComponentHealth::healthy("llm_gateway")
        } else {
            ComponentHealth::unhealthy("llm_gateway", "api key not configured")
        });

        status.calculate_score();
        status
    }

    async fn check_database_health(&self) -> ComponentHealth {
        match self.database.ping().await {
            Ok(()) => ComponentHealth::healthy("database"),
            Err(err) => {
                warn!(error = %err, "database health check failed");
                ComponentHealth::unhealthy("database", err.to_string())
            }
        }
    }
}
