use std::sync::Arc;

use sqlx::PgPool;

use jobboard_config::{AuthConfig, CorsConfig, ServerConfig, StoreBackend};

use crate::config::database::{DatabaseConfig, init_db_pool, run_migrations};
use crate::storage::{
    CredentialStore, InMemoryCredentialStore, InMemoryJobPostStore, JobPostStore,
    PgCredentialStore, PgJobPostStore,
};

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub job_posts: Arc<dyn JobPostStore>,
    pub auth_config: Arc<AuthConfig>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        job_posts: Arc<dyn JobPostStore>,
        auth_config: AuthConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            credentials,
            job_posts,
            auth_config: Arc::new(auth_config),
            cors_config,
        }
    }

    pub fn with_postgres(pool: PgPool, auth_config: AuthConfig, cors_config: CorsConfig) -> Self {
        Self::new(
            Arc::new(PgCredentialStore::new(pool.clone())),
            Arc::new(PgJobPostStore::new(pool)),
            auth_config,
            cors_config,
        )
    }

    pub fn in_memory(auth_config: AuthConfig, cors_config: CorsConfig) -> Self {
        Self::new(
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(InMemoryJobPostStore::new()),
            auth_config,
            cors_config,
        )
    }
}

/// Builds the state from the environment, connecting to Postgres (and
/// migrating, unless `RUN_MIGRATIONS=false`) when that backend is selected.
pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    let auth_config = AuthConfig::from_env();
    let cors_config = CorsConfig::from_env();

    match server_config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            Ok(AppState::in_memory(auth_config, cors_config))
        }
        StoreBackend::Postgres => {
            let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;

            let migrate = std::env::var("RUN_MIGRATIONS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true);
            if migrate {
                run_migrations(&pool).await?;
            }

            Ok(AppState::with_postgres(pool, auth_config, cors_config))
        }
    }
}
