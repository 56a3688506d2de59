//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database init, migrations,
//! bootstrap admin, REST API, metrics, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::UserService;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::interfaces::http::modules::metrics::install_recorder;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{create_api_router, init_database, ApiState, SeaOrmRepositoryProvider};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured admin when no users exist (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running station registry.
///
/// ```rust,no_run
/// use station_registry::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,

    local_addr: SocketAddr,
    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global metrics recorder can only be installed once per process,
/// so a restart within the same process reuses it.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled, failed to install Prometheus recorder: {}", e);
                None
            }
        })
        .clone()
}

impl ServerHandle {
    /// Start the registry with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect to the database and run migrations
    /// 3. Create the bootstrap admin (if configured and enabled)
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting station registry...");

        let metrics_handle = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db_config = app_cfg.database_config();
        info!("Database: {}", db_config.url);
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        let jwt_config = app_cfg.jwt_config();
        if app_cfg.uses_default_secret() {
            warn!("⚠️  Using the built-in JWT secret, set JWT_SECRET or security.jwt_secret");
        }
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        if opts.create_default_admin {
            create_default_admin(repos.clone(), &app_cfg).await;
        }

        // ── REST API server ────────────────────────────────────
        let state = ApiState::new(repos.clone(), jwt_config);
        let api_router = create_api_router(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(
            listener,
            api_router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Server started.");

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Address the API listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn api_port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    ///
    /// Call [`wait`](Self::wait) to block until everything has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// Once shutdown is signalled, in-flight requests get
    /// `server.shutdown_timeout` seconds to drain before the task is
    /// abandoned.
    pub async fn wait(self) {
        let signal = self.shutdown.signal();
        let timeout = std::time::Duration::from_secs(self.shutdown.timeout_secs());
        let mut api_task = self.api_task;

        tokio::select! {
            result = &mut api_task => report_api_exit(result),
            _ = signal.wait() => {
                info!("⏳ Waiting up to {:?} for in-flight requests...", timeout);
                match tokio::time::timeout(timeout, &mut api_task).await {
                    Ok(result) => report_api_exit(result),
                    Err(_) => {
                        warn!("Shutdown timeout elapsed, aborting REST API server");
                        api_task.abort();
                    }
                }
            }
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 Station registry shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down station registry...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

fn report_api_exit(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured admin account if no users exist yet.
async fn create_default_admin(repos: Arc<dyn RepositoryProvider>, app_cfg: &AppConfig) {
    let Some(admin) = &app_cfg.admin else {
        return;
    };

    let users = UserService::new(repos, app_cfg.jwt_config());
    match users
        .ensure_admin(&admin.name, &admin.email, &admin.password)
        .await
    {
        Ok(Some(created)) => info!("Default admin created: {}", created.email),
        Ok(None) => {}
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `log` records from the repositories are bridged into the same subscriber.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 1;
        config.database.url = "sqlite::memory:".into();
        config.database.max_connections = 1;
        ServerOptions {
            config,
            ..ServerOptions::default()
        }
    }

    #[tokio::test]
    async fn starts_and_shuts_down() {
        let handle = ServerHandle::start(memory_options()).await.unwrap();
        assert_ne!(handle.api_port(), 0);
        assert!(handle.is_running());

        tokio::time::timeout(std::time::Duration::from_secs(5), handle.shutdown())
            .await
            .expect("shutdown should complete");
    }

    #[tokio::test]
    async fn bootstraps_admin_once() {
        let mut opts = memory_options();
        opts.config.admin = Some(crate::config::AdminConfig {
            name: "Admin".into(),
            email: "Admin@Example.com".into(),
            password: "admin123".into(),
        });

        let handle = ServerHandle::start(opts).await.unwrap();
        let admin = handle
            .repos
            .users()
            .get_user_by_email("admin@example.com")
            .await
            .unwrap()
            .expect("admin should exist");
        assert!(admin.actor().is_admin());
        assert_eq!(handle.repos.users().count_users().await.unwrap(), 1);

        handle.shutdown().await;
    }
}
