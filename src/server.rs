//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database init, migrations,
//! room seeding, default admin, metrics, the heartbeat worker, the REST API
//! and graceful shutdown. The CLI binary is a thin wrapper around it.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{HeartbeatConfig, HeartbeatWorker};
use crate::config::{AppConfig, LoggingConfig};
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::database::seed::seed_default_rooms;
use crate::infrastructure::init_database;
use crate::interfaces::http::modules::metrics::install_recorder;
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the default admin user if no user exists (default: true).
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

/// Handle to a running booking service.
///
/// ```rust,no_run
/// use room_booking::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Address the API is bound to, with the real port when 0 was configured
    pub local_addr: std::net::SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
    worker_task: Option<tokio::task::JoinHandle<()>>,
}

impl ServerHandle {
    /// Start the service.
    ///
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations
    /// 3. Seed the default rooms and admin (when enabled)
    /// 4. Start the heartbeat worker
    /// 5. Serve the REST API
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting {} v{}", app_cfg.app.api_name, app_cfg.app.version);

        let prometheus = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db_config = app_cfg.database.to_database_config();
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        if app_cfg.rooms.seed_defaults {
            seed_default_rooms(repos.rooms()).await?;
        }

        // ── Services ───────────────────────────────────────────
        let jwt_config = app_cfg.security.jwt_config();
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        let state = AppState::new(
            db.clone(),
            repos.clone(),
            jwt_config,
            app_cfg.app.clone(),
        );

        if opts.create_default_admin {
            let admin = &app_cfg.admin;
            match state
                .identity
                .ensure_admin(&admin.username, &admin.email, &admin.password)
                .await
            {
                Ok(Some(user)) => {
                    info!("Default admin user created: {}", user.username);
                    warn!("Change the default admin password after first login");
                }
                Ok(None) => {}
                Err(e) => error!("Failed to create default admin user: {}", e),
            }
        }

        // ── Shutdown & background work ─────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let worker_task = if app_cfg.worker.heartbeat_enabled {
            let worker = HeartbeatWorker::new(HeartbeatConfig {
                interval_secs: app_cfg.worker.heartbeat_interval_secs,
            });
            Some(worker.start(shutdown_signal.clone()))
        } else {
            None
        };

        // ── REST API ───────────────────────────────────────────
        let router = create_api_router(state, &app_cfg.cors, prometheus);

        let listener = tokio::net::TcpListener::bind(app_cfg.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
            worker_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install SIGTERM / SIGINT listeners that trigger shutdown
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the API and the worker to stop after shutdown was triggered.
    /// In-flight requests get `server.shutdown_timeout` seconds.
    pub async fn wait(self) {
        let grace = Duration::from_secs(self.shutdown.timeout_secs());

        match tokio::time::timeout(grace, self.api_task).await {
            Ok(Ok(())) => info!("REST API stopped"),
            Ok(Err(e)) => error!("REST API task panicked: {}", e),
            Err(_) => warn!("REST API did not drain within {}s", grace.as_secs()),
        }

        if let Some(task) = self.worker_task {
            if let Err(e) = task.await {
                error!("Heartbeat worker panicked: {}", e);
            }
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Shutdown complete");
    }

    pub async fn shutdown(self) {
        info!("Shutting down...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// The recorder is process-wide, so a stop + start in the same process
/// reuses the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    HANDLE
        .get_or_init(|| match install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled: {}", e);
                None
            }
        })
        .clone()
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the config.
pub fn init_tracing(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let result = match config.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.database.url = "sqlite::memory:".to_string();
        config.database.pool.max_connections = 1;
        config.worker.heartbeat_enabled = false;
        ServerOptions {
            config,
            ..ServerOptions::default()
        }
    }

    #[tokio::test]
    async fn starts_seeds_and_stops() {
        let handle = ServerHandle::start(test_options()).await.unwrap();
        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);

        assert_eq!(handle.repos.rooms().count().await.unwrap(), 4);
        assert_eq!(handle.repos.users().count().await.unwrap(), 1);

        tokio::time::timeout(Duration::from_secs(10), handle.shutdown())
            .await
            .expect("shutdown completes");
    }
}
