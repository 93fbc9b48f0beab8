//! Ticket Desk server binary.
//!
//! Loads configuration from the environment, wires repositories, auth and
//! the sync publisher into the axum router and serves until SIGINT/SIGTERM.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ticket_desk::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use ticket_desk::adapters::http::{build_router, AppServices};
use ticket_desk::adapters::in_memory::{InMemoryTicketRepository, InMemoryUserRepository};
use ticket_desk::adapters::postgres::{PostgresTicketRepository, PostgresUserRepository};
use ticket_desk::adapters::sync::build_sync_publisher;
use ticket_desk::config::{AppConfig, ConfigError, DatabaseConfig, LogFormat, ServerConfig};
use ticket_desk::ports::{TicketRepository, UserRepository};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migrations failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Sync client could not be built: {0}")]
    SyncClient(#[from] reqwest::Error),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;

    init_tracing(&config.server);
    info!(
        environment = ?config.server.environment,
        in_memory = config.database.is_in_memory(),
        "Starting ticket-desk"
    );
    if config.is_production() && config.database.is_in_memory() {
        warn!("In-memory storage in production; data is lost on restart");
    }

    let (tickets, users) = repositories(&config.database).await?;
    let publisher = build_sync_publisher(&config.sync)?;

    let services = AppServices {
        tickets,
        users,
        publisher,
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens: Arc::new(JwtTokenService::new(&config.auth)),
    };
    let app = build_router(services, &config.server);

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match server.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn repositories(
    database: &DatabaseConfig,
) -> Result<(Arc<dyn TicketRepository>, Arc<dyn UserRepository>), StartupError> {
    if database.is_in_memory() {
        let users = Arc::new(InMemoryUserRepository::new());
        let tickets = Arc::new(InMemoryTicketRepository::new(users.clone()));
        return Ok((tickets, users));
    }

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    Ok((
        Arc::new(PostgresTicketRepository::new(pool.clone())),
        Arc::new(PostgresUserRepository::new(pool)),
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
