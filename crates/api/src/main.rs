use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use computer_manager_api::config::ServerConfig;
use computer_manager_api::error::StartupError;
use computer_manager_api::router::build_app_router;
use computer_manager_api::state::AppState;
use computer_manager_db::PgComputerStore;
use computer_manager_events::HttpAdminNotifier;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "computer_manager_api=debug,computer_manager_events=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting computer manager API");

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    // --- Configuration ---
    tracing::info!("Loading configuration from environment variables");
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        notification_threshold = config.notification_threshold,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = computer_manager_db::create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    computer_manager_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    computer_manager_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    // --- Notification service client ---
    let notifier = HttpAdminNotifier::new(
        config.notification_url.clone(),
        config.notification_timeout(),
    )?;
    tracing::info!(url = %notifier.url(), "Notification service client created");

    // --- App state ---
    let state = AppState::new(
        Arc::new(PgComputerStore::new(pool)),
        Arc::new(notifier),
        config.notification_threshold,
    );

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse::<IpAddr>()?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). Count checks still
/// running at that point are abandoned with the runtime.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
