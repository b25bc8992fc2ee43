use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerd_api::auth::password::hash_password;
use ledgerd_api::config::ServerConfig;
use ledgerd_api::router::build_app_router;
use ledgerd_api::state::AppState;
use ledgerd_db::bootstrap::{ensure_bootstrapped, DefaultSysadmin};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgerd_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = ledgerd_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    ledgerd_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    ledgerd_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Bootstrap (permission catalog, roles, default sysadmin) ---
    let sysadmin_email = std::env::var("DEFAULT_SYSADMIN_EMAIL")
        .unwrap_or_else(|_| "sysadmin@ledgerd.local".into());
    let sysadmin_password = std::env::var("DEFAULT_SYSADMIN_PASSWORD")
        .expect("DEFAULT_SYSADMIN_PASSWORD must be set");
    let sysadmin_hash =
        hash_password(&sysadmin_password).expect("Failed to hash default sysadmin password");

    let report = ensure_bootstrapped(
        &pool,
        &DefaultSysadmin {
            first_name: "System",
            last_name: "Administrator",
            email: &sysadmin_email,
            password_hash: &sysadmin_hash,
        },
    )
    .await
    .expect("Bootstrap seeding failed");
    tracing::info!(
        permissions = report.permissions_seeded,
        roles = report.roles_seeded,
        grants = report.sysadmin_grants_seeded,
        sysadmin_created = report.sysadmin_user_created,
        "Bootstrap complete"
    );

    // --- App state & router ---
    let state = AppState::new(pool, config.clone());
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
