use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::TokenService;
use identity_service::account::service::AuthService;
use identity_service::config::Config;
use identity_service::employee::service::EmployeeService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::PostgresCredentialStore;
use identity_service::outbound::repositories::PostgresEmployeeRepository;
use identity_service::telemetry;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load().context("Failed to load configuration")?;

    telemetry::init(&config.logging).context("Failed to initialise tracing")?;

    tracing::info!(
        service = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.app.environment,
        "Service starting"
    );

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        jwt = ?config.jwt,
        "Configuration loaded"
    );

    let tokens = Arc::new(
        TokenService::new(config.jwt.token_settings()).context("Invalid token configuration")?,
    );
    tracing::info!(
        access_token_ttl_minutes = tokens.access_token_ttl().num_minutes(),
        refresh_token_ttl_hours = tokens.refresh_token_ttl().num_hours(),
        "Token service ready"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool.clone()));
    let auth_service = Arc::new(AuthService::new(credential_store, Arc::clone(&tokens))?);

    let employee_repository = Arc::new(PostgresEmployeeRepository::new(pg_pool));
    let employee_service = Arc::new(EmployeeService::new(employee_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application =
        create_router(auth_service, employee_service, tokens, config.app.clone());

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}
