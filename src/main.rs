use std::net::SocketAddr;

use devhub::router::init_router;
use devhub::state::init_app_state;
use devhub_config::ServerConfig;
use devhub_observability::{init_tracing, shutdown_tracer};
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "Server stopped");
        shutdown_tracer().await;
        std::process::exit(1);
    }

    shutdown_tracer().await;
}

async fn run() -> anyhow::Result<()> {
    let state = init_app_state()?;
    let server_config = ServerConfig::from_env()?;

    if state.zoom_config.credentials().is_none() {
        info!("Meeting SDK credentials not set, signature requests will fail");
    }

    info!(
        environment = %state.environment,
        admin_role = %state.admin_policy.role,
        admin_emails = state.admin_policy.emails.len(),
        "Configuration loaded"
    );

    let app = init_router(state);
    let address = server_config.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("🚀 Server running on http://{address}");
    info!("📚 Swagger UI available at http://{address}/swagger-ui");
    info!("📖 Scalar UI available at http://{address}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Cannot listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
