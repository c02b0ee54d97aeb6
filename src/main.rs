use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ruralconnect_backend::api;
use ruralconnect_backend::config::Config;
use ruralconnect_backend::mail::{Mailer, ProviderResolver};
use ruralconnect_backend::state::AppState;
use ruralconnect_backend::templates::TemplateRenderer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging (LOG_FORMAT=json for structured output)
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting RuralConnect backend...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        host = %config.server_host,
        port = %config.server_port,
        "Configuration loaded"
    );

    // Resolve the email provider once for the process lifetime
    let resolver = ProviderResolver::new(config.mail.clone());
    let renderer = TemplateRenderer::new(config.app_name.clone(), config.app_url.clone())?;
    let mailer = Mailer::from_resolver(&resolver, renderer)?;
    if resolver.resolve().is_configured() {
        tracing::info!(
            provider = %mailer.provider_kind(),
            from = %mailer.from_address(),
            "Mailer initialized"
        );
    } else {
        tracing::warn!("No email provider configured; outgoing mail will only be logged");
    }

    let state = AppState::new(config.clone(), mailer);

    // Build router
    let app = Router::new()
        .merge(api::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.server_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Server listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Handle shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down...");
        },
    }
}
