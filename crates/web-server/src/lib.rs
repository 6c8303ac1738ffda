use axum::{Router, routing::get};
use configuration::Config;
use service::StatsService;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub service: StatsService,
}

/// Builds the router with all routes and middleware, ready to serve.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/assets/top", get(handlers::get_top_assets))
        .route("/assets/dayTop", get(handlers::get_day_top_asset))
        .route("/assets/:asset_id/info", get(handlers::get_asset_info))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Opens the record store named in `config` and serves the API until Ctrl+C.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = record_store::connect(
        &config.datasource.dir,
        config.datasource.file_suffix.as_str(),
    )
    .await?;
    let app_state = Arc::new(AppState {
        service: StatsService::new(Arc::new(store)),
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping web server.");
}
