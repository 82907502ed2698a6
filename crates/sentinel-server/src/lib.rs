pub mod error;
pub mod notify;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use sentinel_core::SentinelConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(config: SentinelConfig) -> Router {
    let app_state = state::AppState::new(config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::dashboard::home))
        .route("/health", get(routes::health::health))
        .route("/run_incident", post(routes::incidents::run_incident))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the API Sentinel server on `host:port`.
pub async fn serve(config: SentinelConfig, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(config, listener).await
}

/// Start the server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(config: SentinelConfig, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let local = listener.local_addr()?;
    if config.llm.provider == sentinel_llm::Provider::Anthropic && config.llm.api_key.is_none() {
        tracing::warn!(
            "{} not set; /run_incident will fail until it is provided",
            sentinel_llm::ANTHROPIC_API_KEY_VAR
        );
    }
    tracing::info!(
        provider = %config.llm.provider,
        model = config.llm.model(),
        "API Sentinel listening on http://{local}"
    );

    let app = build_router(config);
    axum::serve(listener, app).await?;
    Ok(())
}
