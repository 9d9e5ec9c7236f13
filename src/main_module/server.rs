//! HTTP server initialization and routing

use axum::routing::get;
use axum::Router;
use log::{error, info};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::shared::state::AppState;
use crate::urls::ApiUrls;

use super::health::health_check;
use super::shutdown::shutdown_signal;

pub fn build_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_router = Router::new()
        .route(ApiUrls::HEALTH, get(health_check))
        .merge(crate::tasks::configure_task_routes());

    Router::new()
        .merge(api_router.with_state(app_state))
        .merge(crate::web_server::configure_web_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(
    app_state: Arc<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<()> {
    let app = build_router(app_state);

    let listener = match tokio::net::TcpListener::bind((host, port)).await {
        Ok(l) => l,
        Err(e) => {
            error!(
                "Failed to bind to {}:{}: {} - is another instance running?",
                host, port, e
            );
            return Err(e);
        }
    };
    info!("HTTP server listening on {}:{}", host, port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(std::io::Error::other)
}
