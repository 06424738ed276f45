use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use axum::extract::DefaultBodyLimit;
use axum::{Router, middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::records::router())
        .merge(crate::api::bulk::router())
}

/// Build the full service: routes, state and tower middleware
///
/// The body limit applies to every JSON extractor and caps bulk payloads.
pub fn build_router(state: ServerState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    build_app()
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        // Tower HTTP 中间件
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // HTTP 请求日志中间件
        .layer(middleware::from_fn(log_request))
}

/// Serve the router over plain HTTP until `shutdown_signal` resolves
///
/// In-flight requests get `grace` to finish after the signal.
pub async fn serve<F>(
    addr: SocketAddr,
    app: Router,
    shutdown_signal: F,
    grace: Duration,
) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = axum_server::Handle::new();

    // Handle shutdown signal
    let handle_clone = handle.clone();
    tokio::spawn(async move {
        shutdown_signal.await;
        handle_clone.graceful_shutdown(Some(grace));
    });

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
