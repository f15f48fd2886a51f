use std::net::SocketAddr;
use std::path::Path;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request};
use axum::http::{header, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::handlers::{self, SharedGame};

/// Builds the application: the JSON API under `/api`, static content for
/// everything else.
pub fn app(game: SharedGame, www_root: impl AsRef<Path>) -> Router {
    // Endpoints validate methods themselves so that 405 responses carry
    // the documented JSON body and Allow header.
    let api = Router::new()
        .route("/v1/maps", any(handlers::maps::list_maps))
        .route("/v1/maps/{*id}", any(handlers::maps::map_by_id))
        .route("/v1/game/join", any(handlers::game::join))
        .route("/v1/game/players", any(handlers::game::players))
        .route("/v1/game/state", any(handlers::game::state))
        .fallback(handlers::api_fallback)
        .layer(middleware::from_fn(no_cache))
        .with_state(game);

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(www_root))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::HEAD, Method::POST])
                .allow_headers(Any)
                .allow_origin(Any),
        )
        .layer(middleware::from_fn(log_requests))
}

/// Binds `addr` and serves until ctrl-c.
pub async fn run(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Server listening on {}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(err) => log::error!("Failed to listen for shutdown signal: {}", err),
    }
}

/// API responses must not be cached by clients.
async fn no_cache(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

/// One log line in, one out, for every request.
async fn log_requests(request: Request, next: Next) -> Response {
    // No peer address when the router is driven directly in tests.
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_owned());
    let method = request.method().clone();
    let target = request.uri().to_string();
    log::info!("Request from {}: {} {}", peer, method, target);

    let started = Instant::now();
    let response = next.run(request).await;

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("null");
    log::info!(
        "Response to {}: {} {} in {} ms",
        peer,
        response.status().as_u16(),
        content_type,
        started.elapsed().as_millis()
    );
    response
}
