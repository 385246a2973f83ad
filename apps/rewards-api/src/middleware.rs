//! Request logging middleware.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Logs method, path, client address, status and latency for every request.
///
/// The client address is only known when the server was started with
/// `into_make_service_with_connect_info`.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let started = Instant::now();
    let response = next.run(request).await;

    info!(
        %method,
        %uri,
        client = ?client,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Request handled"
    );

    response
}
