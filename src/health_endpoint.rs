//! liveness check and prometheus metrics of the relay
use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::Extension,
    http::{header::CONTENT_TYPE, Response, StatusCode},
    routing::get,
    Router,
};

use crate::metrics::RelayMetrics;

#[derive(Debug, Clone)]
pub struct HealthEndpointSettings {
    pub bind_address: IpAddr,
    pub port: u16,
}

impl HealthEndpointSettings {
    pub fn to_socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn metrics_handler(
    Extension(metrics): Extension<RelayMetrics>,
) -> Result<Response<Body>, StatusCode> {
    let (buffer, content_type) = metrics.encode().map_err(|err| {
        tracing::error!("failed to encode metrics: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(buffer))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

fn router(metrics: RelayMetrics) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(Extension(metrics))
}

async fn serve(settings: &HealthEndpointSettings, metrics: RelayMetrics) -> Result<()> {
    let addr = settings.to_socket_addr();

    axum::Server::try_bind(&addr)
        .with_context(|| format!("can't bind health endpoint to {}", addr))?
        .serve(router(metrics).into_make_service())
        .await
        .context("health endpoint crashed")?;

    Ok(())
}

/// serves `/health` and `/metrics` until the process exits. Failing to do so
/// is logged but doesn't affect the relay.
pub async fn run_health_endpoint(settings: HealthEndpointSettings, metrics: RelayMetrics) {
    tracing::info!("health endpoint listening on {}", settings.to_socket_addr());

    if let Err(err) = serve(&settings, metrics).await {
        tracing::error!("{:#}", err);
    }
}
