#[cfg(test)]
#[path = "server_test.rs"]
mod tests;

use std::future;
use std::future::Future;
use std::io;
use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use axum::http::StatusCode;
use axum::response::AppendHeaders;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::ProxyService;

async fn handle(State(proxy): State<Arc<ProxyService>>, method: Method, body: Bytes) -> Response {
    let res = proxy.handle(method.as_str(), &body).await;
    let status = StatusCode::from_u16(res.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    return (status, AppendHeaders(res.headers()), Body::from(res.body)).into_response();
}

/// Every path and method goes to the proxy. Clients post to `/generate`, older
/// ones to `/chat-with-maya`.
pub fn router(proxy: Arc<ProxyService>) -> Router {
    return Router::new().fallback(handle).with_state(proxy);
}

/// Resolves once `signal` fires. A signal that can't be listened for never
/// resolves, so the server keeps running.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(err) = signal.await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        future::pending::<()>().await;
        return;
    }
    tracing::info!("Shutting down proxy");
}

pub async fn start(proxy: ProxyService) -> Result<()> {
    let address = Config::get(ConfigKey::ListenAddress);
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(address = %listener.local_addr()?, "Proxy listening");

    axum::serve(listener, router(Arc::new(proxy)))
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    return Ok(());
}
