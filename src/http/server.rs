//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the echo responders
//! - Wire up middleware (request logging, timeout)
//! - Bind server to listener with peer addresses attached
//! - Drain in-flight requests on shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;

use crate::config::ServerConfig;
use crate::http::{echo, middleware::request_log};
use crate::observability::LogSink;

/// HTTP server for the echo endpoints.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server recording requests to `sink`.
    pub fn new(config: ServerConfig, sink: Arc<dyn LogSink>) -> Self {
        let router = Self::build_router(&config, sink);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, sink: Arc<dyn LogSink>) -> Router {
        let router = echo::router(&config.echo);
        request_log::apply(router, &config.request_log, sink).layer(TimeoutLayer::new(
            Duration::from_secs(config.timeouts.request_secs),
        ))
    }

    /// The fully layered router, for driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_log = self.config.request_log.enabled,
            detail = ?self.config.request_log.detail,
            max_delay_secs = self.config.echo.max_delay_secs,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Detail;
    use crate::observability::MemorySink;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_logs_through_configured_flavor() {
        let sink = Arc::new(MemorySink::new());
        let mut config = ServerConfig::default();
        config.request_log.detail = Detail::Simple;
        let server = HttpServer::new(config, sink.clone());

        let request = Request::builder()
            .method("DELETE")
            .uri("/items/7?force=true")
            .body(Body::empty())
            .unwrap();
        let response = server.router().oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        let infos = sink.infos();
        assert_eq!(infos.len(), 1);
        assert_eq!(
            infos[0].to_string(),
            r#"received request: {"method":"DELETE","urlPath":"/items/7"}"#
        );
    }
}
