//! # HTTP Server
//!
//! Combines the form and observability routers behind one CORS layer.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::form_routes::form_routes;
use super::observability_routes::observability_routes;
use crate::core::FormService;
use crate::observability::{log_event_with_fields, Event};

/// HTTP server over a shared [`FormService`]
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn with_config(config: HttpServerConfig, service: Arc<FormService>) -> Self {
        let router = Self::build_router(&config, service);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, service: Arc<FormService>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(observability_routes(Arc::clone(&service)))
            .merge(form_routes(service))
            .layer(cors)
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the listener fails
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let addr_str = addr.to_string();
        log_event_with_fields(Event::Serving, &[("addr", addr_str.as_str()), ("transport", "http")]);

        axum::serve(listener, self.router).await
    }
}
