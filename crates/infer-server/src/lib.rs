use std::net::SocketAddr;

use axum::Router;
use http::StatusCode;
use infer_config::Config;
use infer_llm::{InferenceState, Orchestrator};
use tower_http::trace::TraceLayer;

/// Liveness probe
async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the provider client or a tool cannot be constructed
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let orchestrator = Orchestrator::from_config(config)?;
        Ok(Self::with_orchestrator(orchestrator, config))
    }

    /// Build the server around an existing orchestrator
    pub fn with_orchestrator(orchestrator: Orchestrator, config: &Config) -> Self {
        let mut app = Router::new();

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health));
        }

        app = app.merge(infer_llm::inference_router(InferenceState::new(orchestrator, config)));
        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address: config.server.listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Override the listen address
    #[must_use]
    pub const fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
