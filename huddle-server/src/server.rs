use crate::config::ServerConfig;
use crate::http::{AppState, router};
use crate::registry::RegistryHandle;
use crate::signaling::SignalingService;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// The relay: registry task, signaling fan-out and the HTTP/WebSocket surface.
pub struct RelayServer {
    state: Arc<AppState>,
    router: Router,
}

impl RelayServer {
    /// Must be called inside a tokio runtime; the registry task is spawned here.
    pub fn new(config: &ServerConfig) -> Self {
        let signaling = SignalingService::new();
        let registry = RegistryHandle::spawn(Arc::new(signaling.clone()), config.disconnect_policy);

        let state = Arc::new(AppState {
            signaling,
            registry,
            heartbeat: config.heartbeat,
        });
        let router = router(state.clone(), config);

        Self { state, router }
    }

    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Relay server terminated with an error")
    }
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Relay listening on http://{}", addr);

    RelayServer::new(&config).serve(listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
