//! Server execution logic.

use std::{future::Future, path::Path, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{services::ServeFile, trace::TraceLayer};

use crate::usecase::HubHandle;

use super::{
    config::ServerConfig,
    handler::{health_check, landing_page, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the relay's router.
///
/// `landing_page_file` replaces the embedded page served at `/`.
pub fn build_router(state: Arc<AppState>, landing_page_file: Option<&Path>) -> Router {
    let router = Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check));

    let router = match landing_page_file {
        Some(path) => router.route_service("/", ServeFile::new(path)),
        None => router.route("/", get(landing_page)),
    };

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Broadcast relay server
///
/// # Example
///
/// ```ignore
/// let (hub, _task) = spawn_hub(RelayHub::new(Arc::new(WebSocketBroadcaster::new())));
/// Server::new(hub, ServerConfig::default()).run().await?;
/// ```
pub struct Server {
    hub: HubHandle,
    config: ServerConfig,
}

impl Server {
    pub fn new(hub: HubHandle, config: ServerConfig) -> Self {
        Self { hub, config }
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound (for instance the
    /// port is already in use) or if serving fails.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app_state = Arc::new(AppState { hub: self.hub });
        let app = build_router(app_state, self.config.landing_page.as_deref());

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
