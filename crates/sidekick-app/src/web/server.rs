use anyhow::Result;
use axum::Router;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::web::routes::{self, AppState};

/// Web server instance
pub struct WebServer {
    config: ServerConfig,
    state: AppState,
}

impl WebServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind the listener and serve until the process exits
    pub async fn start(self) -> Result<()> {
        let app = build_app(self.state, Some(&self.config.public_dir));

        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("sidekick listening on http://{}", self.config.bind_addr);
        tracing::info!("chat endpoint: POST http://{}/api/chat", self.config.bind_addr);

        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Full application router: API routes, static files, CORS and request tracing.
///
/// The static directory is only mounted when it exists.
pub fn build_app(state: AppState, public_dir: Option<&Path>) -> Router {
    let mut app = routes::create_router(state);

    if let Some(dir) = public_dir {
        if dir.is_dir() {
            tracing::info!("serving static files from {}", dir.display());
            app = app.fallback_service(ServeDir::new(dir));
        } else {
            tracing::debug!("static directory {} not found, skipping", dir.display());
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(cors).layer(TraceLayer::new_for_http())
}
