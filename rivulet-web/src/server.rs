//! Axum server wiring for the addon endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use rivulet_core::resolver::StreamResolver;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers::{addon_manifest, stream_lookup};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The resolution pipeline, built once at startup.
    pub resolver: Arc<StreamResolver>,
}

/// Builds the addon router over the given state.
///
/// CORS is permissive: addon clients load the manifest and streams from
/// arbitrary origins.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/manifest.json", get(addon_manifest))
        .route("/stream/{kind}/{id}", get(stream_lookup))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds and serves the addon until the process is stopped.
///
/// # Errors
/// - `Box<dyn std::error::Error>` - Failed to bind the address or serve
pub async fn run_server(
    resolver: Arc<StreamResolver>,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(AppState { resolver });

    let address = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("addon listening on http://{address}");
    info!("manifest: http://{address}/manifest.json");

    axum::serve(listener, app).await?;
    Ok(())
}
