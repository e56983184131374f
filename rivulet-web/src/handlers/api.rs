//! Handlers for the addon manifest and stream lookup endpoints.

use axum::extract::{Path, State};
use axum::response::Json;
use rivulet_core::types::{MediaKind, StreamsResponse};
use serde::Serialize;
use tracing::debug;

use crate::server::AppState;

/// Addon manifest advertised to media-browsing clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Reverse-DNS addon identifier.
    pub id: &'static str,
    /// Addon version.
    pub version: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Display description.
    pub description: &'static str,
    /// Supported media kinds.
    pub types: Vec<MediaKind>,
    /// Catalogs offered by the addon; none, this addon only resolves streams.
    pub catalogs: Vec<serde_json::Value>,
    /// Resources served by the addon.
    pub resources: Vec<&'static str>,
    /// Identifier prefixes the addon answers for.
    pub id_prefixes: Vec<&'static str>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            id: "org.rivulet.addon",
            version: env!("CARGO_PKG_VERSION"),
            name: "Rivulet",
            description: "Watch movies and TV shows using multiple providers",
            types: vec![MediaKind::Movie, MediaKind::Series],
            catalogs: Vec::new(),
            resources: vec!["stream"],
            id_prefixes: vec!["tt"],
        }
    }
}

/// `GET /manifest.json`
pub async fn addon_manifest() -> Json<Manifest> {
    Json(Manifest::default())
}

/// `GET /stream/{kind}/{id}.json`
///
/// Always answers 200 with a `streams` array; an unrecognized kind or an
/// unresolvable id degrades to the empty response, never an error status.
pub async fn stream_lookup(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Json<StreamsResponse> {
    let composite_id = strip_json_suffix(&id);

    let Ok(kind) = kind.parse::<MediaKind>() else {
        debug!(kind, "unrecognized media kind");
        return Json(StreamsResponse::empty());
    };

    debug!(%kind, composite_id, "stream lookup");
    Json(state.resolver.resolve(kind, composite_id).await)
}

/// Strips the `.json` route suffix clients append to the composite id.
fn strip_json_suffix(id: &str) -> &str {
    id.strip_suffix(".json").unwrap_or(id)
}
