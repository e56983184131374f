//! Addon HTTP boundary tests through the real router.
//!
//! The contract under test: well-formed routes always answer 200 with a
//! `streams` array, no matter what failed underneath.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rivulet_web::{AppState, router};
use tower::ServiceExt;

use crate::support::{ScriptedProvider, payload_with_files, shawshank_resolver};

async fn get_json(
    app: axum::Router,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn app_with(providers: Vec<Arc<dyn rivulet_core::providers::StreamProvider>>) -> axum::Router {
    router(AppState {
        resolver: shawshank_resolver(providers),
    })
}

#[tokio::test]
async fn manifest_advertises_the_stream_resource() {
    let app = app_with(vec![]);

    let (status, json) = get_json(app, "/manifest.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "org.rivulet.addon");
    assert_eq!(json["resources"][0], "stream");
    assert_eq!(json["idPrefixes"][0], "tt");
    assert_eq!(json["catalogs"], serde_json::json!([]));
}

#[tokio::test]
async fn movie_stream_route_answers_normalized_records() {
    let payload = payload_with_files("ProviderX", &[("https://cdn/x.mp4", "1080p", "mp4")]);
    let app = app_with(vec![Arc::new(ScriptedProvider::answering(
        "ProviderX",
        payload,
    ))]);

    let (status, json) = get_json(app, "/stream/movie/tt0111161.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["streams"][0]["title"], "ProviderX - 1080p mp4");
    assert_eq!(json["streams"][0]["url"], "https://cdn/x.mp4");
    assert_eq!(json["streams"][0]["groupKey"], "providerx");
    assert_eq!(json["streams"][0]["isDirectPlayable"], false);
}

#[tokio::test]
async fn series_route_with_failing_providers_still_answers_ok() {
    let app = app_with(vec![Arc::new(ScriptedProvider::failing("ProviderA"))]);

    let (status, json) = get_json(app, "/stream/series/tt0111161:1:5.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["streams"], serde_json::json!([]));
}

#[tokio::test]
async fn unrecognized_kind_degrades_to_empty_streams() {
    let payload = payload_with_files("ProviderX", &[("https://cdn/x.mp4", "1080p", "mp4")]);
    let app = app_with(vec![Arc::new(ScriptedProvider::answering(
        "ProviderX",
        payload,
    ))]);

    let (status, json) = get_json(app, "/stream/music/tt0111161.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["streams"], serde_json::json!([]));
}

#[tokio::test]
async fn malformed_series_id_degrades_to_empty_streams() {
    let payload = payload_with_files("ProviderX", &[("https://cdn/x.mp4", "1080p", "mp4")]);
    let app = app_with(vec![Arc::new(ScriptedProvider::answering(
        "ProviderX",
        payload,
    ))]);

    let (status, json) = get_json(app, "/stream/series/tt0111161.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["streams"], serde_json::json!([]));
}
