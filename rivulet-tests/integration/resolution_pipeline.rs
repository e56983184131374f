//! End-to-end pipeline scenarios: translation, dispatch, normalization and
//! assembly working together against scripted collaborators.

use std::sync::Arc;

use rivulet_core::types::MediaKind;

use crate::support::{ScriptedProvider, payload_with_files, shawshank_resolver};

#[tokio::test]
async fn movie_resolution_produces_the_documented_record() {
    let payload = payload_with_files("ProviderX", &[("https://cdn/x.mp4", "1080p", "mp4")]);
    let resolver = shawshank_resolver(vec![Arc::new(ScriptedProvider::answering(
        "ProviderX",
        payload,
    ))]);

    let response = resolver.resolve(MediaKind::Movie, "tt0111161").await;

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "streams": [{
                "title": "ProviderX - 1080p mp4",
                "url": "https://cdn/x.mp4",
                "groupKey": "providerx",
                "isDirectPlayable": false
            }]
        })
    );
}

#[tokio::test]
async fn unknown_reference_resolves_to_empty_streams() {
    let payload = payload_with_files("ProviderX", &[("https://cdn/x.mp4", "1080p", "mp4")]);
    let resolver = shawshank_resolver(vec![Arc::new(ScriptedProvider::answering(
        "ProviderX",
        payload,
    ))]);

    let response = resolver.resolve(MediaKind::Movie, "tt9999999").await;
    assert!(response.streams.is_empty());
}

#[tokio::test]
async fn failing_provider_is_isolated_from_successful_sibling() {
    let payload = payload_with_files(
        "ProviderB",
        &[
            ("https://cdn/b1.mp4", "1080p", "mp4"),
            ("https://cdn/b2.mp4", "720p", "mp4"),
        ],
    );
    let resolver = shawshank_resolver(vec![
        Arc::new(ScriptedProvider::failing("ProviderA")),
        Arc::new(ScriptedProvider::answering("ProviderB", payload)),
    ]);

    let response = resolver.resolve(MediaKind::Movie, "tt0111161").await;

    assert_eq!(response.streams.len(), 2);
    assert!(response.streams.iter().all(|s| s.group_key == "providerb"));
}

#[tokio::test]
async fn series_with_every_provider_failing_resolves_to_empty_streams() {
    let resolver = shawshank_resolver(vec![
        Arc::new(ScriptedProvider::failing("ProviderA")),
        Arc::new(ScriptedProvider::failing("ProviderB")),
    ]);

    let response = resolver.resolve(MediaKind::Series, "tt0111161:1:5").await;
    assert!(response.streams.is_empty());
}

#[tokio::test]
async fn mirrored_urls_across_providers_collapse_to_first_seen() {
    let first = payload_with_files("ProviderA", &[("https://x/a.mp4", "1080p", "mp4")]);
    let second = payload_with_files("ProviderB", &[("https://x/a.mp4", "720p", "mkv")]);
    let resolver = shawshank_resolver(vec![
        Arc::new(ScriptedProvider::answering("ProviderA", first)),
        Arc::new(ScriptedProvider::answering("ProviderB", second)),
    ]);

    let response = resolver.resolve(MediaKind::Movie, "tt0111161").await;

    assert_eq!(response.streams.len(), 1);
    assert_eq!(response.streams[0].title, "ProviderA - 1080p mp4");
}

#[tokio::test]
async fn repeated_resolution_is_deterministic() {
    let payload = payload_with_files(
        "ProviderX",
        &[
            ("https://cdn/a.mp4", "1080p", "mp4"),
            ("https://cdn/b.mp4", "720p", "mp4"),
        ],
    );
    let resolver = shawshank_resolver(vec![Arc::new(ScriptedProvider::answering(
        "ProviderX",
        payload,
    ))]);

    let first = resolver.resolve(MediaKind::Movie, "tt0111161").await;
    let second = resolver.resolve(MediaKind::Movie, "tt0111161").await;
    assert_eq!(first, second);
}
