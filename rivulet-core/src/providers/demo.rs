//! Demo provider for offline development.

use async_trait::async_trait;

use super::StreamProvider;
use crate::errors::ResolveError;
use crate::types::{FileEntry, MediaKind, ProviderPayload, SourceEntry, TitleIdentifiers};

/// Demo provider returning canned stream data.
///
/// Lets the complete resolution workflow run without external API calls;
/// URLs point at a placeholder CDN and are not actually playable.
#[derive(Debug, Default)]
pub struct DemoProvider;

impl DemoProvider {
    /// Creates a new demo provider.
    pub fn new() -> Self {
        Self
    }

    fn payload(&self, path: String) -> ProviderPayload {
        ProviderPayload {
            sources: vec![SourceEntry {
                provider: "Demo/Embed".to_string(),
                files: vec![
                    FileEntry {
                        file: Some(format!("https://demo.invalid/{path}/1080.mp4")),
                        quality: Some("1080p".to_string()),
                        container: Some("mp4".to_string()),
                    },
                    FileEntry {
                        file: Some(format!("https://demo.invalid/{path}/720.mp4")),
                        quality: Some("720p".to_string()),
                        container: Some("mp4".to_string()),
                    },
                    // Unlabeled variant, exercises the normalizer defaults.
                    FileEntry {
                        file: Some(format!("https://demo.invalid/{path}/alt.m3u8")),
                        quality: None,
                        container: None,
                    },
                ],
            }],
        }
    }
}

#[async_trait]
impl StreamProvider for DemoProvider {
    fn name(&self) -> &str {
        "Demo"
    }

    fn supports(&self, _kind: MediaKind) -> bool {
        true
    }

    async fn fetch_movie(
        &self,
        identifiers: &TitleIdentifiers,
    ) -> Result<ProviderPayload, ResolveError> {
        Ok(self.payload(format!("movie/{}", identifiers.tmdb_id)))
    }

    async fn fetch_episode(
        &self,
        identifiers: &TitleIdentifiers,
        season: u32,
        episode: u32,
    ) -> Result<ProviderPayload, ResolveError> {
        Ok(self.payload(format!("tv/{}/{season}/{episode}", identifiers.tmdb_id)))
    }
}
