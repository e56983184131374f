//! Mock provider implementation for testing.

#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use super::StreamProvider;
#[cfg(test)]
use crate::errors::ResolveError;
#[cfg(test)]
use crate::types::{FileEntry, MediaKind, ProviderPayload, SourceEntry, TitleIdentifiers};

/// Scripted provider for testing dispatch isolation and timeouts.
#[cfg(test)]
#[derive(Debug)]
pub struct MockProvider {
    name: String,
    payload: Result<ProviderPayload, ResolveError>,
    delay: Option<Duration>,
    supports_series: bool,
}

#[cfg(test)]
impl MockProvider {
    /// Provider that answers with the given payload.
    pub fn succeeding(name: &str, payload: ProviderPayload) -> Self {
        Self {
            name: name.to_string(),
            payload: Ok(payload),
            delay: None,
            supports_series: true,
        }
    }

    /// Provider that always fails.
    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            payload: Err(ResolveError::ProviderFailed {
                provider: name.to_string(),
                reason: "scripted failure".to_string(),
            }),
            delay: None,
            supports_series: true,
        }
    }

    /// Provider that sleeps before answering, for timeout tests.
    pub fn slow(name: &str, payload: ProviderPayload, delay: Duration) -> Self {
        Self {
            name: name.to_string(),
            payload: Ok(payload),
            delay: Some(delay),
            supports_series: true,
        }
    }

    /// Restricts the provider to movies only.
    pub fn movies_only(mut self) -> Self {
        self.supports_series = false;
        self
    }

    /// One-source, one-file payload for the given URL.
    pub fn single_file_payload(provider: &str, url: &str) -> ProviderPayload {
        ProviderPayload {
            sources: vec![SourceEntry {
                provider: provider.to_string(),
                files: vec![FileEntry {
                    file: Some(url.to_string()),
                    quality: Some("1080p".to_string()),
                    container: Some("mp4".to_string()),
                }],
            }],
        }
    }
}

#[cfg(test)]
#[async_trait]
impl StreamProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, kind: MediaKind) -> bool {
        match kind {
            MediaKind::Movie => true,
            MediaKind::Series => self.supports_series,
        }
    }

    async fn fetch_movie(
        &self,
        _identifiers: &TitleIdentifiers,
    ) -> Result<ProviderPayload, ResolveError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.payload.clone()
    }

    async fn fetch_episode(
        &self,
        identifiers: &TitleIdentifiers,
        _season: u32,
        _episode: u32,
    ) -> Result<ProviderPayload, ResolveError> {
        self.fetch_movie(identifiers).await
    }
}
