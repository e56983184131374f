//! HTTP-backed provider client for embed-style stream APIs.

use std::time::Duration;

use async_trait::async_trait;

use super::StreamProvider;
use crate::errors::ResolveError;
use crate::types::{MediaKind, ProviderPayload, TitleIdentifiers};

/// Provider client for an embed API returning provider-shaped JSON.
///
/// The endpoint contract is `GET {base}/movie/{tmdbId}` and
/// `GET {base}/tv/{tmdbId}/{season}/{episode}`, each answering a
/// [`ProviderPayload`] document. What the upstream does to produce that
/// document (scraping, aggregation) is outside this client.
#[derive(Debug)]
pub struct EmbedApiProvider {
    name: String,
    client: reqwest::Client,
    base_url: String,
}

impl EmbedApiProvider {
    /// Creates a provider client for the given endpoint.
    ///
    /// # Errors
    /// - `ResolveError::ProviderFailed` - HTTP client construction failed
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ResolveError> {
        Self::with_timeout(name, base_url, Duration::from_secs(12))
    }

    /// Creates a provider client with a custom request timeout.
    ///
    /// The dispatcher applies its own budget as well; this timeout only
    /// bounds the underlying HTTP request.
    ///
    /// # Errors
    /// - `ResolveError::ProviderFailed` - HTTP client construction failed;
    ///   a default client would silently drop the request timeout
    pub fn with_timeout(
        name: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ResolveError> {
        let name = name.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResolveError::ProviderFailed {
                provider: name.clone(),
                reason: format!("HTTP client construction failed: {e}"),
            })?;

        Ok(Self {
            name,
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch_payload(&self, url: &str) -> Result<ProviderPayload, ResolveError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ResolveError::Timeout {
                    provider: self.name.clone(),
                }
            } else {
                ResolveError::ProviderFailed {
                    provider: self.name.clone(),
                    reason: format!("request failed: {e}"),
                }
            }
        })?;

        if !response.status().is_success() {
            return Err(ResolveError::ProviderFailed {
                provider: self.name.clone(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ResolveError::MalformedPayload {
                reason: format!("{}: {e}", self.name),
            })
    }
}

#[async_trait]
impl StreamProvider for EmbedApiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, _kind: MediaKind) -> bool {
        true
    }

    async fn fetch_movie(
        &self,
        identifiers: &TitleIdentifiers,
    ) -> Result<ProviderPayload, ResolveError> {
        let url = format!("{}/movie/{}", self.base_url, identifiers.tmdb_id);
        self.fetch_payload(&url).await
    }

    async fn fetch_episode(
        &self,
        identifiers: &TitleIdentifiers,
        season: u32,
        episode: u32,
    ) -> Result<ProviderPayload, ResolveError> {
        let url = format!(
            "{}/tv/{}/{season}/{episode}",
            self.base_url, identifiers.tmdb_id
        );
        self.fetch_payload(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_reports_configured_name() {
        let provider = EmbedApiProvider::new("EmbedSU", "http://localhost:9000").unwrap();
        assert_eq!(provider.name(), "EmbedSU");
        assert!(provider.supports(MediaKind::Movie));
        assert!(provider.supports(MediaKind::Series));
    }
}
