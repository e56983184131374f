//! Provider client implementations for stream lookup.
//!
//! Each provider is a black box behind [`StreamProvider`]: the dispatcher is
//! written once against this interface and knows nothing about individual
//! providers. New providers register an implementation without touching
//! dispatch logic.

use async_trait::async_trait;

use crate::errors::ResolveError;
use crate::types::{MediaKind, ProviderPayload, TitleIdentifiers};

pub mod demo;
pub mod embed;
pub mod mock;

pub use demo::DemoProvider;
pub use embed::EmbedApiProvider;
#[cfg(test)]
pub use mock::MockProvider;

/// Capability interface for third-party stream providers.
///
/// Implementations return an already-parsed, provider-shaped payload or a
/// failure; how they obtain it (scraping, embed APIs) is their own concern.
#[async_trait]
pub trait StreamProvider: Send + Sync + std::fmt::Debug {
    /// Stable provider name used for titles, grouping and logging.
    fn name(&self) -> &str;

    /// Whether this provider can serve the given media kind.
    fn supports(&self, kind: MediaKind) -> bool;

    /// Fetches stream sources for a movie.
    ///
    /// # Errors
    /// - `ResolveError::ProviderFailed` - Request or upstream error
    /// - `ResolveError::MalformedPayload` - Response could not be decoded
    /// - `ResolveError::Timeout` - Provider exceeded its time budget
    async fn fetch_movie(
        &self,
        identifiers: &TitleIdentifiers,
    ) -> Result<ProviderPayload, ResolveError>;

    /// Fetches stream sources for one episode of a series.
    ///
    /// # Errors
    /// - `ResolveError::ProviderFailed` - Request or upstream error
    /// - `ResolveError::MalformedPayload` - Response could not be decoded
    /// - `ResolveError::Timeout` - Provider exceeded its time budget
    async fn fetch_episode(
        &self,
        identifiers: &TitleIdentifiers,
        season: u32,
        episode: u32,
    ) -> Result<ProviderPayload, ResolveError>;
}
