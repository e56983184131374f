//! Scripted authority and provider implementations shared across tests.

use std::sync::Arc;

use async_trait::async_trait;
use rivulet_core::config::DispatchConfig;
use rivulet_core::errors::ResolveError;
use rivulet_core::providers::StreamProvider;
use rivulet_core::resolver::StreamResolver;
use rivulet_core::translator::TranslationAuthority;
use rivulet_core::types::{
    FileEntry, MediaKind, ProviderPayload, SourceEntry, TitleIdentifiers,
};

/// Authority answering from a fixed external-id → internal-id table.
#[derive(Debug)]
pub struct FixedAuthority {
    mapping: Vec<(&'static str, u64)>,
}

impl FixedAuthority {
    pub fn new(mapping: Vec<(&'static str, u64)>) -> Self {
        Self { mapping }
    }
}

#[async_trait]
impl TranslationAuthority for FixedAuthority {
    async fn find_title(
        &self,
        external_id: &str,
        _kind: MediaKind,
    ) -> Result<Vec<u64>, ResolveError> {
        Ok(self
            .mapping
            .iter()
            .filter(|(known, _)| *known == external_id)
            .map(|(_, id)| *id)
            .collect())
    }

    async fn external_ids(&self, _tmdb_id: u64) -> Result<Option<String>, ResolveError> {
        Ok(None)
    }
}

/// Provider answering with a fixed payload or a scripted failure.
#[derive(Debug)]
pub struct ScriptedProvider {
    name: String,
    result: Result<ProviderPayload, ResolveError>,
}

impl ScriptedProvider {
    pub fn answering(name: &str, payload: ProviderPayload) -> Self {
        Self {
            name: name.to_string(),
            result: Ok(payload),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            result: Err(ResolveError::ProviderFailed {
                provider: name.to_string(),
                reason: "scripted failure".to_string(),
            }),
        }
    }
}

#[async_trait]
impl StreamProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, _kind: MediaKind) -> bool {
        true
    }

    async fn fetch_movie(
        &self,
        _identifiers: &TitleIdentifiers,
    ) -> Result<ProviderPayload, ResolveError> {
        self.result.clone()
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

/// Payload with one source holding the given (url, quality, container) files.
pub fn payload_with_files(label: &str, files: &[(&str, &str, &str)]) -> ProviderPayload {
    ProviderPayload {
        sources: vec![SourceEntry {
            provider: label.to_string(),
            files: files
                .iter()
                .map(|(url, quality, container)| FileEntry {
                    file: Some((*url).to_string()),
                    quality: Some((*quality).to_string()),
                    container: Some((*container).to_string()),
                })
                .collect(),
        }],
    }
}

/// Resolver mapping `tt0111161` → 278 over the given providers.
pub fn shawshank_resolver(providers: Vec<Arc<dyn StreamProvider>>) -> Arc<StreamResolver> {
    Arc::new(StreamResolver::with_authority(
        Box::new(FixedAuthority::new(vec![("tt0111161", 278)])),
        providers,
        DispatchConfig::default(),
    ))
}
