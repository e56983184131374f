//! Resolver facade tying translation, dispatch, normalization and assembly
//! into one degrade-gracefully pipeline.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::assembler::assemble;
use crate::config::{DispatchConfig, RivuletConfig};
use crate::dispatcher::ProviderDispatcher;
use crate::errors::ResolveError;
use crate::normalizer::normalize;
use crate::providers::StreamProvider;
use crate::translator::{
    IdentifierTranslator, TmdbAuthority, TranslationAuthority, external_id_of,
    parse_episode_address,
};
use crate::types::{MediaKind, MediaReference, StreamsResponse};

/// Stateless stream resolution pipeline.
///
/// Built once at startup; every call to [`resolve`](Self::resolve) is an
/// independent request holding no state across invocations. No failure mode
/// escapes as an error: callers always receive a well-formed, possibly
/// empty, response.
#[derive(Debug)]
pub struct StreamResolver {
    translator: IdentifierTranslator,
    dispatcher: ProviderDispatcher,
}

impl StreamResolver {
    /// Creates a resolver with the TMDB-backed translation authority.
    ///
    /// # Errors
    /// - `ResolveError::TranslationFailed` - Authority HTTP client
    ///   construction failed
    pub fn new(
        config: RivuletConfig,
        providers: Vec<Arc<dyn StreamProvider>>,
    ) -> Result<Self, ResolveError> {
        let authority = TmdbAuthority::new(&config.translation)?;
        Ok(Self::with_authority(
            Box::new(authority),
            providers,
            config.dispatch,
        ))
    }

    /// Creates a resolver with an explicit translation authority.
    ///
    /// The seam tests and alternative deployments use to substitute the
    /// lookup backend.
    pub fn with_authority(
        authority: Box<dyn TranslationAuthority>,
        providers: Vec<Arc<dyn StreamProvider>>,
        dispatch: DispatchConfig,
    ) -> Self {
        Self {
            translator: IdentifierTranslator::new(authority),
            dispatcher: ProviderDispatcher::new(providers, dispatch),
        }
    }

    /// Resolves a composite identifier into an ordered list of streams.
    ///
    /// Movies are addressed as `<externalId>`, series as
    /// `<externalId>:<season>:<episode>`. Invalid references, missing
    /// translations, provider failures and timeouts all degrade to an empty
    /// response; they are logged, never surfaced.
    ///
    /// Translation time is charged against the request deadline, so the
    /// whole resolution, not just the provider fan-out, stays within it.
    pub async fn resolve(&self, kind: MediaKind, composite_id: &str) -> StreamsResponse {
        let started = Instant::now();

        let Some(reference) = reference_from(kind, composite_id) else {
            debug!(%kind, composite_id, "unparseable composite identifier");
            return StreamsResponse::empty();
        };

        let identifiers = match self.translator.translate(&reference).await {
            Ok(Some(identifiers)) => identifiers,
            Ok(None) => {
                debug!(external_id = %reference.external_id, "no translation mapping");
                return StreamsResponse::empty();
            }
            Err(e) => {
                warn!(composite_id, error = %e, "translation failed");
                return StreamsResponse::empty();
            }
        };

        let outcomes = self
            .dispatcher
            .dispatch_with_spent(&identifiers, kind, reference.episode, started.elapsed())
            .await;

        let normalized = outcomes.into_iter().filter_map(|outcome| {
            let payload = outcome.result.ok()?;
            let records = normalize(&outcome.provider, &payload);
            Some((outcome.provider, records))
        });

        StreamsResponse {
            streams: assemble(normalized),
        }
    }
}

/// Builds the media reference for a composite identifier.
///
/// Series composites must parse strictly; movies take the leading external
/// id. Syntax validation of the external id itself happens in the
/// translator, before any network call.
fn reference_from(kind: MediaKind, composite_id: &str) -> Option<MediaReference> {
    match kind {
        MediaKind::Movie => Some(MediaReference::movie(external_id_of(composite_id))),
        MediaKind::Series => {
            let address = parse_episode_address(composite_id)?;
            Some(MediaReference::series(external_id_of(composite_id), address))
        }
    }
}
