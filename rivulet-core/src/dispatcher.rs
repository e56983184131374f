//! Concurrent provider fan-out with per-provider failure isolation.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::DispatchConfig;
use crate::errors::ResolveError;
use crate::providers::StreamProvider;
use crate::types::{EpisodeAddress, MediaKind, ProviderPayload, TitleIdentifiers};

/// Outcome of a single provider invocation.
///
/// Failure is a value, not an exception: the type makes the dispatcher's
/// isolation guarantee explicit instead of relying on suppression by
/// convention.
#[derive(Debug)]
pub struct ProviderOutcome {
    /// Name of the invoked provider.
    pub provider: String,
    /// The provider's payload, or the isolated failure.
    pub result: Result<ProviderPayload, ResolveError>,
}

/// Fans a resolved identifier out to every supporting provider.
///
/// Providers run concurrently; the dispatcher waits for all of them (no
/// first-success short-circuit) because callers want every available stream.
/// Output order is registration order, independent of completion timing.
#[derive(Debug, Clone)]
pub struct ProviderDispatcher {
    providers: Vec<Arc<dyn StreamProvider>>,
    config: DispatchConfig,
}

impl ProviderDispatcher {
    /// Creates a dispatcher over the given providers.
    pub fn new(providers: Vec<Arc<dyn StreamProvider>>, config: DispatchConfig) -> Self {
        Self { providers, config }
    }

    /// Number of registered providers.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Queries every provider supporting `kind` and collects each outcome.
    ///
    /// A provider that errors or exceeds its time budget contributes a
    /// `Failed` outcome and never disturbs its siblings. Series dispatch
    /// without an episode address is a precondition violation signaled by an
    /// empty outcome list, not silently ignored.
    pub async fn dispatch(
        &self,
        identifiers: &TitleIdentifiers,
        kind: MediaKind,
        episode: Option<EpisodeAddress>,
    ) -> Vec<ProviderOutcome> {
        self.dispatch_with_spent(identifiers, kind, episode, Duration::ZERO)
            .await
    }

    /// Like [`dispatch`](Self::dispatch), with part of the request deadline
    /// already consumed upstream.
    ///
    /// The resolver charges translation time here so the whole resolution,
    /// not just the fan-out, stays within the request deadline.
    pub async fn dispatch_with_spent(
        &self,
        identifiers: &TitleIdentifiers,
        kind: MediaKind,
        episode: Option<EpisodeAddress>,
        spent: Duration,
    ) -> Vec<ProviderOutcome> {
        if kind == MediaKind::Series && episode.is_none() {
            warn!("series dispatch without episode address, skipping providers");
            return Vec::new();
        }

        // Cap each provider by what is left of the request deadline so the
        // fan-out can never outlive the caller's budget.
        let remaining = self.config.request_deadline.saturating_sub(spent);
        let budget = self.config.provider_timeout.min(remaining);

        let calls = self
            .providers
            .iter()
            .filter(|provider| provider.supports(kind))
            .map(|provider| async move {
                let name = provider.name().to_string();

                let call = match (kind, episode) {
                    (MediaKind::Series, Some(address)) => {
                        provider.fetch_episode(identifiers, address.season, address.episode)
                    }
                    _ => provider.fetch_movie(identifiers),
                };

                let result = match tokio::time::timeout(budget, call).await {
                    Ok(result) => result,
                    Err(_) => Err(ResolveError::Timeout {
                        provider: name.clone(),
                    }),
                };

                match &result {
                    Ok(payload) => {
                        debug!(provider = %name, sources = payload.sources.len(), "provider answered");
                    }
                    Err(e) => {
                        warn!(provider = %name, error = %e, "provider lookup failed");
                    }
                }

                ProviderOutcome {
                    provider: name,
                    result,
                }
            });

        join_all(calls).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::providers::MockProvider;

    fn identifiers() -> TitleIdentifiers {
        TitleIdentifiers::new(278)
    }

    fn dispatcher_with(providers: Vec<Arc<dyn StreamProvider>>) -> ProviderDispatcher {
        ProviderDispatcher::new(providers, DispatchConfig::default())
    }

    #[tokio::test]
    async fn failing_provider_does_not_disturb_siblings() {
        let payload = MockProvider::single_file_payload("ProviderB", "https://cdn/b.mp4");
        let dispatcher = dispatcher_with(vec![
            Arc::new(MockProvider::failing("ProviderA")),
            Arc::new(MockProvider::succeeding("ProviderB", payload)),
        ]);

        let outcomes = dispatcher
            .dispatch(&identifiers(), MediaKind::Movie, None)
            .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].result.is_err());
        let payload = outcomes[1].result.as_ref().unwrap();
        assert_eq!(payload.sources[0].files.len(), 1);
    }

    #[tokio::test]
    async fn outcomes_preserve_registration_order() {
        // The slower provider is registered first; its outcome must still
        // come first.
        let slow_payload = MockProvider::single_file_payload("Slow", "https://cdn/slow.mp4");
        let fast_payload = MockProvider::single_file_payload("Fast", "https://cdn/fast.mp4");
        let dispatcher = dispatcher_with(vec![
            Arc::new(MockProvider::slow(
                "Slow",
                slow_payload,
                Duration::from_millis(50),
            )),
            Arc::new(MockProvider::succeeding("Fast", fast_payload)),
        ]);

        let outcomes = dispatcher
            .dispatch(&identifiers(), MediaKind::Movie, None)
            .await;

        assert_eq!(outcomes[0].provider, "Slow");
        assert_eq!(outcomes[1].provider, "Fast");
    }

    #[tokio::test]
    async fn provider_exceeding_budget_becomes_timeout_outcome() {
        let payload = MockProvider::single_file_payload("Slow", "https://cdn/slow.mp4");
        let config = DispatchConfig {
            provider_timeout: Duration::from_millis(20),
            request_deadline: Duration::from_secs(30),
        };
        let dispatcher = ProviderDispatcher::new(
            vec![Arc::new(MockProvider::slow(
                "Slow",
                payload,
                Duration::from_secs(5),
            ))],
            config,
        );

        let outcomes = dispatcher
            .dispatch(&identifiers(), MediaKind::Movie, None)
            .await;

        assert!(matches!(
            outcomes[0].result,
            Err(ResolveError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn deadline_caps_provider_budget() {
        let payload = MockProvider::single_file_payload("Slow", "https://cdn/slow.mp4");
        let config = DispatchConfig {
            provider_timeout: Duration::from_secs(30),
            request_deadline: Duration::from_millis(20),
        };
        let dispatcher = ProviderDispatcher::new(
            vec![Arc::new(MockProvider::slow(
                "Slow",
                payload,
                Duration::from_secs(5),
            ))],
            config,
        );

        let outcomes = dispatcher
            .dispatch(&identifiers(), MediaKind::Movie, None)
            .await;

        assert!(matches!(
            outcomes[0].result,
            Err(ResolveError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn time_spent_upstream_shrinks_the_provider_budget() {
        // 50ms already spent of an 80ms deadline leaves 30ms; the 50ms
        // provider would fit the full deadline but not the remainder.
        let payload = MockProvider::single_file_payload("Slow", "https://cdn/slow.mp4");
        let config = DispatchConfig {
            provider_timeout: Duration::from_secs(30),
            request_deadline: Duration::from_millis(80),
        };
        let dispatcher = ProviderDispatcher::new(
            vec![Arc::new(MockProvider::slow(
                "Slow",
                payload,
                Duration::from_millis(50),
            ))],
            config,
        );

        let outcomes = dispatcher
            .dispatch_with_spent(
                &identifiers(),
                MediaKind::Movie,
                None,
                Duration::from_millis(50),
            )
            .await;

        assert!(matches!(
            outcomes[0].result,
            Err(ResolveError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn unsupported_providers_are_skipped() {
        let payload = MockProvider::single_file_payload("MoviesOnly", "https://cdn/m.mp4");
        let dispatcher = dispatcher_with(vec![Arc::new(
            MockProvider::succeeding("MoviesOnly", payload).movies_only(),
        )]);

        let outcomes = dispatcher
            .dispatch(
                &identifiers(),
                MediaKind::Series,
                Some(EpisodeAddress {
                    season: 1,
                    episode: 2,
                }),
            )
            .await;

        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn series_dispatch_without_episode_returns_nothing() {
        let payload = MockProvider::single_file_payload("ProviderA", "https://cdn/a.mp4");
        let dispatcher =
            dispatcher_with(vec![Arc::new(MockProvider::succeeding("ProviderA", payload))]);

        let outcomes = dispatcher
            .dispatch(&identifiers(), MediaKind::Series, None)
            .await;

        assert!(outcomes.is_empty());
    }
}
