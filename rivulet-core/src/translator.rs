//! Identifier translation between the external namespace (IMDb-style ids)
//! and the internal namespace providers understand (TMDB ids).
//!
//! Also owns composite-identifier parsing: series requests arrive as
//! `<externalId>:<season>:<episode>` and are split here with a strict
//! pattern match, never a best-effort parse.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::TranslationConfig;
use crate::errors::ResolveError;
use crate::types::{EpisodeAddress, MediaKind, MediaReference, TitleIdentifiers};

fn external_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^tt\d+$").expect("valid external id pattern"))
}

fn composite_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^tt\d+:(\d+):(\d+)$").expect("valid composite id pattern"))
}

/// Extracts the external id from a composite identifier.
///
/// For movies the composite id is the external id itself; for series it is
/// everything before the first `:`.
pub fn external_id_of(composite_id: &str) -> &str {
    composite_id.split(':').next().unwrap_or(composite_id)
}

/// Parses a composite series identifier into its episode address.
///
/// Strict pattern match on `<externalId>:<season>:<episode>` with positive
/// season and episode numbers; any deviation yields `None`.
pub fn parse_episode_address(composite_id: &str) -> Option<EpisodeAddress> {
    let captures = composite_pattern().captures(composite_id)?;
    let season: u32 = captures[1].parse().ok()?;
    let episode: u32 = captures[2].parse().ok()?;
    if season == 0 || episode == 0 {
        return None;
    }
    Some(EpisodeAddress { season, episode })
}

/// External lookup authority mapping external-namespace ids onto the
/// internal namespace.
///
/// Implementations perform the actual HTTP calls; the translator is written
/// once against this interface so tests can substitute a scripted authority.
#[async_trait]
pub trait TranslationAuthority: Send + Sync + std::fmt::Debug {
    /// Looks up internal-namespace candidates for an external id.
    ///
    /// Returns candidates in the authority's order; an empty list means the
    /// authority has no mapping, which is an expected outcome.
    ///
    /// # Errors
    /// - `ResolveError::TranslationFailed` - Lookup request or decoding failed
    async fn find_title(
        &self,
        external_id: &str,
        kind: MediaKind,
    ) -> Result<Vec<u64>, ResolveError>;

    /// Fetches the secondary cross-reference id for a series title.
    ///
    /// # Errors
    /// - `ResolveError::TranslationFailed` - Lookup request or decoding failed
    async fn external_ids(&self, tmdb_id: u64) -> Result<Option<String>, ResolveError>;
}

/// TMDB-backed translation authority.
#[derive(Debug)]
pub struct TmdbAuthority {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    movie_results: Vec<FindEntry>,
    #[serde(default)]
    tv_results: Vec<FindEntry>,
}

#[derive(Debug, Deserialize)]
struct FindEntry {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ExternalIdsResponse {
    #[serde(default)]
    imdb_id: Option<String>,
}

impl TmdbAuthority {
    /// Creates an authority from translation configuration.
    ///
    /// # Errors
    /// - `ResolveError::TranslationFailed` - HTTP client construction failed;
    ///   a default client would silently drop the configured lookup timeout
    pub fn new(config: &TranslationConfig) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .timeout(config.lookup_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ResolveError::TranslationFailed {
                reason: format!("HTTP client construction failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ResolveError> {
        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ResolveError::TranslationFailed {
                reason: format!("request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(ResolveError::TranslationFailed {
                reason: format!("HTTP {}", response.status()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ResolveError::TranslationFailed {
                reason: format!("JSON decoding failed: {e}"),
            })
    }
}

#[async_trait]
impl TranslationAuthority for TmdbAuthority {
    async fn find_title(
        &self,
        external_id: &str,
        kind: MediaKind,
    ) -> Result<Vec<u64>, ResolveError> {
        let url = format!(
            "{}/find/{external_id}?external_source=imdb_id",
            self.base_url
        );
        let found: FindResponse = self.get_json(&url).await?;

        let candidates = match kind {
            MediaKind::Movie => found.movie_results,
            MediaKind::Series => found.tv_results,
        };
        Ok(candidates.into_iter().map(|entry| entry.id).collect())
    }

    async fn external_ids(&self, tmdb_id: u64) -> Result<Option<String>, ResolveError> {
        let url = format!("{}/tv/{tmdb_id}/external_ids", self.base_url);
        let ids: ExternalIdsResponse = self.get_json(&url).await?;
        Ok(ids.imdb_id)
    }
}

/// Translates media references into provider-namespace identifiers.
#[derive(Debug)]
pub struct IdentifierTranslator {
    authority: Box<dyn TranslationAuthority>,
}

impl IdentifierTranslator {
    /// Creates a translator backed by the given authority.
    pub fn new(authority: Box<dyn TranslationAuthority>) -> Self {
        Self { authority }
    }

    /// Resolves a media reference into provider-namespace identifiers.
    ///
    /// Performs exactly one authority lookup. Multiple candidates are
    /// disambiguated by taking the first in the authority's order, a
    /// documented simplification rather than a ranking. `Ok(None)` means
    /// the authority has no mapping, an expected non-error outcome.
    ///
    /// # Errors
    /// - `ResolveError::InvalidReference` - Id fails syntax validation; no
    ///   network call is made
    /// - `ResolveError::TranslationFailed` - Authority lookup failed
    pub async fn translate(
        &self,
        reference: &MediaReference,
    ) -> Result<Option<TitleIdentifiers>, ResolveError> {
        if !external_id_pattern().is_match(&reference.external_id) {
            return Err(ResolveError::InvalidReference {
                id: reference.external_id.clone(),
            });
        }

        let candidates = self
            .authority
            .find_title(&reference.external_id, reference.kind)
            .await?;

        let Some(&tmdb_id) = candidates.first() else {
            debug!(
                external_id = %reference.external_id,
                kind = %reference.kind,
                "no translation candidates"
            );
            return Ok(None);
        };

        let mut identifiers = TitleIdentifiers::new(tmdb_id);

        // Series enrichment is best-effort: providers fall back to the TMDB
        // id when the cross-reference id is unavailable.
        if reference.kind == MediaKind::Series {
            match self.authority.external_ids(tmdb_id).await {
                Ok(imdb_id) => identifiers.imdb_id = imdb_id,
                Err(e) => {
                    warn!(tmdb_id, error = %e, "external id enrichment failed");
                }
            }
        }

        Ok(Some(identifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct ScriptedAuthority {
        candidates: Vec<u64>,
        imdb_id: Option<String>,
        fail_find: bool,
        fail_external_ids: bool,
    }

    impl ScriptedAuthority {
        fn with_candidates(candidates: Vec<u64>) -> Self {
            Self {
                candidates,
                imdb_id: None,
                fail_find: false,
                fail_external_ids: false,
            }
        }
    }

    #[async_trait]
    impl TranslationAuthority for ScriptedAuthority {
        async fn find_title(
            &self,
            _external_id: &str,
            _kind: MediaKind,
        ) -> Result<Vec<u64>, ResolveError> {
            if self.fail_find {
                return Err(ResolveError::TranslationFailed {
                    reason: "scripted failure".to_string(),
                });
            }
            Ok(self.candidates.clone())
        }

        async fn external_ids(&self, _tmdb_id: u64) -> Result<Option<String>, ResolveError> {
            if self.fail_external_ids {
                return Err(ResolveError::TranslationFailed {
                    reason: "scripted failure".to_string(),
                });
            }
            Ok(self.imdb_id.clone())
        }
    }

    #[test]
    fn parse_episode_address_accepts_well_formed_composites() {
        assert_eq!(
            parse_episode_address("tt1234567:3:10"),
            Some(EpisodeAddress {
                season: 3,
                episode: 10
            })
        );
    }

    #[test]
    fn parse_episode_address_rejects_deviations() {
        assert_eq!(parse_episode_address("tt1234567"), None);
        assert_eq!(parse_episode_address("tt1234567:3"), None);
        assert_eq!(parse_episode_address("tt1234567:3:10:extra"), None);
        assert_eq!(parse_episode_address("tt1234567:a:10"), None);
        assert_eq!(parse_episode_address("1234567:3:10"), None);
        // Season and episode are 1-based.
        assert_eq!(parse_episode_address("tt1234567:0:10"), None);
        assert_eq!(parse_episode_address("tt1234567:3:0"), None);
    }

    #[test]
    fn authority_builds_from_default_config() {
        assert!(TmdbAuthority::new(&TranslationConfig::default()).is_ok());
    }

    #[test]
    fn external_id_of_splits_composites() {
        assert_eq!(external_id_of("tt0111161:1:5"), "tt0111161");
        assert_eq!(external_id_of("tt0111161"), "tt0111161");
    }

    #[tokio::test]
    async fn translate_rejects_malformed_ids_before_lookup() {
        let translator = IdentifierTranslator::new(Box::new(ScriptedAuthority {
            candidates: vec![278],
            imdb_id: None,
            fail_find: true, // would fail if the lookup were attempted
            fail_external_ids: false,
        }));

        let result = translator
            .translate(&MediaReference::movie("not-an-id"))
            .await;
        assert!(matches!(
            result,
            Err(ResolveError::InvalidReference { id }) if id == "not-an-id"
        ));
    }

    #[tokio::test]
    async fn translate_picks_first_candidate() {
        let translator =
            IdentifierTranslator::new(Box::new(ScriptedAuthority::with_candidates(vec![278, 999])));

        let identifiers = translator
            .translate(&MediaReference::movie("tt0111161"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(identifiers.tmdb_id, 278);
    }

    #[tokio::test]
    async fn translate_reports_not_found_as_ok_none() {
        let translator =
            IdentifierTranslator::new(Box::new(ScriptedAuthority::with_candidates(vec![])));

        let result = translator
            .translate(&MediaReference::movie("tt9999999"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn translate_enriches_series_with_cross_reference_id() {
        let translator = IdentifierTranslator::new(Box::new(ScriptedAuthority {
            candidates: vec![1396],
            imdb_id: Some("tt0903747".to_string()),
            fail_find: false,
            fail_external_ids: false,
        }));

        let reference = MediaReference::series(
            "tt0903747",
            EpisodeAddress {
                season: 1,
                episode: 1,
            },
        );
        let identifiers = translator.translate(&reference).await.unwrap().unwrap();
        assert_eq!(identifiers.tmdb_id, 1396);
        assert_eq!(identifiers.imdb_id.as_deref(), Some("tt0903747"));
    }

    #[tokio::test]
    async fn enrichment_failure_degrades_to_missing_cross_reference() {
        let translator = IdentifierTranslator::new(Box::new(ScriptedAuthority {
            candidates: vec![1396],
            imdb_id: Some("tt0903747".to_string()),
            fail_find: false,
            fail_external_ids: true,
        }));

        let reference = MediaReference::series(
            "tt0903747",
            EpisodeAddress {
                season: 1,
                episode: 1,
            },
        );
        let identifiers = translator.translate(&reference).await.unwrap().unwrap();
        assert_eq!(identifiers.tmdb_id, 1396);
        assert!(identifiers.imdb_id.is_none());
    }

    #[tokio::test]
    async fn movie_translation_skips_enrichment() {
        let translator = IdentifierTranslator::new(Box::new(ScriptedAuthority {
            candidates: vec![278],
            imdb_id: Some("tt0111161".to_string()),
            fail_find: false,
            fail_external_ids: true, // would fail if enrichment were attempted
        }));

        let identifiers = translator
            .translate(&MediaReference::movie("tt0111161"))
            .await
            .unwrap()
            .unwrap();
        assert!(identifiers.imdb_id.is_none());
    }
}
