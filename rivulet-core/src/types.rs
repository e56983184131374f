//! Data types for the stream resolution pipeline.

use serde::{Deserialize, Serialize};

/// Media kind classification for inbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Feature-length title addressed by external id alone.
    Movie,
    /// Episodic title addressed by external id plus season/episode.
    Series,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            _ => Err(format!(
                "Invalid media kind: '{s}'. Valid options are: movie, series"
            )),
        }
    }
}

/// Season/episode pair addressing one episode within a series.
///
/// Both components are strictly positive; season 0 or episode 0 never
/// survives composite-id parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeAddress {
    /// Season number, 1-based.
    pub season: u32,
    /// Episode number within the season, 1-based.
    pub episode: u32,
}

/// Immutable inbound reference: external-namespace id plus media kind.
///
/// The episode address is present exactly when the kind is [`MediaKind::Series`];
/// the constructors enforce this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    /// Identifier in the external namespace (IMDb-style `tt` prefix).
    pub external_id: String,
    /// Movie or series.
    pub kind: MediaKind,
    /// Episode address, `Some` iff `kind` is `Series`.
    pub episode: Option<EpisodeAddress>,
}

impl MediaReference {
    /// Creates a movie reference.
    pub fn movie(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            kind: MediaKind::Movie,
            episode: None,
        }
    }

    /// Creates a series reference with its episode address.
    pub fn series(external_id: impl Into<String>, episode: EpisodeAddress) -> Self {
        Self {
            external_id: external_id.into(),
            kind: MediaKind::Series,
            episode: Some(episode),
        }
    }
}

/// Identifiers in the namespace understood by providers.
///
/// The TMDB id is the primary key providers are queried with. The IMDb id is
/// a secondary identifier fetched for series enrichment; providers that want
/// it may use it, and its absence is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleIdentifiers {
    /// Internal-namespace id resolved through the translation authority.
    pub tmdb_id: u64,
    /// Cross-reference id, fetched for series when available.
    pub imdb_id: Option<String>,
}

impl TitleIdentifiers {
    /// Creates identifiers from a bare TMDB id.
    pub fn new(tmdb_id: u64) -> Self {
        Self {
            tmdb_id,
            imdb_id: None,
        }
    }
}

/// Raw, provider-shaped payload: an ordered list of sources.
///
/// Providers may omit any optional field; a missing `sources` array
/// deserializes as empty rather than failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderPayload {
    /// Sources in provider order.
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

/// One source within a provider payload: a label plus its file variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Provider-assigned source label, e.g. `"2Embed/VidCloud"`.
    #[serde(default)]
    pub provider: String,
    /// File variants in provider order.
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// One playable file variant within a source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Playable URL; entries without one are dropped during normalization.
    #[serde(default)]
    pub file: Option<String>,
    /// Quality label such as `"1080p"`.
    #[serde(default)]
    pub quality: Option<String>,
    /// Container/type label such as `"mp4"`.
    #[serde(default, rename = "type")]
    pub container: Option<String>,
}

/// Canonical, provider-agnostic stream record.
///
/// Invariant: `url` is non-empty and syntactically a URL; normalization drops
/// anything that does not satisfy this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    /// Display title synthesized from provider name, quality and container.
    pub title: String,
    /// Playable URL, never empty.
    pub url: String,
    /// Groups variants from the same provider for adaptive selection.
    pub group_key: String,
    /// Hint that the URL plays without specialized handling. Fixed `false`
    /// for provider-sourced streams.
    pub is_direct_playable: bool,
}

/// Outbound response shape: the canonical "nothing found" is an empty list,
/// never an error status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamsResponse {
    /// De-duplicated records in deterministic dispatch order.
    pub streams: Vec<StreamRecord>,
}

impl StreamsResponse {
    /// The benign empty response every failure mode degrades to.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_round_trips_through_str() {
        assert_eq!("movie".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("Series".parse::<MediaKind>().unwrap(), MediaKind::Series);
        assert!("music".parse::<MediaKind>().is_err());
        assert_eq!(MediaKind::Movie.to_string(), "movie");
    }

    #[test]
    fn reference_constructors_uphold_episode_invariant() {
        let movie = MediaReference::movie("tt0111161");
        assert!(movie.episode.is_none());

        let series = MediaReference::series(
            "tt0111161",
            EpisodeAddress {
                season: 1,
                episode: 5,
            },
        );
        assert_eq!(series.kind, MediaKind::Series);
        assert!(series.episode.is_some());
    }

    #[test]
    fn provider_payload_tolerates_missing_fields() {
        let payload: ProviderPayload = serde_json::from_str(
            r#"{"sources":[{"provider":"ProviderX","files":[{"file":"https://cdn/x.mp4"}]}]}"#,
        )
        .unwrap();
        assert_eq!(payload.sources.len(), 1);
        let file = &payload.sources[0].files[0];
        assert_eq!(file.file.as_deref(), Some("https://cdn/x.mp4"));
        assert!(file.quality.is_none());
        assert!(file.container.is_none());

        let empty: ProviderPayload = serde_json::from_str("{}").unwrap();
        assert!(empty.sources.is_empty());
    }

    #[test]
    fn stream_record_serializes_camel_case() {
        let record = StreamRecord {
            title: "ProviderX - 1080p mp4".to_string(),
            url: "https://cdn/x.mp4".to_string(),
            group_key: "providerx".to_string(),
            is_direct_playable: false,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["groupKey"], "providerx");
        assert_eq!(json["isDirectPlayable"], false);
    }
}
