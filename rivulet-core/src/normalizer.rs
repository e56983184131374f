//! Normalization of provider-shaped payloads into canonical stream records.
//!
//! Pure, deterministic functions of their input; unit-testable in isolation
//! from network behavior.

use tracing::debug;

use crate::types::{ProviderPayload, StreamRecord};

/// Flattens a provider payload into canonical stream records.
///
/// Each file within each source becomes one record, in payload order. Files
/// with a missing, empty or syntactically invalid URL are dropped silently;
/// a malformed file never fails its source. Source entries with an empty
/// provider label fall back to the client name.
pub fn normalize(provider_name: &str, payload: &ProviderPayload) -> Vec<StreamRecord> {
    let mut records = Vec::new();

    for source in &payload.sources {
        let label = if source.provider.is_empty() {
            provider_name
        } else {
            source.provider.as_str()
        };

        for entry in &source.files {
            let Some(url) = entry.file.as_deref().filter(|f| !f.is_empty()) else {
                debug!(provider = %label, "dropping file without URL");
                continue;
            };
            if url::Url::parse(url).is_err() {
                debug!(provider = %label, url, "dropping file with malformed URL");
                continue;
            }

            records.push(StreamRecord {
                title: stream_title(label, entry.quality.as_deref(), entry.container.as_deref()),
                url: url.to_string(),
                group_key: group_key(label),
                is_direct_playable: false,
            });
        }
    }

    records
}

/// Synthesizes a display title from provider name, quality and container.
///
/// Quality defaults to `"Unknown"`; a missing container leaves no trailing
/// whitespace.
pub fn stream_title(provider: &str, quality: Option<&str>, container: Option<&str>) -> String {
    let quality = quality.unwrap_or("Unknown");
    let container = container.unwrap_or("");
    format!("{provider} - {quality} {container}")
        .trim_end()
        .to_string()
}

/// Derives the grouping key for a provider label.
///
/// Lowercased with path-separator characters replaced by underscore, so
/// variants group deterministically regardless of casing or separator style.
pub fn group_key(provider: &str) -> String {
    provider.to_lowercase().replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileEntry, SourceEntry};

    fn payload(files: Vec<FileEntry>) -> ProviderPayload {
        ProviderPayload {
            sources: vec![SourceEntry {
                provider: "ProviderX".to_string(),
                files,
            }],
        }
    }

    #[test]
    fn normalize_flattens_sources_into_records() {
        let payload = payload(vec![FileEntry {
            file: Some("https://cdn/x.mp4".to_string()),
            quality: Some("1080p".to_string()),
            container: Some("mp4".to_string()),
        }]);

        let records = normalize("ProviderX", &payload);
        assert_eq!(
            records,
            vec![StreamRecord {
                title: "ProviderX - 1080p mp4".to_string(),
                url: "https://cdn/x.mp4".to_string(),
                group_key: "providerx".to_string(),
                is_direct_playable: false,
            }]
        );
    }

    #[test]
    fn normalize_is_a_pure_function_of_its_input() {
        let payload = payload(vec![
            FileEntry {
                file: Some("https://cdn/a.mp4".to_string()),
                quality: None,
                container: None,
            },
            FileEntry {
                file: Some("https://cdn/b.mp4".to_string()),
                quality: Some("720p".to_string()),
                container: None,
            },
        ]);

        assert_eq!(
            normalize("ProviderX", &payload),
            normalize("ProviderX", &payload)
        );
    }

    #[test]
    fn files_without_urls_are_dropped_not_propagated() {
        let payload = payload(vec![
            FileEntry {
                file: None,
                quality: Some("1080p".to_string()),
                container: None,
            },
            FileEntry {
                file: Some(String::new()),
                quality: None,
                container: None,
            },
            FileEntry {
                file: Some("not a url".to_string()),
                quality: None,
                container: None,
            },
            FileEntry {
                file: Some("https://cdn/ok.mp4".to_string()),
                quality: None,
                container: None,
            },
        ]);

        let records = normalize("ProviderX", &payload);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://cdn/ok.mp4");
        assert!(records.iter().all(|r| !r.url.is_empty()));
    }

    #[test]
    fn title_defaults_quality_and_trims_missing_container() {
        assert_eq!(
            stream_title("ProviderX", Some("1080p"), Some("mp4")),
            "ProviderX - 1080p mp4"
        );
        assert_eq!(stream_title("ProviderX", None, None), "ProviderX - Unknown");
        assert_eq!(
            stream_title("ProviderX", Some("720p"), None),
            "ProviderX - 720p"
        );
    }

    #[test]
    fn group_key_normalizes_case_and_separators() {
        assert_eq!(group_key("ProviderX"), "providerx");
        assert_eq!(group_key("2Embed/VidCloud"), "2embed_vidcloud");
        assert_eq!(group_key(r"Auto\Embed"), "auto_embed");
    }

    #[test]
    fn empty_source_label_falls_back_to_client_name() {
        let payload = ProviderPayload {
            sources: vec![SourceEntry {
                provider: String::new(),
                files: vec![FileEntry {
                    file: Some("https://cdn/x.mp4".to_string()),
                    quality: None,
                    container: None,
                }],
            }],
        };

        let records = normalize("FallbackName", &payload);
        assert_eq!(records[0].group_key, "fallbackname");
        assert!(records[0].title.starts_with("FallbackName - "));
    }

    #[test]
    fn records_are_never_direct_playable() {
        let payload = payload(vec![FileEntry {
            file: Some("https://cdn/x.mp4".to_string()),
            quality: None,
            container: None,
        }]);
        assert!(!normalize("ProviderX", &payload)[0].is_direct_playable);
    }
}
