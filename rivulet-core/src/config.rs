//! Centralized configuration for Rivulet.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Rivulet components.
///
/// Groups related configuration settings into logical sections. Constructed
/// once at pipeline startup and passed down; nothing reads globals.
#[derive(Debug, Clone, Default)]
pub struct RivuletConfig {
    /// Translation authority settings.
    pub translation: TranslationConfig,
    /// Provider fan-out settings.
    pub dispatch: DispatchConfig,
}

impl RivuletConfig {
    /// Builds configuration with environment overrides applied.
    ///
    /// Recognized variables: `RIVULET_TMDB_API_KEY` for the translation
    /// authority key.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("RIVULET_TMDB_API_KEY") {
            config.translation.api_key = key;
        }
        config
    }
}

/// Identifier translation authority configuration.
///
/// Controls the HTTP lookup that maps external-namespace ids onto the
/// internal namespace providers understand.
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    /// API key passed to the translation authority.
    pub api_key: String,
    /// Base URL of the translation authority.
    pub base_url: String,
    /// Timeout for a single lookup request.
    pub lookup_timeout: Duration,
    /// User agent for HTTP requests.
    pub user_agent: &'static str,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            lookup_timeout: Duration::from_secs(10),
            user_agent: "rivulet/0.1.0",
        }
    }
}

/// Provider dispatch configuration.
///
/// Controls the concurrency budget of the provider fan-out. The per-provider
/// timeout is always capped by the request deadline, so a single resolution
/// can never outlive its caller's budget.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Independent timeout for each provider invocation.
    pub provider_timeout: Duration,
    /// Deadline for the whole resolution request.
    pub request_deadline: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(12),
            request_deadline: Duration::from_secs(30),
        }
    }
}
