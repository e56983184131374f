//! Error types for the stream resolution pipeline.
//!
//! None of these ever reach the serving boundary as a failure: the resolver
//! degrades every variant to an empty result. A missing translation is not an
//! error at all and is modeled as `Ok(None)` at the translator.

use thiserror::Error;

/// Errors that can occur while resolving a media reference into streams.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// Inbound identifier does not match the external namespace syntax.
    /// Rejected before any network call is made.
    #[error("Invalid media reference: '{id}'")]
    InvalidReference {
        /// The identifier that failed validation.
        id: String,
    },

    /// The translation authority lookup failed (network or decoding).
    #[error("Translation lookup failed: {reason}")]
    TranslationFailed {
        /// The reason for the failure.
        reason: String,
    },

    /// A single provider call failed; isolated per provider, never fatal.
    #[error("Provider '{provider}' failed: {reason}")]
    ProviderFailed {
        /// Name of the provider that failed.
        provider: String,
        /// The reason for the failure.
        reason: String,
    },

    /// A provider returned a structurally invalid payload.
    #[error("Malformed provider payload: {reason}")]
    MalformedPayload {
        /// The reason the payload could not be decoded.
        reason: String,
    },

    /// A provider exceeded its time budget; treated identically to a
    /// provider failure.
    #[error("Provider '{provider}' timed out")]
    Timeout {
        /// Name of the provider that timed out.
        provider: String,
    },
}
