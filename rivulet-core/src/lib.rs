//! Rivulet Core - Stream resolution pipeline

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
//!
//! Resolves canonical media references (an external title id plus, for
//! series, a season/episode pair) into a deterministic, de-duplicated list
//! of playable stream URLs across independent third-party providers.

pub mod assembler;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod normalizer;
pub mod providers;
pub mod resolver;
pub mod tracing_setup;
pub mod translator;
pub mod types;

// Re-export main types
pub use config::{DispatchConfig, RivuletConfig, TranslationConfig};
pub use dispatcher::{ProviderDispatcher, ProviderOutcome};
pub use errors::ResolveError;
pub use providers::{DemoProvider, EmbedApiProvider, StreamProvider};
pub use resolver::StreamResolver;
pub use translator::{IdentifierTranslator, TmdbAuthority, TranslationAuthority};
pub use types::{
    EpisodeAddress, FileEntry, MediaKind, MediaReference, ProviderPayload, SourceEntry,
    StreamRecord, StreamsResponse, TitleIdentifiers,
};

/// Convenience type alias for Results with ResolveError.
pub type Result<T> = std::result::Result<T, ResolveError>;
