//! HTTP request handlers for the addon endpoints.

pub mod api;

// Re-export handler functions
pub use api::{Manifest, addon_manifest, stream_lookup};
