//! Integration tests for Rivulet
//!
//! Verify the resolution pipeline end to end against scripted authorities
//! and providers, and the addon HTTP boundary through the real router.

#[path = "integration/support.rs"]
mod support;

#[path = "integration/resolution_pipeline.rs"]
mod resolution_pipeline;

#[path = "integration/addon_http.rs"]
mod addon_http;
