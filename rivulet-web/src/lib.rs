//! Rivulet Web - Addon HTTP boundary

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
//!
//! Thin serving layer over the resolution pipeline: publishes the addon
//! manifest and the stream lookup endpoint. All resolution semantics live in
//! `rivulet-core`; this crate only parses the route and shapes the JSON.

pub mod handlers;
pub mod server;

// Re-export main types
pub use server::{AppState, router, run_server};
