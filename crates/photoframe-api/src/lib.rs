#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! HTTP wrapper around the photoframe backend REST endpoints.
//!
//! Layout: `config.rs` (base URL resolution from the environment), `client.rs`
//! (`PhotoframeApi` seam and the reqwest-backed `ApiClient`), `models.rs`
//! (request/response shapes), `error.rs` (error taxonomy).

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::{ApiClient, HEADER_REQUEST_ID, PhotoframeApi};
pub use config::{
    ClientConfig, DEFAULT_API_BASE, DEFAULT_API_ORIGIN, ENV_API_BASE_URL, ENV_API_ORIGIN,
};
pub use error::{ApiError, ApiResult};
pub use models::{Settings, UpdateSettingsRequest};
