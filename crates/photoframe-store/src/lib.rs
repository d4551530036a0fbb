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

//! In-memory settings store backed by the photoframe API wrapper.
//!
//! Layout: `state.rs` (observable state slice), `store.rs` (`SettingsStore`
//! and its fetch/save actions).

pub mod state;
pub mod store;

pub use state::SettingsState;
pub use store::SettingsStore;
