//! Request and response shapes exchanged with the backend.

use std::collections::BTreeMap;

use serde::Serialize;

/// Arbitrary string-keyed settings persisted by the backend.
pub type Settings = BTreeMap<String, String>;

/// Body of `POST /settings`.
#[derive(Debug, Serialize)]
pub struct UpdateSettingsRequest<'a> {
    /// Settings to upsert; keys not present are left untouched server-side.
    pub settings: &'a Settings,
}
