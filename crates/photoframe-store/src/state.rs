//! Observable settings state.

use photoframe_api::Settings;

/// Snapshot of the settings slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsState {
    /// Last known settings, as returned by the backend plus saved edits.
    pub settings: Settings,
    /// Set while an action awaits the backend.
    pub loading: bool,
    /// Message of the most recent failure; never cleared by later successes.
    pub error: Option<String>,
}
