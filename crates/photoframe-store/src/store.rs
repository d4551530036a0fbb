//! Settings store with fetch and save actions.
//!
//! # Design
//! - State lives in a `watch` channel so consumers can observe every transition.
//! - Actions flip `loading` around the backend call and record failures as a
//!   message; there is no mutual exclusion between overlapping actions.
//! - Saves merge the submitted keys into the cached map instead of re-fetching.

use std::sync::Arc;

use photoframe_api::{ApiResult, PhotoframeApi, Settings};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::state::SettingsState;

/// Process-wide settings cache fronting the backend.
pub struct SettingsStore {
    api: Arc<dyn PhotoframeApi>,
    state: watch::Sender<SettingsState>,
}

impl SettingsStore {
    /// Create a store with empty settings, idle and without an error.
    #[must_use]
    pub fn new(api: Arc<dyn PhotoframeApi>) -> Self {
        let (state, _) = watch::channel(SettingsState::default());
        Self { api, state }
    }

    /// Clone of the current state.
    #[must_use]
    pub fn state(&self) -> SettingsState {
        self.state.borrow().clone()
    }

    /// Clone of the cached settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.state.borrow().settings.clone()
    }

    /// Whether an action is awaiting the backend.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Most recently recorded failure message.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SettingsState> {
        self.state.subscribe()
    }

    /// Replace the cached settings with the backend's copy.
    ///
    /// Failures are recorded in [`SettingsState::error`] and not returned.
    #[instrument(name = "settings_store.fetch", skip(self))]
    pub async fn fetch_settings(&self) {
        self.set_loading();
        let result = self.api.get_settings().await;
        self.state.send_modify(|state| {
            match result {
                Ok(settings) => {
                    debug!(keys = settings.len(), "settings fetched");
                    state.settings = settings;
                }
                Err(err) => {
                    let message = err.message();
                    warn!(error = %message, "settings fetch failed");
                    state.error = Some(message);
                }
            }
            state.loading = false;
        });
    }

    /// Persist `new_settings` and merge them into the cache on success.
    ///
    /// # Errors
    ///
    /// Returns the backend error after recording its message; the cached
    /// settings are left untouched in that case.
    #[instrument(name = "settings_store.save", skip_all, fields(keys = new_settings.len()))]
    pub async fn save_settings(&self, new_settings: Settings) -> ApiResult<()> {
        self.set_loading();
        let result = self.api.update_settings(&new_settings).await;
        let mut outcome = Ok(());
        self.state.send_modify(|state| {
            match result {
                Ok(_) => {
                    debug!("settings saved");
                    state.settings.extend(new_settings);
                }
                Err(err) => {
                    let message = err.message();
                    warn!(error = %message, "settings save failed");
                    state.error = Some(message);
                    outcome = Err(err);
                }
            }
            state.loading = false;
        });
        outcome
    }

    fn set_loading(&self) {
        self.state.send_modify(|state| state.loading = true);
    }
}
