//! Scripted stand-in for the photoframe backend.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use photoframe_api::{ApiError, ApiResult, PhotoframeApi, Settings};
use serde_json::Value;
use tokio::sync::Semaphore;

/// Status returned when an operation is called without a queued response.
pub const UNSCRIPTED_STATUS: u16 = 501;

/// A single call observed by [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `get_settings` was invoked.
    GetSettings,
    /// `update_settings` was invoked with the given payload.
    UpdateSettings(Settings),
    /// `get_status` was invoked.
    GetStatus,
    /// `get_google_albums` was invoked.
    GetGoogleAlbums,
}

/// Backend fake answering from per-operation response queues.
///
/// When gated, every call waits for a [`ScriptedApi::release`] before it
/// resolves, which keeps requests observably in flight.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    settings: Mutex<VecDeque<ApiResult<Settings>>>,
    updates: Mutex<VecDeque<ApiResult<Value>>>,
    status: Mutex<VecDeque<ApiResult<Value>>>,
    albums: Mutex<VecDeque<ApiResult<Value>>>,
    calls: Mutex<Vec<ApiCall>>,
    gate: Option<Semaphore>,
}

impl ScriptedApi {
    /// Create a fake with empty queues and no gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every call until released.
    #[must_use]
    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    /// Queue a `get_settings` response.
    #[must_use]
    pub fn with_settings(self, response: ApiResult<Settings>) -> Self {
        lock(&self.settings).push_back(response);
        self
    }

    /// Queue an `update_settings` response.
    #[must_use]
    pub fn with_update(self, response: ApiResult<Value>) -> Self {
        lock(&self.updates).push_back(response);
        self
    }

    /// Queue a `get_status` response.
    #[must_use]
    pub fn with_status(self, response: ApiResult<Value>) -> Self {
        lock(&self.status).push_back(response);
        self
    }

    /// Queue a `get_google_albums` response.
    #[must_use]
    pub fn with_albums(self, response: ApiResult<Value>) -> Self {
        lock(&self.albums).push_back(response);
        self
    }

    /// Let `count` gated calls resolve. No-op for ungated fakes.
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    /// Calls observed so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        lock(&self.calls).clone()
    }

    async fn answer<T>(
        &self,
        call: ApiCall,
        operation: &'static str,
        queue: &Mutex<VecDeque<ApiResult<T>>>,
    ) -> ApiResult<T> {
        lock(&self.calls).push(call);
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        lock(queue)
            .pop_front()
            .unwrap_or_else(|| Err(status_error(operation, UNSCRIPTED_STATUS)))
    }
}

#[async_trait]
impl PhotoframeApi for ScriptedApi {
    async fn get_settings(&self) -> ApiResult<Settings> {
        self.answer(ApiCall::GetSettings, "get_settings", &self.settings)
            .await
    }

    async fn update_settings(&self, settings: &Settings) -> ApiResult<Value> {
        self.answer(
            ApiCall::UpdateSettings(settings.clone()),
            "update_settings",
            &self.updates,
        )
        .await
    }

    async fn get_status(&self) -> ApiResult<Value> {
        self.answer(ApiCall::GetStatus, "get_status", &self.status)
            .await
    }

    async fn get_google_albums(&self) -> ApiResult<Value> {
        self.answer(ApiCall::GetGoogleAlbums, "get_google_albums", &self.albums)
            .await
    }
}

/// Build the error a backend answering `status` would produce.
#[must_use]
pub fn status_error(operation: &'static str, status: u16) -> ApiError {
    ApiError::Status {
        operation,
        url: format!("scripted://{operation}"),
        status,
    }
}

/// Build a settings map from string pairs.
#[must_use]
pub fn settings_from(pairs: &[(&str, &str)]) -> Settings {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
