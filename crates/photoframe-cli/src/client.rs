//! Shared command context and error types for the CLI.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use anyhow::anyhow;
use photoframe_api::{ApiClient, ApiError, ClientConfig, PhotoframeApi};
use photoframe_store::SettingsStore;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    /// Rejected payloads are the caller's fault; everything else is operational.
    fn from(error: ApiError) -> Self {
        match error.status() {
            Some(400 | 409 | 422) => Self::validation(error.message()),
            _ => Self::failure(anyhow!(error.message())),
        }
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) api: Arc<ApiClient>,
    pub(crate) store: SettingsStore,
}

impl AppContext {
    /// Build the API client (tagged with `trace_id`) and a store on top of it.
    pub(crate) fn new(config: &ClientConfig, trace_id: &str) -> CliResult<Self> {
        let api = ApiClient::with_request_id(config, trace_id)?;
        Ok(Self::from_client(api))
    }

    pub(crate) fn from_client(api: ApiClient) -> Self {
        let api = Arc::new(api);
        let store = SettingsStore::new(Arc::clone(&api) as Arc<dyn PhotoframeApi>);
        Self { api, store }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use httpmock::MockServer;
    use photoframe_api::DEFAULT_API_ORIGIN;

    pub(crate) fn context_with(server: &MockServer) -> anyhow::Result<AppContext> {
        let config = ClientConfig::resolve(&server.url("/api"), DEFAULT_API_ORIGIN)?;
        Ok(AppContext::new(&config, "test-trace")?)
    }

    fn status_error(status: u16) -> ApiError {
        ApiError::Status {
            operation: "update_settings",
            url: "http://127.0.0.1:8080/api/settings".to_string(),
            status,
        }
    }

    #[test]
    fn rejected_payloads_map_to_validation() {
        let error = CliError::from(status_error(422));
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.display_message(),
            "request failed with status code 422"
        );
    }

    #[test]
    fn server_errors_map_to_failure() {
        let error = CliError::from(status_error(503));
        assert_eq!(error.exit_code(), 3);
        assert_eq!(
            error.display_message(),
            "request failed with status code 503"
        );
    }

    #[test]
    fn validation_helper_keeps_message() {
        let error = CliError::validation("bad input");
        assert_eq!(error.display_message(), "bad input");
        assert_eq!(error.to_string(), "cli error");
    }
}
