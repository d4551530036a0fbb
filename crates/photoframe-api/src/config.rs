//! Base URL resolution for the API wrapper.
//!
//! The base defaults to `/api`, the path the backend mounts its routes under.
//! A relative base is resolved against an origin because a native client has
//! no page to inherit one from.

use url::{ParseError, Url};

use crate::error::{ApiError, ApiResult};

/// Environment variable overriding the API base URL.
pub const ENV_API_BASE_URL: &str = "PHOTOFRAME_API_BASE_URL";
/// Environment variable overriding the origin relative bases resolve against.
pub const ENV_API_ORIGIN: &str = "PHOTOFRAME_API_ORIGIN";
/// Base used when no override is configured.
pub const DEFAULT_API_BASE: &str = "/api";
/// Origin used when no override is configured.
pub const DEFAULT_API_ORIGIN: &str = "http://127.0.0.1:8080";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
}

impl ClientConfig {
    /// Build a configuration from an already-resolved base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
        }
    }

    /// Resolve the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when either value fails to parse.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when either value fails to parse.
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let base = read(ENV_API_BASE_URL).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let origin = read(ENV_API_ORIGIN).unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string());
        Self::resolve(&base, &origin)
    }

    /// Resolve `base` as an absolute URL, or relative to `origin` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when either value fails to parse.
    pub fn resolve(base: &str, origin: &str) -> ApiResult<Self> {
        let url = match Url::parse(base) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) => {
                let origin_url = Url::parse(origin).map_err(|source| ApiError::InvalidBaseUrl {
                    value: origin.to_string(),
                    source,
                })?;
                origin_url
                    .join(base)
                    .map_err(|source| ApiError::InvalidBaseUrl {
                        value: base.to_string(),
                        source,
                    })?
            }
            Err(source) => {
                return Err(ApiError::InvalidBaseUrl {
                    value: base.to_string(),
                    source,
                });
            }
        };
        Ok(Self::new(url))
    }

    /// Base URL every endpoint path is appended to. Always ends in `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
