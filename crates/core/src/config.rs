//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so that
//! request handling never reads process-wide environment variables.

use crate::{RecipeError, RecipeResult};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    api_base_url: Url,
    seed_file: Option<PathBuf>,
    request_timeout: Option<Duration>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The base URL must be an absolute `http` or `https` URL. A trailing slash is added when
    /// missing so that relative joins keep any path prefix (`http://host/api` + `recipes`).
    pub fn new(
        api_base_url: &str,
        seed_file: Option<PathBuf>,
        request_timeout: Option<Duration>,
    ) -> RecipeResult<Self> {
        let trimmed = api_base_url.trim();
        if trimmed.is_empty() {
            return Err(RecipeError::InvalidConfig(
                "api base url cannot be empty".into(),
            ));
        }

        let normalised = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };

        let url = Url::parse(&normalised)
            .map_err(|e| RecipeError::InvalidConfig(format!("invalid api base url: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(RecipeError::InvalidConfig(format!(
                "api base url must use http or https, got {}",
                url.scheme()
            )));
        }

        if request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(RecipeError::InvalidConfig(
                "request timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            api_base_url: url,
            seed_file,
            request_timeout,
        })
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn seed_file(&self) -> Option<&Path> {
        self.seed_file.as_deref()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

/// Parse the request timeout from an optional environment value in whole seconds.
///
/// `None`, empty, or whitespace-only values mean "use the transport default".
pub fn request_timeout_from_env_value(value: Option<String>) -> RecipeResult<Option<Duration>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    value
        .map(|v| {
            v.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                RecipeError::InvalidConfig(format!("invalid request timeout '{v}': {e}"))
            })
        })
        .transpose()
}
