use std::{fs, path::Path};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const SETTINGS_FILE: &str = "finqa.toml";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// `None` leaves requests without a client-side deadline.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    /// Replaces the base url when an explicit override (e.g. `--api-url`) is given.
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Result<Self, ConfigError> {
        if let Some(api_url) = api_url {
            self.api_base_url = normalize_base_url(&api_url)?;
        }
        Ok(self)
    }
}

/// Defaults, then `finqa.toml` in the working directory, then environment.
pub fn load_settings() -> Result<ClientSettings, ConfigError> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, ConfigError> {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_base_url {
                    settings.api_base_url = v;
                }
                if file_cfg.request_timeout_secs.is_some() {
                    settings.request_timeout_secs = file_cfg.request_timeout_secs;
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable settings file: {err}");
            }
        }
    }

    if let Some(v) = env("FINQA_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(0) => settings.request_timeout_secs = None,
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => tracing::warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    Ok(settings)
}

pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_API_BASE_URL.to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(trimmed.to_string())
}
