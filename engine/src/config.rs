//! `~/.gatecheck/config.toml`
//!
//! ```toml
//! [app]
//! tui = "full"            # or "inline"
//! ascii_only = false
//! high_contrast = false
//! mouse_capture = false
//!
//! [api]
//! base_url = "http://localhost:4000/api"
//! timeout_secs = 30
//! max_retries = 2
//! ```
//!
//! String values may reference environment variables as `${VAR}`.

use serde::Deserialize;
use std::{env, path::Path, path::PathBuf, time::Duration};
use thiserror::Error;

use gatecheck_client::{
    CheckSource, ChecksApi, ClientError, DEFAULT_TIMEOUT_SECS, HttpOptions, RetryConfig,
    SampleRepository,
};
use gatecheck_types::UiOptions;

/// Overrides `[api] base_url`.
pub const API_URL_ENV: &str = "GATECHECK_API_URL";
/// Overrides `[app] tui`.
pub const TUI_ENV: &str = "GATECHECK_TUI";

#[derive(Debug, Default, Deserialize)]
pub struct GatecheckConfig {
    pub app: Option<AppConfig>,
    pub api: Option<ApiConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// "full" (alternate screen) or "inline".
    pub tui: Option<String>,
    #[serde(default)]
    pub ascii_only: bool,
    #[serde(default)]
    pub high_contrast: bool,
    /// Capture mouse clicks. Off by default to keep native text selection.
    #[serde(default)]
    pub mouse_capture: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the checks API. Absent means the built-in sample checks.
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 => {
                out.push_str(&env::var(&after[..end]).unwrap_or_default());
                rest = &after[end + 1..];
            }
            // `${}` or an unclosed brace is kept literally.
            _ => {
                out.push_str("${");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

impl GatecheckConfig {
    /// Load the user config. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read config at {}: {source}", path.display());
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&content).map(Some).map_err(|source| {
            tracing::warn!("Failed to parse config at {}: {source}", path.display());
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn mouse_capture(&self) -> bool {
        self.app.as_ref().is_some_and(|app| app.mouse_capture)
    }

    /// Configured TUI mode string, environment first.
    #[must_use]
    pub fn tui_mode(&self) -> Option<String> {
        env::var(TUI_ENV)
            .ok()
            .or_else(|| self.app.as_ref().and_then(|app| app.tui.clone()))
    }

    /// Base URL, `GATECHECK_API_URL` first, then `[api] base_url`.
    #[must_use]
    pub fn base_url(&self) -> Option<String> {
        let from_env = env::var(API_URL_ENV).ok();
        self.base_url_with_override(from_env)
    }

    fn base_url_with_override(&self, from_env: Option<String>) -> Option<String> {
        from_env
            .or_else(|| self.api.as_ref().and_then(|api| api.base_url.clone()))
            .map(|raw| expand_env_vars(&raw))
            .filter(|url| !url.trim().is_empty())
    }

    #[must_use]
    pub fn http_options(&self) -> HttpOptions {
        let api = self.api.as_ref();
        let timeout_secs = api
            .and_then(|api| api.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let mut retry = RetryConfig::default();
        if let Some(max_retries) = api.and_then(|api| api.max_retries) {
            retry = retry.with_max_retries(max_retries);
        }
        HttpOptions {
            timeout: Duration::from_secs(timeout_secs),
            retry,
        }
    }

    /// Build the check source this config points at.
    pub fn check_source(&self) -> Result<CheckSource, ClientError> {
        self.source_for(self.base_url())
    }

    fn source_for(&self, base_url: Option<String>) -> Result<CheckSource, ClientError> {
        match base_url {
            Some(url) => Ok(CheckSource::Http(ChecksApi::new(&url, self.http_options())?)),
            None => {
                tracing::info!("No API base URL configured; using built-in sample checks");
                Ok(CheckSource::Sample(SampleRepository::builtin()))
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gatecheck").join("config.toml"))
}
