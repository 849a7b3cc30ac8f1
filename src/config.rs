//! Configuration loading
//!
//! Settings come from built-in defaults, then an optional TOML file at
//! `<config_dir>/multimerge/config.toml`, then command-line overrides.

use crate::error::{Error, Result};
use crate::types::MergeMethod;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// REST API root for github.com
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Body of the approving review posted on each merged PR
pub const DEFAULT_REVIEW_BODY: &str =
    "Auto-approved by multimerge: the diff is identical to an already reviewed exemplar PR.";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory name for multimerge within the user config dir.
const CONFIG_DIR: &str = "multimerge";

/// Filename for the config file.
const CONFIG_FILE: &str = "config.toml";

/// On-disk shape of the config file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_url: Option<String>,
    merge_method: Option<MergeMethod>,
    review_body: Option<String>,
    timeout_secs: Option<u64>,
}

/// Values given on the command line, which beat the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--api-url`
    pub api_url: Option<String>,
    /// `--merge-method`
    pub merge_method: Option<MergeMethod>,
    /// `--timeout`
    pub timeout_secs: Option<u64>,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// REST API root, without trailing slash
    pub api_url: String,
    /// Merge method used for every merge
    pub merge_method: MergeMethod,
    /// Body of the approving review
    pub review_body: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            merge_method: MergeMethod::default(),
            review_body: DEFAULT_REVIEW_BODY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Request timeout as a `Duration`
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn apply_file(mut self, file: ConfigFile) -> Self {
        if let Some(api_url) = file.api_url {
            self.api_url = api_url;
        }
        if let Some(method) = file.merge_method {
            self.merge_method = method;
        }
        if let Some(body) = file.review_body {
            self.review_body = body;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
        if let Some(method) = overrides.merge_method {
            self.merge_method = method;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    fn validate(self) -> Result<Self> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout must be at least 1 second".to_string()));
        }
        url::Url::parse(&self.api_url)
            .map_err(|e| Error::Config(format!("invalid API URL '{}': {e}", self.api_url)))?;
        if self.review_body.trim().is_empty() {
            return Err(Error::Config("review body must not be empty".to_string()));
        }
        Ok(Self {
            api_url: self.api_url.trim_end_matches('/').to_string(),
            ..self
        })
    }
}

/// Get path to the default config file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Parse config file contents.
fn parse_config_file(content: &str, path: &Path) -> Result<ConfigFile> {
    toml::from_str(content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, the default location is used
/// when present and silently skipped otherwise.
pub fn load_config(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Config> {
    let (path, required) = match path {
        Some(p) => (Some(p.to_path_buf()), true),
        None => (default_config_path(), false),
    };

    let file = match path {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading config");
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
            parse_config_file(&content, &path)?
        }
        Some(path) if required => {
            return Err(Error::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        _ => ConfigFile::default(),
    };

    Config::default()
        .apply_file(file)
        .apply_overrides(overrides)
        .validate()
}
