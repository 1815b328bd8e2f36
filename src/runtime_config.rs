//! # Runtime Configuration Module
//!
//! Dispatch settings loaded from a YAML or TOML file and overridden by
//! environment variables.
//!
//! ## Settings
//!
//! | Key | Env override | Default |
//! |---|---|---|
//! | `default_action` | `EWC_DEFAULT_ACTION` | `index` |
//! | `index_page` | `EWC_INDEX_PAGE` | `/index.html` |
//! | `app_root` | `EWC_APP_ROOT` | `/` |
//!
//! `app_root` is used for requests that do not carry their own root.
//!
//! ## Example
//!
//! ```yaml
//! # config/dispatch.yaml
//! default_action: index
//! index_page: /index.html
//! app_root: /shop
//! ```
//!
//! ```rust,no_run
//! use ewcrouter::runtime_config::DispatchConfig;
//! use std::path::Path;
//!
//! let config = DispatchConfig::load(Some(Path::new("config/dispatch.yaml")))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Dispatch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Action used when the path names only a component
    pub default_action: String,
    /// Page served when the path has no segment below the app root
    pub index_page: String,
    /// Application root for requests that do not carry one
    pub app_root: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_action: "index".to_string(),
            index_page: "/index.html".to_string(),
            app_root: "/".to_string(),
        }
    }
}

impl DispatchConfig {
    /// Defaults overridden by the environment.
    ///
    /// # Errors
    ///
    /// Fails if an override produces an invalid configuration.
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    /// Read `path` (then the environment, if `path` is `None` only the environment).
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or the result is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path)?.apply_env(),
            None => Self::from_env(),
        }
    }

    /// Parse a `.yaml`/`.yml` or `.toml` file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, unknown extensions, parse errors or invalid values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dispatch config {}", path.display()))?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&text)
                .with_context(|| format!("invalid YAML in {}", path.display()))?,
            Some("toml") => {
                toml::from_str(&text).with_context(|| format!("invalid TOML in {}", path.display()))?
            }
            _ => bail!(
                "unsupported dispatch config format: {} (expected .yaml, .yml or .toml)",
                path.display()
            ),
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply `EWC_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Fails if the result is invalid.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    ///
    /// # Errors
    ///
    /// Fails if the result is invalid.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("EWC_DEFAULT_ACTION") {
            self.default_action = v;
        }
        if let Some(v) = lookup("EWC_INDEX_PAGE") {
            self.index_page = v;
        }
        if let Some(v) = lookup("EWC_APP_ROOT") {
            self.app_root = v;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Describes the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.default_action.is_empty() || self.default_action.contains('/') {
            bail!(
                "default_action must be a single non-empty path segment, got '{}'",
                self.default_action
            );
        }
        if !self.index_page.starts_with('/') {
            bail!("index_page must be an absolute path, got '{}'", self.index_page);
        }
        if !self.app_root.starts_with('/') {
            bail!("app_root must be an absolute path, got '{}'", self.app_root);
        }
        Ok(())
    }
}
