//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bracket_tree/bracket_tree.toml`
//! 3. Local config: `<dir>/.bracket_tree.toml`
//! 4. Environment variables: `BRACKET_TREE_*` prefix

use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::Format;
use crate::infrastructure::traits::{FileSystem, TemplateProvider};
use crate::infrastructure::{BuiltinTemplates, DirectoryTemplates};

const ENV_PREFIX: &str = "BRACKET_TREE";

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub format: Option<Format>,
    pub template_dir: Option<PathBuf>,
}

/// Unified configuration for bracket construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Elimination format used when building brackets by size
    pub format: Format,
    /// Root of a template catalog laid out as `<format>/<size>.json`;
    /// the compiled-in catalog is used when unset
    pub template_dir: Option<PathBuf>,
}

/// Get the XDG config directory for bracket_tree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bracket_tree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bracket_tree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".bracket_tree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in the template directory.
    fn expand_paths(&mut self) {
        if let Some(dir) = &self.template_dir {
            let raw = dir.to_string_lossy().to_string();
            let expanded = shellexpand::full(&raw)
                .map(|s| s.into_owned())
                .unwrap_or(raw);
            self.template_dir = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            format: overlay.format.unwrap_or(self.format),
            template_dir: overlay
                .template_dir
                .clone()
                .or_else(|| self.template_dir.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.bracket_tree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = current.apply_env(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply environment variables as explicit overrides.
    pub fn apply_env(mut self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("format") {
            self.format = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_string("template_dir") {
            self.template_dir = Some(PathBuf::from(val));
        }

        Ok(self)
    }

    /// Template source for the configured format.
    pub fn template_provider(&self, fs: Arc<dyn FileSystem>) -> Arc<dyn TemplateProvider> {
        match &self.template_dir {
            Some(dir) => Arc::new(DirectoryTemplates::new(dir.join(self.format.as_str()), fs)),
            None => Arc::new(BuiltinTemplates::new(self.format)),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
