use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-level config file name, looked up from the current directory
/// upwards
pub const PROJECT_CONFIG_FILE: &str = "xpath2css.toml";

/// Configuration for xpath2css
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Extension of the source files to rewrite (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Suffix appended to backup copies (without the dot)
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,

    /// Routine whose xpath arguments are never rewritten
    #[serde(default = "default_count_routine")]
    pub count_routine: String,

    /// Marker written in front of converted selectors
    #[serde(default = "default_selector_prefix")]
    pub selector_prefix: String,

    /// Glob patterns for paths to leave alone
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            backup_suffix: default_backup_suffix(),
            count_routine: default_count_routine(),
            selector_prefix: default_selector_prefix(),
            exclude: Vec::new(),
        }
    }
}

fn default_extension() -> String {
    "php".to_string()
}

fn default_backup_suffix() -> String {
    "bak".to_string()
}

fn default_count_routine() -> String {
    "getXpathCount".to_string()
}

fn default_selector_prefix() -> String {
    "css=".to_string()
}

impl Config {
    /// Load config from the first location that exists:
    /// 1. `explicit` (must exist)
    /// 2. `xpath2css.toml` in the current or a parent directory
    /// 3. the user config file
    ///
    /// Falls back to defaults when none is found.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let current = std::env::current_dir()?;
        if let Some(path) = Self::find_project_config_from(&current) {
            return Self::load_from(&path);
        }

        if let Some(path) = Self::user_config_path()
            && path.exists()
        {
            return Self::load_from(&path);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load config from a specific TOML file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Find xpath2css.toml by walking up from given directory
    pub fn find_project_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Get user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "xpath2css", "xpath2css")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
