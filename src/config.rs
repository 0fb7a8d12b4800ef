use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::discovery::languages::go::GoConfig;
use crate::discovery::languages::nodejs::config::NodeJsConfig;
use crate::discovery::languages::ruby::config::RubyConfig;
use crate::discovery::profile::{all_profiles, Profile};
use crate::discovery::utils::contains;
use crate::error::ConfigError;

pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "testdata",
    "site-packages",
    "bower_components",
];

/// What a scan does when a unit fails to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitErrorPolicy {
    #[default]
    Abort,
    Skip,
}

/// Options for a scan. Every field has a default, so partial config files
/// are fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unit paths are reported relative to this directory; the current
    /// working directory when unset.
    pub base: Option<PathBuf>,

    /// Profiles to scan with; the full registry when unset.
    #[serde(skip)]
    pub profiles: Option<Vec<Profile>>,

    /// Directory names never descended into, except at the scan root.
    pub skip_dirs: Vec<String>,

    /// Drop machine-specific Go root fields from reported units.
    pub path_independent: bool,

    pub unit_errors: UnitErrorPolicy,

    pub nodejs: NodeJsConfig,
    pub go: GoConfig,
    pub ruby: RubyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: None,
            profiles: None,
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            path_independent: false,
            unit_errors: UnitErrorPolicy::default(),
            nodejs: NodeJsConfig::default(),
            go: GoConfig::default(),
            ruby: RubyConfig::default(),
        }
    }
}

impl Config {
    pub fn skip_dir(&self, name: &str) -> bool {
        contains(&self.skip_dirs, name)
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.profiles.clone().unwrap_or_else(all_profiles)
    }

    /// Loads a config file, choosing JSON or YAML by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !matches!(format.as_str(), "json" | "yaml" | "yml") {
            return Err(ConfigError::unsupported_format(format));
        }

        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e.to_string()))?;
        Self::from_str_with_format(&content, &format)
            .map_err(|message| ConfigError::parse_error(path, message))
    }

    fn from_str_with_format(content: &str, format: &str) -> Result<Self, String> {
        match format {
            "json" => serde_json::from_str(content).map_err(|e| e.to_string()),
            _ => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}
