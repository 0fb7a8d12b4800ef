use serde::{Deserialize, Serialize};

pub const GEMSPEC_SUFFIX: &str = ".gemspec";

/// Rack applications are recognised by their rackup file.
pub const RACKUP_FILE: &str = "config.ru";

pub const FILE_SUFFIX: &str = ".rb";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubyConfig {
    pub test_dirs: Vec<String>,
    pub gem_src_dirs: Vec<String>,
    pub app_src_dirs: Vec<String>,
}

impl Default for RubyConfig {
    fn default() -> Self {
        Self {
            test_dirs: ["spec", "specs", "test", "tests"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            gem_src_dirs: vec!["lib".to_string()],
            app_src_dirs: ["app", "lib", "config", "db"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
