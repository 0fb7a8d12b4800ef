use std::fmt;

use serde::{Deserialize, Serialize};

use crate::discovery::utils::{contains, has_any_suffix};

pub const MANIFEST_FILE: &str = "package.json";

/// Never walked by the populator or the scan engine, whatever the skip list
/// says.
pub const MODULE_CACHE_DIR: &str = "node_modules";

pub const FILE_SUFFIX: &str = ".js";

const TEST_DIRS: &[&str] = &[
    "test", "tests", "spec", "specs", "unit", "mocha", "karma", "testdata",
];
const TEST_SUFFIXES: &[&str] = &["test.js", "tests.js", "spec.js", "specs.js"];
const SUPPORT_DIRS: &[&str] = &["build_support"];
const SUPPORT_FILENAMES: &[&str] = &[
    "Gruntfile.js",
    "build.js",
    "Makefile.dryice.js",
    "build.config.js",
];
const EXAMPLE_DIRS: &[&str] = &[
    "example", "examples", "sample", "samples", "doc", "docs", "demo", "demos",
];
const SCRIPT_DIRS: &[&str] = &["bin", "script", "scripts", "tool", "tools"];
const GENERATED_DIRS: &[&str] = &["build", "dist"];
const GENERATED_SUFFIXES: &[&str] = &[".min.js", "-min.js", ".optimized.js", "-optimized.js"];
const VENDOR_DIRS: &[&str] = &[
    "vendor",
    "bower_components",
    "node_modules",
    "assets",
    "public",
    "static",
    "resources",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Library,
    Test,
    Vendor,
    Generated,
    Example,
    Script,
    Support,
}

impl FileCategory {
    pub const ALL: [FileCategory; 7] = [
        FileCategory::Library,
        FileCategory::Test,
        FileCategory::Vendor,
        FileCategory::Generated,
        FileCategory::Example,
        FileCategory::Script,
        FileCategory::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Library => "library",
            FileCategory::Test => "test",
            FileCategory::Vendor => "vendor",
            FileCategory::Generated => "generated",
            FileCategory::Example => "example",
            FileCategory::Script => "script",
            FileCategory::Support => "support",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory names, suffixes and file names that sort a package's `.js`
/// files into categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeJsConfig {
    pub test_dirs: Vec<String>,
    pub test_suffixes: Vec<String>,
    pub support_dirs: Vec<String>,
    pub support_filenames: Vec<String>,
    pub example_dirs: Vec<String>,
    pub script_dirs: Vec<String>,
    pub generated_dirs: Vec<String>,
    pub generated_suffixes: Vec<String>,
    pub vendor_dirs: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for NodeJsConfig {
    fn default() -> Self {
        Self {
            test_dirs: owned(TEST_DIRS),
            test_suffixes: owned(TEST_SUFFIXES),
            support_dirs: owned(SUPPORT_DIRS),
            support_filenames: owned(SUPPORT_FILENAMES),
            example_dirs: owned(EXAMPLE_DIRS),
            script_dirs: owned(SCRIPT_DIRS),
            generated_dirs: owned(GENERATED_DIRS),
            generated_suffixes: owned(GENERATED_SUFFIXES),
            vendor_dirs: owned(VENDOR_DIRS),
        }
    }
}

impl NodeJsConfig {
    /// Classifies a `/`-separated path relative to the package root.
    ///
    /// Vendored and generated files are detected over the whole path before
    /// anything else, so `examples/vendor/x.js` is vendor, not example. The
    /// remaining categories are tried segment by segment, first match wins.
    pub fn classify(&self, rel_path: &str) -> FileCategory {
        let parts: Vec<&str> = rel_path.split('/').collect();
        let file_name = parts.last().copied().unwrap_or(rel_path);

        if parts.iter().any(|part| contains(&self.vendor_dirs, part)) {
            return FileCategory::Vendor;
        }
        if parts.iter().any(|part| contains(&self.generated_dirs, part))
            || has_any_suffix(&self.generated_suffixes, rel_path)
        {
            return FileCategory::Generated;
        }

        for part in &parts {
            if contains(&self.script_dirs, part) {
                return FileCategory::Script;
            } else if contains(&self.example_dirs, part) {
                return FileCategory::Example;
            } else if contains(&self.test_dirs, part)
                || has_any_suffix(&self.test_suffixes, rel_path)
            {
                return FileCategory::Test;
            } else if contains(&self.support_dirs, part)
                || contains(&self.support_filenames, file_name)
            {
                return FileCategory::Support;
            }
        }

        FileCategory::Library
    }
}
