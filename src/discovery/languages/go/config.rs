use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const FILE_SUFFIX: &str = ".go";
pub const TEST_FILE_SUFFIX: &str = "_test.go";
pub const XTEST_PACKAGE_SUFFIX: &str = "_test";

/// Pseudo-import that switches a file to cgo.
pub const CGO_IMPORT: &str = "C";

pub const SRC_DIR: &str = "src";
pub const PKG_DIR: &str = "pkg";
pub const BIN_DIR: &str = "bin";

/// Go workspace roots used to resolve import paths, and the build target
/// that decides which files take part in a package. Each root keeps its
/// sources under `<root>/src`; `goroot` is searched before `gopath`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoConfig {
    pub goroot: Option<PathBuf>,
    pub gopath: Vec<PathBuf>,
    pub goos: String,
    pub goarch: String,
    /// Extra tags satisfied by build constraints, as with `go build -tags`.
    pub build_tags: Vec<String>,
    pub cgo_enabled: bool,
}

impl Default for GoConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl GoConfig {
    /// Reads `GOROOT`, `GOPATH`, `GOOS`, `GOARCH` and `CGO_ENABLED`.
    /// GOPATH falls back to `$HOME/go`, the target to the host platform.
    pub fn from_env() -> Self {
        let goroot = env::var_os("GOROOT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let gopath = match env::var_os("GOPATH") {
            Some(value) if !value.is_empty() => env::split_paths(&value).collect(),
            _ => env::var_os("HOME")
                .or_else(|| env::var_os("USERPROFILE"))
                .map(|home| vec![PathBuf::from(home).join("go")])
                .unwrap_or_default(),
        };

        Self {
            goroot,
            gopath,
            goos: env_or("GOOS", host_goos),
            goarch: env_or("GOARCH", host_goarch),
            build_tags: Vec::new(),
            cgo_enabled: env::var("CGO_ENABLED").map_or(true, |v| v != "0"),
        }
    }

    /// Roots in search order. A GOPATH entry equal to GOROOT is dropped.
    pub fn roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = self.goroot.iter().cloned().collect();
        for path in &self.gopath {
            if Some(path) != self.goroot.as_ref() {
                roots.push(path.clone());
            }
        }
        roots
    }
}

fn env_or(key: &str, fallback: fn() -> String) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(fallback)
}

fn host_goos() -> String {
    match env::consts::OS {
        "macos" => "darwin".to_string(),
        os => os.to_string(),
    }
}

fn host_goarch() -> String {
    match env::consts::ARCH {
        "x86" => "386",
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc" => "ppc",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "wasm32" => "wasm",
        arch => arch,
    }
    .to_string()
}
