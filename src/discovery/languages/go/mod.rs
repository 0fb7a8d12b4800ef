use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::discovery::builder::{UnitBuilder, UnitContext};
use crate::discovery::unit::{Unit, UnitKind};
use crate::error::Result;

pub mod config;
pub mod constraint;
pub mod provider;
pub mod source;

pub use config::GoConfig;
pub use provider::{BuildInfoProvider, BuildPackage, GoBuildError, ImportError, SourceTreeProvider};

/// A Go package as reported by the build-info provider, minus import
/// positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GoPackage {
    pub dir: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub import_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub src_root: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pkg_root: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bin_dir: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub goroot: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub go_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cgo_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_go_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_go_files: Vec<String>,
    #[serde(rename = "XTestGoFiles", skip_serializing_if = "Vec::is_empty")]
    pub xtest_go_files: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_imports: Vec<String>,
    #[serde(rename = "XTestImports", skip_serializing_if = "Vec::is_empty")]
    pub xtest_imports: Vec<String>,
}

impl GoPackage {
    /// Drops import positions and replaces the absolute directory with
    /// `rel_dir`.
    pub fn from_build(build: BuildPackage, rel_dir: &str) -> Self {
        Self {
            dir: rel_dir.to_string(),
            imports: build.imports(),
            test_imports: build.test_imports(),
            xtest_imports: build.xtest_imports(),
            name: build.name,
            import_path: build.import_path,
            root: build.root,
            src_root: build.src_root,
            pkg_root: build.pkg_root,
            bin_dir: build.bin_dir,
            goroot: build.goroot,
            go_files: build.go_files,
            cgo_files: build.cgo_files,
            ignored_go_files: build.ignored_go_files,
            test_go_files: build.test_go_files,
            xtest_go_files: build.xtest_go_files,
        }
    }

    /// Clears every field derived from where the Go roots live on this
    /// machine.
    pub fn make_path_independent(&mut self) {
        self.root.clear();
        self.src_root.clear();
        self.pkg_root.clear();
        self.bin_dir.clear();
    }
}

/// Builds Go packages through a [`BuildInfoProvider`].
#[derive(Clone)]
pub struct GoPackageBuilder {
    provider: Arc<dyn BuildInfoProvider>,
}

impl GoPackageBuilder {
    pub fn new(provider: Arc<dyn BuildInfoProvider>) -> Self {
        Self { provider }
    }
}

impl Default for GoPackageBuilder {
    fn default() -> Self {
        Self::new(Arc::new(SourceTreeProvider))
    }
}

impl UnitBuilder for GoPackageBuilder {
    fn build(&self, ctx: &UnitContext<'_>) -> Result<Unit> {
        let build = match self.provider.import_dir(ctx.abs_path, &ctx.config.go) {
            Ok(build) => build,
            Err(err) => {
                warn!(
                    dir = %ctx.abs_path.display(),
                    error = %err.error,
                    "error encountered while importing Go package"
                );
                *err.partial
            }
        };

        let mut package = GoPackage::from_build(build, ctx.rel_path);
        if ctx.config.path_independent {
            package.make_path_independent();
        }

        debug!(dir = %package.dir, import_path = %package.import_path, "read go package");
        Ok(Unit::GoPackage(package))
    }

    fn kind(&self) -> UnitKind {
        UnitKind::GoPackage
    }
}
