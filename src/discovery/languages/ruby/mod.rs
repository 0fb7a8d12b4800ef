use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::discovery::builder::{UnitBuilder, UnitContext};
use crate::discovery::unit::{Unit, UnitKind};
use crate::discovery::utils::collect_files;
use crate::error::Result;

pub mod config;

pub use config::RubyConfig;

/// A Ruby gem; the directory holds a `*.gemspec` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RubyGem {
    pub dir: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub src_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_files: Vec<String>,
}

/// A Ruby (Rack) application; the directory holds `config.ru`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RubyApp {
    pub dir: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub src_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_files: Vec<String>,
}

// TODO: read the gemspec `files` directive instead of assuming the lib/ layout.
fn collect_from(root: &Path, dirs: &[String]) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for dir in dirs {
        files.extend(collect_files(root, &root.join(dir), config::FILE_SUFFIX)?);
    }
    Ok(files)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RubyGemBuilder;

impl UnitBuilder for RubyGemBuilder {
    fn build(&self, ctx: &UnitContext<'_>) -> Result<Unit> {
        let ruby = &ctx.config.ruby;
        let gem = RubyGem {
            dir: ctx.rel_path.to_string(),
            src_files: collect_from(ctx.abs_path, &ruby.gem_src_dirs)?,
            test_files: collect_from(ctx.abs_path, &ruby.test_dirs)?,
        };
        debug!(dir = %gem.dir, src = gem.src_files.len(), test = gem.test_files.len(), "populated ruby gem");
        Ok(Unit::RubyGem(gem))
    }

    fn kind(&self) -> UnitKind {
        UnitKind::RubyGem
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RubyAppBuilder;

impl UnitBuilder for RubyAppBuilder {
    fn build(&self, ctx: &UnitContext<'_>) -> Result<Unit> {
        let ruby = &ctx.config.ruby;
        let app = RubyApp {
            dir: ctx.rel_path.to_string(),
            src_files: collect_from(ctx.abs_path, &ruby.app_src_dirs)?,
            test_files: collect_from(ctx.abs_path, &ruby.test_dirs)?,
        };
        debug!(dir = %app.dir, src = app.src_files.len(), test = app.test_files.len(), "populated ruby app");
        Ok(Unit::RubyApp(app))
    }

    fn kind(&self) -> UnitKind {
        UnitKind::RubyApp
    }
}
