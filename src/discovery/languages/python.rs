use serde::{Deserialize, Serialize};

use crate::discovery::builder::{UnitBuilder, UnitContext};
use crate::discovery::unit::{Unit, UnitKind};
use crate::error::Result;

pub const PACKAGE_MARKER: &str = "__init__.py";

pub const MODULE_SUFFIX: &str = ".py";

/// A directory holding `__init__.py`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PythonPackage {
    pub dir: String,
}

/// A standalone `.py` file outside any package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PythonModule {
    pub file: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonPackageBuilder;

impl UnitBuilder for PythonPackageBuilder {
    fn build(&self, ctx: &UnitContext<'_>) -> Result<Unit> {
        Ok(Unit::PythonPackage(PythonPackage {
            dir: ctx.rel_path.to_string(),
        }))
    }

    fn kind(&self) -> UnitKind {
        UnitKind::PythonPackage
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonModuleBuilder;

impl UnitBuilder for PythonModuleBuilder {
    fn build(&self, ctx: &UnitContext<'_>) -> Result<Unit> {
        Ok(Unit::PythonModule(PythonModule {
            file: ctx.rel_path.to_string(),
        }))
    }

    fn kind(&self) -> UnitKind {
        UnitKind::PythonModule
    }
}
