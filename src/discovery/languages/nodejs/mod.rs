use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::debug;

use crate::discovery::builder::{UnitBuilder, UnitContext};
use crate::discovery::unit::{Unit, UnitKind};
use crate::error::{Error, IoError, Result};

pub mod config;
pub mod populator;

pub use config::{FileCategory, NodeJsConfig};

/// A node.js package: a directory holding a `package.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct NodeJsPackage {
    pub dir: String,
    #[serde(
        rename = "PackageJSON",
        with = "raw_json",
        skip_serializing_if = "String::is_empty"
    )]
    pub package_json: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lib_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub script_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub support_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub example_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vendor_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generated_files: Vec<String>,
}

impl NodeJsPackage {
    pub fn files(&self, category: FileCategory) -> &[String] {
        match category {
            FileCategory::Library => &self.lib_files,
            FileCategory::Test => &self.test_files,
            FileCategory::Vendor => &self.vendor_files,
            FileCategory::Generated => &self.generated_files,
            FileCategory::Example => &self.example_files,
            FileCategory::Script => &self.script_files,
            FileCategory::Support => &self.support_files,
        }
    }

    pub fn files_mut(&mut self, category: FileCategory) -> &mut Vec<String> {
        match category {
            FileCategory::Library => &mut self.lib_files,
            FileCategory::Test => &mut self.test_files,
            FileCategory::Vendor => &mut self.vendor_files,
            FileCategory::Generated => &mut self.generated_files,
            FileCategory::Example => &mut self.example_files,
            FileCategory::Script => &mut self.script_files,
            FileCategory::Support => &mut self.support_files,
        }
    }

    /// Every classified file, category by category.
    pub fn all_files(&self) -> impl Iterator<Item = &String> {
        FileCategory::ALL
            .into_iter()
            .flat_map(move |category| self.files(category).iter())
    }
}

/// Reads `package.json` and classifies the package's `.js` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeJsPackageBuilder;

impl UnitBuilder for NodeJsPackageBuilder {
    fn build(&self, ctx: &UnitContext<'_>) -> Result<Unit> {
        let manifest_path = ctx.abs_path.join(config::MANIFEST_FILE);
        let text = fs::read_to_string(&manifest_path)
            .map_err(|e| IoError::read_error(&manifest_path, e))?;
        let manifest: Box<RawValue> = serde_json::from_str(&text)
            .map_err(|e| Error::manifest(&manifest_path, e.to_string()))?;

        let mut package = NodeJsPackage {
            dir: ctx.rel_path.to_string(),
            package_json: manifest.get().trim().to_string(),
            ..NodeJsPackage::default()
        };
        populator::populate(&mut package, ctx.abs_path, &ctx.config.nodejs)?;

        debug!(
            dir = %package.dir,
            files = package.all_files().count(),
            "populated node.js package"
        );
        Ok(Unit::NodeJsPackage(package))
    }

    fn kind(&self) -> UnitKind {
        UnitKind::NodeJsPackage
    }
}

/// Embeds the manifest text as raw JSON instead of a quoted string.
mod raw_json {
    use serde::de::Deserializer;
    use serde::ser::{Error as _, Serializer};
    use serde::{Deserialize, Serialize};
    use serde_json::value::RawValue;

    pub fn serialize<S: Serializer>(text: &str, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(text.to_string()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(raw.get().to_string())
    }
}
