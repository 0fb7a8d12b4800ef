use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::discovery::builder::{UnitBuilder, UnitContext};
use crate::discovery::unit::{Unit, UnitKind};
use crate::discovery::utils::collect_files;
use crate::error::Result;

pub const MAVEN_MANIFEST: &str = "pom.xml";

pub const PROJECT_CLASSPATH: &str = "target/classes";
pub const SRC_DIR: &str = "src/main/java";
pub const TEST_DIR: &str = "src/test/java";
pub const FILE_SUFFIX: &str = ".java";

/// A Maven project; the directory holds `pom.xml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct JavaProject {
    pub dir: String,
    pub project_classpath: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub src_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_files: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MavenProjectBuilder;

impl UnitBuilder for MavenProjectBuilder {
    fn build(&self, ctx: &UnitContext<'_>) -> Result<Unit> {
        let root = ctx.abs_path;
        let project = JavaProject {
            dir: ctx.rel_path.to_string(),
            project_classpath: PROJECT_CLASSPATH.to_string(),
            src_files: collect_files(root, &root.join(SRC_DIR), FILE_SUFFIX)?,
            test_files: collect_files(root, &root.join(TEST_DIR), FILE_SUFFIX)?,
        };

        debug!(
            dir = %project.dir,
            src = project.src_files.len(),
            test = project.test_files.len(),
            "populated maven project"
        );
        Ok(Unit::JavaProject(project))
    }

    fn kind(&self) -> UnitKind {
        UnitKind::JavaProject
    }
}
