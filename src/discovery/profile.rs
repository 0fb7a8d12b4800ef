use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::discovery::builder::UnitBuilder;
use crate::discovery::languages::{
    go, java, nodejs, python, ruby, GoPackageBuilder, MavenProjectBuilder, NodeJsPackageBuilder,
    PythonModuleBuilder, PythonPackageBuilder, RubyAppBuilder, RubyGemBuilder,
};
use crate::discovery::unit::UnitKind;
use crate::error::ConfigError;

/// Decides whether a directory is a unit root, given the names of its
/// immediate children.
pub trait DirMatcher: Send + Sync {
    fn dir_matches(&self, path: &Path, filenames: &[String]) -> bool;
}

/// Decides whether a single file is a unit. `root` is the directory the
/// walk started from, and `path` lies below it.
pub trait FileMatcher: Send + Sync {
    fn file_matches(&self, root: &Path, path: &Path) -> bool;
}

/// Matches directories containing a file with the given name.
#[derive(Debug, Clone)]
pub struct FileInDir {
    pub filename: String,
}

impl FileInDir {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

impl DirMatcher for FileInDir {
    fn dir_matches(&self, _path: &Path, filenames: &[String]) -> bool {
        filenames.iter().any(|f| *f == self.filename)
    }
}

/// Matches directories containing a file whose name ends with the suffix.
#[derive(Debug, Clone)]
pub struct FileSuffixInDir {
    pub suffix: String,
}

impl FileSuffixInDir {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl DirMatcher for FileSuffixInDir {
    fn dir_matches(&self, _path: &Path, filenames: &[String]) -> bool {
        filenames.iter().any(|f| f.ends_with(self.suffix.as_str()))
    }
}

/// Matches files whose name ends with the suffix.
#[derive(Debug, Clone)]
pub struct FileSuffix {
    pub suffix: String,
}

impl FileSuffix {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl FileMatcher for FileSuffix {
    fn file_matches(&self, _root: &Path, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().ends_with(self.suffix.as_str()))
            .unwrap_or(false)
    }
}

/// Matches files with the suffix that sit outside a package: no directory
/// between the file and the scan root (inclusive) holds a `package_marker`.
#[derive(Debug, Clone)]
pub struct StandaloneModule {
    pub suffix: FileSuffix,
    pub package_marker: String,
}

impl StandaloneModule {
    pub fn new(suffix: impl Into<String>, package_marker: impl Into<String>) -> Self {
        Self {
            suffix: FileSuffix::new(suffix),
            package_marker: package_marker.into(),
        }
    }
}

impl FileMatcher for StandaloneModule {
    fn file_matches(&self, root: &Path, path: &Path) -> bool {
        if !self.suffix.file_matches(root, path) {
            return false;
        }
        for dir in path.ancestors().skip(1) {
            if dir.join(&self.package_marker).is_file() {
                return false;
            }
            if dir == root || !dir.starts_with(root) {
                break;
            }
        }
        true
    }
}

/// A rule that recognises one kind of source unit and knows how to build it.
#[derive(Clone)]
pub struct Profile {
    name: String,
    dir: Option<Arc<dyn DirMatcher>>,
    file: Option<Arc<dyn FileMatcher>>,
    top_level_only: bool,
    builder: Arc<dyn UnitBuilder>,
}

impl Profile {
    pub fn for_dirs(
        name: impl Into<String>,
        matcher: impl DirMatcher + 'static,
        builder: impl UnitBuilder + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            dir: Some(Arc::new(matcher)),
            file: None,
            top_level_only: false,
            builder: Arc::new(builder),
        }
    }

    pub fn for_files(
        name: impl Into<String>,
        matcher: impl FileMatcher + 'static,
        builder: impl UnitBuilder + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            dir: None,
            file: Some(Arc::new(matcher)),
            top_level_only: false,
            builder: Arc::new(builder),
        }
    }

    /// Stops the walk from descending below a matched directory.
    pub fn top_level_only(mut self) -> Self {
        self.top_level_only = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_top_level_only(&self) -> bool {
        self.top_level_only
    }

    pub fn dir_matcher(&self) -> Option<&dyn DirMatcher> {
        self.dir.as_deref()
    }

    pub fn file_matcher(&self) -> Option<&dyn FileMatcher> {
        self.file.as_deref()
    }

    pub fn builder(&self) -> &dyn UnitBuilder {
        self.builder.as_ref()
    }

    pub fn kind(&self) -> UnitKind {
        self.builder.kind()
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("dir", &self.dir.is_some())
            .field("file", &self.file.is_some())
            .field("top_level_only", &self.top_level_only)
            .finish()
    }
}

/// The default registry, in scan order.
pub fn all_profiles() -> Vec<Profile> {
    vec![
        Profile::for_dirs(
            "node.js package",
            FileInDir::new(nodejs::config::MANIFEST_FILE),
            NodeJsPackageBuilder,
        ),
        Profile::for_dirs(
            "Python package",
            FileInDir::new(python::PACKAGE_MARKER),
            PythonPackageBuilder,
        ),
        Profile::for_files(
            "Python module",
            StandaloneModule::new(python::MODULE_SUFFIX, python::PACKAGE_MARKER),
            PythonModuleBuilder,
        ),
        Profile::for_dirs(
            "Go package",
            FileSuffixInDir::new(go::config::FILE_SUFFIX),
            GoPackageBuilder::default(),
        ),
        Profile::for_dirs(
            "Ruby gem",
            FileSuffixInDir::new(ruby::config::GEMSPEC_SUFFIX),
            RubyGemBuilder,
        )
        .top_level_only(),
        Profile::for_dirs(
            "Ruby app",
            FileInDir::new(ruby::config::RACKUP_FILE),
            RubyAppBuilder,
        )
        .top_level_only(),
        Profile::for_dirs(
            "Java Maven project",
            FileInDir::new(java::MAVEN_MANIFEST),
            MavenProjectBuilder,
        )
        .top_level_only(),
    ]
}

/// The registry profiles with the given names, kept in registry order.
pub fn profiles_named(names: &[String]) -> Result<Vec<Profile>, ConfigError> {
    let registry = all_profiles();
    if let Some(unknown) = names
        .iter()
        .find(|name| !registry.iter().any(|p| p.name() == name.as_str()))
    {
        return Err(ConfigError::unknown_profile(unknown.as_str()));
    }

    Ok(registry
        .into_iter()
        .filter(|p| names.iter().any(|name| name == p.name()))
        .collect())
}
