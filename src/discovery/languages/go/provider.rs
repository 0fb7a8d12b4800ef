use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::trace;

use crate::discovery::utils::{has_subdir, is_dir};

use super::config::*;
use super::source::HeaderParser;

/// Where an import appears in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub filename: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// Everything the build-info provider knows about one package directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPackage {
    pub dir: PathBuf,
    pub name: String,
    pub import_path: String,
    pub root: String,
    pub src_root: String,
    pub pkg_root: String,
    pub bin_dir: String,
    pub goroot: bool,

    pub go_files: Vec<String>,
    pub cgo_files: Vec<String>,
    pub ignored_go_files: Vec<String>,
    pub test_go_files: Vec<String>,
    pub xtest_go_files: Vec<String>,

    pub import_pos: BTreeMap<String, Vec<Position>>,
    pub test_import_pos: BTreeMap<String, Vec<Position>>,
    pub xtest_import_pos: BTreeMap<String, Vec<Position>>,
}

impl BuildPackage {
    pub fn imports(&self) -> Vec<String> {
        self.import_pos.keys().cloned().collect()
    }

    pub fn test_imports(&self) -> Vec<String> {
        self.test_import_pos.keys().cloned().collect()
    }

    pub fn xtest_imports(&self) -> Vec<String> {
        self.xtest_import_pos.keys().cloned().collect()
    }
}

#[derive(Debug, Error)]
pub enum GoBuildError {
    #[error("no buildable Go source files in {dir}")]
    NoGoFiles { dir: PathBuf },

    #[error("found packages {first} ({first_file}) and {second} ({second_file}) in {dir}")]
    MultiplePackages {
        dir: PathBuf,
        first: String,
        first_file: String,
        second: String,
        second_file: String,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{path}: use of cgo in test not supported")]
    CgoInTest { path: PathBuf },
}

/// A failed import together with whatever could be gathered before the
/// failure.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ImportError {
    pub partial: Box<BuildPackage>,
    pub error: GoBuildError,
}

/// Supplies Go build metadata for a package directory.
pub trait BuildInfoProvider: Send + Sync {
    fn import_dir(&self, dir: &Path, config: &GoConfig) -> Result<BuildPackage, ImportError>;
}

/// Reads package clauses and import blocks straight from the source files.
/// Files excluded by their name suffix or build constraints for the
/// configured target are listed as ignored and never looked at again.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceTreeProvider;

impl BuildInfoProvider for SourceTreeProvider {
    fn import_dir(&self, dir: &Path, config: &GoConfig) -> Result<BuildPackage, ImportError> {
        let mut package = BuildPackage {
            dir: dir.to_path_buf(),
            ..BuildPackage::default()
        };
        resolve_import_path(dir, config, &mut package);

        let mut names = match go_file_names(dir) {
            Ok(names) => names,
            Err(source) => {
                return Err(ImportError {
                    partial: Box::new(package),
                    error: GoBuildError::Read {
                        path: dir.to_path_buf(),
                        source,
                    },
                })
            }
        };
        names.sort();

        let mut parser = match HeaderParser::new() {
            Ok(parser) => parser,
            Err(message) => {
                return Err(ImportError {
                    partial: Box::new(package),
                    error: GoBuildError::Parse {
                        path: dir.to_path_buf(),
                        message,
                    },
                })
            }
        };

        let mut first_error = None;
        let mut first_file = String::new();

        for name in names {
            if name.starts_with('_') || name.starts_with('.') || !config.file_name_matches(&name) {
                package.ignored_go_files.push(name);
                continue;
            }
            let path = dir.join(&name);

            let src = match fs::read_to_string(&path) {
                Ok(src) => src,
                Err(source) => {
                    first_error.get_or_insert(GoBuildError::Read { path, source });
                    continue;
                }
            };
            let header = match parser.parse(&src) {
                Ok(header) => header,
                Err(message) => {
                    first_error.get_or_insert(GoBuildError::Parse { path, message });
                    continue;
                }
            };
            match config.constraints_match(&header.constraints) {
                Ok(true) => {}
                Ok(false) => {
                    trace!(file = %name, goos = %config.goos, goarch = %config.goarch, "excluded by build constraints");
                    package.ignored_go_files.push(name);
                    continue;
                }
                Err(message) => {
                    first_error.get_or_insert(GoBuildError::Parse { path, message });
                    continue;
                }
            }

            let is_test = name.ends_with(TEST_FILE_SUFFIX);
            let mut pkg_name = header.package.as_str();
            let is_xtest = is_test
                && pkg_name.ends_with(XTEST_PACKAGE_SUFFIX)
                && package.name != pkg_name;
            if is_xtest {
                pkg_name = &pkg_name[..pkg_name.len() - XTEST_PACKAGE_SUFFIX.len()];
            }

            if package.name.is_empty() {
                package.name = pkg_name.to_string();
                first_file = name.clone();
            } else if pkg_name != package.name {
                first_error.get_or_insert(GoBuildError::MultiplePackages {
                    dir: dir.to_path_buf(),
                    first: package.name.clone(),
                    first_file: first_file.clone(),
                    second: pkg_name.to_string(),
                    second_file: name.clone(),
                });
                continue;
            }

            let mut is_cgo = false;
            let positions = if is_xtest {
                &mut package.xtest_import_pos
            } else if is_test {
                &mut package.test_import_pos
            } else {
                &mut package.import_pos
            };
            for spec in header.imports {
                if spec.path == CGO_IMPORT {
                    if is_test {
                        first_error.get_or_insert(GoBuildError::CgoInTest { path: path.clone() });
                    } else {
                        is_cgo = true;
                    }
                    continue;
                }
                positions.entry(spec.path).or_default().push(Position {
                    filename: name.clone(),
                    line: spec.line,
                    column: spec.column,
                });
            }

            if is_cgo {
                package.cgo_files.push(name);
            } else if is_xtest {
                package.xtest_go_files.push(name);
            } else if is_test {
                package.test_go_files.push(name);
            } else {
                package.go_files.push(name);
            }
        }

        let no_files = package.go_files.is_empty()
            && package.cgo_files.is_empty()
            && package.test_go_files.is_empty()
            && package.xtest_go_files.is_empty();
        if first_error.is_none() && no_files {
            first_error = Some(GoBuildError::NoGoFiles {
                dir: dir.to_path_buf(),
            });
        }

        match first_error {
            Some(error) => Err(ImportError {
                partial: Box::new(package),
                error,
            }),
            None => Ok(package),
        }
    }
}

fn go_file_names(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(FILE_SUFFIX) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Finds the first source root that contains `dir` and derives the import
/// path from it, unless an earlier root has a directory with the same
/// relative path, in which case the import path stays empty.
pub fn resolve_import_path(dir: &Path, config: &GoConfig, package: &mut BuildPackage) {
    let roots = config.roots();

    for (i, root) in roots.iter().enumerate() {
        let src_dir = root.join(SRC_DIR);
        let Some(sub) = has_subdir(&src_dir, dir) else {
            continue;
        };

        if let Some(earlier) = roots[..i]
            .iter()
            .find(|earlier| is_dir(&earlier.join(SRC_DIR).join(&sub)))
        {
            trace!(
                dir = %dir.display(),
                shadowed_by = %earlier.display(),
                "import path shadowed by earlier root"
            );
            return;
        }

        package.import_path = sub;
        package.root = root.display().to_string();
        package.src_root = src_dir.display().to_string();
        package.pkg_root = root.join(PKG_DIR).display().to_string();
        package.bin_dir = root.join(BIN_DIR).display().to_string();
        package.goroot = config.goroot.as_deref() == Some(root.as_path());
        return;
    }
}
