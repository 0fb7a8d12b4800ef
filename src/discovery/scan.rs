use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{Config, UnitErrorPolicy};
use crate::discovery::builder::UnitContext;
use crate::discovery::languages::nodejs::config::MODULE_CACHE_DIR;
use crate::discovery::profile::Profile;
use crate::discovery::unit::Unit;
use crate::discovery::utils::{absolute, relative_path};
use crate::error::{Error, IoError, Result};

/// Installed third-party trees. Never scanned, whatever `skip_dirs` says.
pub const DEPENDENCY_CACHE_DIRS: &[&str] = &[MODULE_CACHE_DIR, "bower_components", "site-packages"];

/// What the walk should do after visiting an entry.
#[derive(Debug)]
pub enum WalkControl {
    Continue,
    SkipSubtree,
    Abort(Error),
}

/// Scans `dir` with the default configuration.
pub fn scan(dir: impl AsRef<Path>) -> Result<Vec<Unit>> {
    Config::default().scan(dir)
}

impl Config {
    /// Walks the tree at `dir` once per profile and returns every source
    /// unit found, in no particular order.
    pub fn scan(&self, dir: impl AsRef<Path>) -> Result<Vec<Unit>> {
        let root = dir.as_ref();
        probe_root(root)?;

        let base = match &self.base {
            Some(base) => absolute(base)?,
            None => absolute(Path::new("."))?,
        };

        let mut walker = ProfileWalker {
            config: self,
            root,
            base,
            found: Vec::new(),
        };
        for profile in self.profiles() {
            walker.walk(&profile)?;
        }

        debug!(root = %root.display(), units = walker.found.len(), "scan finished");
        Ok(walker.found)
    }
}

fn probe_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(IoError::not_a_directory(root).into()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(IoError::directory_not_found(root).into()),
        Err(e) => Err(IoError::read_error(root, e).into()),
    }
}

fn read_dir_names(dir: &Path) -> std::result::Result<Vec<String>, IoError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| IoError::read_error(dir, e))? {
        let entry = entry.map_err(|e| IoError::read_error(dir, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

struct ProfileWalker<'a> {
    config: &'a Config,
    root: &'a Path,
    base: PathBuf,
    found: Vec<Unit>,
}

impl ProfileWalker<'_> {
    fn walk(&mut self, profile: &Profile) -> Result<()> {
        debug!(profile = profile.name(), root = %self.root.display(), "walking tree");

        let mut entries = WalkDir::new(self.root).sort_by_file_name().into_iter();
        while let Some(entry) = entries.next() {
            let entry = entry.map_err(|e| IoError::walk_error(self.root, e))?;

            let control = if entry.file_type().is_dir() {
                self.visit_dir(profile, &entry)
            } else {
                self.visit_file(profile, &entry)
            };

            match control {
                WalkControl::Continue => {}
                WalkControl::SkipSubtree => entries.skip_current_dir(),
                WalkControl::Abort(err) => return Err(err),
            }
        }

        Ok(())
    }

    fn visit_dir(&mut self, profile: &Profile, entry: &DirEntry) -> WalkControl {
        if entry.depth() > 0 {
            let name = entry.file_name().to_string_lossy();
            if DEPENDENCY_CACHE_DIRS.contains(&&*name) || self.config.skip_dir(&name) {
                trace!(dir = %entry.path().display(), "skipping directory");
                return WalkControl::SkipSubtree;
            }
        }

        let Some(matcher) = profile.dir_matcher() else {
            return WalkControl::Continue;
        };

        let filenames = match read_dir_names(entry.path()) {
            Ok(names) => names,
            Err(err) => return WalkControl::Abort(err.into()),
        };
        if !matcher.dir_matches(entry.path(), &filenames) {
            return WalkControl::Continue;
        }

        match self.build_unit(profile, entry.path()) {
            WalkControl::Continue if profile.is_top_level_only() => WalkControl::SkipSubtree,
            control => control,
        }
    }

    fn visit_file(&mut self, profile: &Profile, entry: &DirEntry) -> WalkControl {
        match profile.file_matcher() {
            Some(matcher) if matcher.file_matches(self.root, entry.path()) => {
                self.build_unit(profile, entry.path())
            }
            _ => WalkControl::Continue,
        }
    }

    fn build_unit(&mut self, profile: &Profile, path: &Path) -> WalkControl {
        let abs_path = match absolute(path) {
            Ok(abs) => abs,
            Err(err) => return WalkControl::Abort(err.into()),
        };
        let rel_path = relative_path(&self.base, &abs_path);

        let ctx = UnitContext {
            abs_path: &abs_path,
            rel_path: &rel_path,
            config: self.config,
        };

        match profile.builder().build(&ctx) {
            Ok(unit) => {
                debug!(kind = %unit.kind(), path = unit.path(), "found source unit");
                self.found.push(unit);
                WalkControl::Continue
            }
            Err(err) => match self.config.unit_errors {
                UnitErrorPolicy::Abort => WalkControl::Abort(err),
                UnitErrorPolicy::Skip => {
                    warn!(
                        profile = profile.name(),
                        path = %abs_path.display(),
                        error = %err,
                        "skipping source unit"
                    );
                    WalkControl::Continue
                }
            },
        }
    }
}
