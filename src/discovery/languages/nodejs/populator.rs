use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

use crate::discovery::utils::{dir_has_file, to_slash};
use crate::error::{IoError, Result};

use super::config::{NodeJsConfig, FILE_SUFFIX, MANIFEST_FILE, MODULE_CACHE_DIR};
use super::NodeJsPackage;

/// Walks the package rooted at `abs_dir` and files every `.js` file under
/// exactly one category of `package`.
///
/// `node_modules` is never entered, and neither is any directory below the
/// root that has its own `package.json`: that subtree is a separate unit.
pub fn populate(package: &mut NodeJsPackage, abs_dir: &Path, config: &NodeJsConfig) -> Result<()> {
    let mut entries = WalkDir::new(abs_dir).sort_by_file_name().into_iter();

    while let Some(entry) = entries.next() {
        let entry = entry.map_err(|e| IoError::walk_error(abs_dir, e))?;

        if entry.file_type().is_dir() {
            if entry.depth() > 0
                && (entry.file_name() == MODULE_CACHE_DIR
                    || dir_has_file(entry.path(), MANIFEST_FILE)?)
            {
                entries.skip_current_dir();
            }
            continue;
        }

        if !entry.file_type().is_file() || !entry.file_name().to_string_lossy().ends_with(FILE_SUFFIX)
        {
            continue;
        }

        let rel = entry.path().strip_prefix(abs_dir).unwrap_or(entry.path());
        let rel = to_slash(rel);
        let category = config.classify(&rel);
        trace!(file = %rel, category = category.as_str(), "classified");
        package.files_mut(category).push(rel);
    }

    Ok(())
}
