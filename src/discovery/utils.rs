use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::IoError;

pub fn contains(list: &[String], name: &str) -> bool {
    list.iter().any(|s| s == name)
}

pub fn has_any_suffix(suffixes: &[String], name: &str) -> bool {
    suffixes.iter().any(|s| name.ends_with(s.as_str()))
}

/// Reports whether `dir` holds a regular file called `filename`.
///
/// A missing file is `Ok(false)`; any other stat failure is an error.
pub fn dir_has_file(dir: &Path, filename: &str) -> Result<bool, IoError> {
    let path = dir.join(filename);
    match fs::metadata(&path) {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(IoError::read_error(path, e)),
    }
}

pub fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Returns `dir` relative to `root` when `dir` lies strictly below `root`.
pub fn has_subdir(root: &Path, dir: &Path) -> Option<String> {
    let root = clean(root);
    let dir = clean(dir);
    match dir.strip_prefix(&root) {
        Ok(sub) if sub.components().next().is_some() => Some(to_slash(sub)),
        _ => None,
    }
}

/// Makes `path` absolute against the current directory and removes `.` and
/// `..` components lexically.
pub fn absolute(path: &Path) -> Result<PathBuf, IoError> {
    let abs = std::path::absolute(path).map_err(|e| IoError::read_error(path, e))?;
    Ok(clean(&abs))
}

pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Relative path from `base` to `target`, both absolute. Identical paths give
/// `"."`; targets outside `base` climb with `..`.
pub fn relative_path(base: &Path, target: &Path) -> String {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = target.components().collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..base.len() {
        parts.push("..".to_string());
    }
    for component in &target[common..] {
        parts.push(component.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Collects every regular file under `sub_root` whose name ends with
/// `suffix`, as `/`-separated paths relative to `unit_root`. A missing
/// `sub_root` yields no files.
pub fn collect_files(
    unit_root: &Path,
    sub_root: &Path,
    suffix: &str,
) -> Result<Vec<String>, IoError> {
    if !is_dir(sub_root) {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(sub_root).sort_by_file_name() {
        let entry = entry.map_err(|e| IoError::walk_error(sub_root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !entry.file_name().to_string_lossy().ends_with(suffix) {
            continue;
        }
        let rel = entry.path().strip_prefix(unit_root).unwrap_or(entry.path());
        files.push(to_slash(rel));
    }

    Ok(files)
}
