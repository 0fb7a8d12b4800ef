use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Writes each `(path, contents)` pair under `root`, creating parent
/// directories. A path ending in `/` creates an empty directory.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if rel.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
    }
}

pub fn temp_tree(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), files);
    temp_dir
}

/// A tree with a Go package, two Node.js packages and nested Python
/// packages, laid out under `go/`, `node.js/` and `python/`.
pub fn mixed_tree() -> TempDir {
    temp_tree(&[
        ("go/a.go", "package mypkg\n\nimport \"fmt\"\n\nvar _ = fmt.Sprint\n"),
        ("go/b.go", "package mypkg\n"),
        ("go/a_test.go", "package mypkg\n\nimport \"testing\"\n"),
        ("go/b_test.go", "package mypkg_test\n\nimport (\n\t\"testing\"\n\n\t\"example.com/mypkg\"\n)\n"),
        ("go/cmd/mycmd/mycmd.go", "package main\n\nfunc main() {}\n"),
        ("go/qux/qux.go", "package qux\n"),
        ("go/testdata/ignored.go", "package ignored\n"),
        ("node.js/package.json", "{\"name\":\"mypkg\"}\n"),
        ("node.js/a.js", ""),
        ("node.js/a_test.js", ""),
        ("node.js/a.min.js", ""),
        ("node.js/lib/a.js", ""),
        ("node.js/test/b.js", ""),
        ("node.js/test/c_test.js", ""),
        ("node.js/vendor/a.js", ""),
        ("node.js/dist/a.js", ""),
        ("node.js/node_modules/dep/package.json", "{\"name\":\"dep\"}"),
        ("node.js/node_modules/dep/index.js", ""),
        ("node.js/subpkg/package.json", "{\"name\":\"subpkg\"}"),
        ("node.js/subpkg/a.js", ""),
        ("python/mypkg/__init__.py", ""),
        ("python/mypkg/foo.py", ""),
        ("python/mypkg/qux/__init__.py", ""),
        ("python/mypkg/qux/bar.py", ""),
    ])
}
