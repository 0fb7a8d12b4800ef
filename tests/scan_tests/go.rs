//! Go package tests

use pretty_assertions::assert_eq;
use srcscan::discovery::languages::go::GoConfig;
use srcscan::discovery::languages::GoPackage;
use srcscan::{Config, Unit};

use super::test_utils::*;
use crate::fixtures::{mixed_tree, temp_tree};

fn go_packages(config: &Config, root: &std::path::Path) -> Vec<GoPackage> {
    let config = with_profiles(config.clone(), &["Go package"]);
    scan_sorted(&config, root)
        .into_iter()
        .filter_map(|u| match u {
            Unit::GoPackage(p) => Some(p),
            _ => None,
        })
        .collect()
}

#[test]
fn test_go_package_files_and_imports() {
    let tree = mixed_tree();
    let packages = go_packages(&config_for(tree.path()), tree.path());

    let dirs: Vec<&str> = packages.iter().map(|p| p.dir.as_str()).collect();
    assert_eq!(dirs, vec!["go", "go/cmd/mycmd", "go/qux"]);

    let mypkg = &packages[0];
    assert_eq!(mypkg.name, "mypkg");
    assert_eq!(mypkg.go_files, strings(&["a.go", "b.go"]));
    assert_eq!(mypkg.test_go_files, strings(&["a_test.go"]));
    assert_eq!(mypkg.xtest_go_files, strings(&["b_test.go"]));
    assert_eq!(mypkg.imports, strings(&["fmt"]));
    assert_eq!(mypkg.test_imports, strings(&["testing"]));
    assert_eq!(mypkg.xtest_imports, strings(&["example.com/mypkg", "testing"]));
    assert_eq!(mypkg.import_path, "");

    assert_eq!(packages[1].name, "main");
    assert_eq!(packages[1].go_files, strings(&["mycmd.go"]));
}

#[test]
fn test_import_path_from_gopath() {
    let tree = temp_tree(&[
        ("gopath/src/example.com/hello/hello.go", "package hello\n"),
        ("gopath/src/example.com/hello/util/util.go", "package util\n"),
    ]);
    let gopath = tree.path().join("gopath");
    let config = Config {
        go: GoConfig {
            goroot: None,
            gopath: vec![gopath.clone()],
            ..GoConfig::default()
        },
        ..config_for(tree.path())
    };
    let packages = go_packages(&config, &gopath.join("src"));

    let resolved: Vec<(&str, &str)> = packages
        .iter()
        .map(|p| (p.dir.as_str(), p.import_path.as_str()))
        .collect();
    assert_eq!(
        resolved,
        vec![
            ("gopath/src/example.com/hello", "example.com/hello"),
            ("gopath/src/example.com/hello/util", "example.com/hello/util"),
        ]
    );
    assert_eq!(packages[0].root, gopath.display().to_string());
    assert_eq!(
        packages[0].src_root,
        gopath.join("src").display().to_string()
    );
    assert!(!packages[0].goroot);
}

#[test]
fn test_earlier_root_shadows_import_path() {
    let tree = temp_tree(&[
        ("first/src/example.com/shared/a.go", "package shared\n"),
        ("second/src/example.com/shared/b.go", "package shared\n"),
        ("second/src/example.com/only/c.go", "package only\n"),
    ]);
    let config = Config {
        go: GoConfig {
            goroot: None,
            gopath: vec![tree.path().join("first"), tree.path().join("second")],
            ..GoConfig::default()
        },
        ..config_for(tree.path())
    };
    let packages = go_packages(&config, &tree.path().join("second"));

    let resolved: Vec<(&str, &str)> = packages
        .iter()
        .map(|p| (p.dir.as_str(), p.import_path.as_str()))
        .collect();
    assert_eq!(
        resolved,
        vec![
            ("second/src/example.com/only", "example.com/only"),
            ("second/src/example.com/shared", ""),
        ]
    );
}

#[test]
fn test_goroot_packages_are_flagged() {
    let tree = temp_tree(&[("goroot/src/fmt/print.go", "package fmt\n")]);
    let goroot = tree.path().join("goroot");
    let config = Config {
        go: GoConfig {
            goroot: Some(goroot.clone()),
            gopath: vec![],
            ..GoConfig::default()
        },
        ..config_for(tree.path())
    };
    let packages = go_packages(&config, &goroot);

    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].import_path, "fmt");
    assert!(packages[0].goroot);
}

#[test]
fn test_path_independent_clears_roots() {
    let tree = temp_tree(&[("gopath/src/example.com/hello/hello.go", "package hello\n")]);
    let gopath = tree.path().join("gopath");
    let config = Config {
        path_independent: true,
        go: GoConfig {
            goroot: None,
            gopath: vec![gopath.clone()],
            ..GoConfig::default()
        },
        ..config_for(tree.path())
    };
    let packages = go_packages(&config, &gopath);

    assert_eq!(packages.len(), 1);
    let package = &packages[0];
    assert_eq!(package.import_path, "example.com/hello");
    assert_eq!(package.root, "");
    assert_eq!(package.src_root, "");
    assert_eq!(package.pkg_root, "");
    assert_eq!(package.bin_dir, "");

    let json = serde_json::to_string(&Unit::GoPackage(package.clone())).unwrap();
    assert!(!json.contains(&gopath.display().to_string()));
}

#[test]
fn test_broken_package_is_still_reported() {
    let tree = temp_tree(&[
        ("mixed/a.go", "package a\n"),
        ("mixed/b.go", "package b\n"),
    ]);
    let packages = go_packages(&config_for(tree.path()), tree.path());

    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].dir, "mixed");
    assert_eq!(packages[0].name, "a");
    assert_eq!(packages[0].go_files, strings(&["a.go"]));
}

#[test]
fn test_ignored_generator_does_not_name_package() {
    let tree = temp_tree(&[
        (
            "pkg/a_gen.go",
            "//go:build ignore\n\npackage main\n\nimport \"os\"\n",
        ),
        ("pkg/lib.go", "package mypkg\n\nimport \"fmt\"\n"),
    ]);
    let packages = go_packages(&config_for(tree.path()), tree.path());

    assert_eq!(packages.len(), 1);
    let package = &packages[0];
    assert_eq!(package.dir, "pkg");
    assert_eq!(package.name, "mypkg");
    assert_eq!(package.go_files, strings(&["lib.go"]));
    assert_eq!(package.ignored_go_files, strings(&["a_gen.go"]));
    assert_eq!(package.imports, strings(&["fmt"]));
}

#[test]
fn test_files_for_other_targets_are_ignored() {
    let tree = temp_tree(&[
        ("pkg/sys.go", "package sys\n"),
        ("pkg/sys_plan9.go", "package sys\n\nimport \"syscall\"\n"),
    ]);
    let config = Config {
        go: GoConfig {
            goos: "linux".to_string(),
            goarch: "amd64".to_string(),
            ..config_for(tree.path()).go
        },
        ..config_for(tree.path())
    };
    let packages = go_packages(&config, tree.path());

    assert_eq!(packages[0].go_files, strings(&["sys.go"]));
    assert_eq!(packages[0].ignored_go_files, strings(&["sys_plan9.go"]));
    assert!(packages[0].imports.is_empty());
}
