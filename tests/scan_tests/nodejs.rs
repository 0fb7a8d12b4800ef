//! Node.js package tests

use pretty_assertions::assert_eq;
use srcscan::discovery::languages::nodejs::FileCategory;
use srcscan::discovery::languages::NodeJsPackage;
use srcscan::Unit;

use super::test_utils::*;
use crate::fixtures::{mixed_tree, temp_tree};

fn node_packages(units: Vec<Unit>) -> Vec<NodeJsPackage> {
    units
        .into_iter()
        .filter_map(|u| match u {
            Unit::NodeJsPackage(p) => Some(p),
            _ => None,
        })
        .collect()
}

fn scan_node(root: &std::path::Path) -> Vec<NodeJsPackage> {
    let config = with_profiles(config_for(root), &["node.js package"]);
    node_packages(scan_sorted(&config, root))
}

#[test]
fn test_node_package_classification() {
    let tree = mixed_tree();
    let packages = scan_node(tree.path());
    assert_eq!(packages.len(), 2);

    let expected = NodeJsPackage {
        dir: "node.js".to_string(),
        package_json: "{\"name\":\"mypkg\"}".to_string(),
        lib_files: strings(&["a.js", "lib/a.js"]),
        test_files: strings(&["a_test.js", "test/b.js", "test/c_test.js"]),
        vendor_files: strings(&["vendor/a.js"]),
        generated_files: strings(&["a.min.js", "dist/a.js"]),
        ..NodeJsPackage::default()
    };
    assert_eq!(packages[0], expected);

    let subpkg = NodeJsPackage {
        dir: "node.js/subpkg".to_string(),
        package_json: "{\"name\":\"subpkg\"}".to_string(),
        lib_files: strings(&["a.js"]),
        ..NodeJsPackage::default()
    };
    assert_eq!(packages[1], subpkg);
}

#[test]
fn test_every_js_file_in_exactly_one_category() {
    let tree = temp_tree(&[
        ("package.json", "{}"),
        ("index.js", ""),
        ("Gruntfile.js", ""),
        ("bin/cli.js", ""),
        ("scripts/release.js", ""),
        ("examples/basic.js", ""),
        ("examples/vendor/shim.js", ""),
        ("docs/test/page.js", ""),
        ("test/fixtures/build.js", ""),
        ("build_support/setup.js", ""),
        ("build/out.js", ""),
        ("lib/util-min.js", ""),
        ("lib/util.js", ""),
        ("lib/util.spec.js", ""),
        ("README.md", ""),
    ]);
    let packages = scan_node(tree.path());
    assert_eq!(packages.len(), 1);
    let package = &packages[0];

    let mut all: Vec<String> = package.all_files().cloned().collect();
    all.sort();
    let mut expected = strings(&[
        "index.js",
        "Gruntfile.js",
        "bin/cli.js",
        "scripts/release.js",
        "examples/basic.js",
        "examples/vendor/shim.js",
        "docs/test/page.js",
        "test/fixtures/build.js",
        "build_support/setup.js",
        "build/out.js",
        "lib/util-min.js",
        "lib/util.js",
        "lib/util.spec.js",
    ]);
    expected.sort();
    assert_eq!(all, expected);

    assert_eq!(package.files(FileCategory::Library), strings(&["index.js", "lib/util.js"]));
    assert_eq!(
        package.files(FileCategory::Script),
        strings(&["bin/cli.js", "scripts/release.js"])
    );
    assert_eq!(
        package.files(FileCategory::Example),
        strings(&["docs/test/page.js", "examples/basic.js"])
    );
    assert_eq!(
        package.files(FileCategory::Vendor),
        strings(&["examples/vendor/shim.js"])
    );
    assert_eq!(
        package.files(FileCategory::Generated),
        strings(&["build/out.js", "lib/util-min.js"])
    );
    assert_eq!(
        package.files(FileCategory::Test),
        strings(&["lib/util.spec.js", "test/fixtures/build.js"])
    );
    assert_eq!(
        package.files(FileCategory::Support),
        strings(&["Gruntfile.js", "build_support/setup.js"])
    );
}

#[test]
fn test_node_modules_never_contribute() {
    let tree = temp_tree(&[
        ("package.json", "{}"),
        ("index.js", ""),
        ("node_modules/dep/package.json", "{}"),
        ("node_modules/dep/index.js", ""),
        ("node_modules/loose.js", ""),
    ]);
    let packages = scan_node(tree.path());

    assert_eq!(packages.len(), 1);
    assert_eq!(
        packages[0].all_files().cloned().collect::<Vec<_>>(),
        strings(&["index.js"])
    );
}

#[test]
fn test_nested_package_files_belong_to_nested_unit() {
    let tree = temp_tree(&[
        ("package.json", "{}"),
        ("lib/a.js", ""),
        ("packages/inner/package.json", "{\"name\":\"inner\"}"),
        ("packages/inner/lib/b.js", ""),
        ("packages/inner/test/b_test.js", ""),
    ]);
    let packages = scan_node(tree.path());

    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].dir, ".");
    assert_eq!(
        packages[0].all_files().cloned().collect::<Vec<_>>(),
        strings(&["lib/a.js"])
    );
    assert_eq!(packages[1].dir, "packages/inner");
    assert_eq!(packages[1].lib_files, strings(&["lib/b.js"]));
    assert_eq!(packages[1].test_files, strings(&["test/b_test.js"]));
}

#[test]
fn test_package_json_whitespace_is_trimmed() {
    let tree = temp_tree(&[("package.json", "\n  {\"name\": \"spaced\"}\n\n")]);
    let packages = scan_node(tree.path());
    assert_eq!(packages[0].package_json, "{\"name\": \"spaced\"}");
}
