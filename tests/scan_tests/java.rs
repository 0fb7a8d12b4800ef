//! Maven project tests

use pretty_assertions::assert_eq;
use srcscan::discovery::languages::JavaProject;
use srcscan::Unit;

use super::test_utils::*;
use crate::fixtures::temp_tree;

#[test]
fn test_maven_project_layout() {
    let tree = temp_tree(&[
        ("svc/pom.xml", "<project/>"),
        ("svc/src/main/java/com/acme/App.java", ""),
        ("svc/src/main/java/com/acme/Util.java", ""),
        ("svc/src/main/resources/app.properties", ""),
        ("svc/src/test/java/com/acme/AppTest.java", ""),
        ("svc/module/pom.xml", "<project/>"),
    ]);
    let units = scan_sorted(&config_for(tree.path()), tree.path());

    assert_eq!(
        units,
        vec![Unit::JavaProject(JavaProject {
            dir: "svc".to_string(),
            project_classpath: "target/classes".to_string(),
            src_files: strings(&[
                "src/main/java/com/acme/App.java",
                "src/main/java/com/acme/Util.java",
            ]),
            test_files: strings(&["src/test/java/com/acme/AppTest.java"]),
        })]
    );
}

#[test]
fn test_project_without_sources() {
    let tree = temp_tree(&[("pom.xml", "<project/>")]);
    let units = scan_sorted(&config_for(tree.path()), tree.path());

    assert_eq!(
        units,
        vec![Unit::JavaProject(JavaProject {
            dir: ".".to_string(),
            project_classpath: "target/classes".to_string(),
            ..JavaProject::default()
        })]
    );
}
