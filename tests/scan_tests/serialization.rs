//! Tagged JSON records

use pretty_assertions::assert_eq;
use serde_json::json;
use srcscan::{Unit, UnitKind};

use super::test_utils::*;
use crate::fixtures::mixed_tree;

#[test]
fn test_scanned_units_round_trip() {
    let tree = mixed_tree();
    let units = scan_sorted(&config_for(tree.path()), tree.path());
    assert!(!units.is_empty());

    let json = serde_json::to_string_pretty(&units).unwrap();
    let decoded: Vec<Unit> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, units);

    for unit in &units {
        let body = unit.to_json().unwrap();
        assert_eq!(&Unit::from_json(&body, unit.type_name()).unwrap(), unit);
    }
}

#[test]
fn test_node_package_record_layout() {
    let tree = mixed_tree();
    let units = scan_sorted(&config_for(tree.path()), tree.path());
    let subpkg = units
        .iter()
        .find(|u| u.sort_key() == ("NodeJSPackage", "node.js/subpkg"))
        .unwrap();

    assert_eq!(
        serde_json::to_value(subpkg).unwrap(),
        json!({
            "Type": "NodeJSPackage",
            "Unit": {
                "Dir": "node.js/subpkg",
                "PackageJSON": {"name": "subpkg"},
                "LibFiles": ["a.js"],
            }
        })
    );
}

#[test]
fn test_every_tag_decodes() {
    let records = [
        (UnitKind::GoPackage, json!({"Dir": "go", "Name": "x", "XTestGoFiles": ["x_test.go"]})),
        (UnitKind::NodeJsPackage, json!({"Dir": "js", "PackageJSON": {"name": "x"}})),
        (UnitKind::PythonPackage, json!({"Dir": "py"})),
        (UnitKind::PythonModule, json!({"File": "x.py"})),
        (UnitKind::RubyGem, json!({"Dir": "gem", "SrcFiles": ["lib/x.rb"]})),
        (UnitKind::RubyApp, json!({"Dir": "app"})),
        (UnitKind::JavaProject, json!({"Dir": "java", "ProjectClasspath": "target/classes"})),
    ];

    for (kind, body) in records {
        let record = json!({"Type": kind.as_str(), "Unit": body});
        let unit: Unit = serde_json::from_str(&record.to_string()).unwrap_or_else(|e| {
            panic!("decoding {kind}: {e}");
        });
        assert_eq!(unit.kind(), kind);
        assert_eq!(serde_json::to_value(&unit).unwrap(), record);
    }
}

#[test]
fn test_unknown_tag_fails() {
    let err = serde_json::from_str::<Unit>(r#"{"Type": "CabalPackage", "Unit": {}}"#).unwrap_err();
    assert!(err.to_string().contains("unhandled source unit type: CabalPackage"));
}
