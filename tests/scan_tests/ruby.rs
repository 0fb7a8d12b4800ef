//! Ruby gem and app tests

use pretty_assertions::assert_eq;
use srcscan::discovery::languages::{RubyApp, RubyGem};
use srcscan::Unit;

use super::test_utils::*;
use crate::fixtures::temp_tree;

#[test]
fn test_gem_sources_and_tests() {
    let tree = temp_tree(&[
        ("rack/rack.gemspec", ""),
        ("rack/lib/rack.rb", ""),
        ("rack/lib/utils/helpers.rb", ""),
        ("rack/lib/utils/README", ""),
        ("rack/spec/utils_spec.rb", ""),
        ("rack/test/helper.rb", ""),
        ("rack/vendored/inner.gemspec", ""),
    ]);
    let units = scan_sorted(&config_for(tree.path()), tree.path());

    assert_eq!(
        units,
        vec![Unit::RubyGem(RubyGem {
            dir: "rack".to_string(),
            src_files: strings(&["lib/rack.rb", "lib/utils/helpers.rb"]),
            test_files: strings(&["spec/utils_spec.rb", "test/helper.rb"]),
        })]
    );
}

#[test]
fn test_app_collects_every_source_dir() {
    let tree = temp_tree(&[
        ("blog/config.ru", ""),
        ("blog/app/models/post.rb", ""),
        ("blog/lib/tasks/seed.rb", ""),
        ("blog/config/routes.rb", ""),
        ("blog/db/schema.rb", ""),
        ("blog/spec/post_spec.rb", ""),
        ("blog/engines/admin/config.ru", ""),
    ]);
    let units = scan_sorted(&config_for(tree.path()), tree.path());

    assert_eq!(
        units,
        vec![Unit::RubyApp(RubyApp {
            dir: "blog".to_string(),
            src_files: strings(&[
                "app/models/post.rb",
                "lib/tasks/seed.rb",
                "config/routes.rb",
                "db/schema.rb",
            ]),
            test_files: strings(&["spec/post_spec.rb"]),
        })]
    );
}

#[test]
fn test_sibling_gems_are_both_found() {
    let tree = temp_tree(&[("a/a.gemspec", ""), ("b/b.gemspec", "")]);
    let units = scan_sorted(&config_for(tree.path()), tree.path());

    let paths: Vec<&str> = units.iter().map(|u| u.path()).collect();
    assert_eq!(paths, vec!["a", "b"]);
}
