use serde_json::json;

use super::*;
use crate::config::Config;
use crate::rules::check;

fn messages(found: &[LintingViolation]) -> Vec<String> {
    found.iter().map(|v| v.message.clone()).collect()
}

#[test]
fn component_file_with_underscore_gets_two_findings() {
    let found = check(&FileNamingRule, "user_service.cfc", "component {}", &Config::default());
    assert_eq!(
        messages(&found),
        vec![
            "CFC filename 'user_service' should be PascalCase",
            "CFC filename 'user_service' should not contain underscores, use PascalCase instead",
        ]
    );
}

#[test]
fn component_file_with_hyphen() {
    let found = check(&FileNamingRule, "User-Service.cfc", "component {}", &Config::default());
    assert_eq!(found.len(), 2);
    assert!(found[1].message.contains("hyphens"));
}

#[test]
fn template_names_are_camel_case() {
    let found = check(&FileNamingRule, "UserList.cfm", "", &Config::default());
    assert_eq!(messages(&found), vec!["CFM filename 'UserList' should be camelCase"]);
    assert!(check(&FileNamingRule, "userList.cfm", "", &Config::default()).is_empty());
}

#[test]
fn special_templates_pass() {
    for name in ["Application.cfm", "index.cfm", "404.cfm", "error.cfml"] {
        assert!(
            check(&FileNamingRule, name, "", &Config::default()).is_empty(),
            "{name}"
        );
    }
}

#[test]
fn template_underscore_is_info() {
    let found = check(&FileNamingRule, "user_list.cfm", "", &Config::default());
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].severity, Severity::Info);
    assert_eq!(
        found[1].message,
        "CFM filename 'user_list' should avoid underscores, use camelCase instead"
    );
}

#[test]
fn other_extensions_are_ignored() {
    assert!(check(&FileNamingRule, "bad_name.js", "", &Config::default()).is_empty());
}

#[test]
fn explicit_interface_needs_prefix() {
    let content = "interface Repository {\n    function find(id);\n}\n";
    let found = check(&InterfacePrefixRule::new(), "IRepository.cfc", content, &Config::default());
    assert_eq!(
        messages(&found),
        vec!["Interface name 'Repository' should start with prefix 'I'"]
    );
    assert_eq!((found[0].line, found[0].column), (1, 11));
}

#[test]
fn bodiless_component_looks_like_interface() {
    let content = "component {\n    function find(id);\n    function save(entity);\n}\n";
    let found = check(&InterfacePrefixRule::new(), "Repository.cfc", content, &Config::default());
    assert_eq!(
        messages(&found),
        vec!["Component 'Repository' appears to be an interface and should start with prefix 'I'"]
    );
    assert_eq!(found[0].severity, Severity::Info);
}

#[test]
fn implemented_component_is_not_an_interface() {
    let content = "component {\n    function find(id);\n    function save(entity) { return 1; }\n}\n";
    assert!(
        check(&InterfacePrefixRule::new(), "Repository.cfc", content, &Config::default())
            .is_empty()
    );
}

#[test]
fn empty_prefix_disables_interface_check() {
    let config = Config::default().with_overlay(json!({
        "linting": { "rules": { "naming": { "interfacePrefix": "" } } }
    }));
    let content = "component {\n    function find(id);\n}\n";
    assert!(check(&InterfacePrefixRule::new(), "Repository.cfc", content, &config).is_empty());
}

#[test]
fn explicitly_abstract_component_needs_suffix() {
    let content = "component abstract=\"true\" {\n    function run() { return 1; }\n}\n";
    let found = check(&AbstractSuffixRule::new(), "Shape.cfc", content, &Config::default());
    assert_eq!(
        messages(&found),
        vec!["Component 'Shape' explicitly abstract and should end with suffix 'Abstract'"]
    );
}

#[test]
fn abstract_methods_and_base_name_both_reported() {
    let content = "component {\n    public abstract function area();\n}\n";
    let found = check(&AbstractSuffixRule::new(), "BaseShape.cfc", content, &Config::default());
    assert_eq!(
        messages(&found),
        vec![
            "Component 'BaseShape' contains abstract methods and should end with suffix 'Abstract'",
            "Component 'BaseShape' appears to be a base class and should end with suffix 'Abstract'",
        ]
    );
}

#[test]
fn placeholder_bodies_suggest_base_class() {
    let content = concat!(
        "component {\n",
        "    function a() {}\n",
        "    function b() { throw(\"override me\"); }\n",
        "    function c() { return 1; }\n",
        "}\n",
    );
    let found = check(&AbstractSuffixRule::new(), "Shape.cfc", content, &Config::default());
    assert_eq!(found.len(), 1);
    assert!(found[0].message.contains("appears to be a base class"));
}

#[test]
fn suffix_already_present_passes() {
    let content = "component abstract=\"true\" {}\n";
    assert!(
        check(&AbstractSuffixRule::new(), "ShapeAbstract.cfc", content, &Config::default())
            .is_empty()
    );
}

#[test]
fn concrete_component_passes() {
    let content = "component {\n    function area() { return w * h; }\n}\n";
    assert!(check(&AbstractSuffixRule::new(), "Rectangle.cfc", content, &Config::default()).is_empty());
}
