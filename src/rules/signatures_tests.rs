use serde_json::json;

use super::*;
use crate::config::Config;
use crate::rules::check;

fn messages(found: &[LintingViolation]) -> Vec<&str> {
    found.iter().map(|v| v.message.as_str()).collect()
}

#[test]
fn component_without_init_is_flagged() {
    let content = "component {\n    public string function name() { return \"x\"; }\n}\n";
    let found = check(&RequireInitRule::new(), "User.cfc", content, &Config::default());
    assert_eq!(
        messages(&found),
        vec!["Component should have an init() method for proper initialization"]
    );
    assert_eq!((found[0].line, found[0].column), (1, 1));
}

#[test]
fn init_in_any_case_satisfies_rule() {
    let content = "component {\n    public User function Init() { return this; }\n}\n";
    assert!(check(&RequireInitRule::new(), "User.cfc", content, &Config::default()).is_empty());
}

#[test]
fn interfaces_and_templates_need_no_init() {
    let interface = "interface IRepository {\n    function find(id);\n}\n";
    assert!(check(&RequireInitRule::new(), "IRepository.cfc", interface, &Config::default()).is_empty());

    let bodiless = "component {\n    function find(id);\n}\n";
    assert!(check(&RequireInitRule::new(), "IRepository.cfc", bodiless, &Config::default()).is_empty());

    assert!(check(&RequireInitRule::new(), "page.cfm", "component {}\n", &Config::default()).is_empty());
}

#[test]
fn init_check_can_be_disabled() {
    let config = Config::default().with_overlay(json!({
        "linting": { "rules": { "codeStructure": { "requireInit": false } } }
    }));
    assert!(check(&RequireInitRule::new(), "User.cfc", "component {\n}\n", &config).is_empty());
}

#[test]
fn missing_return_type_skips_lifecycle_methods() {
    let content = concat!(
        "component {\n",
        "    function init() { return this; }\n",
        "    function onRequestStart() {}\n",
        "    public function save() {}\n",
        "    public numeric function count() { return 0; }\n",
        "}\n",
    );
    let found = check(&RequireReturnTypesRule, "Repo.cfc", content, &Config::default());
    assert_eq!(messages(&found), vec!["Function 'save' should specify a return type"]);
    assert_eq!((found[0].line, found[0].column), (4, 5));
}

#[test]
fn untyped_arguments_are_reported_at_the_argument() {
    let content = "function save(required string name, id, required flag) {}\n";
    let found = check(&RequireArgumentTypesRule, "a.cfc", content, &Config::default());
    assert_eq!(
        messages(&found),
        vec![
            "Function argument 'id' should specify a type",
            "Function argument 'flag' should specify a type",
        ]
    );
    assert_eq!(found[0].line, 1);
    assert_eq!(found[0].column, 37);
}

#[test]
fn properties_without_accessors_are_info() {
    let content = "component {\n    property name=\"id\";\n}\n";
    let found = check(&UseAccessorsRule::new(), "User.cfc", content, &Config::default());
    assert_eq!(
        messages(&found),
        vec![r#"Component with properties should use accessors="true""#]
    );
    assert_eq!(found[0].severity, Severity::Info);
}

#[test]
fn accessors_attribute_satisfies_rule() {
    let content = "component accessors=\"true\" {\n    property name=\"id\";\n}\n";
    assert!(check(&UseAccessorsRule::new(), "User.cfc", content, &Config::default()).is_empty());

    let no_properties = "component {\n    function init() {}\n}\n";
    assert!(check(&UseAccessorsRule::new(), "User.cfc", no_properties, &Config::default()).is_empty());
}
