use crate::app::{AppError, build_registry, render_schemas};
use crate::config::{AllowList, Config, ShellConfig};
use crate::justfile::{JustError, MockJustOps, RecipeSource};
use crate::mcp::PWD_TOOL;
use std::path::PathBuf;

const DUMP: &str = r#"{"recipes": {
  "build": {"doc": "Build the project", "parameters": [], "private": false},
  "deploy": {"doc": "Deploy the application", "parameters": [
    {"name": "target", "kind": "singular", "default": "staging", "export": false}
  ], "private": false},
  "test": {"doc": null, "parameters": [
    {"name": "test_files", "kind": "star", "default": null, "export": false}
  ], "private": false}
}}"#;

const LISTING: &str = "Available recipes:
    build            # Build the project
    deploy target='staging' # Deploy the application
";

fn config() -> Config {
    Config {
        project_dir: PathBuf::from("/tmp/project"),
        allow_list: None,
        enable_pwd_tool: false,
        dump_schemas: false,
        source: RecipeSource::Dump,
        just_binary: "just".to_string(),
        shell: ShellConfig::default(),
    }
}

fn dump_mock() -> MockJustOps {
    let mut mock = MockJustOps::new();
    mock.expect_dump_json().returning(|_| Ok(DUMP.to_string()));
    mock
}

fn names(registry: &crate::mcp::ToolRegistry) -> Vec<String> {
    registry.tools().iter().map(|t| t.name.to_string()).collect()
}

#[test]
fn test_build_registry_from_dump() {
    let registry = build_registry(&config(), &dump_mock()).unwrap();

    assert_eq!(names(&registry), vec!["build", "deploy", "test"]);
}

#[test]
fn test_build_registry_applies_allow_list() {
    let config = Config {
        allow_list: AllowList::from_names(["test", "missing"]),
        ..config()
    };

    let registry = build_registry(&config, &dump_mock()).unwrap();

    assert_eq!(names(&registry), vec!["test"]);
}

#[test]
fn test_build_registry_registers_pwd_first() {
    let config = Config {
        enable_pwd_tool: true,
        ..config()
    };

    let registry = build_registry(&config, &dump_mock()).unwrap();

    assert_eq!(names(&registry)[0], PWD_TOOL);
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_build_registry_dump_failure_is_fatal() {
    let mut mock = MockJustOps::new();
    mock.expect_dump_json().returning(|_| {
        Err(JustError::NonZeroExit {
            code: 1,
            output: "error: No justfile found".to_string(),
        })
    });

    let result = build_registry(&config(), &mock);

    assert!(matches!(result, Err(AppError::Recipes(_))));
}

#[test]
fn test_build_registry_from_listing() {
    let mut mock = MockJustOps::new();
    mock.expect_list().returning(|_| Ok(LISTING.to_string()));
    let config = Config {
        source: RecipeSource::List,
        ..config()
    };

    let registry = build_registry(&config, &mock).unwrap();

    assert_eq!(names(&registry), vec!["build", "deploy"]);
}

#[test]
fn test_build_registry_listing_failure_yields_no_tools() {
    let mut mock = MockJustOps::new();
    mock.expect_list().returning(|_| Err(JustError::JustNotFound("just".to_string())));
    let config = Config {
        source: RecipeSource::List,
        ..config()
    };

    let registry = build_registry(&config, &mock).unwrap();

    assert!(registry.is_empty());
}

#[test]
fn test_render_schemas_is_json_array_of_tools() {
    let registry = build_registry(&config(), &dump_mock()).unwrap();

    let rendered = render_schemas(&registry).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    let tools = value.as_array().unwrap();
    assert_eq!(tools.len(), 3);
    assert_eq!(tools[1]["name"], "deploy");
    assert_eq!(tools[1]["inputSchema"]["properties"]["target"]["default"], "staging");
    assert!(tools[1]["inputSchema"].get("required").is_none());
}

#[test]
fn test_render_schemas_is_stable_across_runs() {
    let first = render_schemas(&build_registry(&config(), &dump_mock()).unwrap()).unwrap();
    let second = render_schemas(&build_registry(&config(), &dump_mock()).unwrap()).unwrap();

    assert_eq!(first, second);
}
