//! Unit tests for CLI commands

use crate::cli::{error_report, Cli, Commands};
use crate::error::ScenarioError;
use clap::Parser;

#[test]
fn test_generate_single_operation() {
    let cli = Cli::try_parse_from([
        "oas-gherkin",
        "generate",
        "--spec",
        "test.yaml",
        "--path",
        "/items/{id}",
        "--method",
        "get",
        "--types",
        "required_fields,not_found",
        "--format",
        "markdown",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate {
            spec,
            path,
            method,
            types,
            format,
            output,
            force,
            dry_run,
            ..
        } => {
            assert_eq!(spec.to_string_lossy(), "test.yaml");
            assert_eq!(path.as_deref(), Some("/items/{id}"));
            assert_eq!(method.as_deref(), Some("get"));
            assert_eq!(types.as_deref(), Some("required_fields,not_found"));
            assert_eq!(format.as_deref(), Some("markdown"));
            assert!(output.is_none());
            assert!(!force);
            assert!(!dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_path_requires_method() {
    let result = Cli::try_parse_from([
        "oas-gherkin",
        "generate",
        "--spec",
        "test.yaml",
        "--path",
        "/items",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_list_command_with_flags() {
    let cli = Cli::try_parse_from([
        "oas-gherkin",
        "list",
        "--spec",
        "test.yaml",
        "--tag",
        "pets",
        "--group-by-tag",
        "-v",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::List {
            tag, group_by_tag, ..
        } => {
            assert_eq!(tag.as_deref(), Some("pets"));
            assert!(group_by_tag);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["oas-gherkin", "list", "--spec", "test.yaml"],
        vec![
            "oas-gherkin",
            "analyze",
            "--spec",
            "test.yaml",
            "--path",
            "/items",
            "--method",
            "post",
        ],
        vec![
            "oas-gherkin",
            "generate",
            "--spec",
            "test.yaml",
            "--output",
            "features",
            "--force",
            "--dry-run",
        ],
    ];

    for args in commands {
        let result = Cli::try_parse_from(&args);
        assert!(result.is_ok(), "Failed to parse: {:?}", args);
    }
}

#[test]
fn test_error_report_keeps_library_kind() {
    let err = anyhow::Error::new(ScenarioError::UnsupportedFormat {
        format: "yaml".to_string(),
    });
    let report = error_report(&err);
    assert_eq!(report.kind, "unsupported_format");
    assert_eq!(report.details["format"], "yaml");

    let other = anyhow::anyhow!("Failed to read config");
    assert_eq!(error_report(&other).kind, "cli");
}
