use clap::{CommandFactory, Parser};
use treefs::config::TreefsConfig;
use treefs::error::ApiError;
use treefs::shell::render::OutputFormat;
use treefs::tooling::cli::{Cli, CliContext, Commands};
use treefs::types::ROOT_ID;

fn ephemeral() -> CliContext {
    let mut config = TreefsConfig::default();
    config.shell.color = false;
    CliContext::new(config, true).unwrap()
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["treefs"],
        vec!["treefs", "shell"],
        vec!["treefs", "--ephemeral", "shell"],
        vec!["treefs", "exec", "ls"],
        vec!["treefs", "exec", "write", "/f", "hello", "world"],
        vec!["treefs", "exec", "--format", "json", "ls", "/"],
        vec!["treefs", "run", "script.fs"],
        vec!["treefs", "run", "-"],
        vec!["treefs", "--store", "/tmp/fs.db", "--no-color", "shell"],
        vec![
            "treefs",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--log-output",
            "stderr",
            "--log-file",
            "/tmp/treefs.log",
        ],
        vec!["treefs", "exec", "--config", "/tmp/config.toml", "pwd"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_invocations() {
    let invalid: Vec<Vec<&str>> = vec![
        vec!["treefs", "exec"],
        vec!["treefs", "run"],
        vec!["treefs", "exec", "--format", "yaml", "ls"],
        vec!["treefs", "--ephemeral", "--store", "/tmp/fs.db"],
        vec!["treefs", "mount"],
    ];

    for args in invalid {
        assert!(
            Cli::try_parse_from(args.clone()).is_err(),
            "expected parse failure for args: {args:?}"
        );
    }
}

#[test]
fn exec_line_keeps_its_words() {
    let cli = Cli::try_parse_from(["treefs", "exec", "write", "/f", "a", "-b"]).unwrap();
    match cli.resolved_command() {
        Commands::Exec { line, format } => {
            assert_eq!(line, vec!["write", "/f", "a", "-b"]);
            assert_eq!(format, OutputFormat::Text);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cli_debug_assertions_hold() {
    Cli::command().debug_assert();
}

#[test]
fn exec_json_output_contract() {
    let context = ephemeral();
    let ns = context.namespace();
    ns.create_directory(ROOT_ID, "docs").unwrap();
    ns.create_file(ROOT_ID, "readme").unwrap();

    let output = context
        .execute(&Commands::Exec {
            line: vec!["ls".to_string()],
            format: OutputFormat::Json,
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["type"], "listing");
    let entries = parsed["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "docs");
    assert_eq!(entries[0]["kind"], "directory");
    assert_eq!(entries[1]["name"], "readme");
    assert_eq!(entries[1]["kind"], "file");

    let output = context
        .execute(&Commands::Exec {
            line: vec!["pwd".to_string()],
            format: OutputFormat::Json,
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["type"], "path");
    assert_eq!(parsed["path"], "/");
}

#[test]
fn exec_json_error_contract() {
    let context = ephemeral();
    let err = context
        .execute(&Commands::Exec {
            line: vec!["rm".to_string(), "/".to_string()],
            format: OutputFormat::Json,
        })
        .unwrap_err();
    let ApiError::CommandFailed(rendered) = err else {
        panic!("expected a rendered command failure");
    };
    let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed["type"], "error");
    assert_eq!(parsed["kind"], "cannot_remove_root");
    assert!(parsed["message"].as_str().is_some());
}
