//! Unit tests for CLI commands

use super::{run_command, Cli, Commands};
use crate::config::{parse_config, AppConfig, ConfigFormat};
use clap::Parser;
use std::fs;
use tempfile::TempDir;

fn output(command: &Commands, config: &AppConfig) -> anyhow::Result<String> {
    let mut out = Vec::new();
    run_command(command, config, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn resolve(module: Option<&str>, controller: Option<&str>) -> Commands {
    Commands::Resolve {
        config: "app.yaml".into(),
        module: module.map(str::to_string),
        controller: controller.map(str::to_string),
    }
}

#[test]
fn test_resolve_command_parses() {
    let cli = Cli::try_parse_from([
        "actionrouter",
        "resolve",
        "--config",
        "app.yaml",
        "--module",
        "adm",
        "--controller",
        "other",
    ])
    .unwrap();

    match cli.command {
        Commands::Resolve {
            config,
            module,
            controller,
        } => {
            assert_eq!(config.to_string_lossy(), "app.yaml");
            assert_eq!(module.as_deref(), Some("adm"));
            assert_eq!(controller.as_deref(), Some("other"));
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_check_command_requires_config() {
    assert!(Cli::try_parse_from(["actionrouter", "check", "--config", "app.toml"]).is_ok());
    assert!(Cli::try_parse_from(["actionrouter", "bogus"]).is_err());
}

#[test]
fn test_resolve_defaults() {
    let out = output(&resolve(None, None), &AppConfig::default()).unwrap();
    assert_eq!(out, "controller: IndexController\n");
}

#[test]
fn test_resolve_reports_loader_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("admin")).unwrap();
    fs::write(dir.path().join("admin/OtherController.rs"), "// other\n").unwrap();

    let yaml = format!(
        "controller:\n  nameSpace: app\n  modules:\n    adm: admin\n  loader:\n    enabled: true\n    path: {}\n",
        dir.path().display()
    );
    let config = parse_config(&yaml, ConfigFormat::Yaml).unwrap();

    let out = output(&resolve(Some("adm"), Some("other")), &config).unwrap();
    assert!(out.starts_with("controller: app::admin::OtherController\n"));
    assert!(out.contains("OtherController.rs (exists)"));

    let out = output(&resolve(Some("adm"), Some("missing")), &config).unwrap();
    assert!(out.contains("MissingController.rs (missing)"));
}

#[test]
fn test_resolve_without_route_fails() {
    let err = output(&resolve(Some("blog"), None), &AppConfig::default()).unwrap_err();
    assert!(err.to_string().contains("module 'blog' is not configured"));

    let err = output(&resolve(None, Some("Index")), &AppConfig::default()).unwrap_err();
    assert!(err.to_string().starts_with("no route"));
}

#[test]
fn test_check_summary() {
    let command = Commands::Check {
        config: "app.yaml".into(),
    };
    let out = output(&command, &AppConfig::default()).unwrap();
    assert_eq!(
        out,
        "app.yaml: ok\nnamespace: <none>\nmodules: 0\nloader: disabled\n"
    );
}
