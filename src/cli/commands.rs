use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{load_config, AppConfig};
use crate::dispatcher::Dispatcher;
use crate::http::{attr, Request};
use crate::logging::init_logging;
use crate::registry::ControllerRegistry;

/// Command-line interface for actionrouter
#[derive(Parser, Debug)]
#[command(name = "actionrouter", version)]
#[command(about = "Inspect and validate controller routing configuration", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the controller a module/controller pair routes to
    Resolve {
        /// Path to the configuration file (YAML, TOML or JSON)
        #[arg(short, long, env = "ACTIONROUTER_CONFIG")]
        config: PathBuf,

        /// Module token; defaults to `defaultModule`
        #[arg(short, long)]
        module: Option<String>,

        /// Controller token; defaults to `defaultController`
        #[arg(long)]
        controller: Option<String>,
    },
    /// Load and validate a configuration file
    Check {
        /// Path to the configuration file (YAML, TOML or JSON)
        #[arg(short, long, env = "ACTIONROUTER_CONFIG")]
        config: PathBuf,
    },
}

impl Commands {
    fn config_path(&self) -> &Path {
        match self {
            Commands::Resolve { config, .. } | Commands::Check { config } => config.as_path(),
        }
    }
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The configuration cannot be read, parsed or validated
/// - Logging cannot be initialised
/// - `resolve` finds no route for the given attributes
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let path = cli.command.config_path();
    let config = load_config(path)
        .with_context(|| format!("invalid configuration {}", path.display()))?;

    init_logging(&config.logging)?;

    let stdout = std::io::stdout();
    run_command(&cli.command, &config, &mut stdout.lock())
}

/// Run `command` against an already loaded configuration, writing the report to `out`.
pub fn run_command(command: &Commands, config: &AppConfig, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Check { config: path } => {
            let options = &config.controller;
            writeln!(out, "{}: ok", path.display())?;
            writeln!(out, "namespace: {}", options.namespace().unwrap_or("<none>"))?;
            writeln!(out, "modules: {}", options.modules.len())?;
            if options.loader.enabled {
                writeln!(out, "loader: {}", options.loader.path.display())?;
            } else {
                writeln!(out, "loader: disabled")?;
            }
            Ok(())
        }
        Commands::Resolve {
            module, controller, ..
        } => {
            let mut request = Request::default();
            if let Some(module) = module {
                request = request.with_attribute(attr::MODULE, module.as_str());
            }
            if let Some(controller) = controller {
                request = request.with_attribute(attr::CONTROLLER, controller.as_str());
            }

            let dispatcher = Dispatcher::new(
                Arc::new(config.controller.clone()),
                Arc::new(ControllerRegistry::new()),
            );
            let id = dispatcher
                .controller_id(&request)
                .map_err(|reason| anyhow!("no route: {reason}"))?;
            writeln!(out, "controller: {id}")?;

            if config.controller.loader.enabled {
                match dispatcher.loader().locate(id.as_str()) {
                    Some(file) => {
                        let state = if file.is_file() { "exists" } else { "missing" };
                        writeln!(out, "file: {} ({state})", file.display())?;
                    }
                    None => writeln!(out, "file: <outside namespace>")?,
                }
            }
            Ok(())
        }
    }
}
