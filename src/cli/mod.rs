//! # CLI Module
//!
//! Command-line tooling for checking a routing configuration without
//! running an application.
//!
//! ## Commands
//!
//! ### `resolve`
//!
//! Show which controller a `(module, controller)` pair routes to:
//!
//! ```bash
//! actionrouter resolve --config app.yaml --module adm --controller other
//! ```
//!
//! Prints the controller identifier and, when the loader is enabled, the
//! candidate source file and whether it exists. Omitted attributes fall back
//! to the configured defaults.
//!
//! ### `check`
//!
//! Load and validate a configuration file:
//!
//! ```bash
//! actionrouter check --config app.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use actionrouter::cli::run_cli;
//!
//! run_cli()?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, run_command, Cli, Commands};
