//! # Configuration Module
//!
//! Application configuration for the dispatch layer.
//!
//! The file is read once at startup and the resulting [`AppConfig`] is shared
//! read-only afterwards. Routing options live under the `controller` key,
//! logging under `logging`:
//!
//! ```yaml
//! controller:
//!   nameSpace: app::controllers
//!   modules:
//!     adm: admin
//!   defaultController: index
//!   controllerPattern: "%sController"
//!   controllerInflection: camelize
//!   loader:
//!     enabled: true
//!     path: ./controllers
//!     pattern: "%s.rs"
//! logging:
//!   level: info
//!   format: pretty
//! ```
//!
//! YAML, TOML and JSON are accepted; the format is picked from the file
//! extension. Every file is validated before it is handed out, see
//! [`RoutingOptions::validate`].

mod error;
mod load;
mod options;

pub use error::{ConfigError, ValidationIssue};
pub use load::{load_config, parse_config, ConfigFormat};
pub use options::{fill_pattern, LoaderOptions, RoutingOptions};

use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Routing options, the `controller` namespace
    pub controller: RoutingOptions,
    pub logging: LoggingConfig,
}
