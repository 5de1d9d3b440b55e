use std::path::Path;

use tracing::{debug, info};

use super::error::ConfigError;
use super::AppConfig;

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<AppConfig, ConfigError> {
    let parse_err = |message: String| ConfigError::Parse {
        format: format.label(),
        message,
    };

    let config: AppConfig = match format {
        ConfigFormat::Yaml => {
            // An empty YAML document is `null`, treat it as "all defaults".
            if content.trim().is_empty() {
                AppConfig::default()
            } else {
                serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
        }
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?
        }
    };

    config
        .controller
        .validate()
        .map_err(ConfigError::Validation)?;

    debug!(
        format = format.label(),
        modules = config.controller.modules.len(),
        loader_enabled = config.controller.loader.enabled,
        "Configuration parsed"
    );

    Ok(config)
}

/// Read, parse and validate a configuration file.
///
/// The format follows the extension: `.yaml`/`.yml`, `.toml` or `.json`.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&content, format)?;
    info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}
