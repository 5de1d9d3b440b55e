use std::fmt;
use std::path::PathBuf;

/// A single problem found while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted key of the offending value, e.g. `controller.loader.pattern`
    pub key: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Error returned by [`load_config`](super::load_config) and
/// [`parse_config`](super::parse_config).
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The extension does not name a supported format
    UnsupportedFormat { path: PathBuf },
    /// The content is not valid for its format
    Parse {
        format: &'static str,
        message: String,
    },
    /// The content parsed but describes an unusable configuration
    Validation(Vec<ValidationIssue>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config '{}': {}", path.display(), source)
            }
            ConfigError::UnsupportedFormat { path } => write!(
                f,
                "unsupported config format '{}', expected .yaml, .yml, .toml or .json",
                path.display()
            ),
            ConfigError::Parse { format, message } => {
                write!(f, "invalid {format} config: {message}")
            }
            ConfigError::Validation(issues) => {
                write!(f, "config validation failed: ")?;
                for (i, issue) in issues.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{issue}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
