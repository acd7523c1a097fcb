//! Integration configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::derive::DeriveOptions;
use crate::error::Result;
use crate::hooks::DIRECTIVE_NAME;

/// Configuration consumed by [`Hooks`](crate::hooks::Hooks).
///
/// Loaded from JSON; missing fields take their defaults.
///
/// ```
/// use metadesc::Config;
///
/// let config = Config::from_json_str(r#"{ "enable_meta_description_functions": true }"#)?;
/// assert!(config.enable_meta_description_functions);
/// assert!(config.derive.strip_tables);
/// # Ok::<(), metadesc::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Register the description override directive with the host
    pub enable_meta_description_functions: bool,

    /// Name authors use to invoke the override directive
    pub directive_name: String,

    /// Automatic derivation options
    pub derive: DeriveOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_meta_description_functions: false,
            directive_name: DIRECTIVE_NAME.to_string(),
            derive: DeriveOptions::default(),
        }
    }
}

impl Config {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the override directive.
    pub fn with_meta_description_functions(mut self, enable: bool) -> Self {
        self.enable_meta_description_functions = enable;
        self
    }

    /// Set the name the override directive is registered under.
    pub fn with_directive_name(mut self, name: impl Into<String>) -> Self {
        self.directive_name = name.into();
        self
    }

    /// Set derivation options.
    pub fn with_derive_options(mut self, options: DeriveOptions) -> Self {
        self.derive = options;
        self
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
