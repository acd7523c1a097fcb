//! Derivation options and configuration.

use serde::{Deserialize, Serialize};

use crate::sanitize::{SanitizeOptions, SanitizePreset};

/// Options for deriving a description from rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveOptions {
    /// Remove table regions before looking for paragraphs
    pub strip_tables: bool,

    /// How paragraph markup is turned into text
    pub sanitize: SanitizeOptions,

    /// Leave interface message compilations alone
    pub skip_interface_messages: bool,
}

impl DeriveOptions {
    /// Create new derive options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable table stripping.
    pub fn with_strip_tables(mut self, strip: bool) -> Self {
        self.strip_tables = strip;
        self
    }

    /// Keep tables in place (paragraphs inside them become candidates).
    pub fn keep_tables(mut self) -> Self {
        self.strip_tables = false;
        self
    }

    /// Set sanitize options.
    pub fn with_sanitize(mut self, sanitize: SanitizeOptions) -> Self {
        self.sanitize = sanitize;
        self
    }

    /// Set sanitize preset.
    pub fn with_sanitize_preset(mut self, preset: SanitizePreset) -> Self {
        self.sanitize = SanitizeOptions::from_preset(preset);
        self
    }

    /// Enable or disable skipping of interface messages.
    pub fn with_skip_interface_messages(mut self, skip: bool) -> Self {
        self.skip_interface_messages = skip;
        self
    }
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            strip_tables: true,
            sanitize: SanitizeOptions::default(),
            skip_interface_messages: true,
        }
    }
}
