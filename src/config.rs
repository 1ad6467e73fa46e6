use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// Defaults shipped with the crate, validated by `build.rs`.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub parse: ParseOptions,
    pub html: HtmlConfig,
    pub copy: CopyConfig,
}

/// Options that change how ambiguous input is split into blocks.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ParseOptions {
    /// Keep empty table cells between the outer pipes instead of dropping them.
    pub keep_inner_empty_cells: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HtmlConfig {
    /// Emit a copy button in each code block header.
    pub copy_buttons: bool,
    pub copy_label: String,
    pub copied_label: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            copy_buttons: true,
            copy_label: "Copy".to_string(),
            copied_label: "Copied!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CopyConfig {
    /// How long a code block shows as copied, in milliseconds.
    pub feedback_ms: u64,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self { feedback_ms: 2000 }
    }
}

impl CopyConfig {
    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

impl Config {
    /// The configuration embedded at build time.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled defaults if it
    /// is missing or invalid.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default config, {} not loaded: {}", path.display(), e);
                Self::compiled_default()
            }
        }
    }

    /// Load config from a TOML file, reporting read and parse failures.
    pub fn try_load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
