//! CLI configuration management
//!
//! Handles loading and saving CLI-specific configuration.

use anyhow::{Context, Result};
use mbapy_core::default_config_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default executable prefix: script `cnipa` runs `mbapy-cnipa`.
pub const DEFAULT_SCRIPT_PREFIX: &str = "mbapy-";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Registry file to load instead of the default location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_path: Option<PathBuf>,

    /// Directory searched for script executables before PATH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_dir: Option<PathBuf>,

    /// Prefix joined to a script name to form its executable name
    pub script_prefix: String,

    /// Default output format
    pub output_format: String,

    /// Enable verbose logging by default
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            registry_path: None,
            script_dir: None,
            script_prefix: DEFAULT_SCRIPT_PREFIX.to_string(),
            output_format: "table".to_string(),
            verbose: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CLI config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse CLI config file {}", path.display()))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize CLI config")?;

        std::fs::write(path, content).context("Failed to write CLI config file")?;

        Ok(())
    }

    /// Resolve the configuration file path, preferring an explicit override
    pub fn config_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path)
    }

    /// Set a single key from its string form, validating the value
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "registry_path" => self.registry_path = non_empty_path(value),
            "script_dir" => self.script_dir = non_empty_path(value),
            "script_prefix" => {
                ConfigBuilder::validate_script_prefix(value)?;
                self.script_prefix = value.to_string();
            }
            "output_format" => {
                ConfigBuilder::validate_output_format(value)?;
                self.output_format = value.to_string();
            }
            "verbose" => self.verbose = parse_bool(value),
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown configuration key '{}'. Valid keys: registry_path, script_dir, \
                     script_prefix, output_format, verbose",
                    key
                ));
            }
        }
        Ok(())
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

fn parse_bool(value: &str) -> bool {
    value.to_lowercase() == "true" || value == "1"
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
///
/// Sources are applied highest priority first and each one only fills
/// values that are still unset. Path settings are `Some(None)` once a source
/// has cleared them, e.g. `MBAPY_REGISTRY=""` hides a `registry_path` from
/// the config file.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    registry_path: Option<Option<PathBuf>>,
    script_dir: Option<Option<PathBuf>>,
    script_prefix: Option<String>,
    output_format: Option<String>,
    verbose: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set registry file path
    pub fn with_registry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_path = Some(Some(path.into()));
        self
    }

    /// Set script directory
    pub fn with_script_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.script_dir = Some(Some(dir.into()));
        self
    }

    /// Set executable prefix (with validation)
    pub fn with_script_prefix(mut self, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        Self::validate_script_prefix(&prefix)?;
        self.script_prefix = Some(prefix);
        Ok(self)
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Set verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Load configuration from file
    ///
    /// A missing file is not an error; a file that exists but cannot be
    /// parsed is.
    pub fn with_config_file(self, path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(self);
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no CLI config file");
            return Ok(self);
        }

        let config = CliConfig::load(path)?;
        let builder = self;
        // Only use file values if they weren't already set (preserving priority)
        Ok(Self {
            registry_path: builder.registry_path.or(Some(config.registry_path)),
            script_dir: builder.script_dir.or(Some(config.script_dir)),
            script_prefix: builder.script_prefix.or(Some(config.script_prefix)),
            output_format: builder.output_format.or(Some(config.output_format)),
            verbose: builder.verbose.or(Some(config.verbose)),
        })
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        // Only apply env vars if values weren't already set (preserving priority)
        if self.registry_path.is_none() {
            if let Ok(path) = std::env::var("MBAPY_REGISTRY") {
                self.registry_path = Some(non_empty_path(&path));
            }
        }

        if self.script_dir.is_none() {
            if let Ok(dir) = std::env::var("MBAPY_SCRIPT_DIR") {
                self.script_dir = Some(non_empty_path(&dir));
            }
        }

        if self.script_prefix.is_none() {
            if let Ok(prefix) = std::env::var("MBAPY_SCRIPT_PREFIX") {
                // Validate before applying
                if Self::validate_script_prefix(&prefix).is_ok() {
                    self.script_prefix = Some(prefix);
                }
            }
        }

        if self.output_format.is_none() {
            if let Ok(format) = std::env::var("MBAPY_FORMAT") {
                // Validate before applying
                if Self::validate_output_format(&format).is_ok() {
                    self.output_format = Some(format);
                }
            }
        }

        if self.verbose.is_none() {
            if let Ok(verbose) = std::env::var("MBAPY_VERBOSE") {
                self.verbose = Some(parse_bool(&verbose));
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        let script_prefix = self.script_prefix.unwrap_or(defaults.script_prefix);
        let output_format = self.output_format.unwrap_or(defaults.output_format);

        // Validate final values
        Self::validate_script_prefix(&script_prefix)?;
        Self::validate_output_format(&output_format)?;

        Ok(CliConfig {
            registry_path: self.registry_path.flatten(),
            script_dir: self.script_dir.flatten(),
            script_prefix,
            output_format,
            verbose: self.verbose.unwrap_or(defaults.verbose),
        })
    }

    /// Validate output format
    fn validate_output_format(format: &str) -> Result<()> {
        match format {
            "table" | "json" => Ok(()),
            _ => Err(anyhow::anyhow!(
                "Invalid output format '{}'. Must be 'table' or 'json'",
                format
            )),
        }
    }

    /// Validate executable prefix
    fn validate_script_prefix(prefix: &str) -> Result<()> {
        if prefix.contains('/') || prefix.contains('\\') {
            return Err(anyhow::anyhow!(
                "Script prefix '{}' must not contain path separators",
                prefix
            ));
        }

        if prefix.chars().any(char::is_whitespace) {
            return Err(anyhow::anyhow!(
                "Script prefix '{}' must not contain whitespace",
                prefix
            ));
        }

        Ok(())
    }
}
