//! Registry resolution
//!
//! Picks the registry document for this run: an explicitly configured file,
//! else the file in the data directory if present, else the registry
//! compiled into the binary.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mbapy_core::{default_registry_path, Registry};
use tracing::debug;

/// Where the loaded registry came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    File(PathBuf),
    Builtin,
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrySource::File(path) => write!(f, "{}", path.display()),
            RegistrySource::Builtin => f.write_str("built-in"),
        }
    }
}

/// Load the registry for this process.
///
/// A configured path must exist and parse; the default data-dir file is only
/// used when present.
pub fn load_registry(configured: Option<&Path>) -> Result<(Registry, RegistrySource)> {
    load_registry_with_fallback(configured, &default_registry_path())
}

/// Same as [`load_registry`] with an explicit fallback location.
pub fn load_registry_with_fallback(
    configured: Option<&Path>,
    fallback: &Path,
) -> Result<(Registry, RegistrySource)> {
    let path = match configured {
        Some(path) => Some(path),
        None if fallback.is_file() => Some(fallback),
        None => None,
    };

    match path {
        Some(path) => {
            let registry = Registry::load_file(path)
                .with_context(|| format!("Cannot load script registry {}", path.display()))?;
            Ok((registry, RegistrySource::File(path.to_path_buf())))
        }
        None => {
            debug!(fallback = %fallback.display(), "using built-in script registry");
            let registry = Registry::builtin().context("Built-in script registry is invalid")?;
            Ok((registry, RegistrySource::Builtin))
        }
    }
}
