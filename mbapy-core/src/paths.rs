//! Default path resolution for configuration and registry files
//!
//! Uses XDG Base Directory specification when available, with sensible fallbacks.

use std::path::PathBuf;

/// Directory name shared by every mbapy file.
const APP_DIR: &str = "mbapy";

/// File name of the persisted script registry.
pub const REGISTRY_FILE_NAME: &str = "scripts-list.json";

/// Returns the default path for the CLI configuration file.
///
/// - Linux/macOS: `~/.config/mbapy/cli.toml`
/// - Fallback: `/etc/mbapy/cli.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/etc"))
        .join(APP_DIR)
        .join("cli.toml")
}

/// Returns the default data directory.
///
/// - Linux/macOS: `~/.local/share/mbapy`
/// - Fallback: `/var/lib/mbapy`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/var/lib"))
        .join(APP_DIR)
}

/// Returns the path a user-supplied registry is read from when nothing else
/// is configured: `{data_dir}/scripts-list.json`.
pub fn default_registry_path() -> PathBuf {
    default_data_dir().join(REGISTRY_FILE_NAME)
}
