//! mbapy Core Library
//!
//! The script registry consumed by `mbapy-cli`: a fixed, ordered table of
//! script names with their brief and detailed descriptions, plus the error
//! type and default file locations shared with the command-line front end.

pub mod error;
pub mod paths;
pub mod registry;

// Re-export commonly used types
pub use error::*;
pub use paths::{default_config_path, default_data_dir, default_registry_path};
pub use registry::{CommandEntry, Registry, BUILTIN_REGISTRY};
