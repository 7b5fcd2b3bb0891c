//! mbapy CLI Library
//!
//! The dispatcher and help renderer behind the `mbapy-cli` binary.
//!
//! # Public API
//!
//! [`dispatch::Dispatcher`] routes a script name to a [`dispatch::Launcher`];
//! [`source::load_registry`] resolves which registry document to use.
//! Configuration types are available via [`config::CliConfig`] and
//! [`config::ConfigBuilder`].
//!
//! ```no_run
//! use mbapy_cli::dispatch::{Dispatcher, ProcessLauncher};
//! use mbapy_cli::source::load_registry;
//!
//! # fn example() -> anyhow::Result<()> {
//! let (registry, _source) = load_registry(None)?;
//! let dispatcher = Dispatcher::new(&registry, ProcessLauncher::new(None, "mbapy-"));
//! let code = dispatcher.dispatch("peptide", &["mw".into(), "-s".into(), "Fmoc-Leu-OH".into()])?;
//! println!("peptide exited with {}", code);
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// Configuration types for the CLI tool.
pub mod config;

/// Script dispatch to leaf utilities.
pub mod dispatch;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

/// Registry resolution.
pub mod source;
