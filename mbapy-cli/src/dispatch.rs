//! Script dispatch
//!
//! Resolves a script name against the registry and hands the remaining
//! arguments to a [`Launcher`]. The default [`ProcessLauncher`] runs the
//! script as an external executable named `{prefix}{name}`, looked up in the
//! configured script directory first and then on `PATH`.

use std::path::{Path, PathBuf};
use std::process::Command;

use mbapy_core::{CommandEntry, Registry};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while dispatching a script
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Name has no registry entry
    #[error("unknown script: {0}")]
    UnknownScript(String),

    /// Registered script has no executable
    #[error("script '{script}' is registered but no '{program}' executable was found")]
    ExecutableNotFound { script: String, program: String },

    /// Executable was found but could not be started
    #[error("failed to launch {}: {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runs the leaf utility behind a registry entry.
pub trait Launcher {
    /// Run the script and return its exit code.
    fn launch(&self, entry: &CommandEntry, args: &[String]) -> Result<i32, DispatchError>;
}

/// Launches scripts as child processes with inherited stdio.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    script_dir: Option<PathBuf>,
    prefix: String,
}

impl ProcessLauncher {
    pub fn new(script_dir: Option<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            script_dir,
            prefix: prefix.into(),
        }
    }

    /// Executable name for a script
    pub fn program_name(&self, script: &str) -> String {
        format!("{}{}", self.prefix, script)
    }

    /// Locate the executable for a script.
    pub fn resolve(&self, script: &str) -> Result<PathBuf, DispatchError> {
        let program = self.program_name(script);

        if let Some(dir) = &self.script_dir {
            match which::which_in(&program, Some(dir), dir) {
                Ok(path) => return Ok(path),
                Err(e) => debug!(dir = %dir.display(), %program, error = %e, "not in script dir"),
            }
        }

        which::which(&program).map_err(|_| DispatchError::ExecutableNotFound {
            script: script.to_string(),
            program,
        })
    }

    fn run(program: &Path, args: &[String]) -> Result<i32, DispatchError> {
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| DispatchError::Launch {
                program: program.to_path_buf(),
                source,
            })?;

        debug!(program = %program.display(), ?status, "script exited");
        // No code when killed by a signal
        Ok(status.code().unwrap_or(1))
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, entry: &CommandEntry, args: &[String]) -> Result<i32, DispatchError> {
        let program = self.resolve(&entry.name)?;
        info!(script = %entry.name, program = %program.display(), "launching script");
        Self::run(&program, args)
    }
}

/// Routes a script invocation to its launcher.
pub struct Dispatcher<'a, L> {
    registry: &'a Registry,
    launcher: L,
}

impl<'a, L: Launcher> Dispatcher<'a, L> {
    pub fn new(registry: &'a Registry, launcher: L) -> Self {
        Self { registry, launcher }
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Look up `name` and launch it with `args`.
    ///
    /// An unknown name never reaches the launcher.
    pub fn dispatch(&self, name: &str, args: &[String]) -> Result<i32, DispatchError> {
        let entry = self
            .registry
            .lookup(name)
            .map_err(|_| DispatchError::UnknownScript(name.to_string()))?;

        debug!(script = %entry.name, ?args, "dispatching script");
        self.launcher.launch(entry, args)
    }
}
