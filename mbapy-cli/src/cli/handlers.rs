//! Command execution handlers

use std::path::Path;

use anyhow::Result;
use mbapy_core::{Registry, RegistryError};
use tracing::debug;

use crate::config::CliConfig;
use crate::dispatch::{DispatchError, Dispatcher, Launcher};
use crate::format::format_success;

use super::commands::*;

/// Exit code for a script name that is not registered
pub const EXIT_UNKNOWN_SCRIPT: i32 = 2;

/// Handle the bare invocation (no flags, no command)
pub fn handle_banner() {
    println!("{}", crate::format::format_banner());
}

/// Handle `--list` and `--info` flags
pub fn handle_scripts_flag(
    registry: &Registry,
    detailed: bool,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let formatted = if detailed {
                crate::format::format_info(registry.list(), &format.into())?
            } else {
                crate::format::format_list(registry.list(), &format.into())?
            };
            println!("{}", formatted);
        }
        OutputFormat::Table => {
            let formatted = if detailed {
                crate::format::format_scripts_info(registry.list())
            } else {
                crate::format::format_scripts_list(registry.list())
            };
            print!("{}", formatted);
        }
    }

    Ok(())
}

/// Handle list command
pub fn handle_list(registry: &Registry, format: &OutputFormat) -> Result<()> {
    let formatted = crate::format::format_list(registry.list(), &format.into())?;
    println!("{}", formatted);
    Ok(())
}

/// Handle info command, returning the process exit code
///
/// Without a name every script is shown. An unregistered name is reported
/// with the list of available scripts, like an unknown script invocation.
pub fn handle_info(
    registry: &Registry,
    name: Option<&str>,
    format: &OutputFormat,
) -> Result<i32> {
    let formatted = match name {
        Some(name) => match registry.lookup(name) {
            Ok(entry) => crate::format::format_entry(entry, &format.into())?,
            Err(RegistryError::NotFound(name)) => {
                debug!(script = %name, "unknown script");
                eprint!("{}", crate::format::format_unknown_script(&name, &[], registry));
                return Ok(EXIT_UNKNOWN_SCRIPT);
            }
            Err(e) => return Err(e.into()),
        },
        None => crate::format::format_info(registry.list(), &format.into())?,
    };
    println!("{}", formatted);
    Ok(0)
}

/// Handle a script invocation, returning the process exit code
///
/// `invocation` is the script name followed by its arguments. An unknown
/// name is reported with the list of available scripts and is not fatal.
pub fn handle_script<L: Launcher>(
    dispatcher: &Dispatcher<'_, L>,
    invocation: &[String],
) -> Result<i32> {
    let Some((name, args)) = invocation.split_first() else {
        return Err(anyhow::anyhow!("Missing script name"));
    };

    match dispatcher.dispatch(name, args) {
        Ok(code) => Ok(code),
        Err(DispatchError::UnknownScript(name)) => {
            debug!(script = %name, "unknown script");
            eprint!(
                "{}",
                crate::format::format_unknown_script(&name, args, dispatcher.registry())
            );
            Ok(EXIT_UNKNOWN_SCRIPT)
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle config commands
pub fn handle_config(
    command: ConfigCommands,
    current_config: &CliConfig,
    config_path: &Path,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Show => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(current_config)?);
            }
            OutputFormat::Table => {
                let unset = "(not set)".to_string();
                let display = |p: &Option<std::path::PathBuf>| {
                    p.as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| unset.clone())
                };

                println!("CLI Configuration:");
                println!("{:<20} Value", "Setting");
                println!("{}", "-".repeat(40));
                println!("{:<20} {}", "Registry Path", display(&current_config.registry_path));
                println!("{:<20} {}", "Script Dir", display(&current_config.script_dir));
                println!("{:<20} {}", "Script Prefix", current_config.script_prefix);
                println!("{:<20} {}", "Output Format", current_config.output_format);
                println!("{:<20} {}", "Verbose", current_config.verbose);
            }
        },
        ConfigCommands::Path => {
            println!("{}", config_path.display());
        }
        ConfigCommands::Set { key, value } => {
            // Start from the file contents, not the merged runtime view, so
            // env and flag overrides are not persisted.
            let mut config = if config_path.exists() {
                CliConfig::load(config_path)?
            } else {
                CliConfig::default()
            };
            config.set_value(&key, &value)?;
            config.save(config_path)?;
            println!(
                "{}",
                format_success(&format!("Set {} = {} in {}", key, value, config_path.display()))
            );
        }
        ConfigCommands::Reset => {
            CliConfig::default().save(config_path)?;
            println!(
                "{}",
                format_success(&format!(
                    "Configuration reset to defaults in {}",
                    config_path.display()
                ))
            );
        }
    }

    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Launcher;
    use mbapy_core::CommandEntry;

    struct FixedLauncher(i32);

    impl Launcher for FixedLauncher {
        fn launch(&self, _entry: &CommandEntry, _args: &[String]) -> Result<i32, DispatchError> {
            Ok(self.0)
        }
    }

    fn registry() -> Registry {
        Registry::load(
            r#"{"mass": {"brief": "plot mass spectrum data.", "detailed": "plot-mass"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_handle_script_propagates_exit_code() {
        let registry = registry();
        let dispatcher = Dispatcher::new(&registry, FixedLauncher(7));
        let invocation = vec!["mass".to_string(), "plot-mass".to_string()];
        assert_eq!(handle_script(&dispatcher, &invocation).unwrap(), 7);
    }

    #[test]
    fn test_handle_script_unknown_name() {
        let registry = registry();
        let dispatcher = Dispatcher::new(&registry, FixedLauncher(0));
        let invocation = vec!["nosuch".to_string()];
        assert_eq!(
            handle_script(&dispatcher, &invocation).unwrap(),
            EXIT_UNKNOWN_SCRIPT
        );
    }

    #[test]
    fn test_handle_script_empty_invocation() {
        let registry = registry();
        let dispatcher = Dispatcher::new(&registry, FixedLauncher(0));
        assert!(handle_script(&dispatcher, &[]).is_err());
    }

    #[test]
    fn test_handle_info_unknown_name() {
        let registry = registry();
        assert_eq!(
            handle_info(&registry, Some("nosuch"), &OutputFormat::Table).unwrap(),
            EXIT_UNKNOWN_SCRIPT
        );
        assert_eq!(
            handle_info(&registry, Some("mass"), &OutputFormat::Json).unwrap(),
            0
        );
    }

    #[test]
    fn test_handle_config_set_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");
        let current = CliConfig::default();

        handle_config(
            ConfigCommands::Set {
                key: "output_format".to_string(),
                value: "json".to_string(),
            },
            &current,
            &path,
            &OutputFormat::Table,
        )
        .unwrap();
        assert_eq!(CliConfig::load(&path).unwrap().output_format, "json");

        handle_config(ConfigCommands::Reset, &current, &path, &OutputFormat::Table).unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_handle_config_set_rejects_invalid_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");

        let result = handle_config(
            ConfigCommands::Set {
                key: "output_format".to_string(),
                value: "yaml".to_string(),
            },
            &CliConfig::default(),
            &path,
            &OutputFormat::Table,
        );
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
