//! mbapy CLI
//!
//! Lists the registered mbapy scripts, prints their help and runs them.

use anyhow::Result;
use clap::Parser;
use mbapy_cli::cli::{
    generate_completion, handle_banner, handle_config, handle_info, handle_list, handle_script,
    handle_scripts_flag, Cli, Commands, OutputFormat,
};
use mbapy_cli::config::CliConfig;
use mbapy_cli::dispatch::{Dispatcher, ProcessLauncher};
use mbapy_cli::source::load_registry;
use mbapy_core::Registry;
use tracing::debug;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        e.exit();
    }
    let verbose = cli.verbose;

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if verbose {
                eprintln!("Error details: {:?}", e);
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config_path = CliConfig::config_path(cli.config.as_deref());

    // Build configuration using priority chain: CLI args → env → file → defaults.
    // Each source only fills values the previous ones left unset.
    let mut builder = CliConfig::builder();
    if let Some(ref registry) = cli.registry {
        builder = builder.with_registry_path(registry);
    }
    if let Some(ref dir) = cli.script_dir {
        builder = builder.with_script_dir(dir);
    }
    if let Some(ref format) = cli.format {
        builder = builder.with_output_format(format.as_str())?;
    }
    if cli.verbose {
        builder = builder.with_verbose(true);
    }
    builder = builder.with_env_overrides();
    if !cli.no_config {
        builder = builder.with_config_file(Some(config_path.as_path()))?;
    }
    let config = builder.build()?;

    init_tracing(config.verbose);
    debug!(config_path = %config_path.display(), ?config, "configuration resolved");

    let output_format = match config.output_format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    // A registry that fails to load stops everything before dispatch
    let load = || -> Result<Registry> {
        let (registry, source) = load_registry(config.registry_path.as_deref())?;
        debug!(%source, scripts = registry.len(), "script registry ready");
        Ok(registry)
    };

    match cli.command {
        Some(Commands::Completion { shell }) => generate_completion(shell),
        Some(Commands::Config { command }) => {
            handle_config(command, &config, &config_path, &output_format)?
        }
        Some(Commands::List) => handle_list(&load()?, &output_format)?,
        Some(Commands::Info { name }) => {
            return handle_info(&load()?, name.as_deref(), &output_format);
        }
        Some(Commands::Script(invocation)) => {
            let registry = load()?;
            let launcher = ProcessLauncher::new(config.script_dir.clone(), &config.script_prefix);
            let dispatcher = Dispatcher::new(&registry, launcher);
            return handle_script(&dispatcher, &invocation);
        }
        None if cli.list || cli.info => handle_scripts_flag(&load()?, cli.info, &output_format)?,
        None => handle_banner(),
    }

    Ok(0)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
