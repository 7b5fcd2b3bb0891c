//! CLI command and subcommand definitions

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

/// mbapy command-line tools
#[derive(Parser, Debug)]
#[command(name = "mbapy-cli")]
#[command(version, about = "mbapy python package command-line tools", long_about = None)]
#[command(after_help = "Run `mbapy-cli <SCRIPT> [ARGS]...` to execute a registered script.")]
pub struct Cli {
    /// Print scripts list
    #[arg(short, long, conflicts_with = "info")]
    pub list: bool,

    /// Print scripts info (brief and detailed)
    #[arg(short, long)]
    pub info: bool,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging (overrides config file)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Registry file to read script descriptions from
    #[arg(long, global = true)]
    pub registry: Option<PathBuf>,

    /// Directory searched for script executables before PATH
    #[arg(long, global = true)]
    pub script_dir: Option<PathBuf>,

    /// Don't load config file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Config file path (default: ~/.config/mbapy/cli.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Reject combinations clap cannot express declaratively.
    ///
    /// `--list` and `--info` only apply to the bare invocation, so they may
    /// not be paired with a command or script.
    pub fn validate(&self) -> Result<(), clap::Error> {
        if (self.list || self.info) && self.command.is_some() {
            let flag = if self.list { "--list" } else { "--info" };
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                format!("the argument '{}' cannot be used with a command or script", flag),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered scripts with their brief description
    List,

    /// Show detailed help for one script, or for every script
    Info {
        /// Script name
        name: Option<String>,
    },

    /// Show or manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Run a registered script: `<SCRIPT> [ARGS]...`
    #[command(external_subcommand)]
    Script(Vec<String>),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Reset configuration to defaults
    Reset,
}
