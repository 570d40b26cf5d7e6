//! Command-line interface definitions.
//!
//! Defines the CLI structure for the linestack application using `clap`:
//! lineup generation plus helpers for inspecting site rules and the
//! configuration file.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use super::paths;
use crate::domain::rules::Site;

/// NHL daily-fantasy lineup optimizer
#[derive(Parser, Debug)]
#[command(name = "linestack")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the linestack CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate lineups from skater and goalie projection files
    Generate(Box<GenerateArgs>),

    /// Inspect contest site rule sets
    #[command(subcommand)]
    Sites(SitesCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Commands {
    /// Configuration file the command reads, if any.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Self::Generate(args) => Some(&args.config),
            Self::Sites(SitesCommand::Show(args)) => Some(&args.config),
            Self::Sites(SitesCommand::List) => None,
            Self::Config(ConfigCommand::Show(arg) | ConfigCommand::Validate(arg)) => {
                Some(&arg.config)
            }
            Self::Config(ConfigCommand::Init(_)) => None,
        }
    }
}

/// Subcommands for `linestack sites`.
#[derive(Subcommand, Debug)]
pub enum SitesCommand {
    /// List the built-in site rule sets.
    List,
    /// Display the roster slots, bounds and stacking rules of a site.
    Show(SiteShowArgs),
}

/// Subcommands for `linestack config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration file.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `sites show`.
#[derive(Parser, Debug)]
pub struct SiteShowArgs {
    /// Site name: draftkings, fanduel or custom.
    pub site: Site,

    /// Configuration file holding the `[rules]` table for `custom`.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `generate` subcommand.
///
/// Every optimizer flag overrides the matching configuration value.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Skater projections CSV.
    #[arg(short, long)]
    pub skaters: PathBuf,

    /// Goalie projections CSV.
    #[arg(short, long)]
    pub goalies: PathBuf,

    /// Contest site; prompts when unset in both flag and config.
    #[arg(long)]
    pub site: Option<Site>,

    /// Number of lineups to generate.
    #[arg(short = 'n', long)]
    pub lineups: Option<usize>,

    /// Most players any two lineups may share.
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Upload-ready output file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Time budget for a single solve, in seconds.
    #[arg(long = "time-limit", value_name = "SECS")]
    pub time_limit: Option<u64>,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}
