//! CLI module graph and command dispatch.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod generate;
pub mod output;
pub mod paths;
pub mod sites;

use command::{Cli, Commands, ConfigCommand, SitesCommand};

use crate::error::Result;

/// Run the parsed command.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => generate::execute(*args).await,
        Commands::Sites(SitesCommand::List) => sites::list(),
        Commands::Sites(SitesCommand::Show(args)) => sites::show(args.site, &args.config),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(&arg.config),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(&arg.config),
    }
}
