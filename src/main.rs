use std::path::Path;

use clap::Parser;
use linestack::adapter::inbound::cli::command::Cli;
use linestack::adapter::inbound::cli::output::{self, OutputConfig};
use linestack::adapter::inbound::cli::{diagnostic, dispatch};
use linestack::infrastructure::config::settings::Config;
use tracing::debug;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    // An unreadable config falls back to default logging; the command
    // itself reports the problem.
    let config_path = cli.command.config_path().map(Path::to_path_buf);
    let logging = config_path
        .as_deref()
        .and_then(|path| Config::load_or_default(path).ok())
        .map(|config| config.logging)
        .unwrap_or_default();
    logging.init_with_verbosity(cli.verbose);
    debug!(version = env!("CARGO_PKG_VERSION"), "linestack starting");

    if let Err(err) = dispatch(cli).await {
        if output::is_json() {
            output::error(&err.to_string());
        } else {
            let report = miette::Report::new(diagnostic::diagnose(&err, config_path.as_deref()));
            eprintln!("{report:?}");
        }
        std::process::exit(1);
    }
}
