//! Stagegate CLI entry point.

use clap::Parser;

use stagegate::cli::{Cli, Commands, IngestCommands, SchemaCommands};
use stagegate::infrastructure::config::ConfigLoader;
use stagegate::infrastructure::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match ConfigLoader::load_from_file(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            stagegate::cli::handle_error(err, cli.json);
            return;
        }
    };

    // -v / -vv override the configured log level.
    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }
    logging::init(&config.logging);

    let result = match cli.command {
        Commands::Init(args) => stagegate::cli::commands::init::execute(args, cli.json).await,
        Commands::Validate(args) => {
            stagegate::cli::commands::validate::execute(args, &config, cli.json).await
        }
        Commands::Ingest { command } => match command {
            IngestCommands::Issue(args) => {
                stagegate::cli::commands::ingest::execute_issue(args, &config, cli.json).await
            }
            IngestCommands::Manual(args) => {
                stagegate::cli::commands::ingest::execute_manual(args, &config, cli.json).await
            }
        },
        Commands::Schema { command } => match command {
            SchemaCommands::List => {
                stagegate::cli::commands::schema::execute_list(&config, cli.json).await
            }
            SchemaCommands::Show(args) => {
                stagegate::cli::commands::schema::execute_show(args, &config, cli.json).await
            }
        },
    };

    if let Err(err) = result {
        stagegate::cli::handle_error(err, cli.json);
    }
}
