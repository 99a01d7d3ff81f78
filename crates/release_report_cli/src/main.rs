use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use release_report_cli::commands::{
    config_cmd::{self, ConfigCommands},
    fetch_cmd::{self, FetchArgs},
    list_cmd,
};
use release_report_cli::errors::Error;

/// Release report CLI: list the scripts of a release in an Azure DevOps repository
#[derive(Parser)]
#[command(name = "release-report")]
#[command(about = "List the scripts of a release in an Azure DevOps repository", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the scripts of a release, show them and optionally export them
    Fetch(FetchArgs),

    /// List the configured releases
    Releases {
        /// Path to the configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// List the configured folders and their scripts paths
    Folders {
        /// Path to the configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show the CLI version
    Version,
}

fn report_failure(e: &Error) -> ! {
    error!(error = %e, "Command failed");
    eprintln!("{}", e.user_message().red());
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so that table and JSON output stay clean
    tracing_subscriber::registry()
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("RELEASE_REPORT_LOG"))
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Fetch(args) => fetch_cmd::execute(args).await,
        Commands::Releases { config } => list_cmd::execute_releases(config.as_deref()),
        Commands::Folders { config } => list_cmd::execute_folders(config.as_deref()),
        Commands::Config(cmd) => config_cmd::execute(cmd),
        Commands::Version => {
            println!(
                "release-report version {}",
                option_env!("RELEASE_REPORT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        report_failure(&e);
    }
}
