use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use stockdesk::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for stockdesk::AppCommand {
    fn from(cmd: Commands) -> stockdesk::AppCommand {
        match cmd {
            Commands::Serve { bind } => stockdesk::AppCommand::Serve { bind_addr: bind },
            Commands::List => stockdesk::AppCommand::List,
            Commands::Show { ids } => stockdesk::AppCommand::Show { ids },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the HTTP service
    Serve {
        /// Listen address, overrides the configured one
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// List the stock catalog
    List,
    /// Show enriched details for one or more stocks
    Show {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let serving = matches!(cli.command, Some(Commands::Serve { .. }));
    init_logging(cli.verbose, serving);

    let result = match cli.command {
        Some(Commands::Setup) => stockdesk::cli::setup::setup(cli.config_path.as_deref()),
        Some(cmd) => stockdesk::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
