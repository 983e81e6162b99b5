use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::log::init_logging;

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

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                from,
                to,
                live,
            } => fxconv::AppCommand::Convert {
                amount,
                from,
                to,
                live,
            },
            Commands::Rates => fxconv::AppCommand::Rates,
            Commands::Base { currency, country } => fxconv::AppCommand::Base { currency, country },
            Commands::Favorite { currency } => fxconv::AppCommand::Favorite { currency },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        amount: String,
        /// Source currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. EUR
        to: String,
        /// Fetch rates with the source currency as base instead of using the stored base
        #[arg(long)]
        live: bool,
    },
    /// Display exchange rates for the base currency
    Rates,
    /// Change the base currency and display its rates
    Base {
        /// Currency code, e.g. EUR
        #[arg(conflicts_with = "country")]
        currency: Option<String>,
        /// Pick the currency of a country instead, e.g. DE
        #[arg(long)]
        country: Option<String>,
    },
    /// Add a currency to favorites, or remove it if already there
    Favorite {
        /// Currency code, e.g. JPY
        currency: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
