pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::{ConversionRequest, CurrencyCode, CurrencySession, config::AppConfig};
use crate::providers::RateProviderChain;
use crate::store::DiskPreferenceStore;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
        live: bool,
    },
    Rates,
    Base {
        currency: Option<String>,
        country: Option<String>,
    },
    Favorite {
        currency: String,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let chain = RateProviderChain::from_specs(
        &config.providers,
        Duration::from_millis(config.timeout_ms),
    )?;
    let data_path = config.data_path()?;
    let store = DiskPreferenceStore::open(data_path.join("preferences"))?;
    let mut session = CurrencySession::open(chain, store, &config.currency)?;

    dispatch(command, &mut session).await?;

    // Only a successful command counts as the first visit.
    if session.is_first_visit() {
        println!(
            "\n{}",
            cli::preferences::welcome_message(session.base_currency())
        );
        session.mark_visited()?;
    }
    Ok(())
}

async fn dispatch(
    command: AppCommand,
    session: &mut CurrencySession<RateProviderChain, DiskPreferenceStore>,
) -> Result<()> {
    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            live,
        } => {
            let request = ConversionRequest::parse(&amount, &from, &to)?;
            cli::convert::run(session, &request, live).await
        }
        AppCommand::Rates => cli::rates::run(session).await,
        AppCommand::Base { currency, country } => {
            let base = match (currency, country) {
                (Some(code), _) => code.parse::<CurrencyCode>()?,
                (None, Some(country)) => cli::preferences::base_for_country(&country),
                (None, None) => session.base_currency().clone(),
            };
            cli::preferences::set_base(session, base).await
        }
        AppCommand::Favorite { currency } => {
            let code: CurrencyCode = currency
                .parse()
                .with_context(|| format!("Cannot toggle favorite {currency:?}"))?;
            cli::preferences::toggle_favorite(session, &code)
        }
    }
}
