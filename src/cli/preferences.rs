use super::{rates, ui};
use crate::core::currency::{CurrencyCode, currency_for_country, currency_name};
use crate::core::{CurrencySession, PreferenceStore, RateProvider};
use anyhow::Result;

/// Changes the base currency, then shows the freshly fetched rates.
pub async fn set_base<P, S>(session: &mut CurrencySession<P, S>, base: CurrencyCode) -> Result<()>
where
    P: RateProvider,
    S: PreferenceStore,
{
    let pb = ui::new_spinner("Loading exchange rates...");
    let result = session.set_base_currency(base).await.map(|_| ());
    pb.finish_and_clear();
    result?;

    println!("{}", rates::render_rates(session));
    Ok(())
}

/// Resolves the base currency of a country, e.g. `DE` -> `EUR`.
pub fn base_for_country(country: &str) -> CurrencyCode {
    let currency = currency_for_country(country);
    tracing::debug!(country, %currency, "Resolved country currency");
    currency
}

pub fn toggle_favorite<P, S>(session: &mut CurrencySession<P, S>, code: &CurrencyCode) -> Result<()>
where
    P: RateProvider,
    S: PreferenceStore,
{
    let added = session.toggle_favorite(code)?;
    let verb = if added { "Added" } else { "Removed" };
    println!(
        "{verb} {} ({}) {} favorites",
        ui::style_text(code.as_str(), ui::StyleType::Label),
        currency_name(code),
        if added { "to" } else { "from" }
    );
    Ok(())
}

/// Shown once, on the first run against a fresh preference store.
pub fn welcome_message(base: &CurrencyCode) -> String {
    format!(
        "Using {} as your base currency. Change it with `fxconv base <CODE>` or `fxconv base --country <CC>`.",
        ui::style_text(base.as_str(), ui::StyleType::Label)
    )
}
