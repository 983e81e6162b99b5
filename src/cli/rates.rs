use super::ui;
use crate::core::currency::currency_name;
use crate::core::{CurrencySession, PreferenceStore, RateProvider};
use anyhow::Result;
use comfy_table::Cell;

/// Rates table, favorites first, with a source/update footer.
pub fn render_rates<P, S>(session: &CurrencySession<P, S>) -> String
where
    P: RateProvider,
    S: PreferenceStore,
{
    let base = session.base_currency();
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell(&format!("Rate (1 {base})")),
    ]);

    for code in session.sorted_codes() {
        let rate = session.format_rate(&code);
        let available = session
            .rates()
            .is_some_and(|rates| rates.contains(&code));
        table.add_row(vec![
            ui::favorite_cell(session.preferences().is_favorite(&code)),
            Cell::new(code.as_str()),
            Cell::new(currency_name(&code)),
            ui::rate_cell(&rate, available),
        ]);
    }

    let mut output = format!(
        "Exchange rates: {}\n\n",
        ui::style_text(base.as_str(), ui::StyleType::Title)
    );
    output.push_str(&table.to_string());

    if let Some(rates) = session.rates() {
        let updated = session
            .last_updated()
            .map_or_else(String::new, |t| format!(" · Updated: {}", t.format("%H:%M:%S")));
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!("Source: {}{}", rates.origin(), updated),
                ui::StyleType::Subtle
            )
        ));
        if rates.is_demo() {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(
                    "Could not load live rates. Showing demo data.",
                    ui::StyleType::Warning
                )
            ));
        }
    }
    output
}

/// Fetches fresh rates for the stored base and prints them.
pub async fn run<P, S>(session: &mut CurrencySession<P, S>) -> Result<()>
where
    P: RateProvider,
    S: PreferenceStore,
{
    let pb = ui::new_spinner("Loading exchange rates...");
    session.refresh().await;
    pb.finish_and_clear();

    println!("{}", render_rates(session));
    Ok(())
}
