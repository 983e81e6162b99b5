use super::ui;
use crate::core::{Conversion, ConversionRequest, CurrencySession, PreferenceStore, RateProvider};
use anyhow::Result;

/// One-line result, e.g. `100 USD = 92.00 EUR`.
pub fn render_conversion(request: &ConversionRequest, result: &Conversion) -> String {
    match result {
        Conversion::Converted(_) => format!(
            "{} {} = {} {}",
            request.amount,
            request.from,
            ui::style_text(&result.to_string(), ui::StyleType::Value),
            ui::style_text(request.to.as_str(), ui::StyleType::Label),
        ),
        Conversion::Unavailable => ui::style_text(
            &format!("No rate available for {} → {}", request.from, request.to),
            ui::StyleType::Warning,
        ),
    }
}

/// Converts with the session's rates, or with a fresh fetch against `from` when `live`.
pub async fn run<P, S>(
    session: &mut CurrencySession<P, S>,
    request: &ConversionRequest,
    live: bool,
) -> Result<()>
where
    P: RateProvider,
    S: PreferenceStore,
{
    let pb = ui::new_spinner("Converting...");
    let result = if live {
        session.convert_live(request).await
    } else {
        session.convert(request).await
    };
    pb.finish_and_clear();

    println!("{}", render_conversion(request, &result));
    if !live && session.rates().is_some_and(|rates| rates.is_demo()) {
        println!(
            "{}",
            ui::style_text(
                "Live rates unavailable, converted with demo data.",
                ui::StyleType::Subtle
            )
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_render_conversion() {
        console::set_colors_enabled(false);
        let request = ConversionRequest::parse("100", "usd", "eur").unwrap();

        let text = render_conversion(&request, &Conversion::Converted(Decimal::new(9200, 2)));
        assert_eq!(text, "100 USD = 92.00 EUR");

        let text = render_conversion(&request, &Conversion::Unavailable);
        assert_eq!(text, "No rate available for USD → EUR");
    }
}
