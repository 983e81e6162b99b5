//! Currency conversion over a [`RateMap`]

use super::currency::CurrencyCode;
use super::rates::RateMap;
use anyhow::{Result, bail};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;

/// Marker rendered when a rate is missing.
pub const UNAVAILABLE: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl ConversionRequest {
    pub fn new(amount: Decimal, from: CurrencyCode, to: CurrencyCode) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            bail!("Amount must not be negative: {amount}");
        }
        Ok(Self { amount, from, to })
    }

    /// Parses user input, e.g. `("100", "usd", "eur")`.
    pub fn parse(amount: &str, from: &str, to: &str) -> Result<Self> {
        let amount: Decimal = amount
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid amount {amount:?}: {e}"))?;
        Self::new(amount, from.parse()?, to.parse()?)
    }
}

/// Result of a conversion. A missing rate is a value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Converted(Decimal),
    Unavailable,
}

impl Conversion {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Conversion::Converted(v) => Some(*v),
            Conversion::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Conversion::Converted(_))
    }
}

impl Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conversion::Converted(v) => write!(f, "{v:.2}"),
            Conversion::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn rate_of(rates: &RateMap, code: &CurrencyCode) -> Option<Decimal> {
    rates.get(code).and_then(Decimal::from_f64)
}

fn finish(value: Option<Decimal>) -> Conversion {
    value.map_or(Conversion::Unavailable, |v| Conversion::Converted(round2(v)))
}

/// `amount * rates[to]`, for rates fetched with `from` as their base.
pub fn convert_from_base(
    amount: Decimal,
    from: &CurrencyCode,
    to: &CurrencyCode,
    rates: &RateMap,
) -> Conversion {
    if from == to {
        return Conversion::Converted(round2(amount));
    }
    finish(rate_of(rates, to).and_then(|to_rate| amount.checked_mul(to_rate)))
}

/// `amount * rates[to] / rates[from]`, for rates fetched against any base.
pub fn convert_cross(
    amount: Decimal,
    from: &CurrencyCode,
    to: &CurrencyCode,
    rates: &RateMap,
) -> Conversion {
    if from == to {
        return Conversion::Converted(round2(amount));
    }
    let (Some(from_rate), Some(to_rate)) = (rate_of(rates, from), rate_of(rates, to)) else {
        return Conversion::Unavailable;
    };
    finish(
        amount
            .checked_mul(to_rate)
            .and_then(|v| v.checked_div(from_rate)),
    )
}

/// Converts using the base the rates were actually fetched against.
pub fn convert(request: &ConversionRequest, rates: &RateMap) -> Conversion {
    let ConversionRequest { amount, from, to } = request;
    if from == rates.base() {
        convert_from_base(*amount, from, to, rates)
    } else {
        convert_cross(*amount, from, to, rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::RateOrigin;
    use std::str::FromStr;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates(base: &str, raw: &[(&str, f64)]) -> RateMap {
        RateMap::from_raw(code(base), raw.iter().copied(), RateOrigin::Demo)
    }

    #[test]
    fn test_identity_ignores_rates() {
        let empty = rates("GBP", &[]);
        for c in ["USD", "XAU", "JPY"] {
            let result = convert_cross(dec("12.345"), &code(c), &code(c), &empty);
            assert_eq!(result.to_string(), "12.35");
            let result = convert_from_base(dec("7"), &code(c), &code(c), &empty);
            assert_eq!(result.to_string(), "7.00");
        }
    }

    #[test]
    fn test_cross_division() {
        let map = rates("USD", &[("EUR", 0.92), ("USD", 1.0)]);
        let result = convert_cross(dec("100"), &code("USD"), &code("EUR"), &map);
        assert_eq!(result.to_string(), "92.00");

        let map = rates("USD", &[("EUR", 0.92), ("GBP", 0.79)]);
        let result = convert_cross(dec("100"), &code("EUR"), &code("GBP"), &map);
        assert_eq!(result.to_string(), "85.87");
    }

    #[test]
    fn test_base_relative_multiply() {
        let map = rates("USD", &[("JPY", 148.25)]);
        let result = convert_from_base(dec("50"), &code("USD"), &code("JPY"), &map);
        assert_eq!(result, Conversion::Converted(dec("7412.50")));
        assert_eq!(result.to_string(), "7412.50");
    }

    #[test]
    fn test_missing_code_is_unavailable() {
        let map = rates("USD", &[("EUR", 0.92)]);
        let result = convert_cross(dec("10"), &code("USD"), &code("CHF"), &map);
        assert_eq!(result, Conversion::Unavailable);
        assert_eq!(result.to_string(), UNAVAILABLE);

        let result = convert_cross(dec("10"), &code("CHF"), &code("EUR"), &map);
        assert!(!result.is_available());

        let result = convert_from_base(dec("10"), &code("USD"), &code("CHF"), &map);
        assert_eq!(result.value(), None);
    }

    #[test]
    fn test_unified_convert_picks_formula_from_base() {
        let map = rates("EUR", &[("USD", 1.09), ("GBP", 0.86)]);

        let from_base = ConversionRequest::parse("10", "EUR", "USD").unwrap();
        assert_eq!(convert(&from_base, &map).to_string(), "10.90");

        // 10 USD -> GBP through EUR: 10 * 0.86 / 1.09
        let cross = ConversionRequest::parse("10", "usd", "gbp").unwrap();
        assert_eq!(convert(&cross, &map).to_string(), "7.89");
    }

    #[test]
    fn test_rounds_midpoint_away_from_zero() {
        let map = rates("USD", &[("EUR", 0.5)]);
        let result = convert_from_base(dec("0.05"), &code("USD"), &code("EUR"), &map);
        assert_eq!(result.to_string(), "0.03");
    }

    #[test]
    fn test_request_validation() {
        assert!(ConversionRequest::parse("-1", "USD", "EUR").is_err());
        assert!(ConversionRequest::parse("abc", "USD", "EUR").is_err());
        assert!(ConversionRequest::parse("1", "US$", "EUR").is_err());

        let request = ConversionRequest::parse(" 0 ", "usd", "eur").unwrap();
        assert_eq!(request.amount, Decimal::ZERO);
        assert_eq!(request.from.as_str(), "USD");
    }
}
