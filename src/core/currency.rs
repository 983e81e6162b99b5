//! Currency codes and static currency metadata

use anyhow::{Result, anyhow};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

/// Normalized currency code: trimmed, uppercased ASCII alphanumerics.
///
/// ISO 4217 codes are three letters, but some rate providers also list
/// crypto tickers (`1INCH`, `USDT`), so anything between 2 and 8 characters
/// is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, used by providers that key their payloads that way.
    pub fn to_lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    pub fn usd() -> Self {
        CurrencyCode("USD".to_string())
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if !(2..=8).contains(&code.len()) || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(anyhow!("Invalid currency code: {:?}", s));
        }
        Ok(CurrencyCode(code.to_ascii_uppercase()))
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Currencies offered when no rate data has been loaded yet.
pub const POPULAR_CURRENCIES: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "CAD", "AUD", "CHF", "CNY", "RUB", "TRY", "INR", "BRL", "MXN",
    "KRW",
];

const CURRENCY_NAMES: &[(&str, &str)] = &[
    ("AUD", "Australian Dollar"),
    ("BRL", "Brazilian Real"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CNY", "Chinese Yuan"),
    ("CZK", "Czech Koruna"),
    ("DKK", "Danish Krone"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("HKD", "Hong Kong Dollar"),
    ("INR", "Indian Rupee"),
    ("JPY", "Japanese Yen"),
    ("KRW", "South Korean Won"),
    ("MXN", "Mexican Peso"),
    ("NOK", "Norwegian Krone"),
    ("NZD", "New Zealand Dollar"),
    ("PLN", "Polish Zloty"),
    ("RUB", "Russian Ruble"),
    ("SEK", "Swedish Krona"),
    ("SGD", "Singapore Dollar"),
    ("TRY", "Turkish Lira"),
    ("USD", "US Dollar"),
    ("ZAR", "South African Rand"),
];

/// Human readable name for a currency, falling back to the code itself.
pub fn currency_name(code: &CurrencyCode) -> &str {
    CURRENCY_NAMES
        .iter()
        .find(|(c, _)| *c == code.as_str())
        .map_or(code.as_str(), |(_, name)| *name)
}

const COUNTRY_CURRENCIES: &[(&str, &str)] = &[
    ("US", "USD"),
    ("RU", "RUB"),
    ("DE", "EUR"),
    ("FR", "EUR"),
    ("IT", "EUR"),
    ("ES", "EUR"),
    ("GB", "GBP"),
    ("JP", "JPY"),
    ("CA", "CAD"),
    ("AU", "AUD"),
    ("CN", "CNY"),
    ("IN", "INR"),
    ("BR", "BRL"),
    ("MX", "MXN"),
    ("KR", "KRW"),
    ("TR", "TRY"),
    ("CH", "CHF"),
];

/// Maps an ISO 3166 alpha-2 country code to its currency. Unknown countries get USD.
pub fn currency_for_country(country: &str) -> CurrencyCode {
    let country = country.trim().to_ascii_uppercase();
    COUNTRY_CURRENCIES
        .iter()
        .find(|(c, _)| *c == country)
        .map_or_else(CurrencyCode::usd, |(_, currency)| {
            CurrencyCode(currency.to_string())
        })
}
