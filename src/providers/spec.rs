//! Rate provider descriptions: where to ask, and how to read the answer.

use crate::core::currency::CurrencyCode;
use crate::core::rates::RawRates;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Known rate APIs. Each fixes a URL layout and a response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// `GET {base_url}/latest?from=USD` -> `{"rates": {"EUR": 0.92}}`
    Frankfurter,
    /// `GET {base_url}/v4/latest/USD` -> `{"rates": {"EUR": 0.92}}`
    ExchangeRateApi,
    /// `GET {base_url}/npm/@fawazahmed0/currency-api@1/latest/currencies/usd.json`
    /// -> `{"usd": {"eur": 0.92}}`
    CurrencyApi,
}

/// How a provider lays out its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Rates under a top-level `rates` object.
    Flat,
    /// Rates nested under the lowercase base code.
    NestedByBase,
}

#[derive(Debug, Deserialize)]
struct FlatRatesResponse {
    rates: RawRates,
}

impl ProviderKind {
    pub fn default_name(&self) -> &'static str {
        match self {
            ProviderKind::Frankfurter => "Frankfurter",
            ProviderKind::ExchangeRateApi => "ExchangeRate-API",
            ProviderKind::CurrencyApi => "CurrencyAPI",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Frankfurter => "https://api.frankfurter.app",
            ProviderKind::ExchangeRateApi => "https://api.exchangerate-api.com",
            ProviderKind::CurrencyApi => "https://cdn.jsdelivr.net",
        }
    }

    pub fn shape(&self) -> ResponseShape {
        match self {
            ProviderKind::Frankfurter | ProviderKind::ExchangeRateApi => ResponseShape::Flat,
            ProviderKind::CurrencyApi => ResponseShape::NestedByBase,
        }
    }

    pub fn url(&self, base_url: &str, base: &CurrencyCode) -> String {
        let base_url = base_url.trim_end_matches('/');
        match self {
            ProviderKind::Frankfurter => format!("{base_url}/latest?from={base}"),
            ProviderKind::ExchangeRateApi => format!("{base_url}/v4/latest/{base}"),
            ProviderKind::CurrencyApi => format!(
                "{base_url}/npm/@fawazahmed0/currency-api@1/latest/currencies/{}.json",
                base.to_lowercase()
            ),
        }
    }

    /// Extracts the raw rate object from a response body. Keys are returned
    /// as the provider sent them.
    pub fn parse(&self, body: &str, base: &CurrencyCode) -> Result<RawRates> {
        match self.shape() {
            ResponseShape::Flat => {
                let response: FlatRatesResponse =
                    serde_json::from_str(body).context("Failed to parse rates response")?;
                Ok(response.rates)
            }
            ResponseShape::NestedByBase => {
                let mut response: HashMap<String, serde_json::Value> =
                    serde_json::from_str(body).context("Failed to parse rates response")?;
                let key = base.to_lowercase();
                let nested = response
                    .remove(&key)
                    .ok_or_else(|| anyhow!("No rates found under key {:?}", key))?;
                serde_json::from_value(nested)
                    .with_context(|| format!("Failed to parse rates under key {key:?}"))
            }
        }
    }
}

/// A configured provider entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpec {
    pub name: String,
    pub kind: ProviderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ProviderSpec {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            name: kind.default_name().to_string(),
            kind,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// The built-in provider order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(ProviderKind::Frankfurter),
            Self::new(ProviderKind::ExchangeRateApi),
            Self::new(ProviderKind::CurrencyApi),
        ]
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.kind.default_base_url())
    }

    pub fn url(&self, base: &CurrencyCode) -> String {
        self.kind.url(self.base_url(), base)
    }

    pub fn parse(&self, body: &str, base: &CurrencyCode) -> Result<RawRates> {
        self.kind.parse(body, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_urls() {
        let usd = code("USD");
        let urls: Vec<String> = ProviderSpec::defaults()
            .iter()
            .map(|p| p.url(&usd))
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://api.frankfurter.app/latest?from=USD",
                "https://api.exchangerate-api.com/v4/latest/USD",
                "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@1/latest/currencies/usd.json",
            ]
        );
    }

    #[test]
    fn test_custom_base_url_strips_trailing_slash() {
        let spec = ProviderSpec::new(ProviderKind::ExchangeRateApi).with_base_url("http://mock/");
        assert_eq!(spec.url(&code("EUR")), "http://mock/v4/latest/EUR");
        assert_eq!(spec.name, "ExchangeRate-API");
    }

    #[test]
    fn test_parse_flat_response() {
        let body = r#"{"amount": 1.0, "base": "USD", "date": "2024-01-02", "rates": {"EUR": 0.92, "JPY": 148.25}}"#;
        let rates = ProviderKind::Frankfurter.parse(body, &code("USD")).unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates["EUR"], 0.92);
    }

    #[test]
    fn test_parse_flat_response_missing_rates() {
        let body = r#"{"result": "error", "error-type": "unsupported-code"}"#;
        let result = ProviderKind::ExchangeRateApi.parse(body, &code("USD"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_nested_response() {
        let body = r#"{"date": "2024-01-02", "usd": {"eur": 0.92, "gbp": 0.79}}"#;
        let rates = ProviderKind::CurrencyApi.parse(body, &code("USD")).unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates["eur"], 0.92);
    }

    #[test]
    fn test_parse_nested_response_wrong_base() {
        let body = r#"{"date": "2024-01-02", "eur": {"usd": 1.09}}"#;
        let result = ProviderKind::CurrencyApi.parse(body, &code("USD"));
        assert!(result.unwrap_err().to_string().contains("\"usd\""));
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(
            ProviderKind::Frankfurter
                .parse("<html>", &code("USD"))
                .is_err()
        );
        assert!(
            ProviderKind::CurrencyApi
                .parse("not json", &code("USD"))
                .is_err()
        );
    }
}
