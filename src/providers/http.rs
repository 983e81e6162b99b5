use super::spec::ProviderSpec;
use crate::core::currency::CurrencyCode;
use crate::core::rates::{RateMap, RateOrigin, RateSource};
use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("fxconv/", env!("CARGO_PKG_VERSION"));

/// Fetches rates over HTTP for a single [`ProviderSpec`].
pub struct HttpRateSource {
    spec: ProviderSpec,
    client: reqwest::Client,
}

impl HttpRateSource {
    pub fn new(spec: ProviderSpec, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { spec, client })
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    fn name(&self) -> &str {
        &self.spec.name
    }

    #[instrument(
        name = "HttpRateFetch",
        skip_all,
        fields(provider = %self.spec.name, base = %base)
    )]
    async fn fetch(&self, base: &CurrencyCode) -> Result<RateMap> {
        let url = self.spec.url(base);
        debug!("Requesting rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            bail!("HTTP error: {} for URL: {}", response.status(), url);
        }

        let body = response
            .text()
            .await
            .context("Failed to get response text")?;

        let raw = self.spec.parse(&body, base)?;
        if raw.is_empty() {
            bail!("Empty rate set from {}", self.spec.name);
        }

        let rates = RateMap::from_raw(
            base.clone(),
            raw,
            RateOrigin::Provider(self.spec.name.clone()),
        );
        debug!(count = rates.len(), "Parsed rates");
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::spec::ProviderKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn source(kind: ProviderKind, server: &MockServer, timeout_ms: u64) -> HttpRateSource {
        let spec = ProviderSpec::new(kind).with_base_url(&server.uri());
        HttpRateSource::new(spec, Duration::from_millis(timeout_ms)).unwrap()
    }

    #[tokio::test]
    async fn test_frankfurter_fetch() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("from", "USD"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"base": "USD", "rates": {"EUR": 0.92, "GBP": 0.79}}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = source(ProviderKind::Frankfurter, &mock_server, 5000);
        let rates = source.fetch(&code("USD")).await.unwrap();

        assert_eq!(rates.get(&code("EUR")), Some(0.92));
        assert_eq!(rates.get(&code("USD")), Some(1.0));
        assert_eq!(rates.origin(), &RateOrigin::Provider("Frankfurter".into()));
    }

    #[tokio::test]
    async fn test_currency_api_keys_are_uppercased() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/npm/@fawazahmed0/currency-api@1/latest/currencies/eur.json",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"date": "2024-01-02", "eur": {"usd": 1.09, "Gbp": 0.86, "jpy": 161.25}}"#,
            ))
            .mount(&mock_server)
            .await;

        let source = source(ProviderKind::CurrencyApi, &mock_server, 5000);
        let rates = source.fetch(&code("EUR")).await.unwrap();

        let codes: Vec<&str> = rates.codes().map(|c| c.as_str()).collect();
        assert_eq!(codes, vec!["EUR", "GBP", "JPY", "USD"]);
        assert_eq!(rates.get(&code("USD")), Some(1.09));
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let source = source(ProviderKind::ExchangeRateApi, &mock_server, 5000);
        let result = source.fetch(&code("USD")).await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("HTTP error: 500 Internal Server Error")
        );
    }

    #[tokio::test]
    async fn test_empty_rates_rejected() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rates": {}}"#))
            .mount(&mock_server)
            .await;

        let source = source(ProviderKind::ExchangeRateApi, &mock_server, 5000);
        let result = source.fetch(&code("USD")).await;
        assert!(result.unwrap_err().to_string().contains("Empty rate set"));
    }

    #[tokio::test]
    async fn test_base_only_payload_accepted() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rates": {"USD": 1.0}}"#))
            .mount(&mock_server)
            .await;

        let source = source(ProviderKind::ExchangeRateApi, &mock_server, 5000);
        let rates = source.fetch(&code("USD")).await.unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates.get(&code("USD")), Some(1.0));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results": []}"#))
            .mount(&mock_server)
            .await;

        let source = source(ProviderKind::Frankfurter, &mock_server, 5000);
        let result = source.fetch(&code("USD")).await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse rates response")
        );
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"rates": {"EUR": 0.92}}"#)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let source = source(ProviderKind::Frankfurter, &mock_server, 50);
        let result = source.fetch(&code("USD")).await;
        assert!(result.unwrap_err().to_string().starts_with("Request error"));
    }
}
