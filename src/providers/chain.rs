//! Ordered fallback over rate sources, ending in demo data.

use super::http::HttpRateSource;
use super::spec::ProviderSpec;
use crate::core::currency::CurrencyCode;
use crate::core::demo::demo_rates;
use crate::core::rates::{RateMap, RateProvider, RateSource};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub struct RateProviderChain {
    sources: Vec<Box<dyn RateSource>>,
}

impl RateProviderChain {
    pub fn new(sources: Vec<Box<dyn RateSource>>) -> Self {
        Self { sources }
    }

    /// One HTTP source per spec, in the given order, all sharing `timeout`.
    pub fn from_specs(specs: &[ProviderSpec], timeout: Duration) -> Result<Self> {
        let sources = specs
            .iter()
            .map(|spec| {
                HttpRateSource::new(spec.clone(), timeout)
                    .map(|source| Box::new(source) as Box<dyn RateSource>)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(sources))
    }

    #[cfg(test)]
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}

#[async_trait]
impl RateProvider for RateProviderChain {
    #[instrument(name = "RateChain", skip_all, fields(base = %base))]
    async fn fetch_rates(&self, base: &CurrencyCode) -> RateMap {
        info!("Loading rates for {}", base);

        for source in &self.sources {
            debug!(provider = source.name(), "Trying rate provider");
            match source.fetch(base).await {
                Ok(rates) => {
                    info!(provider = source.name(), count = rates.len(), "Rates received");
                    return rates;
                }
                Err(e) => {
                    warn!(provider = source.name(), error = %e, "Rate provider unavailable");
                }
            }
        }

        warn!("All rate providers unavailable, using demo data");
        demo_rates(base)
    }
}
