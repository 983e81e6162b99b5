//! Caller-side state: the chosen base currency, favorites and the current rates.

use super::convert::{self, Conversion, ConversionRequest, UNAVAILABLE};
use super::currency::{CurrencyCode, POPULAR_CURRENCIES};
use super::preferences::{PreferenceStore, Preferences};
use super::rates::{RateMap, RateProvider};
use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{debug, info};

pub struct CurrencySession<P, S>
where
    P: RateProvider,
    S: PreferenceStore,
{
    provider: P,
    store: S,
    preferences: Preferences,
    rates: Option<RateMap>,
    last_updated: Option<DateTime<Local>>,
}

impl<P, S> CurrencySession<P, S>
where
    P: RateProvider,
    S: PreferenceStore,
{
    /// Loads stored preferences, or starts from defaults with `default_base`.
    pub fn open(provider: P, store: S, default_base: &CurrencyCode) -> Result<Self> {
        let preferences = match store.load()? {
            Some(prefs) => prefs,
            None => Preferences::with_base(default_base.clone()),
        };
        debug!(?preferences, "Session opened");
        Ok(Self {
            provider,
            store,
            preferences,
            rates: None,
            last_updated: None,
        })
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn base_currency(&self) -> &CurrencyCode {
        &self.preferences.base_currency
    }

    pub fn rates(&self) -> Option<&RateMap> {
        self.rates.as_ref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn is_first_visit(&self) -> bool {
        !self.preferences.has_visited
    }

    pub fn mark_visited(&mut self) -> Result<()> {
        self.preferences.has_visited = true;
        self.store.save(&self.preferences)
    }

    /// Persists the new base and replaces the held rates with a fresh fetch.
    pub async fn set_base_currency(&mut self, base: CurrencyCode) -> Result<&RateMap> {
        info!(%base, "Changing base currency");
        self.preferences.base_currency = base;
        self.store.save(&self.preferences)?;
        Ok(self.refresh().await)
    }

    /// Re-fetches rates for the current base. The previous map is discarded.
    pub async fn refresh(&mut self) -> &RateMap {
        let rates = self
            .provider
            .fetch_rates(&self.preferences.base_currency)
            .await;
        self.last_updated = Some(Local::now());
        self.rates.insert(rates)
    }

    pub fn toggle_favorite(&mut self, code: &CurrencyCode) -> Result<bool> {
        let is_favorite = self.preferences.toggle_favorite(code);
        self.store.save(&self.preferences)?;
        Ok(is_favorite)
    }

    /// Converts with the held rates, fetching them first if none are held.
    pub async fn convert(&mut self, request: &ConversionRequest) -> Conversion {
        if self.rates.is_none() {
            self.refresh().await;
        }
        self.rates
            .as_ref()
            .map_or(Conversion::Unavailable, |rates| convert::convert(request, rates))
    }

    /// Fetches rates with `from` as base and multiplies through. Leaves the
    /// held rates untouched.
    pub async fn convert_live(&self, request: &ConversionRequest) -> Conversion {
        let rates = self.provider.fetch_rates(&request.from).await;
        convert::convert_from_base(request.amount, &request.from, &request.to, &rates)
    }

    /// Rate of `code` against the held base with four decimals.
    pub fn format_rate(&self, code: &CurrencyCode) -> String {
        if code == self.base_currency() {
            return "1.0000".to_string();
        }
        self.rates
            .as_ref()
            .and_then(|rates| rates.get(code))
            .map_or_else(|| UNAVAILABLE.to_string(), |rate| format!("{rate:.4}"))
    }

    /// Rates-table order: favorites first, then alphabetical.
    pub fn sorted_codes(&self) -> Vec<CurrencyCode> {
        let mut codes: Vec<CurrencyCode> = match &self.rates {
            Some(rates) => rates.codes().cloned().collect(),
            None => POPULAR_CURRENCIES
                .iter()
                .filter_map(|c| c.parse().ok())
                .collect(),
        };
        codes.sort_by_key(|c| (!self.preferences.is_favorite(c), c.clone()));
        codes
    }
}
