//! Exchange rate snapshots and the provider abstractions that produce them

use super::currency::CurrencyCode;
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use tracing::debug;

/// Where a [`RateMap`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RateOrigin {
    Provider(String),
    Demo,
}

impl Display for RateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateOrigin::Provider(name) => f.write_str(name),
            RateOrigin::Demo => f.write_str("demo data"),
        }
    }
}

/// Snapshot of rates relative to `base`: 1 unit of base = `rate` units of a code.
///
/// Every value is strictly positive and finite, and the base always maps to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateMap {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
    origin: RateOrigin,
}

impl RateMap {
    /// Builds a map from raw provider keys. Keys are uppercased, entries with
    /// unusable codes or non-positive rates are dropped, and the base is
    /// inserted with 1.0.
    ///
    /// When a key shows up both uppercased and in another case, the value
    /// under the already-uppercase key is kept.
    pub fn from_raw<K, I>(base: CurrencyCode, raw: I, origin: RateOrigin) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut rates = BTreeMap::new();
        for (key, rate) in raw {
            let key = key.as_ref();
            if !rate.is_finite() || rate <= 0.0 {
                debug!(code = key, rate, "Dropping unusable rate");
                continue;
            }
            let Ok(code) = key.parse::<CurrencyCode>() else {
                debug!(code = key, "Dropping unparsable currency code");
                continue;
            };
            if code.as_str() == key.trim() {
                rates.insert(code, rate);
            } else {
                rates.entry(code).or_insert(rate);
            }
        }
        rates.insert(base.clone(), 1.0);
        RateMap {
            base,
            rates,
            origin,
        }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn origin(&self) -> &RateOrigin {
        &self.origin
    }

    pub fn is_demo(&self) -> bool {
        self.origin == RateOrigin::Demo
    }

    /// Rate for `code`, relative to the map's base.
    pub fn get(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.rates.contains_key(code)
    }

    /// Codes in alphabetical order, base included.
    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.rates.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, f64)> {
        self.rates.iter().map(|(code, rate)| (code, *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// A map never becomes empty since the base is always present.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Raw rates as returned by a provider parser, before normalization.
pub type RawRates = HashMap<String, f64>;

/// A single upstream source of exchange rates. May fail.
#[async_trait]
pub trait RateSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, base: &CurrencyCode) -> Result<RateMap>;
}

/// Resolves rates for a base currency. Never fails; degrades to demo data.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base: &CurrencyCode) -> RateMap;
}
