//! Static fallback rates used when every provider is unreachable

use super::currency::CurrencyCode;
use super::rates::{RateMap, RateOrigin};

const USD_RATES: &[(&str, f64)] = &[
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 148.25),
    ("CAD", 1.35),
    ("AUD", 1.52),
    ("CHF", 0.88),
    ("CNY", 7.18),
    ("RUB", 81.19),
    ("TRY", 28.95),
    ("INR", 83.12),
    ("BRL", 4.93),
    ("MXN", 17.05),
];

const EUR_RATES: &[(&str, f64)] = &[
    ("USD", 1.09),
    ("GBP", 0.86),
    ("JPY", 161.25),
    ("CAD", 1.47),
    ("AUD", 1.65),
    ("CHF", 0.96),
    ("CNY", 7.82),
    ("RUB", 88.35),
    ("TRY", 31.52),
    ("INR", 90.45),
    ("BRL", 5.36),
    ("MXN", 18.52),
];

const RUB_RATES: &[(&str, f64)] = &[
    ("USD", 0.0123),
    ("EUR", 0.0113),
    ("GBP", 0.0097),
    ("JPY", 1.83),
    ("CAD", 0.0166),
    ("AUD", 0.0187),
    ("CHF", 0.0108),
    ("CNY", 0.0885),
    ("TRY", 0.356),
    ("INR", 1.024),
    ("BRL", 0.0607),
    ("MXN", 0.210),
];

const GBP_RATES: &[(&str, f64)] = &[
    ("USD", 1.27),
    ("EUR", 1.16),
    ("JPY", 187.65),
    ("CAD", 1.71),
    ("AUD", 1.92),
    ("CHF", 1.11),
    ("CNY", 9.08),
    ("RUB", 103.15),
    ("TRY", 36.72),
    ("INR", 105.28),
    ("BRL", 6.24),
    ("MXN", 21.55),
];

fn table_for(base: &CurrencyCode) -> &'static [(&'static str, f64)] {
    match base.as_str() {
        "EUR" => EUR_RATES,
        "RUB" => RUB_RATES,
        "GBP" => GBP_RATES,
        _ => USD_RATES,
    }
}

/// Demo rates for `base`. Bases without a table borrow USD's, with `base`
/// itself still pinned to 1.0.
pub fn demo_rates(base: &CurrencyCode) -> RateMap {
    RateMap::from_raw(
        base.clone(),
        table_for(base).iter().copied(),
        RateOrigin::Demo,
    )
}
