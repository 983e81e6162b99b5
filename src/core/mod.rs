//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod demo;
pub mod log;
pub mod preferences;
pub mod rates;
pub mod session;

// Re-export main types for cleaner imports
pub use convert::{Conversion, ConversionRequest};
pub use currency::CurrencyCode;
pub use preferences::{PreferenceStore, Preferences};
pub use rates::{RateMap, RateOrigin, RateProvider, RateSource};
pub use session::CurrencySession;
