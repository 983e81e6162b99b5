pub mod chain;
pub mod http;
pub mod spec;

pub use chain::RateProviderChain;
pub use http::HttpRateSource;
pub use spec::{ProviderKind, ProviderSpec};
