//! User preferences and the storage seam that persists them

use super::currency::CurrencyCode;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub base_currency: CurrencyCode,
    #[serde(default)]
    pub favorites: Vec<CurrencyCode>,
    #[serde(default)]
    pub has_visited: bool,
}

impl Preferences {
    pub fn with_base(base_currency: CurrencyCode) -> Self {
        Self {
            base_currency,
            ..Self::default()
        }
    }

    pub fn is_favorite(&self, code: &CurrencyCode) -> bool {
        self.favorites.contains(code)
    }

    /// Adds or removes `code`. Returns whether it is a favorite afterwards.
    pub fn toggle_favorite(&mut self, code: &CurrencyCode) -> bool {
        if let Some(pos) = self.favorites.iter().position(|f| f == code) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(code.clone());
            true
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            base_currency: CurrencyCode::usd(),
            favorites: ["EUR", "GBP", "RUB"]
                .iter()
                .filter_map(|c| c.parse().ok())
                .collect(),
            has_visited: false,
        }
    }
}

/// Persistence for [`Preferences`]. `load` yields `None` until something was saved.
pub trait PreferenceStore: Send + Sync {
    fn load(&self) -> Result<Option<Preferences>>;

    fn save(&self, preferences: &Preferences) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.base_currency.as_str(), "USD");
        let favorites: Vec<&str> = prefs.favorites.iter().map(|c| c.as_str()).collect();
        assert_eq!(favorites, vec!["EUR", "GBP", "RUB"]);
        assert!(!prefs.has_visited);
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let mut prefs = Preferences::default();
        let original = prefs.favorites.clone();
        let jpy: CurrencyCode = "JPY".parse().unwrap();

        assert!(prefs.toggle_favorite(&jpy));
        assert!(prefs.is_favorite(&jpy));
        assert_eq!(prefs.favorites.last(), Some(&jpy));

        assert!(!prefs.toggle_favorite(&jpy));
        assert_eq!(prefs.favorites, original);
    }

    #[test]
    fn test_missing_fields_default_on_deserialize() {
        let prefs: Preferences = serde_json::from_str(r#"{"base_currency": "eur"}"#).unwrap();
        assert_eq!(prefs.base_currency.as_str(), "EUR");
        assert!(prefs.favorites.is_empty());
        assert!(!prefs.has_visited);
    }
}
