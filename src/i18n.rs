//! Message localization.
//!
//! Resources are TOML tables flattened into dotted keys, so
//! `[errorMessages] invalidUrl = "..."` is looked up as
//! `errorMessages.invalidUrl`.

use std::collections::HashMap;

use thiserror::Error;

/// Default locale.
pub const DEFAULT_LOCALE: &str = "en";

const EN: &str = include_str!("../locales/en.toml");

/// Translates message keys into user-facing text.
pub trait Localizer {
    fn translate(&self, key: &str) -> String;
}

/// I18n-related errors.
#[derive(Error, Debug)]
pub enum I18nError {
    #[error("failed to parse locale resources: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("locale not found: {0}")]
    LocaleNotFound(String),
}

/// TOML-backed message catalogue for one locale.
#[derive(Debug, Clone)]
pub struct I18n {
    locale: String,
    messages: HashMap<String, String>,
}

impl I18n {
    /// Load one of the bundled locales.
    pub fn bundled(locale: &str) -> Result<Self, I18nError> {
        match locale {
            DEFAULT_LOCALE => Self::from_str(locale, EN),
            other => Err(I18nError::LocaleNotFound(other.to_string())),
        }
    }

    /// Build a catalogue from a TOML string.
    pub fn from_str(locale: &str, content: &str) -> Result<Self, I18nError> {
        let table: toml::Table = toml::from_str(content)?;
        let mut messages = HashMap::new();
        flatten("", &toml::Value::Table(table), &mut messages);
        Ok(Self {
            locale: locale.to_string(),
            messages,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Localizer for I18n {
    /// Missing keys translate to the key itself.
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn flatten(prefix: &str, value: &toml::Value, out: &mut HashMap<String, String>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        toml::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_english_has_all_messages() {
        let i18n = I18n::bundled("en").unwrap();
        assert_eq!(i18n.locale(), "en");
        assert_eq!(i18n.translate("errorMessages.invalidUrl"), "Must be valid url");
        assert_eq!(i18n.translate("errorMessages.urlAlreadyAdded"), "Rss already exists");
        assert_eq!(i18n.translate("errorMessages.networkError"), "Network error");
        assert_eq!(
            i18n.translate("errorMessages.parsingError"),
            "This source doesn't contain valid rss"
        );
        assert_eq!(i18n.translate("successMessage"), "Rss has been loaded");
    }

    #[test]
    fn unknown_locale_is_an_error() {
        assert!(matches!(
            I18n::bundled("xx"),
            Err(I18nError::LocaleNotFound(_))
        ));
    }

    #[test]
    fn missing_key_returns_key() {
        let i18n = I18n::from_str("en", "greeting = \"hi\"").unwrap();
        assert_eq!(i18n.translate("greeting"), "hi");
        assert_eq!(i18n.translate("farewell"), "farewell");
    }
}
