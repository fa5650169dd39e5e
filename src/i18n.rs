//! Translation store and language preference.
//!
//! All copy lives in `locales/es.toml` and `locales/en.toml`, embedded at
//! compile time. Each file is a tree of TOML tables; a translation key is the
//! dotted path to a string leaf:
//!
//! ```toml
//! [contact]
//! title = "Contacto"          # contact.title
//!
//! [contact.serviceOptions]
//! beans = "Venta de Granos"   # contact.serviceOptions.beans
//! ```
//!
//! ## Lookup
//!
//! [`Translations::resolve`] walks the path segment by segment. If any segment
//! is missing, or the path ends on a table instead of a string, the key itself
//! is returned. A raw key on the page is the signal that copy is missing;
//! lookups never fail.
//!
//! ## Active language
//!
//! [`LanguageStore`] owns the active [`Locale`]. It is read from durable
//! storage under [`LANGUAGE_KEY`] at startup (Spanish when absent or
//! unrecognized) and written back on every change. Subscribers registered
//! with [`LanguageStore::subscribe`] are called after each change so views can
//! re-render.

use crate::storage::{Storage, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Storage key holding the persisted language (`"es"` or `"en"`).
pub const LANGUAGE_KEY: &str = "language";

const ES_TOML: &str = include_str!("../locales/es.toml");
const EN_TOML: &str = include_str!("../locales/en.toml");

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("unknown locale '{0}' (expected 'es' or 'en')")]
    UnknownLocale(String),
    #[error("{locale} translations: {source}")]
    Parse {
        locale: Locale,
        #[source]
        source: toml::de::Error,
    },
}

/// Site language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// The other language.
    pub fn toggled(self) -> Self {
        match self {
            Locale::Es => Locale::En,
            Locale::En => Locale::Es,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            other => Err(I18nError::UnknownLocale(other.to_string())),
        }
    }
}

/// A key defined in one locale but not the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityGap {
    pub key: String,
    pub missing_in: Locale,
}

/// Both locale trees, parsed once.
#[derive(Debug, Clone)]
pub struct Translations {
    es: toml::Table,
    en: toml::Table,
}

impl Translations {
    /// Parse a pair of locale files.
    pub fn from_toml(es: &str, en: &str) -> Result<Self, I18nError> {
        let parse = |locale: Locale, src: &str| {
            toml::from_str::<toml::Table>(src).map_err(|source| I18nError::Parse { locale, source })
        };
        Ok(Self {
            es: parse(Locale::Es, es)?,
            en: parse(Locale::En, en)?,
        })
    }

    /// The copy shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_toml(ES_TOML, EN_TOML).expect("embedded locale files must parse")
    }

    fn branch(&self, locale: Locale) -> &toml::Table {
        match locale {
            Locale::Es => &self.es,
            Locale::En => &self.en,
        }
    }

    /// Resolve `key` in `locale`, falling back to the key itself.
    pub fn resolve<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.lookup(locale, key).unwrap_or(key)
    }

    /// Resolve `key` in `locale`, or `None` when it does not name a string.
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut value = self.branch(locale).get(first)?;
        for segment in segments {
            value = value.as_table()?.get(segment)?;
        }
        value.as_str()
    }

    /// Every dotted key with a string value in `locale`, sorted.
    pub fn keys(&self, locale: Locale) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(self.branch(locale), "", &mut keys);
        keys.sort();
        keys
    }

    /// Keys that exist in one locale only.
    pub fn check_parity(&self) -> Vec<ParityGap> {
        let es = self.keys(Locale::Es);
        let en = self.keys(Locale::En);
        let mut gaps: Vec<ParityGap> = es
            .iter()
            .filter(|k| en.binary_search(k).is_err())
            .map(|k| ParityGap {
                key: k.clone(),
                missing_in: Locale::En,
            })
            .collect();
        gaps.extend(
            en.iter()
                .filter(|k| es.binary_search(k).is_err())
                .map(|k| ParityGap {
                    key: k.clone(),
                    missing_in: Locale::Es,
                }),
        );
        gaps
    }
}

fn collect_keys(table: &toml::Table, prefix: &str, out: &mut Vec<String>) {
    for (name, value) in table {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            toml::Value::String(_) => out.push(path),
            toml::Value::Table(child) => collect_keys(child, &path, out),
            _ => {}
        }
    }
}

type Subscriber = Box<dyn FnMut(Locale)>;

/// Active language backed by durable storage.
pub struct LanguageStore<S: Storage> {
    translations: Translations,
    storage: S,
    locale: Locale,
    subscribers: Vec<Subscriber>,
}

impl<S: Storage> LanguageStore<S> {
    /// Read the persisted language from `storage`, defaulting to Spanish.
    pub fn load(translations: Translations, storage: S) -> Self {
        let locale = storage
            .get(LANGUAGE_KEY)
            .and_then(|raw| match raw.parse::<Locale>() {
                Ok(locale) => Some(locale),
                Err(err) => {
                    tracing::debug!(%err, "ignoring stored language");
                    None
                }
            })
            .unwrap_or_default();
        Self {
            translations,
            storage,
            locale,
            subscribers: Vec::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Resolve `key` against the active language.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.resolve(self.locale, key)
    }

    /// Register a callback run after every language change.
    pub fn subscribe(&mut self, subscriber: impl FnMut(Locale) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Flip between Spanish and English.
    pub fn toggle(&mut self) -> Locale {
        self.set(self.locale.toggled());
        self.locale
    }

    /// Switch to `locale`, persist it, and notify subscribers.
    ///
    /// The choice is written even when it equals the current language, so a
    /// fresh store always leaves an explicit value behind.
    pub fn set(&mut self, locale: Locale) {
        self.locale = locale;
        if let Err(err) = self.persist() {
            tracing::warn!(%err, locale = %locale, "failed to persist language");
        }
        for subscriber in &mut self.subscribers {
            subscriber(locale);
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.storage.set(LANGUAGE_KEY, self.locale.as_str())
    }
}
