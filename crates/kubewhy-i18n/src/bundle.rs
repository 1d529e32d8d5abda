//! Locale bundles compiled into the binary.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Language used when the requested one is unknown or incomplete.
pub const FALLBACK_LANG: &str = "en";

const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("es", include_str!("../locales/es.json")),
    ("ja", include_str!("../locales/ja.json")),
    ("ko", include_str!("../locales/ko.json")),
    ("zh", include_str!("../locales/zh.json")),
];

static PARSED: LazyLock<BTreeMap<&'static str, Result<Bundle, BundleError>>> =
    LazyLock::new(|| {
        EMBEDDED
            .iter()
            .map(|(lang, text)| (*lang, Bundle::from_json(text)))
            .collect()
    });

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BundleError {
    #[error("no locale bundle for language {0:?}")]
    UnknownLanguage(String),
    #[error("locale bundle is not a flat JSON object of strings: {0}")]
    Malformed(String),
}

/// A flat key → template map for one language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bundle {
    messages: BTreeMap<String, String>,
}

impl Bundle {
    pub fn from_json(text: &str) -> Result<Self, BundleError> {
        let messages: BTreeMap<String, String> =
            serde_json::from_str(text).map_err(|e| BundleError::Malformed(e.to_string()))?;
        Ok(Self { messages })
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            messages: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Languages with an embedded bundle, sorted.
pub fn available_languages() -> Vec<&'static str> {
    EMBEDDED.iter().map(|(lang, _)| *lang).collect()
}

/// Load one of the embedded bundles.
pub fn load_embedded(lang: &str) -> Result<Bundle, BundleError> {
    match PARSED.get(lang) {
        Some(parsed) => parsed.clone(),
        None => Err(BundleError::UnknownLanguage(lang.to_string())),
    }
}

/// Reduce a locale tag such as `ko-KR` or `ja_JP.UTF-8` to its language subtag.
pub fn normalize_lang(tag: &str) -> String {
    tag.split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
