//! Message-key translation for kubewhy output.
//!
//! Bundles for every supported language are embedded at compile time. Lookups
//! fall back from the requested language to English and finally to the key
//! itself, so a translation problem never prevents output from being produced.

#![forbid(unsafe_code)]

mod bundle;
mod template;

pub use bundle::{
    Bundle, BundleError, FALLBACK_LANG, available_languages, load_embedded, normalize_lang,
};
pub use template::render_template;

use std::collections::BTreeMap;

/// Resolves message keys for one language.
#[derive(Clone, Debug)]
pub struct Translator {
    requested: String,
    lang: String,
    active: Option<Bundle>,
    english: Bundle,
}

impl Translator {
    /// Build a translator for `lang` from the embedded bundles.
    ///
    /// An unknown language behaves like English; [`Self::requested_lang`] still
    /// reports what was asked for.
    pub fn new(lang: &str) -> Self {
        let requested = normalize_lang(lang);
        let english = load_embedded(FALLBACK_LANG).unwrap_or_default();
        let active = if requested == FALLBACK_LANG {
            None
        } else {
            load_embedded(&requested).ok()
        };
        Self::from_parts(requested, active, english)
    }

    pub fn english() -> Self {
        Self::new(FALLBACK_LANG)
    }

    /// Build a translator from explicit bundles.
    pub fn with_bundles(lang: &str, active: Option<Bundle>, english: Bundle) -> Self {
        Self::from_parts(normalize_lang(lang), active, english)
    }

    fn from_parts(requested: String, active: Option<Bundle>, english: Bundle) -> Self {
        let lang = if active.is_some() {
            requested.clone()
        } else {
            FALLBACK_LANG.to_string()
        };
        Self {
            requested,
            lang,
            active,
            english,
        }
    }

    /// Language actually used for lookups.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn requested_lang(&self) -> &str {
        &self.requested
    }

    /// Raw template for `key`: active bundle, then English, then the key.
    pub fn template<'a>(&'a self, key: &'a str) -> &'a str {
        self.active
            .as_ref()
            .and_then(|b| b.get(key))
            .or_else(|| self.english.get(key))
            .unwrap_or(key)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.active.as_ref().and_then(|b| b.get(key)).is_some() || self.english.get(key).is_some()
    }

    /// Translate a key that takes no arguments.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Translate with inline arguments.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        render_template(self.template(key), |name| {
            args.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v).to_string())
        })
    }

    /// Translate with an argument map, as stored on decision records.
    pub fn t_args(&self, key: &str, args: &BTreeMap<String, String>) -> String {
        render_template(self.template(key), |name| args.get(name).cloned())
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn english_is_the_default() {
        let tr = Translator::default();
        assert_eq!(tr.lang(), "en");
        assert_eq!(tr.t("label.evidence"), "Evidence:");
    }

    #[test]
    fn korean_labels_and_counts() {
        let tr = Translator::new("ko");
        assert_eq!(tr.lang(), "ko");
        assert_eq!(tr.t("label.fix"), "수정 (최소):");
        assert_eq!(
            tr.t_with("section.violations", &[("count", "1")]),
            "위반 사항 (1):"
        );
    }

    #[test]
    fn japanese_labels() {
        let tr = Translator::new("ja");
        assert_eq!(tr.t("label.evidence"), "証拠:");
        assert_eq!(tr.t("label.what"), "内容:");
        assert_eq!(tr.t("label.fix"), "修正 (最小):");
    }

    #[test]
    fn region_tags_are_normalized() {
        let tr = Translator::new("zh-CN");
        assert_eq!(tr.lang(), "zh");
        assert_eq!(
            tr.t_with("section.violations", &[("count", "3")]),
            "违规 (3):"
        );
    }

    #[test]
    fn unknown_language_uses_english() {
        let tr = Translator::new("fr");
        assert_eq!(tr.lang(), "en");
        assert_eq!(tr.requested_lang(), "fr");
        assert_eq!(tr.t("label.what"), "What:");
    }

    #[test]
    fn missing_key_in_active_bundle_falls_back_to_english() {
        let english = Bundle::from_pairs([("greeting", "Hello"), ("farewell", "Bye")]);
        let partial = Bundle::from_pairs([("greeting", "Hola")]);
        let tr = Translator::with_bundles("es", Some(partial), english);
        assert_eq!(tr.t("greeting"), "Hola");
        assert_eq!(tr.t("farewell"), "Bye");
    }

    #[test]
    fn unknown_key_returns_the_key() {
        let tr = Translator::english();
        assert_eq!(tr.t("no.such.key"), "no.such.key");
        assert!(!tr.has_key("no.such.key"));
    }

    #[test]
    fn argument_map_is_used() {
        let tr = Translator::new("ko");
        let args = BTreeMap::from([("container".to_string(), "nginx".to_string())]);
        let detail = tr.t_args("action.fix.disable_privileged.detail", &args);
        assert!(detail.contains("'nginx' 컨테이너 스펙에서"), "{detail}");
    }

    #[test]
    fn missing_argument_fails_open() {
        let tr = Translator::english();
        let out = tr.t("violation.k8s.privileged.message");
        assert!(out.contains("{{container}}"), "{out}");
    }

    proptest! {
        #[test]
        fn text_without_markers_is_verbatim(s in "[^{]*") {
            prop_assert_eq!(render_template(&s, |_| None), s);
        }
    }
}
