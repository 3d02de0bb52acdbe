//! Translation tables and their aggregation.
//!
//! # Invariants
//!
//! 1. **Deep merge**: tables are combined per language, then per namespace,
//!    then per key. Two tables sharing a language never clobber each other's
//!    namespaces.
//! 2. **Right-biased**: when two tables carry the same
//!    `(language, namespace, key)` path, the later table wins and the path is
//!    reported as a [`Collision`].
//! 3. **Immutable after aggregation**: a [`ResourceSet`] exposes no mutators.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

/// Key → localized text for one namespace in one language.
pub type Messages = BTreeMap<String, String>;

/// A path that was present on both sides of a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub language: String,
    pub namespace: String,
    pub key: String,
}

/// Language → namespace → key → text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    languages: BTreeMap<String, BTreeMap<String, Messages>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single string, replacing any previous value on the same path.
    pub fn insert(
        &mut self,
        language: impl Into<String>,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.languages
            .entry(language.into())
            .or_default()
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Add a whole namespace for a language, merging into what is already there.
    pub fn with_messages(
        mut self,
        language: impl Into<String>,
        namespace: impl Into<String>,
        messages: Messages,
    ) -> Self {
        self.languages
            .entry(language.into())
            .or_default()
            .entry(namespace.into())
            .or_default()
            .extend(messages);
        self
    }

    /// Deep-merge `other` into `self`. Values from `other` win.
    pub fn merge_right(&mut self, other: TranslationTable) -> Vec<Collision> {
        let mut collisions = Vec::new();

        for (language, namespaces) in other.languages {
            let target_lang = self.languages.entry(language.clone()).or_default();
            for (namespace, messages) in namespaces {
                let target_ns = target_lang.entry(namespace.clone()).or_default();
                for (key, value) in messages {
                    if target_ns.insert(key.clone(), value).is_some() {
                        collisions.push(Collision {
                            language: language.clone(),
                            namespace: namespace.clone(),
                            key,
                        });
                    }
                }
            }
        }

        collisions
    }

    pub fn get(&self, language: &str, namespace: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|namespaces| namespaces.get(namespace))
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn namespaces(&self, language: &str) -> impl Iterator<Item = &str> {
        self.languages
            .get(language)
            .into_iter()
            .flat_map(|namespaces| namespaces.keys().map(String::as_str))
    }

    pub fn messages(&self, language: &str, namespace: &str) -> Option<&Messages> {
        self.languages.get(language)?.get(namespace)
    }

    pub fn contains_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Whether any language carries `namespace`.
    pub fn contains_namespace(&self, namespace: &str) -> bool {
        self.languages
            .values()
            .any(|namespaces| namespaces.contains_key(namespace))
    }

    /// Total number of strings across all languages and namespaces.
    pub fn len(&self) -> usize {
        self.languages
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The aggregated, read-only resources a [`Localizer`](super::Localizer) serves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceSet {
    table: TranslationTable,
}

impl ResourceSet {
    /// Fold `tables` left to right. Every overwritten path is logged.
    pub fn aggregate(tables: impl IntoIterator<Item = TranslationTable>) -> Self {
        let mut table = TranslationTable::new();
        for next in tables {
            for c in table.merge_right(next) {
                warn!(
                    "Translation {}/{}/{:?} defined more than once, later definition wins",
                    c.language, c.namespace, c.key
                );
            }
        }
        Self { table }
    }

    pub fn get(&self, language: &str, namespace: &str, key: &str) -> Option<&str> {
        self.table.get(language, namespace, key)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.table.languages()
    }

    pub fn namespaces(&self, language: &str) -> impl Iterator<Item = &str> {
        self.table.namespaces(language)
    }

    pub fn messages(&self, language: &str, namespace: &str) -> Option<&Messages> {
        self.table.messages(language, namespace)
    }

    pub fn contains_language(&self, language: &str) -> bool {
        self.table.contains_language(language)
    }

    pub fn contains_namespace(&self, namespace: &str) -> bool {
        self.table.contains_namespace(namespace)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl From<TranslationTable> for ResourceSet {
    fn from(table: TranslationTable) -> Self {
        Self { table }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greeting() -> TranslationTable {
        let mut t = TranslationTable::new();
        t.insert("en", "Greeting", "[header] greeting", "Hello")
            .insert("nl", "Greeting", "[header] greeting", "Hallo");
        t
    }

    fn selector() -> TranslationTable {
        let mut t = TranslationTable::new();
        t.insert("en", "LanguageSelector", "[option] english", "English")
            .insert("en", "LanguageSelector", "[option] dutch", "Dutch")
            .insert("nl", "LanguageSelector", "[option] english", "Engels")
            .insert("nl", "LanguageSelector", "[option] dutch", "Nederlands");
        t
    }

    #[test]
    fn test_disjoint_namespaces_keep_everything() {
        let set = ResourceSet::aggregate([selector(), greeting()]);

        assert_eq!(set.len(), greeting().len() + selector().len());
        assert_eq!(set.languages().collect::<Vec<_>>(), vec!["en", "nl"]);
        for lang in ["en", "nl"] {
            assert_eq!(
                set.namespaces(lang).collect::<Vec<_>>(),
                vec!["Greeting", "LanguageSelector"]
            );
        }
        assert_eq!(set.get("nl", "Greeting", "[header] greeting"), Some("Hallo"));
        assert_eq!(set.get("en", "LanguageSelector", "[option] dutch"), Some("Dutch"));
    }

    #[test]
    fn test_contains_namespace_spans_languages() {
        let mut only_nl = TranslationTable::new();
        only_nl.insert("nl", "Footer", "text", "Tekst");
        let set = ResourceSet::aggregate([greeting(), only_nl]);

        assert!(set.contains_namespace("Greeting"));
        assert!(set.contains_namespace("Footer"));
        assert!(!set.contains_namespace("LanguageSelector"));
    }

    #[test]
    fn test_merge_is_deep_not_shallow() {
        let mut left = TranslationTable::new();
        left.insert("en", "Greeting", "a", "A");
        let mut right = TranslationTable::new();
        right.insert("en", "Greeting", "b", "B");

        let collisions = left.merge_right(right);

        assert!(collisions.is_empty());
        assert_eq!(left.get("en", "Greeting", "a"), Some("A"));
        assert_eq!(left.get("en", "Greeting", "b"), Some("B"));
    }

    #[test]
    fn test_merge_is_right_biased_and_reports_collisions() {
        let mut left = greeting();
        let mut right = TranslationTable::new();
        right.insert("nl", "Greeting", "[header] greeting", "Goedendag");

        let collisions = left.merge_right(right);

        assert_eq!(
            collisions,
            vec![Collision {
                language: "nl".into(),
                namespace: "Greeting".into(),
                key: "[header] greeting".into(),
            }]
        );
        assert_eq!(left.get("nl", "Greeting", "[header] greeting"), Some("Goedendag"));
        assert_eq!(left.get("en", "Greeting", "[header] greeting"), Some("Hello"));
    }

    #[test]
    fn test_aggregate_of_nothing_is_empty() {
        let set = ResourceSet::aggregate(Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.get("en", "Greeting", "x"), None);
        assert_eq!(set.namespaces("en").count(), 0);
    }

    #[test]
    fn test_with_messages_extends_namespace() {
        let mut messages = Messages::new();
        messages.insert("k".into(), "v".into());
        let table = greeting().with_messages("en", "Greeting", messages);

        assert_eq!(table.messages("en", "Greeting").map(BTreeMap::len), Some(2));
    }

    #[test]
    fn test_serializes_as_nested_object() {
        let set = ResourceSet::from(greeting());
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["nl"]["Greeting"]["[header] greeting"], "Hallo");

        let back: TranslationTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, greeting());
    }
}
