//! Translation dictionary types

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Translations for a single language, keyed by translation key.
///
/// Values keep their JSON form; only strings count as translations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TranslationTable(HashMap<String, Value>);

/// All translation tables, keyed by language code
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TranslationDictionary(HashMap<String, TranslationTable>);

impl TranslationTable {
    /// Translated string for `key`, if one exists
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TranslationDictionary {
    pub fn table(&self, language: &str) -> Option<&TranslationTable> {
        self.0.get(language)
    }

    pub fn contains_language(&self, language: &str) -> bool {
        self.0.contains_key(language)
    }

    /// Language codes, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.0.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L, K, V> FromIterator<(L, Vec<(K, V)>)> for TranslationDictionary
where
    L: Into<String>,
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, Vec<(K, V)>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(language, entries)| {
                    let table = entries
                        .into_iter()
                        .map(|(k, v)| (k.into(), Value::String(v.into())))
                        .collect();
                    (language.into(), TranslationTable(table))
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dictionary() {
        let json = r#"{
            "en": {"greet": "Hello", "count": 3, "nested": {"a": "b"}},
            "fr": {"greet": "Bonjour"}
        }"#;
        let dictionary: TranslationDictionary = serde_json::from_str(json).unwrap();

        assert_eq!(dictionary.languages(), vec!["en", "fr"]);
        let en = dictionary.table("en").unwrap();
        assert_eq!(en.get("greet"), Some("Hello"));
        assert_eq!(en.get("count"), None);
        assert_eq!(en.get("nested"), None);
        assert_eq!(en.get("absent"), None);
        assert!(dictionary.table("de").is_none());
    }

    #[test]
    fn test_empty_table_is_still_a_language() {
        let dictionary: TranslationDictionary = serde_json::from_str(r#"{"en": {}}"#).unwrap();
        assert!(dictionary.contains_language("en"));
        assert!(dictionary.table("en").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_object_tables() {
        assert!(serde_json::from_str::<TranslationDictionary>(r#"{"en": "Hello"}"#).is_err());
        assert!(serde_json::from_str::<TranslationDictionary>(r#"["en"]"#).is_err());
    }

    #[test]
    fn test_from_iter() {
        let dictionary: TranslationDictionary =
            [("en", vec![("greet", "Hello")]), ("fr", vec![("greet", "Bonjour")])]
                .into_iter()
                .collect();
        assert_eq!(dictionary.table("fr").unwrap().get("greet"), Some("Bonjour"));
        assert_eq!(dictionary.len(), 2);
    }
}
