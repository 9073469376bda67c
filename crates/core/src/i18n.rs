use std::collections::{BTreeMap, HashMap};

use crate::error::CatalogError;
use crate::models::Language;

const BUILTIN_STRINGS: [(Language, &str); 3] = [
    (Language::Fr, include_str!("../data/strings/fr.json")),
    (Language::En, include_str!("../data/strings/en.json")),
    (Language::Ar, include_str!("../data/strings/ar.json")),
];

/// Source of interface strings, handed to the engine explicitly.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, language: Language) -> String;
}

/// Flat key/value strings per language. Missing keys resolve through the
/// default language and finally to the key itself.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    default_language: Language,
    strings: BTreeMap<Language, HashMap<String, String>>,
}

impl StringTable {
    pub fn new(default_language: Language) -> Self {
        Self {
            default_language,
            strings: BTreeMap::new(),
        }
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        let mut table = Self::new(Language::DEFAULT);
        for (language, raw) in BUILTIN_STRINGS {
            table.load_json(language, raw)?;
        }
        Ok(table)
    }

    pub fn load_json(&mut self, language: Language, raw: &str) -> Result<&mut Self, CatalogError> {
        let entries: HashMap<String, String> = serde_json::from_str(raw)
            .map_err(|source| CatalogError::InvalidStrings { language, source })?;
        self.strings.entry(language).or_default().extend(entries);
        Ok(self)
    }

    pub fn insert(&mut self, language: Language, key: impl Into<String>, value: impl Into<String>) {
        self.strings
            .entry(language)
            .or_default()
            .insert(key.into(), value.into());
    }

    fn get(&self, language: Language, key: &str) -> Option<&str> {
        self.strings
            .get(&language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

impl Translator for StringTable {
    fn translate(&self, key: &str, language: Language) -> String {
        self.get(language, key)
            .or_else(|| self.get(self.default_language, key))
            .unwrap_or(key)
            .to_string()
    }
}

/// Replaces `{name}` placeholders.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}
