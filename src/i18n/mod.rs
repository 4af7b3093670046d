use indexmap::IndexMap;
use thiserror::Error;

/// Embedded translation catalog: {language code → {message key → template}}.
const CATALOG_JSON: &str = include_str!("../../assets/translations.json");

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Fr,
}

impl Language {
    pub const DEFAULT: Language = Language::En;

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// Parse a language tag or locale string, tolerating region and encoding
    /// suffixes ("fr", "fr-FR", "fr_CA.UTF-8").
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        if code.starts_with("fr") {
            Some(Language::Fr)
        } else if code.starts_with("en") {
            Some(Language::En)
        } else {
            None
        }
    }

    /// Detect the host locale from the usual environment variables, in POSIX
    /// precedence order.
    pub fn from_locale_env() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .filter(|value| !value.is_empty())
            .find_map(|value| Self::from_code(&value))
            .unwrap_or(Self::DEFAULT)
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Fr,
            Language::Fr => Language::En,
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed translation catalog: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("translation catalog is missing the '{0}' table")]
    MissingLanguage(&'static str),
}

/// Message catalog with a chained lookup: active language, then the default
/// language, then the raw key. Lookup itself never fails.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: IndexMap<String, IndexMap<String, String>>,
}

impl Catalog {
    /// Parse the embedded catalog asset. Both supported languages must be
    /// present; anything else is a packaging defect caught at startup.
    pub fn load() -> Result<Self, CatalogError> {
        let catalog = Self::from_json(CATALOG_JSON)?;
        for lang in [Language::En, Language::Fr] {
            if !catalog.tables.contains_key(lang.code()) {
                return Err(CatalogError::MissingLanguage(lang.code()));
            }
        }
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let tables = serde_json::from_str(json)?;
        Ok(Self { tables })
    }

    pub fn translate(&self, lang: Language, key: &str) -> String {
        self.tables
            .get(lang.code())
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.tables
                    .get(Language::DEFAULT.code())
                    .and_then(|table| table.get(key))
            })
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Translate and substitute `{token}` placeholders verbatim. Tokens with
    /// no supplied replacement stay literal in the output.
    pub fn translate_with(
        &self,
        lang: Language,
        key: &str,
        replacements: &[(&str, &str)],
    ) -> String {
        let mut text = self.translate(lang, key);
        for (token, value) in replacements {
            text = text.replace(&format!("{{{}}}", token), value);
        }
        text
    }

    #[cfg(test)]
    fn keys_for(&self, lang: Language) -> Vec<&str> {
        self.tables
            .get(lang.code())
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
