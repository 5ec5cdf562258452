//! Language of human-readable validator and risk messages.

use serde::{Deserialize, Serialize};

/// Message language, keyed by ISO 639-1 code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

impl Language {
    /// ISO 639-1 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Parse an ISO 639-1 code (case-insensitive). Region suffixes such as
    /// `zh-CN` are accepted.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }

    /// Message for a password shorter than the minimum length.
    #[must_use]
    pub const fn too_short(self) -> &'static str {
        match self {
            Self::En => "shorter than 8 characters",
            Self::Zh => "长度不足8位",
        }
    }

    /// Message listing absent character classes.
    #[must_use]
    pub fn missing(self, names: &[&str]) -> String {
        match self {
            Self::En => format!("missing: {}", names.join(", ")),
            Self::Zh => format!("缺少: {}", names.join(", ")),
        }
    }

    /// Message wrapping a risk category.
    #[must_use]
    pub fn contains(self, category: &str) -> String {
        match self {
            Self::En => format!("contains {category}"),
            Self::Zh => format!("包含{category}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("ZH"), Some(Language::Zh));
        assert_eq!(Language::from_code("zh-CN"), Some(Language::Zh));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn code_roundtrips() {
        for lang in [Language::En, Language::Zh] {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Zh).unwrap(), "\"zh\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn message_formats() {
        assert_eq!(
            Language::En.missing(&["uppercase", "digit"]),
            "missing: uppercase, digit"
        );
        assert_eq!(Language::Zh.missing(&["大写"]), "缺少: 大写");
        assert_eq!(Language::Zh.contains("重复字符"), "包含重复字符");
    }
}
