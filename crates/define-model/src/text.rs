use serde::{Deserialize, Serialize};

/// A language-tagged text fragment (`TranslatedText`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub value: String,
}

impl TranslatedText {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            lang: None,
            value: value.into(),
        }
    }

    pub fn with_lang(lang: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            lang: Some(lang.into()),
            value: value.into(),
        }
    }
}

/// First non-empty text of a description list, used for display.
pub fn first_text(texts: &[TranslatedText]) -> Option<&str> {
    texts
        .iter()
        .map(|t| t.value.as_str())
        .find(|v| !v.trim().is_empty())
}
