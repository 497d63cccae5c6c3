use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Target languages that text can be translated to and spoken in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "zh-cn")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "tr")]
    Turkish,
    #[serde(rename = "vi")]
    Vietnamese,
    #[serde(rename = "ur")]
    Urdu,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "gu")]
    Gujarati,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "pa")]
    Punjabi,
}

impl LanguageCode {
    /// Every supported language, in the order they are offered to users
    pub const ALL: [LanguageCode; 21] = [
        LanguageCode::English,
        LanguageCode::French,
        LanguageCode::Spanish,
        LanguageCode::German,
        LanguageCode::Hindi,
        LanguageCode::Chinese,
        LanguageCode::Japanese,
        LanguageCode::Russian,
        LanguageCode::Italian,
        LanguageCode::Portuguese,
        LanguageCode::Arabic,
        LanguageCode::Bengali,
        LanguageCode::Korean,
        LanguageCode::Turkish,
        LanguageCode::Vietnamese,
        LanguageCode::Urdu,
        LanguageCode::Tamil,
        LanguageCode::Telugu,
        LanguageCode::Gujarati,
        LanguageCode::Marathi,
        LanguageCode::Punjabi,
    ];

    /// The ISO-like code understood by the translation and speech services
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::French => "fr",
            LanguageCode::Spanish => "es",
            LanguageCode::German => "de",
            LanguageCode::Hindi => "hi",
            LanguageCode::Chinese => "zh-cn",
            LanguageCode::Japanese => "ja",
            LanguageCode::Russian => "ru",
            LanguageCode::Italian => "it",
            LanguageCode::Portuguese => "pt",
            LanguageCode::Arabic => "ar",
            LanguageCode::Bengali => "bn",
            LanguageCode::Korean => "ko",
            LanguageCode::Turkish => "tr",
            LanguageCode::Vietnamese => "vi",
            LanguageCode::Urdu => "ur",
            LanguageCode::Tamil => "ta",
            LanguageCode::Telugu => "te",
            LanguageCode::Gujarati => "gu",
            LanguageCode::Marathi => "mr",
            LanguageCode::Punjabi => "pa",
        }
    }

    /// English name of the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::French => "French",
            LanguageCode::Spanish => "Spanish",
            LanguageCode::German => "German",
            LanguageCode::Hindi => "Hindi",
            LanguageCode::Chinese => "Chinese",
            LanguageCode::Japanese => "Japanese",
            LanguageCode::Russian => "Russian",
            LanguageCode::Italian => "Italian",
            LanguageCode::Portuguese => "Portuguese",
            LanguageCode::Arabic => "Arabic",
            LanguageCode::Bengali => "Bengali",
            LanguageCode::Korean => "Korean",
            LanguageCode::Turkish => "Turkish",
            LanguageCode::Vietnamese => "Vietnamese",
            LanguageCode::Urdu => "Urdu",
            LanguageCode::Tamil => "Tamil",
            LanguageCode::Telugu => "Telugu",
            LanguageCode::Gujarati => "Gujarati",
            LanguageCode::Marathi => "Marathi",
            LanguageCode::Punjabi => "Punjabi",
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    /// Accepts either the code (`zh-cn`) or the display name (`Chinese`), ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        LanguageCode::ALL
            .into_iter()
            .find(|lang| {
                lang.as_str().eq_ignore_ascii_case(&wanted)
                    || lang.display_name().eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| Error::UnsupportedLanguage(s.trim().to_string()))
    }
}
