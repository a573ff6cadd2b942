//! Rendering language selection.

use crate::error::Error;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// The two languages decks are rendered in.
///
/// Every generation command produces one output file per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
}

impl Language {
    /// Both languages, in generation order.
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    /// The two-letter code used in filenames and configuration.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            other => Err(Error::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_supported_codes() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert!(matches!(
            "de".parse::<Language>(),
            Err(Error::UnsupportedLanguage(code)) if code == "de"
        ));
        // Case matters: codes are the exact strings used in filenames
        assert!("FR".parse::<Language>().is_err());
    }

    #[test]
    fn code_round_trips_through_display() {
        for language in Language::ALL {
            assert_eq!(language.to_string(), language.code());
        }
    }
}
