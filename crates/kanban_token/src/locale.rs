//! Locale derived from the token's language claim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// UI locale supported by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// German, the preferred language when nothing else is known.
    #[default]
    De,
    /// English.
    En,
}

impl Locale {
    /// Maps a `language` claim onto a locale.
    ///
    /// `en` in any case selects English; everything else, including a
    /// missing claim, falls back to German.
    #[must_use]
    pub fn from_claim(language: Option<&str>) -> Self {
        match language {
            Some(code) if code.trim().eq_ignore_ascii_case("en") => Locale::En,
            _ => Locale::De,
        }
    }

    /// Lowercase language code, as used by translation tables.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Locale::De => "de",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
