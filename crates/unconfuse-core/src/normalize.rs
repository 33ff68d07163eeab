//! Unicode normalization adapter: NFC/NFD/NFKC/NFKD through a pluggable
//! provider, plus an optional zero-width stripping pass.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// The four Unicode normalization forms. Closed set: adding a variant is a
/// breaking change for bindings that encode forms as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationForm {
    /// Canonical composition.
    Nfc,
    /// Canonical decomposition.
    Nfd,
    /// Compatibility composition.
    Nfkc,
    /// Compatibility decomposition.
    Nfkd,
}

impl NormalizationForm {
    pub const ALL: [NormalizationForm; 4] = [
        NormalizationForm::Nfc,
        NormalizationForm::Nfd,
        NormalizationForm::Nfkc,
        NormalizationForm::Nfkd,
    ];

    /// Decode the integer encoding used across language boundaries
    /// (NFC=0, NFD=1, NFKC=2, NFKD=3).
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(NormalizationForm::Nfc),
            1 => Ok(NormalizationForm::Nfd),
            2 => Ok(NormalizationForm::Nfkc),
            3 => Ok(NormalizationForm::Nfkd),
            _ => Err(Error::InvalidArgument(format!(
                "normalization form code {code} is not one of 0 (NFC), 1 (NFD), 2 (NFKC), 3 (NFKD)"
            ))),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            NormalizationForm::Nfc => 0,
            NormalizationForm::Nfd => 1,
            NormalizationForm::Nfkc => 2,
            NormalizationForm::Nfkd => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NormalizationForm::Nfc => "NFC",
            NormalizationForm::Nfd => "NFD",
            NormalizationForm::Nfkc => "NFKC",
            NormalizationForm::Nfkd => "NFKD",
        }
    }

    /// Parse a form name, where `none` in any case means no normalization.
    pub fn parse_optional(value: &str) -> Result<Option<Self>> {
        if value.trim().eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        value.parse().map(Some)
    }

    pub fn is_composed(self) -> bool {
        matches!(self, NormalizationForm::Nfc | NormalizationForm::Nfkc)
    }

    pub fn is_compatibility(self) -> bool {
        matches!(self, NormalizationForm::Nfkc | NormalizationForm::Nfkd)
    }
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationForm {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "nfc" => Ok(NormalizationForm::Nfc),
            "nfd" => Ok(NormalizationForm::Nfd),
            "nfkc" => Ok(NormalizationForm::Nfkc),
            "nfkd" => Ok(NormalizationForm::Nfkd),
            _ => Err(Error::InvalidArgument(format!(
                "unknown normalization form '{s}' (expected nfc, nfd, nfkc or nfkd)"
            ))),
        }
    }
}

// Same spellings as the command line: case-insensitive.
impl<'de> Deserialize<'de> for NormalizationForm {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Standards-conformant normalization backend.
pub trait NormalizationProvider: Send + Sync {
    /// Name shown in diagnostics.
    fn name(&self) -> &str;

    fn normalize(&self, text: &str, form: NormalizationForm) -> String;
}

/// Provider backed by the `unicode-normalization` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeNormalizer;

impl NormalizationProvider for UnicodeNormalizer {
    fn name(&self) -> &str {
        "unicode-normalization"
    }

    fn normalize(&self, text: &str, form: NormalizationForm) -> String {
        let already = match form {
            NormalizationForm::Nfc => unicode_normalization::is_nfc(text),
            NormalizationForm::Nfd => unicode_normalization::is_nfd(text),
            NormalizationForm::Nfkc => unicode_normalization::is_nfkc(text),
            NormalizationForm::Nfkd => unicode_normalization::is_nfkd(text),
        };
        if already {
            return text.to_string();
        }
        match form {
            NormalizationForm::Nfc => text.nfc().collect(),
            NormalizationForm::Nfd => text.nfd().collect(),
            NormalizationForm::Nfkc => text.nfkc().collect(),
            NormalizationForm::Nfkd => text.nfkd().collect(),
        }
    }
}

/// Check if a character is zero-width: invisible joiners, spaces, marks and
/// other default-ignorable format characters.
pub fn is_zero_width(ch: char) -> bool {
    matches!(
        ch,
        '\u{00AD}' // soft hyphen
        | '\u{034F}' // combining grapheme joiner
        | '\u{061C}' // arabic letter mark
        | '\u{115F}' | '\u{1160}' // hangul fillers
        | '\u{17B4}' | '\u{17B5}' // khmer inherent vowels
        | '\u{180E}' // mongolian vowel separator
        | '\u{200B}'..='\u{200F}' // ZWSP, ZWNJ, ZWJ, LRM, RLM
        | '\u{202A}'..='\u{202E}' // bidi embeddings and overrides
        | '\u{2060}'..='\u{2064}' // word joiner, invisible operators
        | '\u{2066}'..='\u{2069}' // bidi isolates
        | '\u{3164}' // hangul filler
        | '\u{FEFF}' // BOM / ZWNBSP
        | '\u{FFA0}' // halfwidth hangul filler
        | '\u{E0001}' // language tag
        | '\u{E0020}'..='\u{E007F}' // tag characters
    )
}

/// Remove every zero-width character. Borrows when there is nothing to strip.
pub fn strip_zero_width(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_zero_width) {
        Cow::Owned(text.chars().filter(|&c| !is_zero_width(c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Normalize with `provider`, then strip zero-width characters if requested.
/// Stripping runs second because normalization can preserve them.
pub fn normalize_with(
    provider: &dyn NormalizationProvider,
    text: &str,
    form: NormalizationForm,
    strip_zero_width_chars: bool,
) -> String {
    let normalized = provider.normalize(text, form);
    if strip_zero_width_chars {
        match strip_zero_width(&normalized) {
            Cow::Borrowed(_) => normalized,
            Cow::Owned(stripped) => stripped,
        }
    } else {
        normalized
    }
}
