//! Detection and neutralization of confusable Unicode characters.
//!
//! The free functions below run against the process-wide [`Engine`]; build
//! your own with [`Engine::builder`] for alternate tables or providers.

pub mod config;
pub mod confusables;
pub mod data_format;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod output;
pub mod report;
pub mod scan;
pub mod skeleton;
pub mod text;

use std::collections::BTreeSet;

pub use config::{OutputFormat, Settings};
pub use confusables::{Canonical, ConfusablesTable};
pub use engine::{Engine, EngineBuilder};
pub use error::{Encoding, Error, Result};
pub use normalize::{NormalizationForm, NormalizationProvider, UnicodeNormalizer};
pub use report::{Finding, ScanReport, Status};
pub use text::TextInput;

/// Distinct confusable characters in `text`.
pub fn contains_confusables<T: TextInput + ?Sized>(text: &T) -> Result<BTreeSet<String>> {
    Engine::global().contains_confusables(text)
}

/// Replace every confusable character with its prototype.
pub fn normalize_confusables<T: TextInput + ?Sized>(text: &T) -> Result<String> {
    Engine::global().normalize_confusables(text)
}

/// Unicode normalization with optional zero-width stripping.
pub fn normalize<T: TextInput + ?Sized>(
    text: &T,
    form: NormalizationForm,
    strip_zero_width: bool,
) -> Result<String> {
    Engine::global().normalize(text, form, strip_zero_width)
}

#[deprecated(note = "use `normalize(text, NormalizationForm::Nfkd, strip_zero_width)`")]
pub fn normalize_compatibility_decomposed<T: TextInput + ?Sized>(
    text: &T,
    strip_zero_width: bool,
) -> Result<String> {
    Engine::global().normalize(text, NormalizationForm::Nfkd, strip_zero_width)
}

pub fn are_confusable(a: &str, b: &str) -> bool {
    skeleton::are_confusable(ConfusablesTable::builtin(), a, b)
}
