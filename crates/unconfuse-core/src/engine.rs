//! The public façade: argument validation and dispatch over the table,
//! the scanner, the skeletonizer and the normalization provider.
//!
//! Every operation accepts any [`TextInput`] and validates it before doing
//! any work, so a malformed input never yields a partial result.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::config::Settings;
use crate::confusables::ConfusablesTable;
use crate::error::{Error, Result};
use crate::normalize::{self, NormalizationForm, NormalizationProvider, UnicodeNormalizer};
use crate::report::ScanReport;
use crate::scan;
use crate::skeleton;
use crate::text::TextInput;

static GLOBAL: Lazy<Engine> = Lazy::new(|| {
    let engine = Engine::new();
    tracing::debug!(
        entries = engine.table.len(),
        provider = engine.provider_name().unwrap_or("none"),
        "initialized default engine"
    );
    engine
});

/// A confusables table paired with an optional normalization backend.
/// Immutable once built; share it freely across threads.
#[derive(Clone)]
pub struct Engine {
    table: ConfusablesTable,
    provider: Option<Arc<dyn NormalizationProvider>>,
}

#[derive(Default)]
pub struct EngineBuilder {
    table: Option<ConfusablesTable>,
    provider: Option<Option<Arc<dyn NormalizationProvider>>>,
}

impl EngineBuilder {
    pub fn table(mut self, table: ConfusablesTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn provider(mut self, provider: impl NormalizationProvider + 'static) -> Self {
        let provider: Arc<dyn NormalizationProvider> = Arc::new(provider);
        self.provider = Some(Some(provider));
        self
    }

    /// Build without a normalization backend; `normalize` will fail with
    /// [`Error::UnavailableDependency`].
    pub fn without_provider(mut self) -> Self {
        self.provider = Some(None);
        self
    }

    pub fn build(self) -> Engine {
        let table = self
            .table
            .unwrap_or_else(|| ConfusablesTable::builtin().clone());
        let provider = match self.provider {
            Some(configured) => configured,
            None => Some(Arc::new(UnicodeNormalizer) as Arc<dyn NormalizationProvider>),
        };
        Engine { table, provider }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("table", &self.table)
            .field("provider", &self.provider_name())
            .finish()
    }
}

impl Engine {
    /// Built-in table with the `unicode-normalization` backend.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The process-wide default engine, created on first use.
    pub fn global() -> &'static Engine {
        &GLOBAL
    }

    pub fn table(&self) -> &ConfusablesTable {
        &self.table
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    /// Distinct confusable characters in `text`, each rendered as a string.
    pub fn contains_confusables<T: TextInput + ?Sized>(&self, text: &T) -> Result<BTreeSet<String>> {
        Ok(self.scan(text)?.into_iter().map(String::from).collect())
    }

    /// Distinct confusable code points in `text`.
    pub fn scan<T: TextInput + ?Sized>(&self, text: &T) -> Result<BTreeSet<char>> {
        let text = text.to_text()?;
        Ok(scan::scan(&self.table, &text))
    }

    /// Replace every confusable with its prototype. Not Unicode normalization.
    pub fn normalize_confusables<T: TextInput + ?Sized>(&self, text: &T) -> Result<String> {
        let text = text.to_text()?;
        Ok(skeleton::replace(&self.table, &text))
    }

    pub fn skeleton<T: TextInput + ?Sized>(&self, text: &T) -> Result<String> {
        self.normalize_confusables(text)
    }

    /// Whether `a` and `b` share a skeleton.
    pub fn are_confusable<A, B>(&self, a: &A, b: &B) -> Result<bool>
    where
        A: TextInput + ?Sized,
        B: TextInput + ?Sized,
    {
        let a = a.to_text()?;
        let b = b.to_text()?;
        Ok(skeleton::are_confusable(&self.table, &a, &b))
    }

    /// Apply Unicode normalization `form`, then optionally strip zero-width
    /// characters.
    pub fn normalize<T: TextInput + ?Sized>(
        &self,
        text: &T,
        form: NormalizationForm,
        strip_zero_width: bool,
    ) -> Result<String> {
        let text = text.to_text()?;
        let provider = self.require_provider()?;
        Ok(normalize::normalize_with(provider, &text, form, strip_zero_width))
    }

    /// NFKD normalization, kept for older callers.
    #[deprecated(note = "use `normalize(text, NormalizationForm::Nfkd, strip_zero_width)`")]
    pub fn normalize_compatibility_decomposed<T: TextInput + ?Sized>(
        &self,
        text: &T,
        strip_zero_width: bool,
    ) -> Result<String> {
        self.normalize(text, NormalizationForm::Nfkd, strip_zero_width)
    }

    pub fn report<T: TextInput + ?Sized>(&self, text: &T) -> Result<ScanReport> {
        let text = text.to_text()?;
        Ok(ScanReport::from_text(&self.table, &text))
    }

    /// Normalize per `settings` (if a form is set), then replace confusables.
    /// Zero-width stripping only happens as part of normalization.
    pub fn sanitize<T: TextInput + ?Sized>(&self, text: &T, settings: &Settings) -> Result<String> {
        let text = text.to_text()?;
        match settings.normalization {
            Some(form) => {
                let provider = self.require_provider()?;
                let normalized =
                    normalize::normalize_with(provider, &text, form, settings.strip_zero_width);
                Ok(skeleton::replace(&self.table, &normalized))
            }
            None => Ok(skeleton::replace(&self.table, &text)),
        }
    }

    fn require_provider(&self) -> Result<&dyn NormalizationProvider> {
        self.provider.as_deref().ok_or_else(|| {
            Error::UnavailableDependency(
                "no normalization provider configured for this engine".to_string(),
            )
        })
    }
}
