//! Confusables table: code point to prototype sequence.
//!
//! The built-in table is generated by `build.rs` from
//! `assets/data/confusables.txt`. Alternate tables use the same format and
//! the same validation, see [`ConfusablesTable::parse`].

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::data_format::{self, RawMapping};
use crate::error::Result;

// Include generated confusable table
mod generated {
    include!(concat!(env!("OUT_DIR"), "/confusables_gen.rs"));
}

pub use generated::{CONFUSABLE_COUNT, CONFUSABLE_DATA_VERSION};

static BUILTIN: Lazy<ConfusablesTable> = Lazy::new(|| {
    tracing::debug!(
        entries = CONFUSABLE_COUNT,
        version = CONFUSABLE_DATA_VERSION,
        "loaded built-in confusables table"
    );
    ConfusablesTable {
        entries: Entries::Builtin(generated::CONFUSABLE_TABLE),
        version: Some(Cow::Borrowed(CONFUSABLE_DATA_VERSION)),
    }
});

/// Canonical form of a single code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canonical<'a> {
    /// No mapping: the code point is its own canonical form.
    Identity(char),
    /// Prototype sequence of one or more code points.
    Mapped(&'a str),
}

impl<'a> Canonical<'a> {
    pub fn is_identity(&self) -> bool {
        matches!(self, Canonical::Identity(_))
    }

    /// Code points of the canonical sequence, in order.
    pub fn chars(self) -> impl Iterator<Item = char> + 'a {
        let (head, tail) = match self {
            Canonical::Identity(ch) => (Some(ch), ""),
            Canonical::Mapped(s) => (None, s),
        };
        head.into_iter().chain(tail.chars())
    }

    pub fn push_to(&self, out: &mut String) {
        match self {
            Canonical::Identity(ch) => out.push(*ch),
            Canonical::Mapped(s) => out.push_str(s),
        }
    }
}

impl fmt::Display for Canonical<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Canonical::Identity(ch) => write!(f, "{ch}"),
            Canonical::Mapped(s) => f.write_str(s),
        }
    }
}

#[derive(Clone)]
enum Entries {
    Builtin(&'static [(char, &'static str)]),
    Owned(Arc<[(char, Box<str>)]>),
}

/// Immutable confusables mapping, sorted by source code point.
///
/// Cloning is cheap; the entries are shared. Every target is chain-free: no
/// code point of a target is itself a source, so replacement is idempotent.
#[derive(Clone)]
pub struct ConfusablesTable {
    entries: Entries,
    version: Option<Cow<'static, str>>,
}

impl ConfusablesTable {
    /// The table compiled into this crate.
    pub fn builtin() -> &'static ConfusablesTable {
        &BUILTIN
    }

    /// Build a table from `confusables.txt` formatted data.
    pub fn parse(content: &str) -> Result<Self> {
        let entries = data_format::parse(content)?;
        let version = data_format::data_version(content).map(|v| Cow::Owned(v.to_string()));
        tracing::debug!(entries = entries.len(), "parsed confusables table");
        Ok(Self::from_resolved(entries, version))
    }

    /// Build a table from `(source, target)` pairs, with the same validation
    /// and chain resolution as [`ConfusablesTable::parse`].
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mappings = pairs
            .into_iter()
            .enumerate()
            .map(|(idx, (source, target))| RawMapping {
                line: idx + 1,
                source,
                target: target.into(),
            })
            .collect::<Vec<_>>();
        if let Some(empty) = mappings.iter().find(|m| m.target.is_empty()) {
            return Err(data_format::FormatError::EmptyTarget { line: empty.line }.into());
        }
        let entries = data_format::resolve(mappings)?;
        Ok(Self::from_resolved(entries, None))
    }

    fn from_resolved(entries: Vec<(char, String)>, version: Option<Cow<'static, str>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(source, target)| (source, target.into_boxed_str()))
            .collect::<Arc<[_]>>();
        Self {
            entries: Entries::Owned(entries),
            version,
        }
    }

    /// Prototype for `ch`, or `None` when `ch` is not confusable.
    pub fn get(&self, ch: char) -> Option<&str> {
        match &self.entries {
            Entries::Builtin(entries) => entries
                .binary_search_by_key(&ch, |&(src, _)| src)
                .ok()
                .map(|idx| entries[idx].1),
            Entries::Owned(entries) => entries
                .binary_search_by_key(&ch, |(src, _)| *src)
                .ok()
                .map(|idx| &*entries[idx].1),
        }
    }

    /// Canonical form of `ch`; absent code points map to themselves.
    pub fn lookup(&self, ch: char) -> Canonical<'_> {
        match self.get(ch) {
            Some(target) => Canonical::Mapped(target),
            None => Canonical::Identity(ch),
        }
    }

    pub fn is_confusable(&self, ch: char) -> bool {
        self.get(ch).is_some()
    }

    pub fn len(&self) -> usize {
        match &self.entries {
            Entries::Builtin(entries) => entries.len(),
            Entries::Owned(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All mappings in source order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (char, &str)> + '_> {
        match &self.entries {
            Entries::Builtin(entries) => Box::new(entries.iter().map(|&(src, tgt)| (src, tgt))),
            Entries::Owned(entries) => Box::new(entries.iter().map(|(src, tgt)| (*src, &**tgt))),
        }
    }

    /// `# Version:` header of the data the table was built from.
    pub fn data_version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl fmt::Debug for ConfusablesTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfusablesTable")
            .field("len", &self.len())
            .field("version", &self.version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyrillic_a() {
        let table = ConfusablesTable::builtin();
        assert_eq!(table.get('\u{0430}'), Some("a"));
        assert_eq!(table.lookup('\u{0430}'), Canonical::Mapped("a"));
    }

    #[test]
    fn test_ascii_lookalikes() {
        let table = ConfusablesTable::builtin();
        assert_eq!(table.get('1'), Some("l"));
        assert_eq!(table.get('I'), Some("l"));
        assert_eq!(table.get('|'), Some("l"));
        assert_eq!(table.get('0'), Some("O"));
        assert_eq!(table.get('m'), Some("rn"));
        for ch in ['a', 'e', 'h', 'l', 'o', 'r', 'n', 'O', 'Z', ' '] {
            assert_eq!(table.lookup(ch), Canonical::Identity(ch));
        }
    }

    #[test]
    fn test_o_lookalikes_across_scripts() {
        let table = ConfusablesTable::builtin();
        for ch in [
            '\u{AB3D}', '\u{043E}', '\u{06BE}', '\u{03BF}', '\u{101D}', '\u{06F5}', '\u{03C3}',
            '\u{0647}', '\u{FF4F}', '\u{0E50}', '\u{0ED0}', '\u{1D560}', '\u{1042C}', '\u{05E1}',
            '\u{2C9F}', '\u{0966}',
        ] {
            assert_eq!(table.get(ch), Some("o"), "U+{:04X}", ch as u32);
        }
    }

    #[test]
    fn test_multi_code_point_target() {
        let table = ConfusablesTable::builtin();
        assert_eq!(table.get('\u{FB01}'), Some("fi"));
        assert_eq!(table.get('\u{2167}'), Some("Vlll"));
        let chars: Vec<char> = table.lookup('\u{2167}').chars().collect();
        assert_eq!(chars, vec!['V', 'l', 'l', 'l']);
    }

    #[test]
    fn test_identity_chars() {
        let chars: Vec<char> = Canonical::Identity('z').chars().collect();
        assert_eq!(chars, vec!['z']);
    }

    #[test]
    fn test_builtin_is_sorted_and_counted() {
        let table = ConfusablesTable::builtin();
        assert_eq!(table.len(), CONFUSABLE_COUNT);
        assert!(table.len() > 4000);
        let sources: Vec<char> = table.iter().map(|(src, _)| src).collect();
        assert!(sources.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(table.data_version(), Some(CONFUSABLE_DATA_VERSION));
    }

    #[test]
    fn test_builtin_targets_are_chain_free() {
        let table = ConfusablesTable::builtin();
        for (src, target) in table.iter() {
            assert!(!target.is_empty(), "U+{:04X} has an empty target", src as u32);
            for ch in target.chars() {
                assert!(
                    !table.is_confusable(ch),
                    "target of U+{:04X} contains mappable U+{:04X}",
                    src as u32,
                    ch as u32
                );
            }
        }
    }

    #[test]
    fn test_parse_alternate_table() {
        let table = ConfusablesTable::parse("# Version: test-1\n0430 ; 0061 ; MA\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('\u{0430}'), Some("a"));
        assert_eq!(table.get('\u{0435}'), None);
        assert_eq!(table.data_version(), Some("test-1"));
    }

    #[test]
    fn test_from_pairs_resolves_chains() {
        let table = ConfusablesTable::from_pairs([('\u{1D6A8}', "\u{0391}"), ('\u{0391}', "A")])
            .unwrap();
        assert_eq!(table.get('\u{1D6A8}'), Some("A"));
        assert_eq!(table.data_version(), None);
    }

    #[test]
    fn test_from_pairs_rejects_empty_target() {
        assert!(ConfusablesTable::from_pairs([('\u{0430}', "")]).is_err());
    }
}
