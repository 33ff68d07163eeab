//! Confusable detection. Operates on the text as given, without normalizing
//! it first: the point is to flag what was actually typed.

use std::collections::BTreeSet;

use crate::confusables::ConfusablesTable;

/// A single confusable code point found in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'t> {
    pub character: char,
    /// Byte offset into the scanned `&str`.
    pub byte_offset: usize,
    /// Code-point offset into the scanned `&str`.
    pub char_offset: usize,
    pub replacement: &'t str,
}

/// Distinct confusable code points in `text`.
pub fn scan(table: &ConfusablesTable, text: &str) -> BTreeSet<char> {
    text.chars().filter(|&ch| table.is_confusable(ch)).collect()
}

/// Whether `text` contains at least one confusable code point.
pub fn contains_any(table: &ConfusablesTable, text: &str) -> bool {
    text.chars().any(|ch| table.is_confusable(ch))
}

/// Every confusable occurrence in `text`, in order.
pub fn occurrences<'a>(
    table: &'a ConfusablesTable,
    text: &'a str,
) -> impl Iterator<Item = Occurrence<'a>> + 'a {
    text.char_indices()
        .enumerate()
        .filter_map(move |(char_offset, (byte_offset, ch))| {
            table.get(ch).map(|replacement| Occurrence {
                character: ch,
                byte_offset,
                char_offset,
                replacement,
            })
        })
}
