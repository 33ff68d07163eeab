//! Confusable replacement ("skeleton") and skeleton-based comparison.
//!
//! This is not Unicode normalization: only the confusables table is
//! consulted, composition and decomposition rules are never applied.

use crate::confusables::ConfusablesTable;

/// Replace every confusable code point with its prototype, keeping order.
/// Idempotent because table targets are chain-free.
pub fn replace(table: &ConfusablesTable, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        table.lookup(ch).push_to(&mut out);
    }
    out
}

/// Skeleton of `text`: the string used for confusable-aware equality.
pub fn skeleton(table: &ConfusablesTable, text: &str) -> String {
    replace(table, text)
}

/// Check if two strings are confusable (their skeletons match).
///
/// Both expansions are walked lazily; no skeleton string is built.
pub fn are_confusable(table: &ConfusablesTable, a: &str, b: &str) -> bool {
    a == b || expand(table, a).eq(expand(table, b))
}

fn expand<'a>(table: &'a ConfusablesTable, text: &'a str) -> impl Iterator<Item = char> + 'a {
    text.chars().flat_map(move |ch| table.lookup(ch).chars())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static ConfusablesTable {
        ConfusablesTable::builtin()
    }

    #[test]
    fn test_skeleton() {
        // Cyrillic "а" looks like Latin "a"
        assert_eq!(skeleton(table(), "\u{0430}"), "a");
    }

    #[test]
    fn test_hello_world() {
        assert_eq!(
            replace(table(), "\u{0397}ello W\u{03BF}rld!"),
            "Hello World!"
        );
    }

    #[test]
    fn test_cyrillic_inside_word() {
        assert_eq!(replace(table(), "p\u{0430}p"), "pap");
    }

    #[test]
    fn test_multi_code_point_expansion() {
        assert_eq!(replace(table(), "\u{FB01}le \u{2167}"), "file Vlll");
    }

    #[test]
    fn test_non_confusables_pass_through() {
        let text = "caf\u{E9} \u{4E2D}\u{1F600} plain";
        assert_eq!(replace(table(), text), text);
    }

    #[test]
    fn test_idempotent() {
        let once = replace(table(), "\u{1D40F}\u{0430}y\u{03C1}\u{0430}l \u{FF21}\u{2013}1");
        assert_eq!(replace(table(), &once), once);
    }

    #[test]
    fn test_confusable_domain() {
        // "gіthub.com" with Cyrillic і
        assert!(are_confusable(table(), "g\u{0456}thub.com", "github.com"));
        assert!(!are_confusable(table(), "gitlab.com", "github.com"));
    }

    #[test]
    fn test_identical_strings_are_confusable() {
        assert!(are_confusable(table(), "same", "same"));
        assert!(are_confusable(table(), "", ""));
    }

    #[test]
    fn test_ligature_matches_expansion() {
        assert!(are_confusable(table(), "\u{FB01}le", "file"));
    }

    #[test]
    fn test_comparison_agrees_with_skeletons() {
        let pairs = [
            ("\u{2167}", "Vlll"),
            ("\u{2167}", "Vll"),
            ("modern", "rnodern"),
            ("rn", "m"),
            ("\u{FB01}", "f"),
            ("c\u{1D7D1}p\u{03C3}", "c3po"),
        ];
        for (a, b) in pairs {
            assert_eq!(
                are_confusable(table(), a, b),
                skeleton(table(), a) == skeleton(table(), b),
                "{a:?} vs {b:?}"
            );
        }
        assert!(are_confusable(table(), "rn", "m"));
        assert!(!are_confusable(table(), "\u{2167}", "Vll"));
    }
}
