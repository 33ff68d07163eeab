use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::confusables::ConfusablesTable;
use crate::scan;

/// Overall outcome of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Clean,
    Confusable,
}

impl Status {
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Clean => 0,
            Status::Confusable => 1,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Clean => write!(f, "CLEAN"),
            Status::Confusable => write!(f, "CONFUSABLES_DETECTED"),
        }
    }
}

/// One distinct confusable character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub character: String,
    /// `U+XXXX` notation.
    pub code_point: String,
    pub replacement: String,
    pub count: usize,
    /// Code-point offset of the first occurrence.
    pub first_offset: usize,
}

/// Detection report for a piece of text, findings sorted by code point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub status: Status,
    pub findings: Vec<Finding>,
}

impl ScanReport {
    pub fn from_text(table: &ConfusablesTable, text: &str) -> Self {
        let mut by_char: BTreeMap<char, Finding> = BTreeMap::new();
        for occ in scan::occurrences(table, text) {
            by_char
                .entry(occ.character)
                .and_modify(|f| f.count += 1)
                .or_insert_with(|| Finding {
                    character: occ.character.to_string(),
                    code_point: format_code_point(occ.character),
                    replacement: occ.replacement.to_string(),
                    count: 1,
                    first_offset: occ.char_offset,
                });
        }

        let findings: Vec<Finding> = by_char.into_values().collect();
        let status = if findings.is_empty() {
            Status::Clean
        } else {
            Status::Confusable
        };
        Self { status, findings }
    }

    pub fn is_clean(&self) -> bool {
        self.status == Status::Clean
    }

    /// Confusable characters, in code point order.
    pub fn characters(&self) -> impl Iterator<Item = &str> {
        self.findings.iter().map(|f| f.character.as_str())
    }
}

/// Format a code point as `U+XXXX`.
pub fn format_code_point(ch: char) -> String {
    format!("U+{:04X}", ch as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report() {
        let report = ScanReport::from_text(ConfusablesTable::builtin(), "hello");
        assert!(report.is_clean());
        assert!(report.findings.is_empty());
        assert_eq!(report.status.exit_code(), 0);
    }

    #[test]
    fn test_counts_and_first_offset() {
        let text = "x\u{0430}\u{0397}\u{0430}";
        let report = ScanReport::from_text(ConfusablesTable::builtin(), text);
        assert_eq!(report.status, Status::Confusable);
        assert_eq!(report.status.exit_code(), 1);
        assert_eq!(report.findings.len(), 2);
        // Sorted by code point: U+0397 before U+0430.
        let eta = &report.findings[0];
        assert_eq!(eta.code_point, "U+0397");
        assert_eq!(eta.replacement, "H");
        assert_eq!(eta.count, 1);
        assert_eq!(eta.first_offset, 2);
        let a = &report.findings[1];
        assert_eq!(a.code_point, "U+0430");
        assert_eq!(a.count, 2);
        assert_eq!(a.first_offset, 1);
        let chars: Vec<&str> = report.characters().collect();
        assert_eq!(chars, vec!["\u{0397}", "\u{0430}"]);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&Status::Confusable).unwrap();
        assert_eq!(json, "\"confusable\"");
        assert_eq!(Status::Clean.to_string(), "CLEAN");
    }

    #[test]
    fn test_format_code_point_supplementary() {
        assert_eq!(format_code_point('\u{1D400}'), "U+1D400");
        assert_eq!(format_code_point('a'), "U+0061");
    }
}
