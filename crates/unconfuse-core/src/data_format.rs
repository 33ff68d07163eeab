//! Reader for the UTS #39 `confusables.txt` line format.
//!
//! ```text
//! 0430 ;	0061 ;	MA	# ( а → a ) CYRILLIC SMALL LETTER A → LATIN SMALL LETTER A
//! ```
//!
//! This file is compiled twice: by `build.rs` (through `#[path]`) to generate the
//! built-in table, and as a regular module for tables loaded at runtime. It must
//! only depend on `std` and `thiserror`.

use std::collections::BTreeMap;

/// Error raised while reading confusables data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("line {line}: invalid code point '{field}'")]
    InvalidCodePoint { line: usize, field: String },
    #[error("line {line}: expected 'source ; target' fields")]
    MissingField { line: usize },
    #[error("line {line}: empty target sequence")]
    EmptyTarget { line: usize },
    #[error("line {line}: U+{code_point:04X} is already mapped differently on line {first_line}")]
    ConflictingMapping {
        line: usize,
        first_line: usize,
        code_point: u32,
    },
    #[error("mapping cycle through U+{code_point:04X}")]
    Cycle { code_point: u32 },
}

/// One data line before chain resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMapping {
    pub line: usize,
    pub source: char,
    pub target: String,
}

/// Parse a single line. Blank and comment-only lines yield `Ok(None)`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<RawMapping>, FormatError> {
    let data = line.split('#').next().unwrap_or("").trim();
    if data.is_empty() {
        return Ok(None);
    }

    let mut fields = data.split(';').map(str::trim);
    let source = fields
        .next()
        .filter(|f| !f.is_empty())
        .ok_or(FormatError::MissingField { line: line_no })?;
    let target = fields
        .next()
        .ok_or(FormatError::MissingField { line: line_no })?;

    let source = parse_code_point(line_no, source)?;
    let target = target
        .split_whitespace()
        .map(|field| parse_code_point(line_no, field))
        .collect::<Result<String, _>>()?;
    if target.is_empty() {
        return Err(FormatError::EmptyTarget { line: line_no });
    }

    Ok(Some(RawMapping {
        line: line_no,
        source,
        target,
    }))
}

fn parse_code_point(line: usize, field: &str) -> Result<char, FormatError> {
    let valid_hex = !field.is_empty() && field.bytes().all(|b| b.is_ascii_hexdigit());
    valid_hex
        .then(|| u32::from_str_radix(field, 16).ok())
        .flatten()
        .and_then(char::from_u32)
        .ok_or_else(|| FormatError::InvalidCodePoint {
            line,
            field: field.to_string(),
        })
}

/// Upstream `confusables.txt` starts with a UTF-8 byte order mark.
fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{FEFF}').unwrap_or(content)
}

/// Value of the `# Version:` header line, if present.
pub fn data_version(content: &str) -> Option<&str> {
    strip_bom(content).lines().find_map(|line| {
        line.trim()
            .strip_prefix('#')
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix("Version:"))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    })
}

/// Parse a whole data file into a sorted, chain-free mapping list.
pub fn parse(content: &str) -> Result<Vec<(char, String)>, FormatError> {
    let mut mappings = Vec::new();
    for (idx, line) in strip_bom(content).lines().enumerate() {
        if let Some(mapping) = parse_line(idx + 1, line)? {
            mappings.push(mapping);
        }
    }
    resolve(mappings)
}

/// Validate mappings and resolve multi-hop chains to their final prototypes.
///
/// Identity mappings are dropped, duplicate sources must agree, and every
/// target character that is itself a source is replaced by its own canonical
/// form. Output is sorted by source, and no output target contains a source.
pub fn resolve(
    mappings: impl IntoIterator<Item = RawMapping>,
) -> Result<Vec<(char, String)>, FormatError> {
    let mut direct: BTreeMap<char, (usize, String)> = BTreeMap::new();
    for mapping in mappings {
        if mapping.target.chars().eq(std::iter::once(mapping.source)) {
            continue;
        }
        if let Some((first_line, existing)) = direct.get(&mapping.source) {
            if *existing != mapping.target {
                return Err(FormatError::ConflictingMapping {
                    line: mapping.line,
                    first_line: *first_line,
                    code_point: mapping.source as u32,
                });
            }
            continue;
        }
        direct.insert(mapping.source, (mapping.line, mapping.target));
    }

    let mut resolved = BTreeMap::new();
    let mut visiting = Vec::new();
    for &source in direct.keys() {
        expand(source, &direct, &mut resolved, &mut visiting)?;
    }
    Ok(resolved.into_iter().collect())
}

fn expand(
    ch: char,
    direct: &BTreeMap<char, (usize, String)>,
    resolved: &mut BTreeMap<char, String>,
    visiting: &mut Vec<char>,
) -> Result<String, FormatError> {
    if let Some(done) = resolved.get(&ch) {
        return Ok(done.clone());
    }
    let Some((_, target)) = direct.get(&ch) else {
        return Ok(ch.to_string());
    };
    if visiting.contains(&ch) {
        return Err(FormatError::Cycle {
            code_point: ch as u32,
        });
    }

    visiting.push(ch);
    let mut out = String::with_capacity(target.len());
    for next in target.chars() {
        out.push_str(&expand(next, direct, resolved, visiting)?);
    }
    visiting.pop();

    resolved.insert(ch, out.clone());
    Ok(out)
}
