//! Input boundary: every engine entry point accepts any [`TextInput`] and
//! validates it before doing work.
//!
//! `str` is well formed by construction. Raw UTF-8 bytes and UTF-16 code units
//! are checked here so that invalid sequences and unpaired surrogates surface
//! as [`Error::MalformedText`] instead of being repaired.

use std::borrow::Cow;

use crate::error::{Encoding, Error, Result};

/// Something that can be viewed as well-formed text.
pub trait TextInput {
    fn to_text(&self) -> Result<Cow<'_, str>>;
}

impl TextInput for str {
    fn to_text(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl TextInput for String {
    fn to_text(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self.as_str()))
    }
}

impl TextInput for [u8] {
    fn to_text(&self) -> Result<Cow<'_, str>> {
        std::str::from_utf8(self)
            .map(Cow::Borrowed)
            .map_err(|e| Error::MalformedText {
                encoding: Encoding::Utf8,
                offset: e.valid_up_to(),
                detail: match e.error_len() {
                    Some(len) => format!("invalid sequence of {len} byte(s)"),
                    None => "truncated sequence at end of input".to_string(),
                },
            })
    }
}

impl TextInput for Vec<u8> {
    fn to_text(&self) -> Result<Cow<'_, str>> {
        self.as_slice().to_text()
    }
}

impl TextInput for [u16] {
    fn to_text(&self) -> Result<Cow<'_, str>> {
        let mut out = String::with_capacity(self.len());
        let mut offset = 0;
        for unit in char::decode_utf16(self.iter().copied()) {
            match unit {
                Ok(ch) => {
                    out.push(ch);
                    offset += ch.len_utf16();
                }
                Err(e) => {
                    return Err(Error::MalformedText {
                        encoding: Encoding::Utf16,
                        offset,
                        detail: format!("unpaired surrogate 0x{:04X}", e.unpaired_surrogate()),
                    });
                }
            }
        }
        Ok(Cow::Owned(out))
    }
}

impl TextInput for Vec<u16> {
    fn to_text(&self) -> Result<Cow<'_, str>> {
        self.as_slice().to_text()
    }
}
