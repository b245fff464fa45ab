//! Byte-order-mark and heuristic encoding detection for source files.

mod decode;
mod encode;

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{CfmlLintError, Result};

/// Ratio of unexpected control characters above which a decoding is rejected.
const MAX_CONTROL_RATIO: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    /// UTF-16 without a byte-order mark, read big-endian.
    Utf16,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
    Latin1,
    Windows1252,
    Ascii,
}

/// Probe order used when no byte-order mark is present.
pub const CANDIDATES: [Encoding; 7] = [
    Encoding::Utf8,
    Encoding::Utf16,
    Encoding::Utf16Be,
    Encoding::Utf16Le,
    Encoding::Latin1,
    Encoding::Windows1252,
    Encoding::Ascii,
];

impl Encoding {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf32Be => "UTF-32BE",
            Self::Utf32Le => "UTF-32LE",
            Self::Latin1 => "ISO-8859-1",
            Self::Windows1252 => "windows-1252",
            Self::Ascii => "US-ASCII",
        }
    }

    /// Looks up an encoding by name or common alias, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        let encoding = match normalized.as_str() {
            "utf-8" | "utf8" => Self::Utf8,
            "utf-16" | "utf16" => Self::Utf16,
            "utf-16be" => Self::Utf16Be,
            "utf-16le" => Self::Utf16Le,
            "utf-32" | "utf-32be" => Self::Utf32Be,
            "utf-32le" => Self::Utf32Le,
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Self::Latin1,
            "windows-1252" | "cp1252" => Self::Windows1252,
            "us-ascii" | "ascii" => Self::Ascii,
            _ => return None,
        };
        Some(encoding)
    }

    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => decode::utf8(bytes),
            Self::Utf16 | Self::Utf16Be => decode::utf16(bytes, true),
            Self::Utf16Le => decode::utf16(bytes, false),
            Self::Utf32Be => decode::utf32(bytes, true),
            Self::Utf32Le => decode::utf32(bytes, false),
            Self::Latin1 => decode::latin1(bytes),
            Self::Windows1252 => decode::windows1252(bytes),
            Self::Ascii => decode::ascii(bytes),
        }
    }
}

impl Encoding {
    /// The byte-order mark written ahead of text in this encoding, if it has one.
    #[must_use]
    pub const fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16 | Self::Utf16Be => &[0xFE, 0xFF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
            Self::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
            Self::Latin1 | Self::Windows1252 | Self::Ascii => &[],
        }
    }

    /// Encodes `text`; `None` when a character cannot be represented.
    #[must_use]
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            Self::Utf8 => Some(text.as_bytes().to_vec()),
            Self::Utf16 | Self::Utf16Be => Some(encode::utf16(text, true)),
            Self::Utf16Le => Some(encode::utf16(text, false)),
            Self::Utf32Be => Some(encode::utf32(text, true)),
            Self::Utf32Le => Some(encode::utf32(text, false)),
            Self::Latin1 => encode::latin1(text),
            Self::Windows1252 => encode::windows1252(text),
            Self::Ascii => encode::ascii(text),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the encoding of a decoded buffer was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Bom(Encoding),
    Probe(Encoding),
    Fallback,
}

impl Detection {
    /// Encodes `text` the way the source bytes were laid out, byte-order mark included.
    ///
    /// `None` for a fallback decoding, whose bytes cannot be reproduced, or when
    /// `text` has characters the encoding cannot hold.
    #[must_use]
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            Self::Bom(encoding) => {
                let mut bytes = encoding.bom().to_vec();
                bytes.extend(encoding.encode(text)?);
                Some(bytes)
            }
            Self::Probe(encoding) => encoding.encode(text),
            Self::Fallback => None,
        }
    }
}

/// Returns the encoding announced by a byte-order mark and the mark's length.
///
/// UTF-32LE is tested before UTF-16LE because its mark starts with `FF FE`.
#[must_use]
pub fn detect_bom(bytes: &[u8]) -> Option<(Encoding, usize)> {
    match bytes {
        [0xEF, 0xBB, 0xBF, ..] => Some((Encoding::Utf8, 3)),
        [0x00, 0x00, 0xFE, 0xFF, ..] => Some((Encoding::Utf32Be, 4)),
        [0xFF, 0xFE, 0x00, 0x00, ..] => Some((Encoding::Utf32Le, 4)),
        [0xFE, 0xFF, ..] => Some((Encoding::Utf16Be, 2)),
        [0xFF, 0xFE, ..] => Some((Encoding::Utf16Le, 2)),
        _ => None,
    }
}

/// Accepts a decoding with no replacement characters and few stray control characters.
#[must_use]
pub fn is_plausible(text: &str) -> bool {
    if text.contains(char::REPLACEMENT_CHARACTER) {
        return false;
    }
    let mut total = 0_usize;
    let mut controls = 0_usize;
    for c in text.chars() {
        total += 1;
        if c.is_control() && !matches!(c, '\t' | '\n' | '\r') {
            controls += 1;
        }
    }
    if total == 0 {
        return true;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = controls as f64 / total as f64;
    ratio < MAX_CONTROL_RATIO
}

/// Decides which encoding applies to `bytes` without decoding with the fallback.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> Detection {
    if let Some((encoding, _)) = detect_bom(bytes) {
        return Detection::Bom(encoding);
    }
    CANDIDATES
        .iter()
        .find(|candidate| is_plausible(&candidate.decode(bytes)))
        .map_or(Detection::Fallback, |candidate| Detection::Probe(*candidate))
}

/// Decodes raw file bytes. Never fails: when no candidate is plausible, the
/// `fallback` encoding (or lossy UTF-8 for an unknown name) is used.
#[must_use]
pub fn decode_bytes(bytes: &[u8], fallback: &str) -> (String, Detection) {
    if bytes.is_empty() {
        return (String::new(), Detection::Probe(Encoding::Utf8));
    }
    if let Some((encoding, bom_len)) = detect_bom(bytes) {
        return (encoding.decode(&bytes[bom_len..]), Detection::Bom(encoding));
    }
    for candidate in CANDIDATES {
        let text = candidate.decode(bytes);
        if is_plausible(&text) {
            return (text, Detection::Probe(candidate));
        }
    }
    let text = Encoding::from_name(fallback).map_or_else(
        || {
            tracing::warn!("Unknown fallback encoding '{fallback}', decoding as UTF-8");
            decode::utf8(bytes)
        },
        |encoding| encoding.decode(bytes),
    );
    (text, Detection::Fallback)
}

/// Reads files and turns their bytes into text.
#[derive(Debug, Clone)]
pub struct EncodingReader {
    fallback: String,
}

impl EncodingReader {
    #[must_use]
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }

    /// Reads `path` and decodes it.
    ///
    /// # Errors
    /// Returns `FileRead` if the file cannot be opened or read.
    pub fn read(&self, path: &Path) -> Result<String> {
        self.read_detected(path).map(|(text, _)| text)
    }

    /// Reads `path` and decodes it, keeping how its encoding was chosen.
    ///
    /// # Errors
    /// Returns `FileRead` if the file cannot be opened or read.
    pub fn read_detected(&self, path: &Path) -> Result<(String, Detection)> {
        let bytes = fs::read(path).map_err(|source| CfmlLintError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let (text, detection) = decode_bytes(&bytes, &self.fallback);
        tracing::trace!("Decoded {} as {detection:?}", path.display());
        Ok((text, detection))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
