//! Text encodings and integer byte order used when writing a YMO blob.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Encoding applied to both lookup keys (before hashing) and payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1, each code point U+0000..=U+00FF is one byte.
    Latin1,
}

/// The encoding name is not one of the supported encodings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported encoding '{0}'. Supported: utf-8, ascii, latin-1")]
pub struct UnknownEncoding(pub String);

/// A character that cannot be represented in the target encoding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("character {character:?} at byte {index} is not representable")]
pub struct UnencodableChar {
    pub character: char,
    /// Byte index of the character in the original `&str`.
    pub index: usize,
}

impl TextEncoding {
    /// Canonical name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin-1",
        }
    }

    /// Encodes `text`, borrowing when the bytes are identical to the UTF-8 form.
    pub fn encode(self, text: &str) -> Result<Cow<'_, [u8]>, UnencodableChar> {
        let limit = match self {
            Self::Utf8 => return Ok(Cow::Borrowed(text.as_bytes())),
            Self::Ascii => 0x7f,
            Self::Latin1 => 0xff,
        };

        if text.is_ascii() {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }

        let mut out = Vec::with_capacity(text.len());
        for (index, character) in text.char_indices() {
            match u8::try_from(u32::from(character)) {
                Ok(byte) if byte <= limit => out.push(byte),
                _ => return Err(UnencodableChar { character, index }),
            }
        }
        Ok(Cow::Owned(out))
    }

    /// Decodes bytes produced by [`TextEncoding::encode`].
    ///
    /// Invalid sequences are replaced with U+FFFD rather than failing; lookups
    /// at runtime must never abort on a damaged payload.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes),
            Self::Ascii => {
                if bytes.is_ascii() {
                    String::from_utf8_lossy(bytes)
                } else {
                    Cow::Owned(
                        bytes
                            .iter()
                            .map(|&b| if b.is_ascii() { char::from(b) } else { '\u{fffd}' })
                            .collect(),
                    )
                }
            }
            Self::Latin1 => {
                if bytes.is_ascii() {
                    String::from_utf8_lossy(bytes)
                } else {
                    Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())
                }
            }
        }
    }
}

impl FromStr for TextEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "utf8" => Ok(Self::Utf8),
            "ascii" | "usascii" => Ok(Self::Ascii),
            "latin1" | "iso88591" | "l1" => Ok(Self::Latin1),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte order of every integer field in the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Required by existing consumers.
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Serializes a `u16` field.
    #[must_use]
    pub const fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    /// Serializes a `u32` field.
    #[must_use]
    pub const fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    /// Reads a `u16` field.
    #[must_use]
    pub const fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    /// Reads a `u32` field.
    #[must_use]
    pub const fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }
}
