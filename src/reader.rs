//! Runtime lookup over a serialized YMO blob.
//!
//! The directory is loaded into a hash map once; payloads are borrowed from
//! the blob and never copied.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::builder::{
    DIRECTORY_RECORD_SIZE,
    HEADER_SIZE,
};
use crate::encoding::{
    ByteOrder,
    TextEncoding,
};
use crate::error::ReadError;
use crate::hash::fnv1a_32;
use crate::key::compose_key;

/// A parsed YMO blob.
#[derive(Debug, Clone)]
pub struct YmoIndex<'a> {
    /// Encoding used for keys and payloads
    encoding: TextEncoding,
    /// hash -> payload bytes without terminator
    table: HashMap<u32, &'a [u8]>,
}

impl<'a> YmoIndex<'a> {
    /// Parses a little-endian UTF-8 blob.
    ///
    /// # Errors
    /// [`ReadError`] when the blob does not follow the layout.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, ReadError> {
        Self::parse_with(bytes, ByteOrder::Little, TextEncoding::Utf8)
    }

    /// Parses a blob written with the given byte order and encoding.
    ///
    /// # Errors
    /// [`ReadError`] when the blob does not follow the layout.
    pub fn parse_with(
        bytes: &'a [u8],
        byte_order: ByteOrder,
        encoding: TextEncoding,
    ) -> Result<Self, ReadError> {
        let len = bytes.len();
        let count_bytes = bytes
            .first_chunk::<HEADER_SIZE>()
            .ok_or(ReadError::Truncated { needed: HEADER_SIZE, len })?;
        let count = usize::from(byte_order.read_u16(*count_bytes));

        let directory_end = HEADER_SIZE + count * DIRECTORY_RECORD_SIZE;
        let directory = bytes
            .get(HEADER_SIZE..directory_end)
            .ok_or(ReadError::Truncated { needed: directory_end, len })?;

        let mut table = HashMap::with_capacity(count);
        for (index, record) in directory.chunks_exact(DIRECTORY_RECORD_SIZE).enumerate() {
            let Some((hash_bytes, rest)) = record.split_first_chunk::<4>() else {
                return Err(ReadError::Truncated { needed: directory_end, len });
            };
            let Some(offset_bytes) = rest.first_chunk::<2>() else {
                return Err(ReadError::Truncated { needed: directory_end, len });
            };

            let hash = byte_order.read_u32(*hash_bytes);
            let offset = usize::from(byte_order.read_u16(*offset_bytes));

            let tail =
                bytes.get(offset..).ok_or(ReadError::OffsetOutOfBounds { index, offset, len })?;
            let end = tail
                .iter()
                .position(|&b| b == 0)
                .ok_or(ReadError::UnterminatedPayload { offset })?;
            let payload = tail.get(..end).ok_or(ReadError::UnterminatedPayload { offset })?;

            // First record wins, matching the runtime loader.
            table.entry(hash).or_insert(payload);
        }

        tracing::debug!("Loaded {} translations", table.len());
        Ok(Self { encoding, table })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Raw payload for a precomputed key hash.
    #[must_use]
    pub fn lookup_hash(&self, hash: u32) -> Option<&'a [u8]> {
        self.table.get(&hash).copied()
    }

    /// Translation of `source` without context.
    #[must_use]
    pub fn lookup(&self, source: &str) -> Option<Cow<'a, str>> {
        self.lookup_with_context(source, "")
    }

    /// Translation of `source` under `context` (empty for none).
    ///
    /// A key that cannot be encoded has no translation.
    #[must_use]
    pub fn lookup_with_context(&self, source: &str, context: &str) -> Option<Cow<'a, str>> {
        let key = compose_key(source, context);
        let encoded = self.encoding.encode(&key).ok()?;
        let payload = self.lookup_hash(fnv1a_32(&encoded))?;
        Some(self.encoding.decode(payload))
    }

    /// Translates `source`, falling back to the source text itself.
    ///
    /// Strings shaped like `Title: detail` with no translation of their own
    /// get the title translated separately; the text after the first colon is
    /// appended verbatim.
    #[must_use]
    pub fn translate<'s>(&'s self, source: &'s str) -> Cow<'s, str> {
        if let Some(text) = self.lookup(source)
            && text != source
        {
            return text;
        }

        if let Some((title, rest)) = source.split_once(':')
            && !title.is_empty()
            && let Some(translated_title) = self.lookup(title)
            && translated_title != title
        {
            return Cow::Owned(format!("{translated_title}: {rest}"));
        }

        Cow::Borrowed(source)
    }
}
