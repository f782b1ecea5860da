//! YMO index construction.
//!
//! # Layout
//!
//! ```text
//! offset 0            u16 count
//! offset 2            count x { u32 hash, u16 offset }   directory, unsorted
//! offset 2 + 6*count  payloads, each = text bytes ++ 0x00 0x00
//! ```
//!
//! `offset` is absolute from the start of the blob. There is no collision
//! chain: two keys with the same hash share one slot and the later insertion
//! wins.

use std::collections::HashMap;

use crate::catalog::CatalogUnit;
use crate::encoding::{
    ByteOrder,
    TextEncoding,
    UnencodableChar,
};
use crate::error::{
    BuildError,
    CapacityError,
    MalformedOverrideRow,
};
use crate::hash::fnv1a_32;
use crate::key::compose_key;
use crate::overrides::{
    OverrideRecord,
    OverrideRow,
};

/// Size of the `count` header.
pub const HEADER_SIZE: usize = 2;

/// Size of one `{ u32 hash, u16 offset }` directory record.
pub const DIRECTORY_RECORD_SIZE: usize = 4 + 2;

/// Appended to every payload.
pub const PAYLOAD_TERMINATOR: [u8; 2] = [0, 0];

/// One slot of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub hash: u32,
    /// Key that produced `hash`; kept for diagnostics, never serialized.
    pub key: String,
    /// Encoded translation followed by [`PAYLOAD_TERMINATOR`].
    pub payload: Vec<u8>,
}

/// What [`IndexBuilder::insert`] did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// New slot appended to the directory.
    Added,
    /// Same key inserted again, payload replaced.
    Replaced,
    /// A different key with the same hash was overwritten.
    Collision,
}

/// Counters collected while ingesting catalog units and override rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub catalog_included: usize,
    pub catalog_skipped: usize,
    pub overrides_applied: usize,
    /// Slots whose payload was replaced by the same key.
    pub replaced: usize,
    /// Slots overwritten by a different key with an equal hash.
    pub collisions: usize,
    pub malformed_overrides: Vec<MalformedOverrideRow>,
}

/// Accumulates entries keyed by hash and writes the YMO blob.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    /// Encoding for keys and payloads
    encoding: TextEncoding,
    /// Log a warning when two distinct keys share a hash
    warn_on_collision: bool,
    /// Slots in directory order
    entries: Vec<Entry>,
    /// hash -> index into `entries`
    positions: HashMap<u32, usize>,
    /// Ingest counters
    report: IngestReport,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new(TextEncoding::default())
    }
}

impl IndexBuilder {
    #[must_use]
    pub fn new(encoding: TextEncoding) -> Self {
        Self {
            encoding,
            warn_on_collision: true,
            entries: Vec::new(),
            positions: HashMap::new(),
            report: IngestReport::default(),
        }
    }

    /// Enables or disables the collision warning.
    #[must_use]
    pub const fn with_collision_warning(mut self, enabled: bool) -> Self {
        self.warn_on_collision = enabled;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slots in the order they will be written.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, hash: u32) -> Option<&Entry> {
        self.positions.get(&hash).and_then(|&index| self.entries.get(index))
    }

    #[must_use]
    pub const fn report(&self) -> &IngestReport {
        &self.report
    }

    /// Stores `translated_text` under the hash of `key`.
    ///
    /// An existing slot with the same hash keeps its directory position and
    /// has its payload replaced.
    ///
    /// # Errors
    /// [`BuildError::Encoding`] when `key` or `translated_text` is not
    /// representable in the builder's encoding, or when `translated_text`
    /// contains U+0000 (readers stop at the first NUL).
    pub fn insert(&mut self, key: &str, translated_text: &str) -> Result<Insertion, BuildError> {
        let hash = fnv1a_32(&self.encode(key)?);

        if let Some(index) = translated_text.find('\0') {
            return Err(BuildError::Encoding {
                text: translated_text.to_string(),
                encoding: self.encoding,
                cause: UnencodableChar { character: '\0', index },
            });
        }

        let mut payload = self.encode(translated_text)?.into_owned();
        payload.extend_from_slice(&PAYLOAD_TERMINATOR);

        let Some(existing) = self.positions.get(&hash).and_then(|&i| self.entries.get_mut(i))
        else {
            self.positions.insert(hash, self.entries.len());
            self.entries.push(Entry { hash, key: key.to_string(), payload });
            return Ok(Insertion::Added);
        };

        let insertion = if existing.key == key {
            self.report.replaced += 1;
            tracing::debug!("Replacing translation for {:?}", key);
            Insertion::Replaced
        } else {
            self.report.collisions += 1;
            if self.warn_on_collision {
                tracing::warn!(
                    "Hash collision {:#010x}: {:?} overwrites {:?}",
                    hash,
                    key,
                    existing.key
                );
            }
            Insertion::Collision
        };

        existing.key = key.to_string();
        existing.payload = payload;
        Ok(insertion)
    }

    /// Inserts every unit that passes [`CatalogUnit::is_included`], keyed by
    /// its context-composed source text.
    ///
    /// # Errors
    /// Stops at the first [`BuildError::Encoding`].
    pub fn ingest_catalog(
        &mut self,
        units: &[CatalogUnit],
        include_fuzzy: bool,
    ) -> Result<(), BuildError> {
        for unit in units {
            if !unit.is_included(include_fuzzy) {
                self.report.catalog_skipped += 1;
                continue;
            }

            let key = compose_key(&unit.source_text, &unit.context);
            self.insert(&key, &unit.target_text)?;
            self.report.catalog_included += 1;
        }

        tracing::debug!(
            "Catalog ingested: {} included, {} skipped",
            self.report.catalog_included,
            self.report.catalog_skipped
        );
        Ok(())
    }

    /// Inserts override records on top of whatever is already present.
    ///
    /// Override sources are keyed without context. Malformed records are
    /// logged, recorded in the report and skipped.
    ///
    /// # Errors
    /// Stops at the first [`BuildError::Encoding`].
    pub fn ingest_overrides(&mut self, records: &[OverrideRecord]) -> Result<(), BuildError> {
        for (index, record) in records.iter().enumerate() {
            match OverrideRow::from_record(index + 1, record) {
                Ok(row) => {
                    self.insert(&row.source, &row.target)?;
                    self.report.overrides_applied += 1;
                }
                Err(malformed) => {
                    tracing::warn!("Skipping override: {}", malformed);
                    self.report.malformed_overrides.push(malformed);
                }
            }
        }

        tracing::debug!(
            "Overrides ingested: {} applied, {} skipped",
            self.report.overrides_applied,
            self.report.malformed_overrides.len()
        );
        Ok(())
    }

    /// Reorders the directory by ascending hash.
    ///
    /// Readers that binary-search the directory need this; readers that load
    /// the directory into a map accept either order.
    pub fn sort_by_hash(&mut self) {
        self.entries.sort_unstable_by_key(|entry| entry.hash);
        self.positions =
            self.entries.iter().enumerate().map(|(index, entry)| (entry.hash, index)).collect();
    }

    /// Writes the blob.
    ///
    /// # Errors
    /// [`CapacityError`] when the entry count or any payload offset does not
    /// fit in `u16`.
    pub fn serialize(&self, byte_order: ByteOrder) -> Result<Vec<u8>, CapacityError> {
        let count = self.entries.len();
        let count_field =
            u16::try_from(count).map_err(|_| CapacityError::TooManyEntries { count })?;

        let directory_end = HEADER_SIZE + count * DIRECTORY_RECORD_SIZE;
        let payload_len: usize = self.entries.iter().map(|entry| entry.payload.len()).sum();

        let mut out = Vec::with_capacity(directory_end + payload_len);
        out.extend_from_slice(&byte_order.u16_bytes(count_field));

        let mut offset = directory_end;
        for (index, entry) in self.entries.iter().enumerate() {
            let offset_field =
                u16::try_from(offset).map_err(|_| CapacityError::OffsetOverflow { index, offset })?;
            out.extend_from_slice(&byte_order.u32_bytes(entry.hash));
            out.extend_from_slice(&byte_order.u16_bytes(offset_field));
            offset += entry.payload.len();
        }

        for entry in &self.entries {
            out.extend_from_slice(&entry.payload);
        }

        tracing::debug!("Serialized {} entries into {} bytes", count, out.len());
        Ok(out)
    }

    /// Encodes `text`, mapping failures to [`BuildError::Encoding`].
    fn encode<'a>(&self, text: &'a str) -> Result<std::borrow::Cow<'a, [u8]>, BuildError> {
        self.encoding.encode(text).map_err(|cause| BuildError::Encoding {
            text: text.to_string(),
            encoding: self.encoding,
            cause,
        })
    }
}
