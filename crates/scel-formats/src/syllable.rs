//! Pinyin syllable table
//!
//! The syllable table is the first thing in the checksum region. It is stored
//! verbatim from a compiled-in asset with this layout (little-endian):
//!
//! ```text
//! u32                 syllable count
//! repeated count times:
//!   u16               index (equal to the record position)
//!   u16               byte length of the text
//!   [u8; length]      UTF-16LE syllable
//! ```
//!
//! Entry records refer to syllables by index, so the order of the asset is
//! part of the file format and must never change.

use crate::error::{Result, ScelError};
use crate::text::decode_utf16le;
use binrw::{BinRead, BinWrite, binrw, io::Cursor};
use std::collections::HashMap;

/// Syllable table asset shipped with the crate
pub const PINYIN_TABLE: &[u8] = include_bytes!("../assets/pinyin.bin");

/// One record of the syllable table
#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct SyllableRecord {
    /// Position of the syllable in the table
    pub index: u16,
    #[br(temp)]
    #[bw(calc = text.len() as u16)]
    length: u16,
    /// UTF-16LE syllable text
    #[br(count = length)]
    pub text: Vec<u8>,
}

/// Raw syllable table as stored in the file
#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
#[brw(little)]
struct RawSyllableTable {
    #[br(temp)]
    #[bw(calc = records.len() as u32)]
    count: u32,
    #[br(count = count)]
    records: Vec<SyllableRecord>,
}

/// Immutable, ordered catalog of pinyin syllables
#[derive(Debug, Clone)]
pub struct SyllableTable {
    blob: Vec<u8>,
    syllables: Vec<String>,
    by_name: HashMap<String, u16>,
}

impl SyllableTable {
    /// Load the table shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::parse(PINYIN_TABLE)
    }

    /// Parse a table blob
    ///
    /// Every record must carry its own position as index; a blob that does
    /// not is rejected rather than silently renumbered.
    pub fn parse(blob: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(blob);
        let raw = RawSyllableTable::read(&mut cursor)?;
        if cursor.position() != blob.len() as u64 {
            return Err(ScelError::InvalidSyllableTable(format!(
                "{} trailing bytes after {} records",
                blob.len() as u64 - cursor.position(),
                raw.records.len()
            )));
        }

        let mut syllables = Vec::with_capacity(raw.records.len());
        let mut by_name = HashMap::with_capacity(raw.records.len());
        for (position, record) in raw.records.into_iter().enumerate() {
            if usize::from(record.index) != position {
                return Err(ScelError::InvalidSyllableTable(format!(
                    "record {position} has index {}",
                    record.index
                )));
            }
            let text = decode_utf16le(&record.text)?;
            if by_name.insert(text.clone(), record.index).is_some() {
                return Err(ScelError::InvalidSyllableTable(format!(
                    "duplicate syllable '{text}'"
                )));
            }
            syllables.push(text);
        }

        Ok(Self {
            blob: blob.to_vec(),
            syllables,
            by_name,
        })
    }

    /// Build a table from an ordered list of syllables
    pub fn from_syllables<I, S>(syllables: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        for (position, syllable) in syllables.into_iter().enumerate() {
            let index = u16::try_from(position).map_err(|_| ScelError::LimitExceeded {
                what: "syllable table holds at most 65536 syllables",
            })?;
            records.push(SyllableRecord {
                index,
                text: crate::text::encode_utf16le(syllable.as_ref())?,
            });
        }

        let mut blob = Cursor::new(Vec::new());
        RawSyllableTable { records }.write(&mut blob)?;
        Self::parse(&blob.into_inner())
    }

    /// Index of `syllable`
    ///
    /// A trailing tone number (`1` to `5`) is ignored, so `ni3` resolves to
    /// `ni`. The error keeps the syllable as written. `line` is only used for
    /// the error report.
    pub fn lookup(&self, syllable: &str, line: usize) -> Result<u16> {
        self.by_name
            .get(strip_tone(syllable))
            .copied()
            .ok_or_else(|| ScelError::UnknownSyllable {
                syllable: syllable.to_string(),
                line,
            })
    }

    /// Syllable stored at `index`
    pub fn get(&self, index: u16) -> Option<&str> {
        self.syllables.get(usize::from(index)).map(String::as_str)
    }

    /// Number of syllables
    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }

    /// Serialized table, written verbatim at the start of the checksum region
    pub fn as_bytes(&self) -> &[u8] {
        &self.blob
    }
}

/// Drop one trailing tone number from a numbered pinyin syllable
pub fn strip_tone(syllable: &str) -> &str {
    syllable
        .strip_suffix(|c: char| matches!(c, '1'..='5'))
        .unwrap_or(syllable)
}
