//! Reading a cell dictionary back for verification
//!
//! Only what this crate writes is supported: the header and summary, the
//! syllable table and entry records.

use crate::checksum::Checksum;
use crate::error::{Result, ScelError};
use crate::header::{CHECKSUM_REGION_OFFSET, ScelHeader, ScelSummary};
use crate::syllable::SyllableTable;
use crate::text::decode_utf16le;
use binrw::{BinRead, binread};
use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

/// Read and validate the header and summary block
pub fn read_header<R: Read + Seek>(reader: &mut R) -> Result<(ScelHeader, ScelSummary)> {
    reader.seek(SeekFrom::Start(0))?;
    let header = ScelHeader::read(reader)?;
    header.validate()?;
    let summary = ScelSummary::read(reader)?;
    Ok((header, summary))
}

/// Recompute the checksum and compare it with the stored one
///
/// Returns the summary block on success.
pub fn verify<R: Read + Seek>(reader: &mut R) -> Result<ScelSummary> {
    let (header, summary) = read_header(reader)?;

    reader.seek(SeekFrom::Start(CHECKSUM_REGION_OFFSET))?;
    let actual = Checksum::compute(reader)?;
    if actual != header.checksum {
        return Err(ScelError::ChecksumMismatch {
            expected: header.checksum.to_hex(),
            actual: actual.to_hex(),
        });
    }

    debug!("Checksum {} verified", actual);
    Ok(summary)
}

/// Entry record as stored after the syllable table
#[binread]
#[derive(Debug, Clone, PartialEq, Eq)]
#[br(little)]
struct RawCodeGroup {
    #[br(temp)]
    word_count: u16,
    #[br(temp)]
    code_bytes: u16,
    #[br(count = code_bytes / 2)]
    code: Vec<u16>,
    #[br(count = word_count)]
    words: Vec<RawWord>,
}

#[binread]
#[derive(Debug, Clone, PartialEq, Eq)]
#[br(little)]
struct RawWord {
    #[br(temp)]
    text_bytes: u16,
    #[br(count = text_bytes)]
    text: Vec<u8>,
    #[br(temp)]
    extension_bytes: u16,
    #[br(temp, count = extension_bytes)]
    extension: Vec<u8>,
}

/// One decoded entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScelEntry {
    /// Syllables of the code
    pub syllables: Vec<String>,
    /// Words sharing the code
    pub words: Vec<String>,
}

/// Decode every entry of a dictionary
///
/// The syllable table embedded in the file is used to name the syllables.
/// Counts read from the file are never used to preallocate, so a damaged
/// count ends in an I/O error at the end of the stream.
pub fn read_entries<R: Read + Seek>(reader: &mut R) -> Result<Vec<ScelEntry>> {
    let (_, summary) = read_header(reader)?;
    reader.seek(SeekFrom::Start(CHECKSUM_REGION_OFFSET))?;

    let mut table_blob = Vec::new();
    let count = u32::read_le(reader)?;
    table_blob.extend_from_slice(&count.to_le_bytes());
    for _ in 0..count {
        let index = u16::read_le(reader)?;
        let length = u16::read_le(reader)?;
        let mut text = vec![0u8; usize::from(length)];
        reader.read_exact(&mut text)?;
        table_blob.extend_from_slice(&index.to_le_bytes());
        table_blob.extend_from_slice(&length.to_le_bytes());
        table_blob.extend_from_slice(&text);
    }
    let table = SyllableTable::parse(&table_blob)?;

    let mut entries = Vec::new();
    for _ in 0..summary.code_count {
        let group = RawCodeGroup::read(reader)?;
        let syllables = group
            .code
            .iter()
            .map(|&index| {
                table.get(index).map(str::to_string).ok_or_else(|| {
                    ScelError::InvalidSyllableTable(format!("entry refers to index {index}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let words = group
            .words
            .iter()
            .map(|word| decode_utf16le(&word.text))
            .collect::<Result<Vec<_>>>()?;
        entries.push(ScelEntry { syllables, words });
    }

    Ok(entries)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::options::ScelOptions;
    use crate::writer::ScelWriter;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn build(lines: &[&str]) -> Vec<u8> {
        let table = SyllableTable::builtin().expect("Operation should succeed");
        let options = ScelOptions::new("reader").with_session_id("L1").with_timestamp(1);
        let mut writer =
            ScelWriter::new(Vec::<u8>::new(), &table, options).expect("Operation should succeed");
        for line in lines {
            writer.push_line(line).expect("Operation should succeed");
        }
        writer.finish().expect("Operation should succeed").0
    }

    #[test]
    fn test_verify_fresh_file() {
        let bytes = build(&["ni'hao 你好", "zhong'guo 中国"]);
        let summary = verify(&mut Cursor::new(&bytes)).expect("Operation should succeed");
        assert_eq!(summary.word_count, 2);
        assert_eq!(summary.title.as_str(), "reader");
    }

    #[test]
    fn test_verify_detects_corruption() {
        let mut bytes = build(&["ni'hao 你好"]);
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        assert!(matches!(
            verify(&mut Cursor::new(&bytes)),
            Err(ScelError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_header_fields_outside_region_do_not_affect_checksum() {
        let mut bytes = build(&["ni'hao 你好"]);
        // Session id and timestamp are outside the hashed region
        bytes[0x1C] = b'X';
        bytes[0x11C] ^= 0xFF;
        verify(&mut Cursor::new(&bytes)).expect("Operation should succeed");
    }

    #[test]
    fn test_verify_rejects_foreign_file() {
        let bytes = vec![0u8; 0x2000];
        assert!(matches!(
            verify(&mut Cursor::new(&bytes)),
            Err(ScelError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_read_entries_rejects_huge_entry_count() {
        let mut bytes = build(&["ni'hao 你好"]);
        bytes[0x120..0x124].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            read_entries(&mut Cursor::new(&bytes)),
            Err(ScelError::BinRw(_) | ScelError::Io(_))
        ));
    }

    #[test]
    fn test_read_entries_rejects_huge_syllable_count() {
        let mut bytes = build(&["ni'hao 你好"]);
        let offset = CHECKSUM_REGION_OFFSET as usize;
        bytes[offset..offset + 4].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(read_entries(&mut Cursor::new(&bytes)).is_err());
    }

    #[test]
    fn test_read_entries() {
        let bytes = build(&["ni'hao 你好", "skip", "'zhong'guo 中国 x"]);
        let entries = read_entries(&mut Cursor::new(&bytes)).expect("Operation should succeed");
        assert_eq!(
            entries,
            vec![
                ScelEntry {
                    syllables: vec!["ni".to_string(), "hao".to_string()],
                    words: vec!["你好".to_string()],
                },
                ScelEntry {
                    syllables: vec!["zhong".to_string(), "guo".to_string()],
                    words: vec!["中国".to_string()],
                },
            ]
        );
    }
}
