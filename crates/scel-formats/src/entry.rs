//! Entry records and the running totals kept while writing them
//!
//! Each input line becomes one record in the content region:
//!
//! ```text
//! u16      words sharing this code, always 1
//! u16      code length in bytes (2 per syllable)
//! [u16]    syllable indices
//! u16      word length in bytes
//! [u8]     UTF-16LE word
//! [u8;12]  u16 extension length (10), u16 frequency, 8 reserved bytes
//! ```
//!
//! The header totals count the two length prefixes and their payloads, but
//! neither the leading word count nor the trailing extension.

use crate::error::{Result, ScelError};
use crate::syllable::SyllableTable;
use crate::text::encode_utf16le;

/// Number of words attached to each code block
pub const ENTRY_MARKER: [u8; 2] = 1u16.to_le_bytes();

/// Extension written after every word
pub const WORD_TRAILER: [u8; 12] = [0x0A, 0x00, 0x2D, 0x00, 0, 0, 0, 0, 0, 0, 0, 0];

/// Separator between syllables of a code
pub const SYLLABLE_SEPARATOR: char = '\'';

/// Number of example words kept for the summary
pub const EXAMPLE_WORD_LIMIT: usize = 6;

/// Separator used when joining example words
pub const EXAMPLE_WORD_SEPARATOR: &str = "   ";

/// One input line split into its code syllables and word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Syllables of the code, in order
    pub syllables: Vec<&'a str>,
    /// The word
    pub word: &'a str,
}

/// Split a line of the form `<code> <word> [ignored...]`
///
/// Fields are separated by single spaces. Returns `None` for lines with
/// fewer than two fields or with an empty code or word; such lines are
/// skipped without error. A single leading apostrophe on the code is
/// dropped before splitting it into syllables.
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let mut fields = line.split(' ');
    let code = fields.next()?;
    let word = fields.next()?;

    let code = code.strip_prefix(SYLLABLE_SEPARATOR).unwrap_or(code);
    if code.is_empty() || word.is_empty() {
        return None;
    }

    Some(ParsedLine {
        syllables: code.split(SYLLABLE_SEPARATOR).collect(),
        word,
    })
}

/// A dictionary entry resolved against a syllable table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Syllable indices
    pub code: Vec<u16>,
    /// Word text
    pub word: String,
}

impl DictionaryEntry {
    /// Resolve syllables to indices
    ///
    /// `line` is the 1-based input line used in error reports.
    pub fn resolve(
        syllables: &[&str],
        word: &str,
        table: &SyllableTable,
        line: usize,
    ) -> Result<Self> {
        let code = syllables
            .iter()
            .map(|syllable| table.lookup(syllable, line))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            code,
            word: word.to_string(),
        })
    }

    /// Serialize into its code block and word block
    pub fn encode(&self) -> Result<EncodedEntry> {
        let code_len = u16::try_from(self.code.len() * 2).map_err(|_| ScelError::LimitExceeded {
            what: "code longer than 32767 syllables",
        })?;

        let mut code = Vec::with_capacity(4 + self.code.len() * 2);
        code.extend_from_slice(&ENTRY_MARKER);
        code.extend_from_slice(&code_len.to_le_bytes());
        for index in &self.code {
            code.extend_from_slice(&index.to_le_bytes());
        }

        let text = encode_utf16le(&self.word)?;
        let word_len = u16::try_from(text.len()).map_err(|_| {
            ScelError::TextEncoding(format!(
                "word of {} bytes does not fit a 16-bit length",
                text.len()
            ))
        })?;

        let mut word = Vec::with_capacity(2 + text.len() + WORD_TRAILER.len());
        word.extend_from_slice(&word_len.to_le_bytes());
        word.extend_from_slice(&text);
        word.extend_from_slice(&WORD_TRAILER);

        Ok(EncodedEntry { code, word })
    }
}

/// Bytes of one encoded entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedEntry {
    /// Word count marker, code length and syllable indices
    pub code: Vec<u8>,
    /// Word length, word text and extension
    pub word: Vec<u8>,
}

impl EncodedEntry {
    /// Bytes this entry adds to the code total
    pub fn code_size(&self) -> u32 {
        (self.code.len() - ENTRY_MARKER.len()) as u32
    }

    /// Bytes this entry adds to the word total
    pub fn word_size(&self) -> u32 {
        (self.word.len() - WORD_TRAILER.len()) as u32
    }
}

/// Counts and sizes accumulated while writing entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunningTotals {
    /// Code blocks written
    pub code_count: u32,
    /// Bytes of code blocks, length prefixes included
    pub code_bytes: u32,
    /// Words written
    pub word_count: u32,
    /// Bytes of word blocks, length prefixes included
    pub word_bytes: u32,
}

impl RunningTotals {
    /// Account for one written entry
    ///
    /// Totals are left unchanged if any of them would overflow.
    pub fn record(&mut self, entry: &EncodedEntry) -> Result<()> {
        let overflow = |what| ScelError::LimitExceeded { what };
        let code_count = self
            .code_count
            .checked_add(1)
            .ok_or_else(|| overflow("code count"))?;
        let code_bytes = self
            .code_bytes
            .checked_add(entry.code_size())
            .ok_or_else(|| overflow("code bytes"))?;
        let word_count = self
            .word_count
            .checked_add(1)
            .ok_or_else(|| overflow("word count"))?;
        let word_bytes = self
            .word_bytes
            .checked_add(entry.word_size())
            .ok_or_else(|| overflow("word bytes"))?;

        *self = Self {
            code_count,
            code_bytes,
            word_count,
            word_bytes,
        };
        Ok(())
    }
}

/// The first words written, in order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExampleWords {
    words: Vec<String>,
}

impl ExampleWords {
    /// Keep `word` if fewer than [`EXAMPLE_WORD_LIMIT`] are held
    pub fn offer(&mut self, word: &str) {
        if self.words.len() < EXAMPLE_WORD_LIMIT {
            self.words.push(word.to_string());
        }
    }

    /// Words kept so far
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Words joined by [`EXAMPLE_WORD_SEPARATOR`]
    pub fn joined(&self) -> String {
        self.words.join(EXAMPLE_WORD_SEPARATOR)
    }
}
