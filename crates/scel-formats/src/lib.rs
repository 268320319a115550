//! Writer and reader for the `.scel` pinyin cell dictionary format
//!
#![allow(clippy::cast_possible_truncation)] // Header fields are fixed-width
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::return_self_not_must_use)] // Builder patterns
//! A cell dictionary is a word list for a pinyin input method. It consists
//! of a fixed header, a syllable table, and one record per word mapping a
//! sequence of syllable indices to the word's text. The header carries
//! running totals and an MD5 checksum of everything after it, so the file
//! is written in two passes: content first, then the header is patched.
//!
//! # Layout
//!
//! - **Header** (0x000-0x120): magic values, checksum, session id, timestamp
//! - **Summary** (0x120-0x1540): totals, title, category, description,
//!   example words
//! - **Syllable table** (from 0x1540): ordered pinyin syllables
//! - **Entries**: code block and word block per input line
//!
//! # Example
//!
//! ```rust
//! use scel_formats::{ScelOptions, ScelWriter, SyllableTable, read_entries};
//! use std::io::Cursor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = SyllableTable::builtin()?;
//! let mut writer = ScelWriter::new(Vec::<u8>::new(), &table, ScelOptions::new("greetings"))?;
//! for line in ["ni'hao 你好", "zao'shang'hao 早上好"] {
//!     writer.push_line(line)?;
//! }
//! let (bytes, _report) = writer.finish()?;
//!
//! let entries = read_entries(&mut Cursor::new(&bytes))?;
//! assert_eq!(entries[1].syllables, ["zao", "shang", "hao"]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod checksum;
pub mod entry;
pub mod error;
pub mod header;
pub mod options;
pub mod patcher;
pub mod reader;
pub mod sink;
pub mod source;
pub mod syllable;
pub mod text;
pub mod writer;

pub use checksum::{Checksum, ChecksumEngine};
pub use entry::{DictionaryEntry, EncodedEntry, ExampleWords, ParsedLine, RunningTotals, parse_line};
pub use error::{Result, ScelError};
pub use header::{ScelHeader, ScelSummary};
pub use options::ScelOptions;
pub use patcher::OffsetPatcher;
pub use reader::{ScelEntry, read_entries, read_header, verify};
pub use sink::{BufferedSink, OutputSink, SeekSink};
pub use source::{LineSource, detect_encoding};
pub use syllable::{SyllableTable, strip_tone};
pub use text::TextOverflow;
pub use writer::{ScelReport, ScelWriter};

/// File extension of cell dictionaries
pub const SCEL_EXTENSION: &str = "scel";
