//! Streaming cell dictionary writer
//!
//! [`ScelWriter::new`] writes the header, the reserved summary block and the
//! syllable table. Entries are then written one by one as lines arrive, and
//! [`ScelWriter::finish`] patches the totals and checksum into place. Nothing
//! but the running totals and example words is kept between entries.
//!
//! # Examples
//!
//! ```rust
//! use scel_formats::{ScelOptions, ScelWriter, SyllableTable, verify};
//! use std::io::Cursor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = SyllableTable::builtin()?;
//! let mut writer = ScelWriter::new(Vec::<u8>::new(), &table, ScelOptions::new("demo"))?;
//! writer.push_line("ni'hao 你好")?;
//! writer.push_line("'zai'jian 再见 ignored")?;
//! let (bytes, report) = writer.finish()?;
//!
//! assert_eq!(report.summary.word_count, 2);
//! let summary = verify(&mut Cursor::new(&bytes))?;
//! assert_eq!(summary.examples.as_str(), "你好   再见");
//! # Ok(())
//! # }
//! ```

use crate::checksum::{Checksum, ChecksumEngine};
use crate::entry::{DictionaryEntry, ExampleWords, RunningTotals, parse_line};
use crate::error::Result;
use crate::header::{
    CHECKSUM_REGION_OFFSET, HEADER_SIZE, ScelHeader, ScelSummary, SummaryText,
};
use crate::options::ScelOptions;
use crate::patcher::OffsetPatcher;
use crate::sink::OutputSink;
use crate::syllable::SyllableTable;
use crate::text::TextField;
use tracing::{debug, info, trace};

/// Outcome of a completed write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScelReport {
    /// The summary block as patched into the file
    pub summary: ScelSummary,
    /// The checksum as patched into the file
    pub checksum: Checksum,
    /// Session id written to the header
    pub session_id: String,
    /// Lines passed to [`ScelWriter::push_line`]
    pub lines_read: usize,
    /// Lines skipped as malformed
    pub lines_skipped: usize,
    /// Total file size
    pub file_size: u64,
}

/// Writes a cell dictionary to an [`OutputSink`]
#[derive(Debug)]
pub struct ScelWriter<'t, S: OutputSink> {
    sink: S,
    table: &'t SyllableTable,
    text: SummaryText,
    options: ScelOptions,
    session_id: String,
    totals: RunningTotals,
    examples: ExampleWords,
    checksum: ChecksumEngine,
    lines_read: usize,
    lines_skipped: usize,
}

impl<'t, S: OutputSink> ScelWriter<'t, S> {
    /// Write the header, the reserved summary block and the syllable table
    ///
    /// Header text is checked against its windows before anything is
    /// written.
    pub fn new(mut sink: S, table: &'t SyllableTable, options: ScelOptions) -> Result<Self> {
        let text = SummaryText::new(
            &options.title,
            &options.category,
            &options.description,
            options.overflow,
        )?;
        let session_id = options
            .session_id
            .clone()
            .unwrap_or_else(ScelHeader::random_session_id);
        let timestamp = options
            .timestamp
            .unwrap_or_else(ScelHeader::current_timestamp);
        let header = ScelHeader::new(
            TextField::new("session id", &session_id, options.overflow)?,
            timestamp,
        );

        sink.append(&header.to_bytes()?)?;
        sink.append(&vec![0u8; (CHECKSUM_REGION_OFFSET - HEADER_SIZE) as usize])?;
        debug!(
            "Wrote header with session id {} and timestamp {}",
            header.session_id.as_str(),
            timestamp
        );

        let mut checksum = ChecksumEngine::new();
        sink.append(table.as_bytes())?;
        checksum.update(table.as_bytes());
        debug!(
            "Wrote syllable table: {} syllables, {} bytes",
            table.len(),
            table.as_bytes().len()
        );

        Ok(Self {
            sink,
            table,
            text,
            options,
            session_id: header.session_id.as_str().to_string(),
            totals: RunningTotals::default(),
            examples: ExampleWords::default(),
            checksum,
            lines_read: 0,
            lines_skipped: 0,
        })
    }

    /// Parse and write one input line
    ///
    /// Returns `false` if the line was skipped as malformed.
    pub fn push_line(&mut self, line: &str) -> Result<bool> {
        self.lines_read += 1;
        let Some(parsed) = parse_line(line) else {
            trace!("Skipping line {}: {:?}", self.lines_read, line);
            self.lines_skipped += 1;
            return Ok(false);
        };

        let entry =
            DictionaryEntry::resolve(&parsed.syllables, parsed.word, self.table, self.lines_read)?;
        self.push_entry(&entry)?;
        Ok(true)
    }

    /// Write one resolved entry
    pub fn push_entry(&mut self, entry: &DictionaryEntry) -> Result<()> {
        let encoded = entry.encode()?;
        let mut totals = self.totals;
        totals.record(&encoded)?;

        self.sink.append(&encoded.code)?;
        self.sink.append(&encoded.word)?;
        self.checksum.update(&encoded.code);
        self.checksum.update(&encoded.word);

        self.totals = totals;
        self.examples.offer(&entry.word);
        trace!("Wrote entry {:?} -> {}", entry.code, entry.word);
        Ok(())
    }

    /// Totals so far
    pub fn totals(&self) -> RunningTotals {
        self.totals
    }

    /// Patch the summary and checksum, then release the sink
    pub fn finish(mut self) -> Result<(S::Output, ScelReport)> {
        let summary = ScelSummary {
            code_count: self.totals.code_count,
            word_count: self.totals.word_count,
            code_bytes: self.totals.code_bytes,
            word_bytes: self.totals.word_bytes,
            title: self.text.title,
            category: self.text.category,
            description: self.text.description,
            examples: TextField::new("examples", &self.examples.joined(), self.options.overflow)?,
        };
        let checksum = self.checksum.finalize();
        OffsetPatcher::patch(&mut self.sink, &summary, &checksum)?;

        let file_size = self.sink.position();
        let output = self.sink.finish()?;

        info!(
            "Wrote {} entries ({} lines read, {} skipped), {} bytes",
            summary.word_count, self.lines_read, self.lines_skipped, file_size
        );

        Ok((
            output,
            ScelReport {
                summary,
                checksum,
                session_id: self.session_id,
                lines_read: self.lines_read,
                lines_skipped: self.lines_skipped,
                file_size,
            },
        ))
    }
}
