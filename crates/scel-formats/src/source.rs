//! Decoding word lists into UTF-8 lines
//!
//! Word lists come in whatever encoding the tool that exported them used.
//! A byte order mark selects UTF-8 or UTF-16; without one the start of the
//! input is checked for valid UTF-8, and GB18030 is assumed otherwise.
//! Decoding is streamed, so only the current chunk and line are held.

use crate::error::{Result, ScelError};
use encoding_rs::{DecoderResult, Encoding, GB18030, UTF_8};
use std::io::Read;
use tracing::debug;

/// Bytes inspected when guessing the encoding
const SNIFF_LEN: u64 = 64 * 1024;

/// Bytes read per decoding step
const CHUNK_LEN: usize = 8 * 1024;

/// Guess the encoding of a word list from its first bytes
pub fn detect_encoding(head: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(head) {
        return encoding;
    }
    match std::str::from_utf8(head) {
        Ok(_) => UTF_8,
        // A multi-byte sequence cut off by the sniff window is still UTF-8
        Err(e) if e.error_len().is_none() => UTF_8,
        Err(_) => GB18030,
    }
}

/// Iterator over the decoded lines of a word list
///
/// Line terminators (`\n` or `\r\n`) are removed. A malformed byte sequence
/// in the detected encoding ends iteration with
/// [`ScelError::TextEncoding`].
pub struct LineSource<R: Read> {
    reader: R,
    encoding: &'static Encoding,
    decoder: encoding_rs::Decoder,
    head: Option<Vec<u8>>,
    chunk: Vec<u8>,
    pending: String,
    /// Prefix of `pending` already known to hold no newline
    scanned: usize,
    eof: bool,
    failed: bool,
}

impl<R: Read> LineSource<R> {
    /// Sniff the encoding of `reader` and prepare to decode it
    pub fn new(mut reader: R) -> Result<Self> {
        let mut head = Vec::new();
        (&mut reader).take(SNIFF_LEN).read_to_end(&mut head)?;
        let encoding = detect_encoding(&head);
        debug!("Detected input encoding {}", encoding.name());

        Ok(Self {
            reader,
            encoding,
            decoder: encoding.new_decoder_with_bom_removal(),
            head: Some(head),
            chunk: vec![0u8; CHUNK_LEN],
            pending: String::new(),
            scanned: 0,
            eof: false,
            failed: false,
        })
    }

    /// The detected encoding
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    fn decode(&mut self, bytes: &[u8], last: bool) -> Result<()> {
        let mut input = bytes;
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length_without_replacement(input.len())
                .unwrap_or(input.len() * 3 + 16);
            self.pending.reserve(needed);

            let (result, read) =
                self.decoder
                    .decode_to_string_without_replacement(input, &mut self.pending, last);
            input = &input[read..];
            match result {
                DecoderResult::InputEmpty => return Ok(()),
                DecoderResult::OutputFull => {}
                DecoderResult::Malformed(_, _) => {
                    return Err(ScelError::TextEncoding(format!(
                        "input is not valid {}",
                        self.encoding.name()
                    )));
                }
            }
        }
    }

    fn fill(&mut self) -> Result<()> {
        if let Some(head) = self.head.take() {
            return self.decode(&head, false);
        }

        let read = self.reader.read(&mut self.chunk)?;
        if read == 0 {
            self.eof = true;
            return self.decode(&[], true);
        }
        let chunk = std::mem::take(&mut self.chunk);
        let result = self.decode(&chunk[..read], false);
        self.chunk = chunk;
        result
    }

    fn take_line(&mut self, end: usize, terminator: usize) -> String {
        self.scanned = 0;
        let mut line: String = self.pending.drain(..end + terminator).collect();
        line.truncate(end);
        if line.ends_with('\r') {
            line.pop();
        }
        line
    }
}

impl<R: Read> Iterator for LineSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(found) = self.pending[self.scanned..].find('\n') {
                let end = self.scanned + found;
                return Some(Ok(self.take_line(end, 1)));
            }
            self.scanned = self.pending.len();
            if self.eof {
                if self.pending.is_empty() {
                    return None;
                }
                let end = self.pending.len();
                return Some(Ok(self.take_line(end, 0)));
            }
            if let Err(e) = self.fill() {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}
