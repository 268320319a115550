//! Error types for cell dictionary writing and reading

use thiserror::Error;

/// Errors that can occur when building or reading a cell dictionary
#[derive(Error, Debug)]
pub enum ScelError {
    /// A pinyin code referenced a syllable that is not in the syllable table
    #[error("Unknown syllable '{syllable}' on line {line}")]
    UnknownSyllable {
        /// The syllable text as it appeared in the input
        syllable: String,
        /// 1-based input line number, 0 when the entry was not read from a line
        line: usize,
    },

    /// The syllable table blob is malformed
    #[error("Invalid syllable table: {0}")]
    InvalidSyllableTable(String),

    /// Text could not be represented in the output encoding
    #[error("Text encoding error: {0}")]
    TextEncoding(String),

    /// A text field exceeds its reserved window and overflow is rejected
    #[error("Text field '{field}' too long: {actual} bytes, at most {max} allowed")]
    FieldTooLong {
        /// Field name
        field: &'static str,
        /// Maximum encoded size in bytes
        max: usize,
        /// Actual encoded size in bytes
        actual: usize,
    },

    /// A 32-bit header counter would overflow
    #[error("Limit exceeded: {what}")]
    LimitExceeded {
        /// What overflowed
        what: &'static str,
    },

    /// Invalid magic signature detected when reading a header back
    #[error("Invalid scel magic: expected {expected:#010x}, got {actual:#010x}")]
    InvalidMagic {
        /// Expected magic value
        expected: u32,
        /// Magic value found in the file
        actual: u32,
    },

    /// Unsupported format version
    #[error("Unsupported scel version: {0}")]
    UnsupportedVersion(u32),

    /// Stored checksum does not match the recomputed one
    #[error("Checksum mismatch: header has {expected}, content hashes to {actual}")]
    ChecksumMismatch {
        /// Hex checksum stored in the header
        expected: String,
        /// Hex checksum computed over the checksum region
        actual: String,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `BinRW` parsing/writing error
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Type alias for cell dictionary operation results
pub type Result<T> = std::result::Result<T, ScelError>;
