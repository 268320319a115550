//! Fixed-layout file header and summary block
//!
//! ```text
//! 0x0000  u32      magic (0x00001540)
//! 0x0004  u32      secondary magic (0x01536DD2)
//! 0x0008  u32      version (1)
//! 0x000C  [u32;4]  checksum, patched after the content is written
//! 0x001C  text     session id, 0x100 bytes
//! 0x011C  u32      unix timestamp
//! 0x0120  u32      code entry count        \
//! 0x0124  u32      word entry count         |
//! 0x0128  u32      code block bytes         |
//! 0x012C  u32      word block bytes         | summary, patched
//! 0x0130  text     title, 0x208 bytes       |
//! 0x0338  text     category, 0x208 bytes    |
//! 0x0540  text     description, 0x800 bytes |
//! 0x0D40  text     example words, 0x800    /
//! 0x1540           syllable table, then entry records
//! ```

use crate::checksum::Checksum;
use crate::error::{Result, ScelError};
use crate::text::{TextField, TextOverflow};
use binrw::{BinRead, BinWrite, io::Cursor};
use rand::{RngExt, rng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Primary magic value
pub const SCEL_MAGIC: u32 = 0x0000_1540;

/// Secondary magic value
pub const SCEL_SECONDARY_MAGIC: u32 = 0x0153_6DD2;

/// Supported format version
pub const SCEL_VERSION: u32 = 1;

/// Size of [`ScelHeader`]
pub const HEADER_SIZE: u64 = 0x120;

/// Offset of the checksum words
pub const CHECKSUM_OFFSET: u64 = 0xC;

/// Offset of [`ScelSummary`]
pub const SUMMARY_OFFSET: u64 = 0x120;

/// Start of the syllable table and of the hashed region
pub const CHECKSUM_REGION_OFFSET: u64 = 0x1540;

/// Session id window
pub type SessionIdField = TextField<0x100>;
/// Title window
pub type TitleField = TextField<0x208>;
/// Category window
pub type CategoryField = TextField<0x208>;
/// Description window
pub type DescriptionField = TextField<0x800>;
/// Example words window
pub type ExamplesField = TextField<0x800>;

/// File header written before any content
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct ScelHeader {
    /// Primary magic
    pub magic: u32,
    /// Secondary magic
    pub secondary_magic: u32,
    /// Format version
    pub version: u32,
    /// Checksum of the content region, zero until patched
    pub checksum: Checksum,
    /// Session identifier, distinguishes dictionaries loaded side by side
    pub session_id: SessionIdField,
    /// Creation time as seconds since the unix epoch
    pub timestamp: u32,
}

impl ScelHeader {
    /// Create a header with a zero checksum
    pub fn new(session_id: SessionIdField, timestamp: u32) -> Self {
        Self {
            magic: SCEL_MAGIC,
            secondary_magic: SCEL_SECONDARY_MAGIC,
            version: SCEL_VERSION,
            checksum: Checksum::default(),
            session_id,
            timestamp,
        }
    }

    /// Random session id of the form `L<u16>`
    pub fn random_session_id() -> String {
        format!("L{}", rng().random::<u16>())
    }

    /// Current time truncated to 32 bits
    pub fn current_timestamp() -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as u32)
            .unwrap_or(0)
    }

    /// Check the magic values and version of a header read from a file
    pub fn validate(&self) -> Result<()> {
        if self.magic != SCEL_MAGIC {
            return Err(ScelError::InvalidMagic {
                expected: SCEL_MAGIC,
                actual: self.magic,
            });
        }
        if self.secondary_magic != SCEL_SECONDARY_MAGIC {
            return Err(ScelError::InvalidMagic {
                expected: SCEL_SECONDARY_MAGIC,
                actual: self.secondary_magic,
            });
        }
        if self.version != SCEL_VERSION {
            return Err(ScelError::UnsupportedVersion(self.version));
        }
        Ok(())
    }

    /// Serialize to exactly [`HEADER_SIZE`] bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(HEADER_SIZE as usize));
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

/// Counts, sizes and descriptive text patched in after the content
#[derive(Debug, Clone, PartialEq, Eq, Default, BinRead, BinWrite)]
#[brw(little)]
pub struct ScelSummary {
    /// Number of code blocks
    pub code_count: u32,
    /// Number of words
    pub word_count: u32,
    /// Bytes in code blocks, counting length prefixes
    pub code_bytes: u32,
    /// Bytes in word blocks, counting length prefixes
    pub word_bytes: u32,
    /// Dictionary title
    pub title: TitleField,
    /// Category label
    pub category: CategoryField,
    /// Free-form description
    pub description: DescriptionField,
    /// Sample of the first words
    pub examples: ExamplesField,
}

impl ScelSummary {
    /// Size of the serialized summary
    pub const SIZE: u64 = CHECKSUM_REGION_OFFSET - SUMMARY_OFFSET;

    /// Serialize to exactly [`Self::SIZE`] bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(Self::SIZE as usize));
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

/// Descriptive text for the summary block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryText {
    /// Title
    pub title: TitleField,
    /// Category label
    pub category: CategoryField,
    /// Description
    pub description: DescriptionField,
}

impl SummaryText {
    /// Fit each string into its window
    pub fn new(
        title: &str,
        category: &str,
        description: &str,
        overflow: TextOverflow,
    ) -> Result<Self> {
        Ok(Self {
            title: TextField::new("title", title, overflow)?,
            category: TextField::new("category", category, overflow)?,
            description: TextField::new("description", description, overflow)?,
        })
    }
}
