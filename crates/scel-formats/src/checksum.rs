//! Checksum over the content region of a cell dictionary
//!
//! The value stored at offset 0xC of the header covers every byte from
//! [`CHECKSUM_REGION_OFFSET`](crate::header::CHECKSUM_REGION_OFFSET) to the end
//! of the file, as four little-endian 32-bit words. The hash primitive is
//! assumed to be plain MD5; this has not been confirmed against a dictionary
//! produced by the input method itself. `tests/reference_fixture.rs` checks it
//! once such a file is available.

use binrw::{BinRead, BinWrite};
use md5::{Digest, Md5};
use std::fmt;
use std::io::Read;

/// Chunk size used when hashing an existing stream
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Four 32-bit checksum words as stored in the header
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[brw(little)]
pub struct Checksum([u32; 4]);

impl Checksum {
    /// Create a checksum from its four words
    pub const fn from_words(words: [u32; 4]) -> Self {
        Self(words)
    }

    /// The four checksum words
    pub const fn words(&self) -> [u32; 4] {
        self.0
    }

    /// Little-endian byte representation, as written to the header
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.0) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Hex string of the stored bytes
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Hash everything remaining in `reader`
    pub fn compute<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut engine = ChecksumEngine::new();
        let mut buffer = vec![0u8; READ_CHUNK_SIZE];
        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            engine.update(&buffer[..read]);
        }
        Ok(engine.finalize())
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Streaming checksum state
///
/// Bytes must be fed in file order.
#[derive(Debug, Clone, Default)]
pub struct ChecksumEngine {
    hasher: Md5,
    processed: u64,
}

impl ChecksumEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next bytes of the checksum region
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.processed += data.len() as u64;
    }

    /// Number of bytes fed so far
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Finish hashing
    pub fn finalize(self) -> Checksum {
        let digest = self.hasher.finalize();
        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(digest.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Checksum(words)
    }
}
