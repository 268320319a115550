//! UTF-16LE text handling and fixed-size text windows
//!
//! Every string stored in a cell dictionary is UTF-16LE. Header strings live
//! in fixed windows that are zero-filled after the text; a window always keeps
//! room for one terminating NUL code unit.

use crate::error::{Result, ScelError};
use binrw::{BinRead, BinResult, BinWrite};
use std::io::{Read, Seek, Write};
use tracing::warn;

/// Encode text as UTF-16LE bytes
///
/// Fails on interior NUL characters, which readers treat as the end of a
/// string.
pub fn encode_utf16le(text: &str) -> Result<Vec<u8>> {
    if text.contains('\0') {
        return Err(ScelError::TextEncoding(format!(
            "text contains a NUL character: {text:?}"
        )));
    }
    Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect())
}

/// Decode UTF-16LE bytes up to the first NUL code unit
pub fn decode_utf16le(bytes: &[u8]) -> Result<String> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
        .collect();
    String::from_utf16(&units).map_err(|e| ScelError::TextEncoding(e.to_string()))
}

/// What to do when a text field does not fit its window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextOverflow {
    /// Cut the text at the last whole character that fits
    #[default]
    Truncate,
    /// Fail with [`ScelError::FieldTooLong`]
    Reject,
}

/// Text stored in a zero-filled window of `N` bytes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextField<const N: usize> {
    text: String,
}

impl<const N: usize> TextField<N> {
    /// Window size in bytes
    pub const WINDOW: usize = N;

    /// Largest encoded text that fits, leaving room for the terminator
    pub const CAPACITY: usize = N - 2;

    /// Create a field, applying `overflow` when the text is too long
    pub fn new(field: &'static str, text: &str, overflow: TextOverflow) -> Result<Self> {
        let encoded = encode_utf16le(text)?.len();
        if encoded <= Self::CAPACITY {
            return Ok(Self {
                text: text.to_string(),
            });
        }

        match overflow {
            TextOverflow::Reject => Err(ScelError::FieldTooLong {
                field,
                max: Self::CAPACITY,
                actual: encoded,
            }),
            TextOverflow::Truncate => {
                let mut used = 0;
                let truncated: String = text
                    .chars()
                    .take_while(|c| {
                        used += c.len_utf16() * 2;
                        used <= Self::CAPACITY
                    })
                    .collect();
                warn!(
                    "Truncated text field '{}' from {} to {} bytes",
                    field,
                    encoded,
                    truncated.encode_utf16().count() * 2
                );
                Ok(Self { text: truncated })
            }
        }
    }

    /// The stored text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl<const N: usize> BinWrite for TextField<N> {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        _endian: binrw::Endian,
        (): Self::Args<'_>,
    ) -> BinResult<()> {
        let mut window = vec![0u8; N];
        let encoded = encode_utf16le(&self.text).map_err(|e| binrw::Error::Custom {
            pos: writer.stream_position().unwrap_or(0),
            err: Box::new(e.to_string()),
        })?;
        window[..encoded.len()].copy_from_slice(&encoded);
        writer.write_all(&window)?;
        Ok(())
    }
}

impl<const N: usize> BinRead for TextField<N> {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        _endian: binrw::Endian,
        (): Self::Args<'_>,
    ) -> BinResult<Self> {
        let pos = reader.stream_position()?;
        let mut window = vec![0u8; N];
        reader.read_exact(&mut window)?;
        let text = decode_utf16le(&window).map_err(|e| binrw::Error::Custom {
            pos,
            err: Box::new(e.to_string()),
        })?;
        Ok(Self { text })
    }
}
