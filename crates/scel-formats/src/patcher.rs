//! Second pass: write the summary and checksum over the reserved header bytes

use crate::checksum::Checksum;
use crate::error::Result;
use crate::header::{CHECKSUM_OFFSET, CHECKSUM_REGION_OFFSET, ScelSummary, SUMMARY_OFFSET};
use crate::sink::OutputSink;
use std::io;
use tracing::debug;

/// Patches final values into an already written file
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetPatcher;

impl OffsetPatcher {
    /// Write `summary` at 0x120 and `checksum` at 0xC
    ///
    /// The content region must already be complete, since the checksum
    /// covers it.
    pub fn patch<S: OutputSink>(
        sink: &mut S,
        summary: &ScelSummary,
        checksum: &Checksum,
    ) -> Result<()> {
        if sink.position() < CHECKSUM_REGION_OFFSET {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "output is {} bytes, shorter than the header block",
                    sink.position()
                ),
            )
            .into());
        }

        let bytes = summary.to_bytes()?;
        sink.overwrite_at(SUMMARY_OFFSET, &bytes)?;
        sink.overwrite_at(CHECKSUM_OFFSET, &checksum.to_bytes())?;

        debug!(
            "Patched summary ({} codes, {} words) and checksum {}",
            summary.code_count, summary.word_count, checksum
        );
        Ok(())
    }
}
