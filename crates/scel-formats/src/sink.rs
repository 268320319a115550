//! Output sinks supporting append plus overwrite of already written bytes
//!
//! A cell dictionary is written in two passes: the content is appended in
//! order, then header fields are overwritten once the totals are known.

use std::io::{self, BufWriter, Seek, SeekFrom, Write};

/// Destination for a cell dictionary
pub trait OutputSink {
    /// Value handed back by [`OutputSink::finish`]
    type Output;

    /// Append bytes at the end of the output
    fn append(&mut self, data: &[u8]) -> io::Result<()>;

    /// Replace bytes that were already appended
    ///
    /// The range `offset..offset + data.len()` must lie within the bytes
    /// appended so far.
    fn overwrite_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()>;

    /// Number of bytes appended so far
    fn position(&self) -> u64;

    /// Flush everything and release the underlying destination
    fn finish(self) -> io::Result<Self::Output>;
}

fn check_range(offset: u64, len: usize, position: u64) -> io::Result<()> {
    match offset.checked_add(len as u64) {
        Some(end) if end <= position => Ok(()),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("overwrite of {len} bytes at {offset:#x} past end of output ({position:#x})"),
        )),
    }
}

impl OutputSink for Vec<u8> {
    type Output = Self;

    fn append(&mut self, data: &[u8]) -> io::Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }

    fn overwrite_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        check_range(offset, data.len(), self.position())?;
        let start = offset as usize;
        self[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn position(&self) -> u64 {
        self.len() as u64
    }

    fn finish(self) -> io::Result<Self::Output> {
        Ok(self)
    }
}

/// Sink over a seekable writer such as a file
///
/// Appends go through a buffer; overwrites flush it, seek, write and seek
/// back to the end.
#[derive(Debug)]
pub struct SeekSink<W: Write + Seek> {
    writer: BufWriter<W>,
    position: u64,
}

impl<W: Write + Seek> SeekSink<W> {
    /// Wrap `writer`, which must be positioned at its start
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            position: 0,
        }
    }
}

impl<W: Write + Seek> OutputSink for SeekSink<W> {
    type Output = W;

    fn append(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn overwrite_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        check_range(offset, data.len(), self.position)?;
        self.writer.flush()?;
        let inner = self.writer.get_mut();
        inner.seek(SeekFrom::Start(offset))?;
        inner.write_all(data)?;
        inner.seek(SeekFrom::Start(self.position))?;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn finish(self) -> io::Result<Self::Output> {
        let mut inner = self.writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        inner.flush()?;
        Ok(inner)
    }
}

/// Sink for writers that cannot seek
///
/// The whole file is held in memory and written in one go by
/// [`OutputSink::finish`].
#[derive(Debug)]
pub struct BufferedSink<W: Write> {
    writer: W,
    buffer: Vec<u8>,
}

impl<W: Write> BufferedSink<W> {
    /// Buffer output destined for `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: Vec::new(),
        }
    }
}

impl<W: Write> OutputSink for BufferedSink<W> {
    type Output = W;

    fn append(&mut self, data: &[u8]) -> io::Result<()> {
        OutputSink::append(&mut self.buffer, data)
    }

    fn overwrite_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        self.buffer.overwrite_at(offset, data)
    }

    fn position(&self) -> u64 {
        self.buffer.position()
    }

    fn finish(mut self) -> io::Result<Self::Output> {
        self.writer.write_all(&self.buffer)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn exercise<S: OutputSink>(sink: &mut S) {
        sink.append(b"hello ").expect("Operation should succeed");
        sink.append(b"world").expect("Operation should succeed");
        sink.overwrite_at(0, b"J").expect("Operation should succeed");
        sink.append(b"!").expect("Operation should succeed");
        sink.overwrite_at(6, b"W").expect("Operation should succeed");
        assert_eq!(sink.position(), 12);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<u8> = Vec::new();
        exercise(&mut sink);
        assert_eq!(sink.finish().expect("Operation should succeed"), b"Jello World!");
    }

    #[test]
    fn test_seek_sink() {
        let mut sink = SeekSink::new(Cursor::new(Vec::new()));
        exercise(&mut sink);
        let cursor = sink.finish().expect("Operation should succeed");
        assert_eq!(cursor.into_inner(), b"Jello World!");
    }

    #[test]
    fn test_buffered_sink_writes_once() {
        struct AppendOnly(Vec<u8>, usize);
        impl Write for AppendOnly {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.1 += 1;
                self.0.extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = BufferedSink::new(AppendOnly(Vec::new(), 0));
        exercise(&mut sink);
        assert_eq!(sink.writer.1, 0);
        let writer = sink.finish().expect("Operation should succeed");
        assert_eq!(writer.0, b"Jello World!");
    }

    #[test]
    fn test_overwrite_past_end_fails() {
        let mut sink: Vec<u8> = Vec::new();
        OutputSink::append(&mut sink, b"abc").expect("Operation should succeed");
        let err = sink.overwrite_at(2, b"xy").expect_err("Overwrite should fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(sink.overwrite_at(u64::MAX, b"x").is_err());
    }
}
