//! Bounds checks against the end of the demo source
//!
//! Every variable-size read in the frame codec first asks whether enough
//! bytes remain. [`BoundedReader`] knows the total source length and tracks
//! its own position, so those questions never touch the underlying handle.

use std::io::{self, Read, Seek, SeekFrom};

/// A `Read + Seek` source of known length
#[derive(Debug)]
pub struct BoundedReader<R> {
    inner: R,
    len: u64,
    pos: u64,
}

impl<R: Read + Seek> BoundedReader<R> {
    /// Wrap a source, measuring its length and rewinding to the start
    pub fn new(mut inner: R) -> io::Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, len, pos: 0 })
    }

    /// Total source length in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the source is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current read position
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Bytes between the current position and the end of the source
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    /// Whether at least `count` bytes remain
    pub fn has_remaining(&self, count: usize) -> bool {
        self.remaining() >= count as u64
    }

    /// Whether a declared length prefix, plus `trailing` fixed bytes after
    /// the data, fits in what remains. Negative lengths never fit.
    pub fn fits_declared(&self, declared: i32, trailing: usize) -> bool {
        u64::try_from(declared)
            .is_ok_and(|len| len.saturating_add(trailing as u64) <= self.remaining())
    }

    /// Move to an absolute position
    pub fn seek_to(&mut self, pos: u64) -> io::Result<()> {
        self.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    /// Read exactly `len` bytes into a new buffer
    pub fn read_bytes(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Give back the wrapped source
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R: Seek> Seek for BoundedReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.pos = self.inner.seek(pos)?;
        Ok(self.pos)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.pos)
    }
}
