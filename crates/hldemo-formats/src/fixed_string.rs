//! NUL-padded fixed-length text fields
//!
//! The demo format stores map names, descriptions, console commands and the
//! sky name in fixed-size byte buffers. On read the text ends at the first
//! NUL byte, or spans the whole buffer if there is none. On write the text
//! is truncated or zero-padded to exactly `N` bytes, so a value that fills
//! the buffer is written without a terminator.

use binrw::{BinRead, BinResult, BinWrite};
use std::borrow::Cow;
use std::fmt;
use std::io::{Read, Seek, Write};

/// Text stored in an `N`-byte NUL-padded buffer
///
/// Holds the raw bytes before the first NUL (at most `N`). The bytes are
/// not required to be UTF-8; [`FixedString::to_string_lossy`] gives a
/// printable view.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct FixedString<const N: usize> {
    bytes: Vec<u8>,
}

impl<const N: usize> FixedString<N> {
    /// Size of the on-disk field
    pub const CAPACITY: usize = N;

    /// Create from arbitrary bytes, cut at the first NUL and at `N` bytes
    pub fn new(value: impl AsRef<[u8]>) -> Self {
        let value = value.as_ref();
        let end = value
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(value.len())
            .min(N);
        Self {
            bytes: value[..end].to_vec(),
        }
    }

    /// Decode an on-disk buffer
    pub fn from_field(field: &[u8; N]) -> Self {
        Self::new(field)
    }

    /// Encode into an on-disk buffer
    pub fn to_field(&self) -> [u8; N] {
        let mut field = [0u8; N];
        field[..self.bytes.len()].copy_from_slice(&self.bytes);
        field
    }

    /// Raw text bytes (without padding)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Text as UTF-8, replacing invalid sequences
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Length of the text in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the text is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<const N: usize> fmt::Debug for FixedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl<const N: usize> fmt::Display for FixedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl<const N: usize> From<&str> for FixedString<N> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<const N: usize> From<String> for FixedString<N> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<const N: usize> PartialEq<str> for FixedString<N> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<&str> for FixedString<N> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl<const N: usize> BinRead for FixedString<N> {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        _endian: binrw::Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<Self> {
        let mut field = [0u8; N];
        reader.read_exact(&mut field)?;
        Ok(Self::from_field(&field))
    }
}

impl<const N: usize> BinWrite for FixedString<N> {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        _endian: binrw::Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<()> {
        writer.write_all(&self.to_field())?;
        Ok(())
    }
}
