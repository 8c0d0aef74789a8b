//! Error types for demo parsing and writing

use std::path::PathBuf;
use thiserror::Error;

/// Structural corruption of the header or directory
///
/// Raised while opening a demo. Nothing of the demo is usable afterwards.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Source is shorter than the fixed header
    #[error("demo is too small: got {actual} bytes, header needs {minimum}")]
    TooSmall {
        /// Actual source length
        actual: u64,
        /// Header size
        minimum: usize,
    },

    /// First bytes are not `HLDEMO`
    #[error("invalid demo signature: expected \"HLDEMO\", got {0:02X?}")]
    InvalidSignature([u8; 6]),

    /// Directory offset is negative or leaves no room for the entry count
    #[error("invalid directory offset {offset} (demo is {demo_size} bytes)")]
    InvalidDirectoryOffset {
        /// Offset declared by the header
        offset: i32,
        /// Source length
        demo_size: u64,
    },

    /// Entry count outside [1, 1024] or entry table runs past the end
    #[error("invalid directory entry count {count} ({remaining} bytes remaining after it)")]
    InvalidEntryCount {
        /// Declared entry count
        count: i32,
        /// Bytes remaining after the count field
        remaining: u64,
    },
}

/// Demo operation error
#[derive(Debug, Error)]
pub enum DemoError {
    /// Source file could not be opened for reading
    #[error("failed to open demo {}: {source}", path.display())]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Destination file could not be created
    #[error("failed to create output file {}: {source}", path.display())]
    Create {
        /// Path that failed to be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Header or directory is structurally invalid
    #[error("invalid demo file: {0}")]
    Format(#[from] FormatError),

    /// Frames can only be decoded for one demo protocol
    #[error("unsupported demo protocol {found}: only protocol {supported} is supported")]
    UnsupportedProtocol {
        /// Protocol declared by the header
        found: i32,
        /// The supported protocol
        supported: i32,
    },

    /// A length or offset no longer fits its 32-bit field on save
    #[error("{field} value {value} does not fit in a 32-bit field")]
    ValueOutOfRange {
        /// Which field overflowed
        field: &'static str,
        /// The offending value
        value: u64,
    },

    /// A network message carries the tag of a named frame kind
    #[error("network message tag {0} collides with a named frame kind (2..=9)")]
    InvalidNetMsgTag(u8),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `BinRW` parsing/writing error
    #[error("binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

impl DemoError {
    /// Whether this error reports a corrupt header or directory
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Whether this error reports an unsupported demo protocol
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::UnsupportedProtocol { .. })
    }

    /// Whether this error comes from opening or creating a file
    pub fn is_open_error(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Create { .. })
    }
}

/// Result type for demo operations
pub type Result<T> = std::result::Result<T, DemoError>;
