//! Demo file header
//!
//! ```text
//! offset 0x000: [u8; 8]   magic ("HLDEMO", 2 ignored bytes)
//! offset 0x008: i32       demo protocol
//! offset 0x00C: i32       net protocol
//! offset 0x010: [u8; 260] map name (NUL-padded)
//! offset 0x114: [u8; 260] game directory (NUL-padded)
//! offset 0x218: i32       map checksum
//! offset 0x21C: i32       directory offset
//! ```

use crate::bounds::BoundedReader;
use crate::constants::{
    HEADER_GAMEDIR_SIZE, HEADER_MAGIC, HEADER_MAPNAME_SIZE, HEADER_SIGNATURE_CHECK_SIZE,
    HEADER_SIZE, SUPPORTED_DEMO_PROTOCOL,
};
use crate::error::{FormatError, Result};
use crate::fixed_string::FixedString;
use binrw::{BinRead, BinWrite, binrw};
use std::io::{Read, Seek, Write};

/// Net protocol written by the last GoldSrc releases
pub const DEFAULT_NET_PROTOCOL: i32 = 48;

/// Demo file header (544 bytes, little-endian)
#[binrw]
#[brw(little, magic = b"HLDEMO")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoHeader {
    // Remaining signature bytes, ignored on read and zeroed on write
    #[br(temp)]
    #[bw(calc = [0u8; 2])]
    _signature_padding: [u8; 2],

    /// Demo protocol version (frames are only decoded for protocol 5)
    pub demo_protocol: i32,

    /// Network protocol version of the recording client
    pub net_protocol: i32,

    /// Map the demo was recorded on
    pub map_name: FixedString<HEADER_MAPNAME_SIZE>,

    /// Game (mod) directory, e.g. `valve` or `cstrike`
    pub game_dir: FixedString<HEADER_GAMEDIR_SIZE>,

    /// Map checksum
    pub map_crc: i32,

    /// Absolute byte position of the segment directory
    pub directory_offset: i32,
}

impl DemoHeader {
    /// Create a protocol 5 header with an unset directory offset
    pub fn new(map_name: &str, game_dir: &str) -> Self {
        Self {
            demo_protocol: SUPPORTED_DEMO_PROTOCOL,
            net_protocol: DEFAULT_NET_PROTOCOL,
            map_name: FixedString::new(map_name),
            game_dir: FixedString::new(game_dir),
            map_crc: 0,
            directory_offset: 0,
        }
    }

    /// Validate the source size and signature, then decode the header
    pub fn parse<R: Read + Seek>(reader: &mut BoundedReader<R>) -> Result<Self> {
        if reader.len() < HEADER_SIZE as u64 {
            return Err(FormatError::TooSmall {
                actual: reader.len(),
                minimum: HEADER_SIZE,
            }
            .into());
        }

        reader.seek_to(0)?;
        let mut signature = [0u8; HEADER_SIGNATURE_CHECK_SIZE];
        reader.read_exact(&mut signature)?;
        if !has_signature(&signature) {
            return Err(FormatError::InvalidSignature(signature).into());
        }

        reader.seek_to(0)?;
        Ok(Self::read(reader)?)
    }

    /// Write the header with a zero directory offset, to be patched later
    pub fn write_placeholder<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        let placeholder = Self {
            directory_offset: 0,
            ..self.clone()
        };
        placeholder.write(writer)?;
        Ok(())
    }

    /// Whether frames of this demo can be decoded
    pub fn is_supported_protocol(&self) -> bool {
        self.demo_protocol == SUPPORTED_DEMO_PROTOCOL
    }
}

/// Whether `data` starts with the `HLDEMO` signature
pub fn has_signature(data: &[u8]) -> bool {
    data.len() >= HEADER_SIGNATURE_CHECK_SIZE
        && data[..HEADER_SIGNATURE_CHECK_SIZE] == HEADER_MAGIC[..HEADER_SIGNATURE_CHECK_SIZE]
}
