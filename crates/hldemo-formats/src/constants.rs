//! Sizes, limits and magic values of the HLDEMO layout
//!
//! Decoding and encoding both read from this table so the two directions
//! cannot drift apart.

/// Signature written at the start of every demo (first 6 bytes are checked)
pub const HEADER_MAGIC: [u8; HEADER_SIGNATURE_SIZE] = *b"HLDEMO\0\0";
/// Number of signature bytes that must match on read
pub const HEADER_SIGNATURE_CHECK_SIZE: usize = 6;
/// Size of the signature field
pub const HEADER_SIGNATURE_SIZE: usize = 8;
/// Size of the NUL-padded map name field
pub const HEADER_MAPNAME_SIZE: usize = 260;
/// Size of the NUL-padded game directory field
pub const HEADER_GAMEDIR_SIZE: usize = 260;
/// Total size of the file header
pub const HEADER_SIZE: usize = 544;
/// Byte position of the directory offset field inside the header
pub const HEADER_DIRECTORY_OFFSET_POS: u64 = (HEADER_SIZE - 4) as u64;

/// The only demo protocol this crate decodes frames for
pub const SUPPORTED_DEMO_PROTOCOL: i32 = 5;

/// Minimum number of directory entries
pub const MIN_DIR_ENTRY_COUNT: i32 = 1;
/// Maximum number of directory entries
pub const MAX_DIR_ENTRY_COUNT: i32 = 1024;
/// Size of one directory entry
pub const DIR_ENTRY_SIZE: usize = 92;
/// Size of the NUL-padded directory entry description
pub const DIR_ENTRY_DESCRIPTION_SIZE: usize = 64;
/// Size of the directory entry count field
pub const DIR_ENTRY_COUNT_SIZE: usize = 4;

/// Bytes that must remain before a frame header is read.
///
/// The header itself is 9 bytes (tag, time, frame); the on-disk engine
/// checks for 12.
pub const MIN_FRAME_SIZE: usize = 12;
/// Console command payload
pub const FRAME_CONSOLE_COMMAND_SIZE: usize = 64;
/// Client data payload
pub const FRAME_CLIENT_DATA_SIZE: usize = 32;
/// Event payload
pub const FRAME_EVENT_SIZE: usize = 84;
/// Weapon animation payload
pub const FRAME_WEAPON_ANIM_SIZE: usize = 8;
/// Sound channel + sample length
pub const FRAME_SOUND_SIZE_1: usize = 8;
/// Sound attenuation, volume, flags and pitch following the sample
pub const FRAME_SOUND_SIZE_2: usize = 16;
/// Demo buffer length prefix
pub const FRAME_DEMO_BUFFER_SIZE: usize = 4;
/// Network message fixed block: demo info, sequence counters, length prefix
pub const FRAME_NETMSG_SIZE: usize = 468;
/// Demo info block inside a network message frame
pub const FRAME_NETMSG_DEMOINFO_SIZE: usize = 436;
/// Sky name field inside the move variables
pub const FRAME_NETMSG_SKYNAME_SIZE: usize = 32;
/// Smallest accepted network message payload
pub const FRAME_NETMSG_MIN_MESSAGE_LENGTH: i32 = 0;
/// Largest accepted network message payload
pub const FRAME_NETMSG_MAX_MESSAGE_LENGTH: i32 = 65536;
