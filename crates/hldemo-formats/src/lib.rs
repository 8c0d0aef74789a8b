//! Parser and writer for GoldSrc HLDEMO recorded-session files
//!
#![allow(clippy::cast_possible_wrap)] // Length fields are i32 on disk
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::float_cmp)] // Binary format requirements
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::struct_field_names)] // Engine field names
//! A demo file is a 544-byte header, one frame stream per playback segment
//! and a directory describing the segments. This crate decodes all three
//! into an owned, editable model and writes it back out, recomputing every
//! offset.
//!
//! # Layout
//!
//! ```text
//! +-------------------+  0
//! | header            |
//! +-------------------+  544
//! | segment 0 frames  |  <- directory entry 0 offset
//! | segment 1 frames  |  <- directory entry 1 offset
//! | ...               |
//! +-------------------+  <- header directory offset
//! | directory         |
//! +-------------------+
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use hldemo_formats::{DemoFile, FramePayload};
//!
//! # fn main() -> hldemo_formats::Result<()> {
//! let mut demo = DemoFile::open("match.dem")?;
//! demo.read_frames()?;
//!
//! for frame in demo.frames_mut() {
//!     if let FramePayload::Sound(sound) = &mut frame.payload {
//!         sound.sample.truncate(255);
//!     }
//! }
//!
//! demo.save("match_fixed.dem")?;
//! # Ok(())
//! # }
//! ```
//!
//! Frames are only decoded for demo protocol 5. A segment whose frame
//! stream runs past the end of the file keeps the frames decoded before the
//! cut; other segments are unaffected.

#![warn(missing_docs)]

/// Bounds-checked reading over a demo source
pub mod bounds;
pub mod constants;
mod demo;
pub mod directory;
pub mod error;
pub mod fixed_string;
pub mod frame;
pub mod header;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use demo::{DemoFile, is_valid_demo, is_valid_demo_file};
pub use directory::{DirectoryEntry, ENTRY_TYPE_NORMAL, ENTRY_TYPE_START};
pub use error::{DemoError, FormatError, Result};
pub use fixed_string::FixedString;
pub use frame::{
    ClientData, ConsoleCommand, DemoBuffer, DemoInfo, Event, EventArgs, Frame, FrameKind,
    FramePayload, MoveVars, NetMsg, NetSequences, RefParams, Sound, UserCmd, WeaponAnim,
};
pub use header::{DEFAULT_NET_PROTOCOL, DemoHeader};
