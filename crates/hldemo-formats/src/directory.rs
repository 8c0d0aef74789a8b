//! Segment directory
//!
//! The directory sits wherever the header's `directory_offset` points
//! (normally at the end of the file):
//!
//! ```text
//! i32 entry_count                (1..=1024)
//! entry_count × 92-byte entries:
//!   i32      entry_type          (0 = start segment, 1 = normal segment)
//!   [u8; 64] description         (NUL-padded)
//!   i32      flags
//!   i32      cd_track
//!   f32      track_time          (seconds, approximate)
//!   i32      frame_count         (informational)
//!   i32      offset              (absolute position of the frame stream)
//!   i32      file_length         (passed through unchanged)
//! ```

use crate::bounds::BoundedReader;
use crate::constants::{
    DIR_ENTRY_COUNT_SIZE, DIR_ENTRY_DESCRIPTION_SIZE, DIR_ENTRY_SIZE, MAX_DIR_ENTRY_COUNT,
    MIN_DIR_ENTRY_COUNT,
};
use crate::error::{DemoError, FormatError, Result};
use crate::fixed_string::FixedString;
use crate::frame::Frame;
use crate::header::DemoHeader;
use binrw::{BinRead, BinReaderExt, BinWrite, BinWriterExt};
use std::io::{Read, Seek, Write};

/// Entry type of the loading segment recorded before the game starts
pub const ENTRY_TYPE_START: i32 = 0;
/// Entry type of a regular playback segment
pub const ENTRY_TYPE_NORMAL: i32 = 1;

/// One playback segment of a demo
///
/// The fixed 92-byte part is read when the demo is opened; `frames` stays
/// empty until [`crate::DemoFile::read_frames`] runs.
#[derive(Debug, Clone, PartialEq, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct DirectoryEntry {
    /// Segment type (`ENTRY_TYPE_START` or `ENTRY_TYPE_NORMAL`)
    pub entry_type: i32,

    /// Free-text description, e.g. `LOADING` or `Playback`
    pub description: FixedString<DIR_ENTRY_DESCRIPTION_SIZE>,

    /// Segment flags
    pub flags: i32,

    /// CD audio track playing during the segment
    pub cd_track: i32,

    /// Approximate segment length in seconds
    pub track_time: f32,

    /// Frame count as recorded; not authoritative
    pub frame_count: i32,

    /// Absolute position of the segment's frame stream
    pub offset: i32,

    /// Segment length as recorded; passed through on save
    pub file_length: i32,

    /// Decoded frames, owned by this entry
    #[br(ignore)]
    #[bw(ignore)]
    pub frames: Vec<Frame>,
}

impl DirectoryEntry {
    /// Create an entry with no frames and zeroed bookkeeping fields
    pub fn new(entry_type: i32, description: &str) -> Self {
        Self {
            entry_type,
            description: FixedString::new(description),
            flags: 0,
            cd_track: -1,
            track_time: 0.0,
            frame_count: 0,
            offset: 0,
            file_length: 0,
            frames: Vec::new(),
        }
    }

    /// Whether this is the loading segment
    pub fn is_start_segment(&self) -> bool {
        self.entry_type == ENTRY_TYPE_START
    }

    /// Where the frame stream starts, if the recorded offset lies inside a
    /// source of `demo_size` bytes
    pub fn stream_offset(&self, demo_size: u64) -> Option<u64> {
        u64::try_from(self.offset)
            .ok()
            .filter(|&offset| offset <= demo_size)
    }

    /// Whether any decoded frame is a segment terminator
    pub fn has_terminator(&self) -> bool {
        self.frames.iter().any(Frame::is_next_section)
    }
}

/// Decode the directory the header points at
///
/// Fails if the offset is out of range, the count is outside
/// `[1, 1024]`, or the entry table would run past the end of the source.
pub fn parse_directory<R: Read + Seek>(
    reader: &mut BoundedReader<R>,
    header: &DemoHeader,
) -> Result<Vec<DirectoryEntry>> {
    let demo_size = reader.len();
    let offset = u64::try_from(header.directory_offset)
        .ok()
        .filter(|&offset| offset.saturating_add(DIR_ENTRY_COUNT_SIZE as u64) <= demo_size)
        .ok_or(FormatError::InvalidDirectoryOffset {
            offset: header.directory_offset,
            demo_size,
        })?;

    reader.seek_to(offset)?;
    let count: i32 = reader.read_le()?;
    let table_size = i64::from(count) * DIR_ENTRY_SIZE as i64;
    if !(MIN_DIR_ENTRY_COUNT..=MAX_DIR_ENTRY_COUNT).contains(&count)
        || table_size as u64 > reader.remaining()
    {
        return Err(FormatError::InvalidEntryCount {
            count,
            remaining: reader.remaining(),
        }
        .into());
    }

    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        entries.push(DirectoryEntry::read(reader)?);
    }

    Ok(entries)
}

/// Encode the entry count followed by every entry
pub fn write_directory<W: Write + Seek>(writer: &mut W, entries: &[DirectoryEntry]) -> Result<()> {
    let count = i32::try_from(entries.len()).map_err(|_| DemoError::ValueOutOfRange {
        field: "directory entry count",
        value: entries.len() as u64,
    })?;
    writer.write_le(&count)?;
    for entry in entries {
        entry.write(writer)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::constants::HEADER_SIZE;
    use crate::test_utils::{entry_bytes, header_bytes};
    use binrw::io::Cursor;

    fn demo_with_directory(count: i32, entries: usize) -> (DemoHeader, BoundedReader<Cursor<Vec<u8>>>) {
        let mut data = header_bytes(5, 48, "c1a0", "valve", HEADER_SIZE as i32);
        data.extend_from_slice(&count.to_le_bytes());
        for i in 0..entries {
            data.extend_from_slice(&entry_bytes(1, "Playback", 100 + i as i32));
        }
        let mut reader = BoundedReader::new(Cursor::new(data)).unwrap();
        let header = DemoHeader::parse(&mut reader).unwrap();
        (header, reader)
    }

    #[test]
    fn test_parse_entries() {
        let (header, mut reader) = demo_with_directory(2, 2);
        let entries = parse_directory(&mut reader, &header).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_type, ENTRY_TYPE_NORMAL);
        assert_eq!(entries[0].description, "Playback");
        assert_eq!(entries[0].offset, 100);
        assert_eq!(entries[1].offset, 101);
        assert!(entries[0].frames.is_empty());
    }

    #[test]
    fn test_reject_zero_entries() {
        let (header, mut reader) = demo_with_directory(0, 0);
        let err = parse_directory(&mut reader, &header).unwrap_err();
        assert!(matches!(
            err,
            DemoError::Format(FormatError::InvalidEntryCount { count: 0, .. })
        ));
    }

    #[test]
    fn test_reject_too_many_entries() {
        let (header, mut reader) = demo_with_directory(1025, 1025);
        let err = parse_directory(&mut reader, &header).unwrap_err();
        assert!(matches!(
            err,
            DemoError::Format(FormatError::InvalidEntryCount { count: 1025, .. })
        ));
    }

    #[test]
    fn test_reject_entry_table_past_end() {
        let (header, mut reader) = demo_with_directory(3, 2);
        let err = parse_directory(&mut reader, &header).unwrap_err();
        assert!(matches!(
            err,
            DemoError::Format(FormatError::InvalidEntryCount {
                count: 3,
                remaining: 184
            })
        ));
    }

    #[test]
    fn test_reject_directory_offsets_out_of_range() {
        let data = header_bytes(5, 48, "c1a0", "valve", 0);
        let mut reader = BoundedReader::new(Cursor::new(data)).unwrap();
        let mut header = DemoHeader::parse(&mut reader).unwrap();

        for offset in [-1, HEADER_SIZE as i32 - 3, i32::MAX] {
            header.directory_offset = offset;
            let err = parse_directory(&mut reader, &header).unwrap_err();
            assert!(matches!(
                err,
                DemoError::Format(FormatError::InvalidDirectoryOffset { .. })
            ));
        }
    }

    #[test]
    fn test_write_directory_layout() {
        let mut entry = DirectoryEntry::new(ENTRY_TYPE_START, "LOADING");
        entry.offset = 544;
        entry.file_length = 77;

        let mut out = Cursor::new(Vec::new());
        write_directory(&mut out, &[entry]).unwrap();
        let bytes = out.into_inner();

        assert_eq!(bytes.len(), 4 + DIR_ENTRY_SIZE);
        assert_eq!(&bytes[..4], &1i32.to_le_bytes());
        assert_eq!(&bytes[8..15], b"LOADING");
        assert_eq!(&bytes[4 + 84..4 + 88], &544i32.to_le_bytes());
        assert_eq!(&bytes[4 + 88..4 + 92], &77i32.to_le_bytes());
    }

    #[test]
    fn test_stream_offset_bounds() {
        let mut entry = DirectoryEntry::new(ENTRY_TYPE_NORMAL, "Playback");
        entry.offset = -5;
        assert_eq!(entry.stream_offset(1000), None);
        entry.offset = 1001;
        assert_eq!(entry.stream_offset(1000), None);
        entry.offset = 1000;
        assert_eq!(entry.stream_offset(1000), Some(1000));
    }
}
