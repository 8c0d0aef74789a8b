//! Demo file engine
//!
//! Opening a demo decodes only the header and directory. Frames are decoded
//! on demand by [`DemoFile::read_frames`], after which the source handle is
//! released and the whole demo lives in memory. Saving always rewrites the
//! complete file and recomputes every segment offset.

use crate::bounds::BoundedReader;
use crate::constants::{HEADER_DIRECTORY_OFFSET_POS, HEADER_SIZE, SUPPORTED_DEMO_PROTOCOL};
use crate::directory::{DirectoryEntry, parse_directory, write_directory};
use crate::error::{DemoError, Result};
use crate::frame::{Frame, SegmentEnd, read_segment, write_segment};
use crate::header::{DemoHeader, has_signature};
use binrw::BinWriterExt;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, warn};

trait DemoSource: Read + Seek + Send {}

impl<T: Read + Seek + Send> DemoSource for T {}

/// An opened (or newly built) demo
pub struct DemoFile {
    /// File header
    pub header: DemoHeader,
    /// Directory entries in file order, each owning its frames
    pub entries: Vec<DirectoryEntry>,
    source: Option<BoundedReader<Box<dyn DemoSource>>>,
    demo_size: u64,
    frames_read: bool,
}

impl DemoFile {
    /// Open a demo file, decoding its header and directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DemoError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let demo = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Opened demo {} ({} bytes, {} entries)",
            path.display(),
            demo.demo_size,
            demo.entries.len()
        );
        Ok(demo)
    }

    /// Decode the header and directory of any seekable source
    ///
    /// The source is kept until [`DemoFile::read_frames`] has run.
    pub fn from_reader<R: Read + Seek + Send + 'static>(reader: R) -> Result<Self> {
        let boxed: Box<dyn DemoSource> = Box::new(reader);
        let mut source = BoundedReader::new(boxed)?;

        let header = DemoHeader::parse(&mut source)?;
        debug!(
            "Parsed header: demo protocol {}, net protocol {}, map {}, directory at {}",
            header.demo_protocol, header.net_protocol, header.map_name, header.directory_offset
        );

        let entries = parse_directory(&mut source, &header)?;
        debug!("Parsed directory with {} entries", entries.len());

        Ok(Self {
            header,
            entries,
            demo_size: source.len(),
            source: Some(source),
            frames_read: false,
        })
    }

    /// Decode a demo held in memory
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_reader(Cursor::new(data.into()))
    }

    /// Build a demo from scratch
    ///
    /// The entries' frames are taken as already read.
    pub fn new(header: DemoHeader, entries: Vec<DirectoryEntry>) -> Self {
        Self {
            header,
            entries,
            source: None,
            demo_size: 0,
            frames_read: true,
        }
    }

    /// Size of the source the demo was opened from (0 for built demos)
    pub fn demo_size(&self) -> u64 {
        self.demo_size
    }

    /// Whether frames have been decoded (or the demo was built in memory)
    pub fn frames_read(&self) -> bool {
        self.frames_read
    }

    /// Decode every entry's frame stream
    ///
    /// Calling this again after success does nothing. Entries whose offset
    /// lies outside the source are left empty. A frame that does not fit
    /// ends its entry but not the others.
    pub fn read_frames(&mut self) -> Result<()> {
        if self.frames_read {
            return Ok(());
        }

        if !self.header.is_supported_protocol() {
            return Err(DemoError::UnsupportedProtocol {
                found: self.header.demo_protocol,
                supported: SUPPORTED_DEMO_PROTOCOL,
            });
        }

        if let Some(source) = self.source.as_mut() {
            for (index, entry) in self.entries.iter_mut().enumerate() {
                let Some(offset) = entry.stream_offset(self.demo_size) else {
                    debug!(
                        "Skipping entry {index}: offset {} outside demo of {} bytes",
                        entry.offset, self.demo_size
                    );
                    continue;
                };

                let (frames, end) = read_segment(source, offset)?;
                if let SegmentEnd::Truncated { position, reason } = end {
                    warn!(
                        "Entry {index} truncated at byte {position} ({reason} does not fit), kept {} frames",
                        frames.len()
                    );
                }
                debug!("Decoded {} frames for entry {index}", frames.len());
                entry.frames = frames;
            }
        }

        self.source = None;
        self.frames_read = true;
        Ok(())
    }

    /// All frames of all entries, in file order
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.entries.iter().flat_map(|entry| entry.frames.iter())
    }

    /// Mutable access to all frames of all entries
    pub fn frames_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
        self.entries
            .iter_mut()
            .flat_map(|entry| entry.frames.iter_mut())
    }

    /// Write the demo to a new file at `path`
    ///
    /// Entry offsets and the header's directory offset are updated to
    /// match the written file.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| DemoError::Create {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;

        debug!("Saved demo to {}", path.display());
        Ok(())
    }

    /// Serialize the demo starting at the writer's current position
    pub fn write_to<W: Write + Seek>(&mut self, writer: &mut W) -> Result<()> {
        if !self.frames_read {
            warn!("Writing demo whose frames were never read; segments will be empty");
        }

        let base = writer.stream_position()?;
        self.header.write_placeholder(writer)?;

        let mut terminators = 0;
        for entry in &mut self.entries {
            entry.offset = relative_offset(writer, base, "segment offset")?;
            if write_segment(writer, &entry.frames)? {
                terminators += 1;
            }
        }

        let directory_offset = relative_offset(writer, base, "directory offset")?;
        write_directory(writer, &self.entries)?;
        let end = writer.stream_position()?;

        writer.seek(SeekFrom::Start(base + HEADER_DIRECTORY_OFFSET_POS))?;
        writer.write_le(&directory_offset)?;
        writer.seek(SeekFrom::Start(end))?;
        self.header.directory_offset = directory_offset;

        debug!(
            "Wrote {} entries ({} bytes, {terminators} terminators appended), directory at {directory_offset}",
            self.entries.len(),
            end - base
        );
        Ok(())
    }

    /// Serialize the demo into a byte vector
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.write_to(&mut out)?;
        Ok(out.into_inner())
    }
}

fn relative_offset<W: Seek>(writer: &mut W, base: u64, field: &'static str) -> Result<i32> {
    let offset = writer.stream_position()? - base;
    i32::try_from(offset).map_err(|_| DemoError::ValueOutOfRange {
        field,
        value: offset,
    })
}

impl fmt::Debug for DemoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoFile")
            .field("header", &self.header)
            .field("entries", &self.entries.len())
            .field("demo_size", &self.demo_size)
            .field("frames_read", &self.frames_read)
            .field("source_open", &self.source.is_some())
            .finish()
    }
}

/// Whether `data` is long enough for a header and starts with `HLDEMO`
pub fn is_valid_demo(data: &[u8]) -> bool {
    data.len() >= HEADER_SIZE && has_signature(data)
}

/// Probe a file for the demo signature without decoding it
pub fn is_valid_demo_file(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DemoError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut head = Vec::with_capacity(HEADER_SIZE);
    file.take(HEADER_SIZE as u64).read_to_end(&mut head)?;
    Ok(is_valid_demo(&head))
}
