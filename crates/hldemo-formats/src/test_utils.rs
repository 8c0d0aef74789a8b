//! Byte-level builders for demo images used in unit tests

use crate::constants::{
    DIR_ENTRY_DESCRIPTION_SIZE, HEADER_GAMEDIR_SIZE, HEADER_MAGIC, HEADER_MAPNAME_SIZE,
    HEADER_SIZE,
};
use crate::frame::FrameKind;

fn fixed(text: &str, size: usize) -> Vec<u8> {
    let mut field = text.as_bytes().to_vec();
    field.resize(size, 0);
    field
}

/// Raw 544-byte header
pub fn header_bytes(
    demo_protocol: i32,
    net_protocol: i32,
    map_name: &str,
    game_dir: &str,
    directory_offset: i32,
) -> Vec<u8> {
    let mut data = HEADER_MAGIC.to_vec();
    data.extend_from_slice(&demo_protocol.to_le_bytes());
    data.extend_from_slice(&net_protocol.to_le_bytes());
    data.extend(fixed(map_name, HEADER_MAPNAME_SIZE));
    data.extend(fixed(game_dir, HEADER_GAMEDIR_SIZE));
    data.extend_from_slice(&0x1234_5678i32.to_le_bytes());
    data.extend_from_slice(&directory_offset.to_le_bytes());
    assert_eq!(data.len(), HEADER_SIZE);
    data
}

/// Raw 92-byte directory entry
pub fn entry_bytes(entry_type: i32, description: &str, offset: i32) -> Vec<u8> {
    let mut data = entry_type.to_le_bytes().to_vec();
    data.extend(fixed(description, DIR_ENTRY_DESCRIPTION_SIZE));
    data.extend_from_slice(&0i32.to_le_bytes()); // flags
    data.extend_from_slice(&(-1i32).to_le_bytes()); // cd track
    data.extend_from_slice(&0f32.to_le_bytes()); // track time
    data.extend_from_slice(&0i32.to_le_bytes()); // frame count
    data.extend_from_slice(&offset.to_le_bytes());
    data.extend_from_slice(&0i32.to_le_bytes()); // file length
    data
}

/// Raw network message state: 436-byte client snapshot and 28-byte
/// sequence counters, without the message length
pub fn netmsg_state_bytes() -> Vec<u8> {
    let mut data = 1.25f32.to_le_bytes().to_vec();
    data.resize(436, 0);
    // frametime inside the render parameters
    data[4 + 60..4 + 64].copy_from_slice(&0.01f32.to_le_bytes());
    // msec inside the user command
    data[4 + 232 + 2] = 10;
    // sky name inside the movement variables
    let sky = 4 + 232 + 52 + 68;
    data[sky..sky + 6].copy_from_slice(b"desert");
    for sequence in 1..=7i32 {
        data.extend_from_slice(&sequence.to_le_bytes());
    }
    data
}

/// Builder for a single raw frame
pub struct FrameBytes {
    data: Vec<u8>,
}

impl FrameBytes {
    pub fn new(tag: u8, time: f32, frame: i32) -> Self {
        let mut data = vec![tag];
        data.extend_from_slice(&time.to_le_bytes());
        data.extend_from_slice(&frame.to_le_bytes());
        Self { data }
    }

    pub fn demo_start() -> Vec<u8> {
        Self::new(FrameKind::TAG_DEMO_START, 0.0, 0).finish()
    }

    pub fn i32(mut self, value: i32) -> Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn f32(mut self, value: f32) -> Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.data.extend_from_slice(value);
        self
    }

    pub fn fixed_str(mut self, text: &str, size: usize) -> Self {
        self.data.extend(fixed(text, size));
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}

/// Builder for a complete demo image: header, segments, directory
pub struct DemoImage {
    demo_protocol: i32,
    entries: Vec<(i32, String, Vec<u8>)>,
}

impl DemoImage {
    pub fn new() -> Self {
        Self {
            demo_protocol: 5,
            entries: Vec::new(),
        }
    }

    pub fn protocol(mut self, demo_protocol: i32) -> Self {
        self.demo_protocol = demo_protocol;
        self
    }

    /// Add a segment, terminated with a `NextSection` frame
    pub fn entry(self, entry_type: i32, description: &str, frames: Vec<Vec<u8>>) -> Self {
        let mut frames = frames;
        frames.push(FrameBytes::new(FrameKind::TAG_NEXT_SECTION, 0.0, 0).finish());
        self.unterminated_entry(entry_type, description, frames)
    }

    /// Add a segment exactly as given
    pub fn unterminated_entry(
        mut self,
        entry_type: i32,
        description: &str,
        frames: Vec<Vec<u8>>,
    ) -> Self {
        self.entries
            .push((entry_type, description.to_string(), frames.concat()));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut body = Vec::new();
        let mut offsets = Vec::new();
        for (_, _, stream) in &self.entries {
            offsets.push((HEADER_SIZE + body.len()) as i32);
            body.extend_from_slice(stream);
        }

        let directory_offset = (HEADER_SIZE + body.len()) as i32;
        let mut data = header_bytes(self.demo_protocol, 48, "c1a0", "valve", directory_offset);
        data.extend(body);
        data.extend_from_slice(&(self.entries.len() as i32).to_le_bytes());
        for ((entry_type, description, _), offset) in self.entries.iter().zip(offsets) {
            data.extend(entry_bytes(*entry_type, description, offset));
        }
        data
    }
}
