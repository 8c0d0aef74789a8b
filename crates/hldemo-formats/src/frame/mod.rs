//! Demo frames
//!
//! Every frame starts with the same 9-byte header followed by a payload
//! whose layout depends on the tag:
//!
//! ```text
//! u8   tag      (2..=9 named kinds, anything else is a network message)
//! f32  time
//! i32  frame
//! ...  payload
//! ```
//!
//! | Tag   | Kind             | Payload                                     |
//! |-------|------------------|---------------------------------------------|
//! | 2     | `DemoStart`      | none                                        |
//! | 3     | `ConsoleCommand` | 64-byte NUL-padded command                  |
//! | 4     | `ClientData`     | origin, view angles, weapon bits, fov       |
//! | 5     | `NextSection`    | none, ends the segment                      |
//! | 6     | `Event`          | flags, index, delay, event arguments        |
//! | 7     | `WeaponAnim`     | animation, body                             |
//! | 8     | `Sound`          | channel, sample, attenuation, volume, ...   |
//! | 9     | `DemoBuffer`     | length-prefixed bytes                       |
//! | other | `NetMsg`         | 464-byte state block + length-prefixed data |

/// Frame stream decoding and encoding
pub mod codec;
mod netmsg;
mod payload;

pub use codec::{SegmentEnd, read_frame, read_segment, write_frame, write_segment};
pub use netmsg::{DemoInfo, MoveVars, NetMsg, NetSequences, RefParams, UserCmd};
pub use payload::{ClientData, ConsoleCommand, DemoBuffer, Event, EventArgs, Sound, WeaponAnim};

/// Frame kind as identified by the tag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Start of playback (tag 2)
    DemoStart,
    /// Console command (tag 3)
    ConsoleCommand,
    /// Client view state (tag 4)
    ClientData,
    /// Segment terminator (tag 5)
    NextSection,
    /// Game event (tag 6)
    Event,
    /// Weapon animation (tag 7)
    WeaponAnim,
    /// Sound (tag 8)
    Sound,
    /// Raw demo buffer (tag 9)
    DemoBuffer,
    /// Network message, carrying whatever tag it was recorded with
    NetMsg(u8),
}

impl FrameKind {
    /// Tag of a demo start frame
    pub const TAG_DEMO_START: u8 = 2;
    /// Tag of a console command frame
    pub const TAG_CONSOLE_COMMAND: u8 = 3;
    /// Tag of a client data frame
    pub const TAG_CLIENT_DATA: u8 = 4;
    /// Tag of a segment terminator
    pub const TAG_NEXT_SECTION: u8 = 5;
    /// Tag of an event frame
    pub const TAG_EVENT: u8 = 6;
    /// Tag of a weapon animation frame
    pub const TAG_WEAPON_ANIM: u8 = 7;
    /// Tag of a sound frame
    pub const TAG_SOUND: u8 = 8;
    /// Tag of a demo buffer frame
    pub const TAG_DEMO_BUFFER: u8 = 9;

    /// Classify a tag byte; unknown tags are network messages
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            Self::TAG_DEMO_START => Self::DemoStart,
            Self::TAG_CONSOLE_COMMAND => Self::ConsoleCommand,
            Self::TAG_CLIENT_DATA => Self::ClientData,
            Self::TAG_NEXT_SECTION => Self::NextSection,
            Self::TAG_EVENT => Self::Event,
            Self::TAG_WEAPON_ANIM => Self::WeaponAnim,
            Self::TAG_SOUND => Self::Sound,
            Self::TAG_DEMO_BUFFER => Self::DemoBuffer,
            other => Self::NetMsg(other),
        }
    }

    /// Tag byte written for this kind
    pub const fn tag(self) -> u8 {
        match self {
            Self::DemoStart => Self::TAG_DEMO_START,
            Self::ConsoleCommand => Self::TAG_CONSOLE_COMMAND,
            Self::ClientData => Self::TAG_CLIENT_DATA,
            Self::NextSection => Self::TAG_NEXT_SECTION,
            Self::Event => Self::TAG_EVENT,
            Self::WeaponAnim => Self::TAG_WEAPON_ANIM,
            Self::Sound => Self::TAG_SOUND,
            Self::DemoBuffer => Self::TAG_DEMO_BUFFER,
            Self::NetMsg(tag) => tag,
        }
    }

    /// Upper-case name used in frame dumps
    pub const fn name(self) -> &'static str {
        match self {
            Self::DemoStart => "DEMO_START",
            Self::ConsoleCommand => "CONSOLE_COMMAND",
            Self::ClientData => "CLIENT_DATA",
            Self::NextSection => "NEXT_SECTION",
            Self::Event => "EVENT",
            Self::WeaponAnim => "WEAPON_ANIM",
            Self::Sound => "SOUND",
            Self::DemoBuffer => "DEMO_BUFFER",
            Self::NetMsg(_) => "NETMSG",
        }
    }
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific frame contents
#[derive(Debug, Clone, PartialEq)]
pub enum FramePayload {
    /// Start of playback
    DemoStart,
    /// Console command
    ConsoleCommand(ConsoleCommand),
    /// Client view state
    ClientData(ClientData),
    /// Segment terminator
    NextSection,
    /// Game event
    Event(Event),
    /// Weapon animation
    WeaponAnim(WeaponAnim),
    /// Sound
    Sound(Sound),
    /// Raw demo buffer
    DemoBuffer(DemoBuffer),
    /// Network message
    NetMsg(Box<NetMsg>),
}

/// One timestamped record in a segment
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Demo time in seconds
    pub time: f32,
    /// Engine frame number
    pub frame: i32,
    /// Kind-specific contents
    pub payload: FramePayload,
}

impl Frame {
    /// Create a frame
    pub fn new(time: f32, frame: i32, payload: FramePayload) -> Self {
        Self {
            time,
            frame,
            payload,
        }
    }

    /// Create a segment terminator
    pub fn next_section(time: f32, frame: i32) -> Self {
        Self::new(time, frame, FramePayload::NextSection)
    }

    /// Kind of this frame
    pub fn kind(&self) -> FrameKind {
        match &self.payload {
            FramePayload::DemoStart => FrameKind::DemoStart,
            FramePayload::ConsoleCommand(_) => FrameKind::ConsoleCommand,
            FramePayload::ClientData(_) => FrameKind::ClientData,
            FramePayload::NextSection => FrameKind::NextSection,
            FramePayload::Event(_) => FrameKind::Event,
            FramePayload::WeaponAnim(_) => FrameKind::WeaponAnim,
            FramePayload::Sound(_) => FrameKind::Sound,
            FramePayload::DemoBuffer(_) => FrameKind::DemoBuffer,
            FramePayload::NetMsg(msg) => FrameKind::NetMsg(msg.tag),
        }
    }

    /// Whether this frame terminates its segment
    pub fn is_next_section(&self) -> bool {
        matches!(self.payload, FramePayload::NextSection)
    }

    /// Network message contents, if this is a network message frame
    pub fn as_netmsg(&self) -> Option<&NetMsg> {
        match &self.payload {
            FramePayload::NetMsg(msg) => Some(msg),
            _ => None,
        }
    }

    /// Mutable network message contents
    pub fn as_netmsg_mut(&mut self) -> Option<&mut NetMsg> {
        match &mut self.payload {
            FramePayload::NetMsg(msg) => Some(msg),
            _ => None,
        }
    }
}
