//! Fixed-layout frame payloads

use crate::constants::FRAME_CONSOLE_COMMAND_SIZE;
use crate::fixed_string::FixedString;
use binrw::{BinRead, BinWrite};

/// Console command typed or bound during recording (64 bytes)
#[derive(Debug, Clone, PartialEq, Eq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct ConsoleCommand {
    /// Command text, e.g. `+attack`
    pub command: FixedString<FRAME_CONSOLE_COMMAND_SIZE>,
}

impl ConsoleCommand {
    /// Create from command text
    pub fn new(command: &str) -> Self {
        Self {
            command: FixedString::new(command),
        }
    }
}

/// Client view state (32 bytes)
#[derive(Debug, Clone, PartialEq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct ClientData {
    /// View origin
    pub origin: [f32; 3],
    /// View angles (pitch, yaw, roll)
    pub viewangles: [f32; 3],
    /// Bitmask of held weapons
    pub weapon_bits: i32,
    /// Field of view
    pub fov: f32,
}

/// Game event (84 bytes)
#[derive(Debug, Clone, PartialEq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct Event {
    /// Event flags
    pub flags: i32,
    /// Event index
    pub index: i32,
    /// Playback delay
    pub delay: f32,
    /// Arguments the event was fired with
    pub args: EventArgs,
}

/// Arguments of a game event (72 bytes)
#[derive(Debug, Clone, PartialEq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct EventArgs {
    /// Argument flags
    pub flags: i32,
    /// Entity the event originates from
    pub entity_index: i32,
    /// Event origin
    pub origin: [f32; 3],
    /// Event angles
    pub angles: [f32; 3],
    /// Entity velocity
    pub velocity: [f32; 3],
    /// Whether the entity was ducking
    pub ducking: i32,
    /// Free float parameter
    pub fparam1: f32,
    /// Free float parameter
    pub fparam2: f32,
    /// Free integer parameter
    pub iparam1: i32,
    /// Free integer parameter
    pub iparam2: i32,
    /// Free boolean parameter
    pub bparam1: i32,
    /// Free boolean parameter
    pub bparam2: i32,
}

/// Weapon view model animation (8 bytes)
#[derive(Debug, Clone, PartialEq, Eq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct WeaponAnim {
    /// Animation sequence
    pub anim: i32,
    /// Body group
    pub body: i32,
}

/// Sound played on a channel
///
/// The sample name is length-prefixed on disk, which is why this payload
/// is decoded by hand in the codec rather than derived.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sound {
    /// Sound channel
    pub channel: i32,
    /// Sample path bytes
    pub sample: Vec<u8>,
    /// Attenuation
    pub attenuation: f32,
    /// Volume
    pub volume: f32,
    /// Sound flags
    pub flags: i32,
    /// Pitch
    pub pitch: i32,
}

/// Opaque client-side demo buffer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DemoBuffer {
    /// Raw bytes
    pub buffer: Vec<u8>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::constants::{FRAME_CLIENT_DATA_SIZE, FRAME_EVENT_SIZE, FRAME_WEAPON_ANIM_SIZE};
    use binrw::io::Cursor;

    fn encoded_len<T: for<'a> BinWrite<Args<'a> = ()>>(value: &T) -> usize {
        let mut out = Cursor::new(Vec::new());
        value
            .write_options(&mut out, binrw::Endian::Little, ())
            .unwrap();
        out.into_inner().len()
    }

    #[test]
    fn test_fixed_payload_sizes() {
        assert_eq!(
            encoded_len(&ConsoleCommand::new("+left")),
            FRAME_CONSOLE_COMMAND_SIZE
        );
        assert_eq!(encoded_len(&ClientData::default()), FRAME_CLIENT_DATA_SIZE);
        assert_eq!(encoded_len(&Event::default()), FRAME_EVENT_SIZE);
        assert_eq!(encoded_len(&WeaponAnim::default()), FRAME_WEAPON_ANIM_SIZE);
    }

    #[test]
    fn test_client_data_field_order() {
        let mut data = Vec::new();
        for v in [1.0f32, 2.0, 3.0, 10.0, 90.0, 0.0] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        data.extend_from_slice(&0x0100_0002i32.to_le_bytes());
        data.extend_from_slice(&90.0f32.to_le_bytes());

        let client = ClientData::read(&mut Cursor::new(&data)).unwrap();
        assert_eq!(client.origin, [1.0, 2.0, 3.0]);
        assert_eq!(client.viewangles, [10.0, 90.0, 0.0]);
        assert_eq!(client.weapon_bits, 0x0100_0002);
        assert_eq!(client.fov, 90.0);
    }
}
