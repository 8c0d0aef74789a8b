//! Frame stream decoding and encoding
//!
//! A segment's frame stream is decoded frame by frame until a
//! `NextSection` frame is read or the remaining input cannot hold the next
//! frame. Running short is not an error: the partial frame is dropped and
//! the frames decoded so far are returned with [`SegmentEnd::Truncated`].

use super::{
    ClientData, ConsoleCommand, DemoBuffer, DemoInfo, Event, Frame, FrameKind, FramePayload,
    NetMsg, NetSequences, Sound, WeaponAnim,
};
use crate::bounds::BoundedReader;
use crate::constants::{
    FRAME_CLIENT_DATA_SIZE, FRAME_CONSOLE_COMMAND_SIZE, FRAME_DEMO_BUFFER_SIZE, FRAME_EVENT_SIZE,
    FRAME_NETMSG_MAX_MESSAGE_LENGTH, FRAME_NETMSG_MIN_MESSAGE_LENGTH, FRAME_NETMSG_SIZE,
    FRAME_SOUND_SIZE_1, FRAME_SOUND_SIZE_2, FRAME_WEAPON_ANIM_SIZE, MIN_FRAME_SIZE,
};
use crate::error::{DemoError, Result};
use binrw::{BinRead, BinReaderExt, BinWrite, BinWriterExt};
use std::io::{Read, Seek, Write};

/// How a segment's frame stream ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEnd {
    /// A `NextSection` frame was read
    Terminated,
    /// The input ran out (or a length field was out of range)
    Truncated {
        /// Position of the frame that could not be decoded
        position: u64,
        /// Which part of the frame did not fit
        reason: &'static str,
    },
}

/// Result of decoding one frame
enum Step {
    Frame(Frame),
    Truncated(&'static str),
}

/// Read a fixed-size payload if `size` bytes remain
fn read_fixed<T, R>(reader: &mut BoundedReader<R>, size: usize) -> Result<Option<T>>
where
    T: for<'a> BinRead<Args<'a> = ()>,
    R: Read + Seek,
{
    if !reader.has_remaining(size) {
        return Ok(None);
    }
    Ok(Some(T::read_options(reader, binrw::Endian::Little, ())?))
}

/// Decode one frame at the reader's position
///
/// Returns `Ok(None)` when the input cannot hold the frame; the reader is
/// then left somewhere inside the partial frame.
pub fn read_frame<R: Read + Seek>(reader: &mut BoundedReader<R>) -> Result<Option<Frame>> {
    Ok(match decode_step(reader)? {
        Step::Frame(frame) => Some(frame),
        Step::Truncated(_) => None,
    })
}

fn decode_step<R: Read + Seek>(reader: &mut BoundedReader<R>) -> Result<Step> {
    if !reader.has_remaining(MIN_FRAME_SIZE) {
        return Ok(Step::Truncated("frame header"));
    }

    let tag: u8 = reader.read_le()?;
    let time: f32 = reader.read_le()?;
    let frame: i32 = reader.read_le()?;

    let payload = match FrameKind::from_tag(tag) {
        FrameKind::DemoStart => FramePayload::DemoStart,
        FrameKind::NextSection => FramePayload::NextSection,
        FrameKind::ConsoleCommand => {
            match read_fixed::<ConsoleCommand, _>(reader, FRAME_CONSOLE_COMMAND_SIZE)? {
                Some(command) => FramePayload::ConsoleCommand(command),
                None => return Ok(Step::Truncated("console command")),
            }
        }
        FrameKind::ClientData => {
            match read_fixed::<ClientData, _>(reader, FRAME_CLIENT_DATA_SIZE)? {
                Some(client) => FramePayload::ClientData(client),
                None => return Ok(Step::Truncated("client data")),
            }
        }
        FrameKind::Event => match read_fixed::<Event, _>(reader, FRAME_EVENT_SIZE)? {
            Some(event) => FramePayload::Event(event),
            None => return Ok(Step::Truncated("event")),
        },
        FrameKind::WeaponAnim => {
            match read_fixed::<WeaponAnim, _>(reader, FRAME_WEAPON_ANIM_SIZE)? {
                Some(anim) => FramePayload::WeaponAnim(anim),
                None => return Ok(Step::Truncated("weapon animation")),
            }
        }
        FrameKind::Sound => match read_sound(reader)? {
            Ok(sound) => FramePayload::Sound(sound),
            Err(reason) => return Ok(Step::Truncated(reason)),
        },
        FrameKind::DemoBuffer => match read_demo_buffer(reader)? {
            Ok(buffer) => FramePayload::DemoBuffer(buffer),
            Err(reason) => return Ok(Step::Truncated(reason)),
        },
        FrameKind::NetMsg(tag) => match read_netmsg(reader, tag)? {
            Ok(msg) => FramePayload::NetMsg(Box::new(msg)),
            Err(reason) => return Ok(Step::Truncated(reason)),
        },
    };

    Ok(Step::Frame(Frame::new(time, frame, payload)))
}

// The inner `Err(&str)` is a local truncation, the outer one a real failure.
type Partial<T> = Result<std::result::Result<T, &'static str>>;

fn read_sound<R: Read + Seek>(reader: &mut BoundedReader<R>) -> Partial<Sound> {
    if !reader.has_remaining(FRAME_SOUND_SIZE_1) {
        return Ok(Err("sound header"));
    }
    let channel: i32 = reader.read_le()?;
    let length: i32 = reader.read_le()?;
    if !reader.fits_declared(length, FRAME_SOUND_SIZE_2) {
        return Ok(Err("sound sample"));
    }

    let sample = reader.read_bytes(length as usize)?;
    Ok(Ok(Sound {
        channel,
        sample,
        attenuation: reader.read_le()?,
        volume: reader.read_le()?,
        flags: reader.read_le()?,
        pitch: reader.read_le()?,
    }))
}

fn read_demo_buffer<R: Read + Seek>(reader: &mut BoundedReader<R>) -> Partial<DemoBuffer> {
    if !reader.has_remaining(FRAME_DEMO_BUFFER_SIZE) {
        return Ok(Err("demo buffer length"));
    }
    let length: i32 = reader.read_le()?;
    if !reader.fits_declared(length, 0) {
        return Ok(Err("demo buffer data"));
    }
    Ok(Ok(DemoBuffer {
        buffer: reader.read_bytes(length as usize)?,
    }))
}

fn read_netmsg<R: Read + Seek>(reader: &mut BoundedReader<R>, tag: u8) -> Partial<NetMsg> {
    if !reader.has_remaining(FRAME_NETMSG_SIZE) {
        return Ok(Err("network message state"));
    }
    let info = DemoInfo::read(reader)?;
    let sequences = NetSequences::read(reader)?;

    let length: i32 = reader.read_le()?;
    if !(FRAME_NETMSG_MIN_MESSAGE_LENGTH..=FRAME_NETMSG_MAX_MESSAGE_LENGTH).contains(&length) {
        return Ok(Err("network message length"));
    }
    if !reader.fits_declared(length, 0) {
        return Ok(Err("network message data"));
    }

    Ok(Ok(NetMsg {
        tag,
        info,
        sequences,
        msg: reader.read_bytes(length as usize)?,
    }))
}

/// Decode the frame stream starting at `offset`
///
/// Stops after a `NextSection` frame or at the first frame that does not
/// fit. Frames decoded before a truncation are kept.
pub fn read_segment<R: Read + Seek>(
    reader: &mut BoundedReader<R>,
    offset: u64,
) -> Result<(Vec<Frame>, SegmentEnd)> {
    reader.seek_to(offset)?;

    let mut frames = Vec::new();
    loop {
        let position = reader.position();
        match decode_step(reader)? {
            Step::Frame(frame) => {
                let terminated = frame.is_next_section();
                frames.push(frame);
                if terminated {
                    return Ok((frames, SegmentEnd::Terminated));
                }
            }
            Step::Truncated(reason) => {
                return Ok((frames, SegmentEnd::Truncated { position, reason }));
            }
        }
    }
}

fn length_prefix(len: usize, field: &'static str) -> Result<i32> {
    i32::try_from(len).map_err(|_| DemoError::ValueOutOfRange {
        field,
        value: len as u64,
    })
}

/// Encode one frame, header and payload
///
/// A network message whose tag is one of the named kinds (2..=9) is
/// rejected, since it would decode as that kind.
pub fn write_frame<W: Write + Seek>(writer: &mut W, frame: &Frame) -> Result<()> {
    if let FramePayload::NetMsg(msg) = &frame.payload
        && !matches!(FrameKind::from_tag(msg.tag), FrameKind::NetMsg(_))
    {
        return Err(DemoError::InvalidNetMsgTag(msg.tag));
    }

    writer.write_le(&frame.kind().tag())?;
    writer.write_le(&frame.time)?;
    writer.write_le(&frame.frame)?;

    match &frame.payload {
        FramePayload::DemoStart | FramePayload::NextSection => {}
        FramePayload::ConsoleCommand(command) => command.write(writer)?,
        FramePayload::ClientData(client) => client.write(writer)?,
        FramePayload::Event(event) => event.write(writer)?,
        FramePayload::WeaponAnim(anim) => anim.write(writer)?,
        FramePayload::Sound(sound) => {
            writer.write_le(&sound.channel)?;
            writer.write_le(&length_prefix(sound.sample.len(), "sound sample length")?)?;
            writer.write_all(&sound.sample)?;
            writer.write_le(&sound.attenuation)?;
            writer.write_le(&sound.volume)?;
            writer.write_le(&sound.flags)?;
            writer.write_le(&sound.pitch)?;
        }
        FramePayload::DemoBuffer(buffer) => {
            writer.write_le(&length_prefix(buffer.buffer.len(), "demo buffer length")?)?;
            writer.write_all(&buffer.buffer)?;
        }
        FramePayload::NetMsg(msg) => {
            msg.info.write(writer)?;
            msg.sequences.write(writer)?;
            writer.write_le(&length_prefix(msg.msg.len(), "network message length")?)?;
            writer.write_all(&msg.msg)?;
        }
    }

    Ok(())
}

/// Encode a segment's frames, appending a terminator if none is present
///
/// Returns whether a terminator had to be appended.
pub fn write_segment<W: Write + Seek>(writer: &mut W, frames: &[Frame]) -> Result<bool> {
    let mut wrote_next_section = false;
    for frame in frames {
        write_frame(writer, frame)?;
        wrote_next_section |= frame.is_next_section();
    }

    if !wrote_next_section {
        write_frame(writer, &Frame::next_section(0.0, 0))?;
    }
    Ok(!wrote_next_section)
}
