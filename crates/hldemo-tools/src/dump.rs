//! Frame-by-frame listing

use crate::error::Result;
use hldemo_formats::{DemoFile, Frame, FramePayload};
use std::io::Write;

/// Format one frame as a dump line (without the newline)
pub fn frame_line(frame: &Frame) -> String {
    let mut line = format!("f: {} t: {:.8} {}", frame.frame, frame.time, frame.kind());
    match &frame.payload {
        FramePayload::ConsoleCommand(command) => {
            line.push_str(&format!(" `{}`", command.command));
        }
        FramePayload::NetMsg(msg) => {
            line.push_str(&format!(
                " ft: {:.8} ms: {}",
                msg.info.ref_params.frametime, msg.info.user_cmd.msec
            ));
        }
        _ => {}
    }
    line
}

/// Decode the demo's frames and write one line per frame, grouped by entry
pub fn dump<W: Write>(demo: &mut DemoFile, out: &mut W) -> Result<()> {
    demo.read_frames()?;

    for (index, entry) in demo.entries.iter().enumerate() {
        writeln!(out, "Entry {}:", index + 1)?;
        for frame in &entry.frames {
            writeln!(out, "{}", frame_line(frame))?;
        }
    }
    Ok(())
}
