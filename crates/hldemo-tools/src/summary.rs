//! Demo summary: header fields, segments and frame rate statistics
//!
//! The statistics come from network message frames. `ref_params.frametime`
//! gives the rendered frame rate and `user_cmd.msec` the command rate the
//! server saw. Camera-turning console commands are flagged because they
//! are not allowed in most speedrun categories.

use crate::error::Result;
use hldemo_formats::{DemoError, DemoFile, FramePayload};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Console commands that turn the camera without the mouse
pub const CAMERA_COMMANDS: [&str; 4] = ["+lookup", "+lookdown", "+left", "+right"];

/// Everything `summarize` reports about a demo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoSummary {
    /// Demo protocol version
    pub demo_protocol: i32,
    /// Network protocol version
    pub net_protocol: i32,
    /// Map name
    pub map_name: String,
    /// Game directory
    pub game_dir: String,
    /// Playback segments (the loading segment is left out)
    pub segments: Vec<SegmentSummary>,
    /// Whether the frame streams could be decoded; false for demo
    /// protocols other than 5, which only get header and segment info
    pub frames_decoded: bool,
    /// Network message statistics, absent when there are no such frames
    /// or they were not decoded
    pub stats: Option<FrameStats>,
    /// Whether any camera-turning console command was recorded
    pub camera_commands: bool,
}

/// Directory entry as listed in a summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSummary {
    /// 1-based position in the directory
    pub index: usize,
    /// Segment type label
    pub segment_type: &'static str,
    /// Entry description
    pub description: String,
    /// Recorded segment length in seconds (approximate)
    pub track_time: f32,
    /// Recorded frame count
    pub frame_count: i32,
}

/// Frame rate statistics over all network message frames
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStats {
    /// Number of network message frames
    pub frames: usize,
    /// Frame rate of the shortest frame
    pub highest_fps: f64,
    /// Frame rate of the longest frame
    pub lowest_fps: f64,
    /// Frames divided by total frame time
    pub average_fps: f64,
    /// Shortest command duration
    pub lowest_msec: i8,
    /// Longest command duration
    pub highest_msec: i8,
    /// Mean command duration
    pub average_msec: f64,
}

impl FrameStats {
    fn from_samples(samples: &[(f32, i8)]) -> Option<Self> {
        let (&(first_ft, first_ms), rest) = samples.split_first()?;

        let mut frametime_min = first_ft;
        let mut frametime_max = first_ft;
        let mut msec_min = first_ms;
        let mut msec_max = first_ms;
        let mut frametime_sum = f64::from(first_ft);
        let mut msec_sum = i64::from(first_ms);
        for &(frametime, msec) in rest {
            frametime_min = frametime_min.min(frametime);
            frametime_max = frametime_max.max(frametime);
            msec_min = msec_min.min(msec);
            msec_max = msec_max.max(msec);
            frametime_sum += f64::from(frametime);
            msec_sum += i64::from(msec);
        }

        let count = samples.len() as f64;
        Some(Self {
            frames: samples.len(),
            highest_fps: 1.0 / f64::from(frametime_min),
            lowest_fps: 1.0 / f64::from(frametime_max),
            average_fps: count / frametime_sum,
            lowest_msec: msec_min,
            highest_msec: msec_max,
            average_msec: msec_sum as f64 / count,
        })
    }
}

/// Frame rate implied by a command duration in milliseconds
pub fn msec_fps(msec: f64) -> f64 {
    1000.0 / msec
}

/// Decode the demo's frames and collect its summary
///
/// A demo with an unsupported protocol still gets its header and segment
/// info; only the frame statistics are left out.
pub fn summarize(demo: &mut DemoFile) -> Result<DemoSummary> {
    let frames_decoded = match demo.read_frames() {
        Ok(()) => true,
        Err(DemoError::UnsupportedProtocol { found, supported }) => {
            warn!("Demo protocol {found} is not supported (expected {supported}), frames not decoded");
            false
        }
        Err(err) => return Err(err.into()),
    };

    let segments = demo
        .entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| !entry.is_start_segment())
        .map(|(index, entry)| SegmentSummary {
            index: index + 1,
            segment_type: "normal",
            description: entry.description.to_string(),
            track_time: entry.track_time,
            frame_count: entry.frame_count,
        })
        .collect();

    let mut samples = Vec::new();
    let mut camera_commands = false;
    for frame in demo.frames() {
        match &frame.payload {
            FramePayload::NetMsg(msg) => {
                samples.push((msg.info.ref_params.frametime, msg.info.user_cmd.msec));
            }
            FramePayload::ConsoleCommand(command) => {
                camera_commands |= CAMERA_COMMANDS.iter().any(|c| command.command == *c);
            }
            _ => {}
        }
    }

    Ok(DemoSummary {
        demo_protocol: demo.header.demo_protocol,
        net_protocol: demo.header.net_protocol,
        map_name: demo.header.map_name.to_string(),
        game_dir: demo.header.game_dir.to_string(),
        segments,
        frames_decoded,
        stats: FrameStats::from_samples(&samples),
        camera_commands,
    })
}

impl fmt::Display for DemoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Demo protocol: {}", self.demo_protocol)?;
        writeln!(f, "Net protocol: {}", self.net_protocol)?;
        writeln!(f, "Map name: {}", self.map_name)?;
        writeln!(f, "Game directory: {}", self.game_dir)?;
        writeln!(f)?;

        for segment in &self.segments {
            writeln!(f, "{}:", segment.index)?;
            writeln!(f, "\tType: {} segment", segment.segment_type)?;
            writeln!(f, "\tDescription: {}", segment.description)?;
            writeln!(f, "\tTime (inaccurate): {}s", segment.track_time)?;
            writeln!(f, "\tFrames: {}", segment.frame_count)?;
        }
        writeln!(f)?;

        if !self.frames_decoded {
            return writeln!(
                f,
                "Frames not decoded: demo protocol {} is not supported.",
                self.demo_protocol
            );
        }
        let Some(stats) = &self.stats else {
            return writeln!(f, "There are no demo frames.");
        };
        writeln!(f, "Highest FPS: {:.2}", stats.highest_fps)?;
        writeln!(f, "Lowest FPS: {:.2}", stats.lowest_fps)?;
        writeln!(f, "Average FPS: {:.2}", stats.average_fps)?;
        writeln!(
            f,
            "Lowest msec: {} ({:.2} FPS)",
            stats.lowest_msec,
            msec_fps(f64::from(stats.lowest_msec))
        )?;
        writeln!(
            f,
            "Highest msec: {} ({:.2} FPS)",
            stats.highest_msec,
            msec_fps(f64::from(stats.highest_msec))
        )?;
        writeln!(
            f,
            "Average msec: {:.2} ({:.2} FPS)",
            stats.average_msec,
            msec_fps(stats.average_msec)
        )?;

        if self.camera_commands {
            writeln!(f)?;
            writeln!(f, "Found camera movement commands.")?;
        }
        Ok(())
    }
}
