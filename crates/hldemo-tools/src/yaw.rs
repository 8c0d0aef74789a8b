//! Fix the recorded view yaw

use crate::error::Result;
use crate::paths::resolve_output;
use hldemo_formats::DemoFile;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name suffix of yaw-fixed demos
pub const OUTPUT_SUFFIX: &str = "_fixyaw";

/// Set the yaw of every network message frame, returning how many frames
/// were patched
pub fn fix_yaw(demo: &mut DemoFile, yaw: f32) -> Result<usize> {
    demo.read_frames()?;

    let mut patched = 0;
    for msg in demo.frames_mut().filter_map(|frame| frame.as_netmsg_mut()) {
        msg.set_yaw(yaw);
        patched += 1;
    }
    Ok(patched)
}

/// Fix the yaw of the demo at `input` and save it to `output`, or next to
/// the input with the `_fixyaw` suffix
pub fn fix_yaw_file(input: &Path, output: Option<&Path>, yaw: f32) -> Result<(PathBuf, usize)> {
    let output = resolve_output(input, output, OUTPUT_SUFFIX)?;

    let mut demo = DemoFile::open(input)?;
    info!("Fixing the yaw in {} to {}", input.display(), yaw);
    let patched = fix_yaw(&mut demo, yaw)?;
    demo.save(&output)?;

    info!("Saved {} ({} frames patched)", output.display(), patched);
    Ok((output, patched))
}
