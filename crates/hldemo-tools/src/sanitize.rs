//! Demo sanitizer
//!
//! The engine copies sound sample names into a 256-byte buffer (with a NUL
//! appended) and demo buffers into a 32 KiB buffer. Frames that declare
//! more than that are cut down to fit before the demo is saved again.

use crate::error::Result;
use crate::paths::resolve_output;
use hldemo_formats::{DemoFile, FrameKind, FramePayload};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Longest sound sample name the engine accepts
pub const DEFAULT_MAX_SAMPLE_LEN: usize = 255;
/// Largest demo buffer the engine accepts
pub const DEFAULT_MAX_BUFFER_LEN: usize = 32768;
/// File name suffix of sanitized demos
pub const OUTPUT_SUFFIX: &str = "_sanitized";

/// Size limits applied by [`sanitize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeLimits {
    /// Maximum sound sample length in bytes
    pub max_sample_len: usize,
    /// Maximum demo buffer length in bytes
    pub max_buffer_len: usize,
}

impl Default for SanitizeLimits {
    fn default() -> Self {
        Self {
            max_sample_len: DEFAULT_MAX_SAMPLE_LEN,
            max_buffer_len: DEFAULT_MAX_BUFFER_LEN,
        }
    }
}

/// One payload that was cut down
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Truncation {
    /// Directory entry index
    pub entry: usize,
    /// Frame index within the entry
    pub frame: usize,
    /// Frame kind name
    pub kind: &'static str,
    /// Length before truncation
    pub original_len: usize,
    /// Length after truncation
    pub limit: usize,
}

/// Everything [`sanitize`] changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    /// Truncated payloads in file order
    pub truncations: Vec<Truncation>,
}

impl SanitizeReport {
    /// Whether nothing had to be changed
    pub fn is_clean(&self) -> bool {
        self.truncations.is_empty()
    }
}

fn clamp(data: &mut Vec<u8>, limit: usize) -> Option<usize> {
    let original = data.len();
    (original > limit).then(|| {
        data.truncate(limit);
        original
    })
}

/// Decode the demo's frames and cut oversized payloads down to `limits`
pub fn sanitize(demo: &mut DemoFile, limits: &SanitizeLimits) -> Result<SanitizeReport> {
    demo.read_frames()?;

    let mut report = SanitizeReport::default();
    for (entry_index, entry) in demo.entries.iter_mut().enumerate() {
        for (frame_index, frame) in entry.frames.iter_mut().enumerate() {
            let (data, limit, kind) = match &mut frame.payload {
                FramePayload::Sound(sound) => {
                    (&mut sound.sample, limits.max_sample_len, FrameKind::Sound)
                }
                FramePayload::DemoBuffer(buffer) => {
                    (&mut buffer.buffer, limits.max_buffer_len, FrameKind::DemoBuffer)
                }
                _ => continue,
            };

            if let Some(original_len) = clamp(data, limit) {
                warn!(
                    "Sanitized a {} frame in entry {}, size was {}; maximum allowed is {}",
                    kind, entry_index, original_len, limit
                );
                report.truncations.push(Truncation {
                    entry: entry_index,
                    frame: frame_index,
                    kind: kind.name(),
                    original_len,
                    limit,
                });
            }
        }
    }

    Ok(report)
}

/// Sanitize the demo at `input` and save it to `output`, or next to the
/// input with the `_sanitized` suffix
pub fn sanitize_file(
    input: &Path,
    output: Option<&Path>,
    limits: &SanitizeLimits,
) -> Result<(PathBuf, SanitizeReport)> {
    let output = resolve_output(input, output, OUTPUT_SUFFIX)?;

    let mut demo = DemoFile::open(input)?;
    info!("Sanitizing {}", input.display());
    let report = sanitize(&mut demo, limits)?;
    demo.save(&output)?;

    info!(
        "Saved {} ({} payloads truncated)",
        output.display(),
        report.truncations.len()
    );
    Ok((output, report))
}
