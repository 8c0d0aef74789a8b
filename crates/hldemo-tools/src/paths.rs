//! Output file naming

use crate::error::{Result, ToolError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Derive an output path next to `input` by inserting `suffix` before the
/// last extension of the file name, or appending it when there is none.
///
/// `demos/match.dem` with `_fixyaw` becomes `demos/match_fixyaw.dem`.
pub fn output_path(input: &Path, suffix: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| ToolError::NoFileName(input.to_path_buf()))?;

    let mut name = OsString::from(stem);
    name.push(suffix);
    if let Some(extension) = input.extension() {
        name.push(".");
        name.push(extension);
    }

    Ok(input.with_file_name(name))
}

/// Use `explicit` when given, otherwise derive from `input` and `suffix`
pub fn resolve_output(input: &Path, explicit: Option<&Path>, suffix: &str) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => output_path(input, suffix),
    }
}
