//! Command-line tools for GoldSrc demo files.
//!
//! Each tool is a library function over [`hldemo_formats::DemoFile`] plus a
//! subcommand of the `hldemo` binary:
//! - `sanitize`: truncate sound samples and demo buffers the engine would
//!   overflow on
//! - `fix-yaw`: overwrite the recorded view yaw
//! - `dump`: list every frame
//! - `summarize`: header, segments, frame rate statistics and camera
//!   command detection, as text or JSON
//!
//! # Example
//!
//! ```no_run
//! use hldemo_formats::DemoFile;
//! use hldemo_tools::summary::summarize;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut demo = DemoFile::open("run.dem")?;
//!     let summary = summarize(&mut demo)?;
//!     print!("{summary}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod commands;
pub mod config;
pub mod dump;
pub mod error;
pub mod paths;
pub mod sanitize;
pub mod summary;
pub mod yaw;

pub use commands::run;
pub use config::{Cli, Command};
pub use error::{ConfigError, Result, ToolError};
