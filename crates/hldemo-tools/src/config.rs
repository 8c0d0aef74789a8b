//! Command-line configuration.
//!
//! Tool options come from CLI arguments, with environment fallbacks for the
//! sanitizer limits:
//! - `HLDEMO_MAX_SAMPLE_LEN`
//! - `HLDEMO_MAX_BUFFER_LEN`
//!
//! # Example
//!
//! ```no_run
//! use hldemo_tools::Cli;
//!
//! let cli = Cli::from_args();
//! cli.validate().expect("Invalid configuration");
//! ```

use crate::error::ConfigError;
use crate::sanitize::{DEFAULT_MAX_BUFFER_LEN, DEFAULT_MAX_SAMPLE_LEN, SanitizeLimits};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Top-level command line.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hldemo",
    about = "Inspect and repair GoldSrc demo files",
    version
)]
pub struct Cli {
    /// Tool to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available tools.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Truncate oversized sound samples and demo buffers
    Sanitize(SanitizeArgs),
    /// Overwrite the recorded view yaw of every network message frame
    FixYaw(FixYawArgs),
    /// Print every frame, grouped by segment
    Dump(DumpArgs),
    /// Print header, segments and frame rate statistics
    Summarize(SummarizeArgs),
}

/// Options of `hldemo sanitize`.
#[derive(Debug, Clone, Args)]
pub struct SanitizeArgs {
    /// Demo to sanitize
    pub demo: PathBuf,

    /// Output path (defaults to `<demo>_sanitized.dem`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Longest sound sample name to keep
    #[arg(long, env = "HLDEMO_MAX_SAMPLE_LEN", default_value_t = DEFAULT_MAX_SAMPLE_LEN)]
    pub max_sample_len: usize,

    /// Largest demo buffer to keep
    #[arg(long, env = "HLDEMO_MAX_BUFFER_LEN", default_value_t = DEFAULT_MAX_BUFFER_LEN)]
    pub max_buffer_len: usize,
}

impl SanitizeArgs {
    /// Limits to apply
    pub fn limits(&self) -> SanitizeLimits {
        SanitizeLimits {
            max_sample_len: self.max_sample_len,
            max_buffer_len: self.max_buffer_len,
        }
    }
}

/// Options of `hldemo fix-yaw`.
#[derive(Debug, Clone, Args)]
pub struct FixYawArgs {
    /// Demo to patch
    pub demo: PathBuf,

    /// Yaw in degrees
    #[arg(allow_negative_numbers = true)]
    pub yaw: f32,

    /// Output path (defaults to `<demo>_fixyaw.dem`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Options of `hldemo dump`.
#[derive(Debug, Clone, Args)]
pub struct DumpArgs {
    /// Demo to list
    pub demo: PathBuf,
}

/// Options of `hldemo summarize`.
#[derive(Debug, Clone, Args)]
pub struct SummarizeArgs {
    /// Demo to summarize
    pub demo: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Reject an output that names the input, textually or (when both exist)
/// after canonicalization
fn check_output(input: &Path, output: Option<&Path>) -> Result<(), ConfigError> {
    let Some(output) = output else {
        return Ok(());
    };
    let same_file = output == input
        || matches!(
            (input.canonicalize(), output.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        );
    if same_file {
        return Err(ConfigError::OutputIsInput(output.to_path_buf()));
    }
    Ok(())
}

impl Cli {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - A sanitizer limit is zero
    /// - The yaw is not finite
    /// - An explicit output path names the input demo
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.command {
            Command::Sanitize(args) => {
                if args.max_sample_len == 0 {
                    return Err(ConfigError::InvalidLimit {
                        name: "max-sample-len",
                        value: args.max_sample_len,
                    });
                }
                if args.max_buffer_len == 0 {
                    return Err(ConfigError::InvalidLimit {
                        name: "max-buffer-len",
                        value: args.max_buffer_len,
                    });
                }
                check_output(&args.demo, args.output.as_deref())
            }
            Command::FixYaw(args) => {
                if !args.yaw.is_finite() {
                    return Err(ConfigError::InvalidYaw(args.yaw));
                }
                check_output(&args.demo, args.output.as_deref())
            }
            Command::Dump(_) | Command::Summarize(_) => Ok(()),
        }
    }
}
