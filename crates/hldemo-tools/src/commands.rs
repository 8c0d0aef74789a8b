//! Subcommand dispatch

use crate::config::{Cli, Command};
use crate::dump::dump;
use crate::error::Result;
use crate::sanitize::sanitize_file;
use crate::summary::summarize;
use crate::yaw::fix_yaw_file;
use hldemo_formats::DemoFile;
use std::io::Write;

/// Run the selected tool, writing its report to `out`
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    match &cli.command {
        Command::Sanitize(args) => {
            let (output, report) =
                sanitize_file(&args.demo, args.output.as_deref(), &args.limits())?;
            for truncation in &report.truncations {
                writeln!(
                    out,
                    "Sanitized a {} frame (entry {}, frame {}), size was: {}; maximum allowed is: {}.",
                    truncation.kind,
                    truncation.entry + 1,
                    truncation.frame,
                    truncation.original_len,
                    truncation.limit
                )?;
            }
            writeln!(out, "Saved {}", output.display())?;
        }
        Command::FixYaw(args) => {
            let (output, patched) = fix_yaw_file(&args.demo, args.output.as_deref(), args.yaw)?;
            writeln!(out, "Patched {} frames, saved {}", patched, output.display())?;
        }
        Command::Dump(args) => {
            let mut demo = DemoFile::open(&args.demo)?;
            dump(&mut demo, out)?;
        }
        Command::Summarize(args) => {
            let mut demo = DemoFile::open(&args.demo)?;
            let summary = summarize(&mut demo)?;
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &summary)?;
                writeln!(out)?;
            } else {
                write!(out, "{summary}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
