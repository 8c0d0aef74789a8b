#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! End-to-end tests: demos written to a temporary directory and processed
//! through the same dispatch the binary uses

use clap::Parser;
use hldemo_formats::{
    ConsoleCommand, DemoBuffer, DemoFile, DemoHeader, DirectoryEntry, ENTRY_TYPE_NORMAL,
    ENTRY_TYPE_START, Frame, FramePayload, NetMsg, Sound,
};
use hldemo_tools::{Cli, run};
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

fn write_demo(path: &Path) {
    let mut loading = DirectoryEntry::new(ENTRY_TYPE_START, "LOADING");
    loading.frames = vec![
        Frame::new(0.0, 0, FramePayload::DemoStart),
        Frame::next_section(0.0, 1),
    ];

    let mut netmsg = NetMsg {
        tag: 1,
        ..NetMsg::default()
    };
    netmsg.info.ref_params.frametime = 0.004;
    netmsg.info.ref_params.viewangles = [0.0, 15.0, 0.0];
    netmsg.info.user_cmd.msec = 4;

    let mut playback = DirectoryEntry::new(ENTRY_TYPE_NORMAL, "Playback");
    playback.track_time = 1.5;
    playback.frame_count = 4;
    playback.frames = vec![
        Frame::new(
            0.1,
            2,
            FramePayload::ConsoleCommand(ConsoleCommand::new("+right")),
        ),
        Frame::new(
            0.2,
            3,
            FramePayload::Sound(Sound {
                sample: vec![b'x'; 400],
                ..Sound::default()
            }),
        ),
        Frame::new(
            0.3,
            4,
            FramePayload::DemoBuffer(DemoBuffer {
                buffer: vec![1; 40_000],
            }),
        ),
        Frame::new(0.4, 5, FramePayload::NetMsg(Box::new(netmsg))),
        Frame::next_section(0.5, 6),
    ];

    DemoFile::new(DemoHeader::new("bkz_goldbhop", "cstrike"), vec![loading, playback])
        .save(path)
        .unwrap();
}

fn run_args(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(std::iter::once("hldemo").chain(args.iter().copied())).unwrap();
    cli.validate().unwrap();
    let mut out = Vec::new();
    run(&cli, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn reopen(path: &Path) -> DemoFile {
    let mut demo = DemoFile::open(path).unwrap();
    demo.read_frames().unwrap();
    demo
}

#[test]
fn sanitize_writes_suffixed_copy() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("run.dem");
    write_demo(&input);

    let output = run_args(&["sanitize", input.to_str().unwrap()]);
    assert!(output.contains("size was: 400; maximum allowed is: 255."));
    assert!(output.contains("size was: 40000; maximum allowed is: 32768."));

    let sanitized = reopen(&dir.path().join("run_sanitized.dem"));
    let sizes: Vec<usize> = sanitized
        .frames()
        .filter_map(|frame| match &frame.payload {
            FramePayload::Sound(sound) => Some(sound.sample.len()),
            FramePayload::DemoBuffer(buffer) => Some(buffer.buffer.len()),
            _ => None,
        })
        .collect();
    assert_eq!(sizes, vec![255, 32768]);

    // The input is left alone
    let original = reopen(&input);
    assert_eq!(original.entries[1].frames.len(), 5);
}

#[test]
fn sanitize_honours_explicit_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("run.dem");
    let target = dir.path().join("clean.dem");
    write_demo(&input);

    run_args(&[
        "sanitize",
        input.to_str().unwrap(),
        "-o",
        target.to_str().unwrap(),
    ]);
    assert!(target.exists());
    assert!(!dir.path().join("run_sanitized.dem").exists());
}

#[test]
fn fix_yaw_patches_netmsg_frames() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("run.dem");
    write_demo(&input);

    let output = run_args(&["fix-yaw", input.to_str().unwrap(), "-45"]);
    assert!(output.starts_with("Patched 1 frames"));

    let fixed = reopen(&dir.path().join("run_fixyaw.dem"));
    let msg = fixed.frames().find_map(Frame::as_netmsg).unwrap();
    assert_eq!(msg.info.ref_params.viewangles, [0.0, -45.0, 0.0]);
    assert_eq!(msg.info.ref_params.cl_viewangles[1], -45.0);
    assert_eq!(msg.info.user_cmd.viewangles[1], -45.0);
}

#[test]
fn dump_lists_frames() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("run.dem");
    write_demo(&input);

    let output = run_args(&["dump", input.to_str().unwrap()]);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Entry 1:");
    assert_eq!(lines[1], "f: 0 t: 0.00000000 DEMO_START");
    assert_eq!(lines[3], "Entry 2:");
    assert_eq!(lines[4], "f: 2 t: 0.10000000 CONSOLE_COMMAND `+right`");
    assert_eq!(lines[7], "f: 5 t: 0.40000001 NETMSG ft: 0.00400000 ms: 4");
    assert_eq!(lines.len(), 9);
}

#[test]
fn summarize_as_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("run.dem");
    write_demo(&input);

    let output = run_args(&["summarize", "--json", input.to_str().unwrap()]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["map_name"], "bkz_goldbhop");
    assert_eq!(json["game_dir"], "cstrike");
    assert_eq!(json["segments"].as_array().unwrap().len(), 1);
    assert_eq!(json["stats"]["frames"], 1);
    assert_eq!(json["stats"]["lowest_msec"], 4);
    assert_eq!(json["camera_commands"], true);
}

#[test]
fn summarize_as_text() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("run.dem");
    write_demo(&input);

    let output = run_args(&["summarize", input.to_str().unwrap()]);
    assert!(output.contains("Map name: bkz_goldbhop\n"));
    assert!(output.contains("Lowest msec: 4 (250.00 FPS)\n"));
    assert!(output.ends_with("Found camera movement commands.\n"));
}
