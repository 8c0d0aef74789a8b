#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Property tests for the signature check and directory validation

use hldemo_formats::constants::HEADER_SIZE;
use hldemo_formats::{
    DemoError, DemoFile, DemoHeader, DirectoryEntry, ENTRY_TYPE_NORMAL, FormatError, Frame,
    FramePayload, is_valid_demo,
};
use proptest::prelude::*;

fn one_entry_demo() -> Vec<u8> {
    let mut entry = DirectoryEntry::new(ENTRY_TYPE_NORMAL, "Playback");
    entry.frames = vec![Frame::new(0.0, 0, FramePayload::DemoStart)];
    DemoFile::new(DemoHeader::new("c1a0", "valve"), vec![entry])
        .to_bytes()
        .unwrap()
}

/// Overwrite the directory's entry count, padding the file so that the
/// table always fits when the count is in range
fn with_entry_count(count: i32) -> Vec<u8> {
    let mut data = one_entry_demo();
    let directory = i32::from_le_bytes(data[540..544].try_into().unwrap()) as usize;
    data[directory..directory + 4].copy_from_slice(&count.to_le_bytes());
    let table = directory + 4 + 1024 * 92;
    if data.len() < table {
        data.resize(table, 0);
    }
    data
}

proptest! {
    #[test]
    fn signature_check_matches_prefix_and_length(
        tail in prop::collection::vec(any::<u8>(), 0..700),
        prefix in prop::array::uniform6(any::<u8>()),
    ) {
        let mut data = prefix.to_vec();
        data.extend_from_slice(&tail);

        let expected = data.len() >= HEADER_SIZE && &prefix == b"HLDEMO";
        prop_assert_eq!(is_valid_demo(&data), expected);
    }

    #[test]
    fn signature_check_accepts_any_padding(
        padding in prop::array::uniform2(any::<u8>()),
        len in HEADER_SIZE..1200usize,
    ) {
        let mut data = b"HLDEMO".to_vec();
        data.extend_from_slice(&padding);
        data.resize(len, 0);
        prop_assert!(is_valid_demo(&data));
    }

    #[test]
    fn entry_count_outside_range_is_rejected(
        count in prop_oneof![i32::MIN..=0i32, 1025..=i32::MAX],
    ) {
        let err = DemoFile::from_bytes(with_entry_count(count)).unwrap_err();
        let is_count_error = matches!(
            err,
            DemoError::Format(FormatError::InvalidEntryCount { count: c, .. }) if c == count
        );
        prop_assert!(is_count_error);
    }

    #[test]
    fn entry_count_in_range_is_accepted(count in 1..=1024i32) {
        let demo = DemoFile::from_bytes(with_entry_count(count)).unwrap();
        prop_assert_eq!(demo.entries.len(), count as usize);
    }
}
