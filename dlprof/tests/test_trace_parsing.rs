use dlprof::domain::{Address, SlotIndex};
use dlprof::symbolization::SymbolTable;
use dlprof::trace::TraceScan;

const TRACE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/two_pass.trace");
const SYMBOLS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/symbols.txt");

#[test]
fn test_parse_trace_from_file_succeeds() {
    let result = TraceScan::from_file(TRACE);
    assert!(result.is_ok(), "Failed to parse trace file: {:?}", result.err());

    let scan = result.unwrap();
    assert_eq!(scan.stats.lines, 32);
    assert_eq!(scan.stats.samples, 10);
    assert_eq!(scan.batches.len(), 2, "Should have one batch per traced frame");
}

#[test]
fn test_parse_trace_counts_malformed_directives() {
    let scan = TraceScan::from_file(TRACE).unwrap();
    assert_eq!(scan.stats.malformed_lists, 1);
    assert_eq!(scan.stats.list_directives, 18);
    assert_eq!(scan.stats.overlay_directives, 3);
}

#[test]
fn test_batches_keep_their_samples_in_order() {
    let scan = TraceScan::from_file(TRACE).unwrap();

    let slots: Vec<usize> = scan.batches[0].samples.iter().map(|s| s.slot.0).collect();
    assert_eq!(slots, vec![0, 0, 1, 1, 2, 2, 3, 3]);
    assert_eq!(scan.batches[1].samples.len(), 2);
    assert_eq!(scan.batches[1].samples[0].slot, SlotIndex(0));
}

#[test]
fn test_each_batch_sees_its_own_frame_tree() {
    let scan = TraceScan::from_file(TRACE).unwrap();

    let first = scan.batches[0].root.expect("first frame has a list dump");
    let second = scan.batches[1].root.expect("second frame has a list dump");
    assert_eq!(scan.lists.list_len(first), 5);
    assert_eq!(scan.lists.list_len(second), 3);
}

#[test]
fn test_labels_are_synthesized_per_batch() {
    let symbols = SymbolTable::from_file(SYMBOLS).unwrap();
    let mut scan = TraceScan::from_file(TRACE).unwrap();

    assert_eq!(scan.label_anonymous_calls(&symbols), 1);

    let first = &scan.batches[0].overlay;
    assert_eq!(first.get(Address(0x0600_0000)), Some("wall_dl+floor_dl,floor_dl_alias"));
    assert_eq!(first.get(Address(0x8020_0000)), Some("hud_overlay"));

    // Overlay was cleared before the second frame
    let second = &scan.batches[1].overlay;
    assert_eq!(second.get(Address(0x8020_0000)), None);
}

#[test]
fn test_parse_invalid_file_returns_error() {
    let result = TraceScan::from_file("nonexistent.trace");
    assert!(result.is_err(), "Should fail for missing file");
}

#[test]
fn test_parse_noise_only_trace() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "booting\nno samples here\naddr clearall").unwrap();

    let scan = TraceScan::from_file(temp_file.path()).unwrap();
    assert!(scan.batches.is_empty());
    assert_eq!(scan.stats.ignored, 2);
}

#[test]
fn test_invalid_utf8_line_does_not_abort_scan() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(
            b"\xff\xfe serial noise\n\
              0/2 0xf600000000000000 ms 0.000\n\
              1/2 0xe900000000000000 ms 1.000\n",
        )
        .unwrap();

    let scan = TraceScan::from_file(temp_file.path()).expect("corrupt bytes must not be fatal");
    assert_eq!(scan.stats.lines, 3);
    assert_eq!(scan.stats.ignored, 1);
    assert_eq!(scan.batches.len(), 1);
    assert_eq!(scan.batches[0].samples.len(), 2);
}
