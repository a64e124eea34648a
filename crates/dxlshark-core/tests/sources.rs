use std::fs;
use std::path::PathBuf;

use dxlshark_core::{
    ByteSource, CaptureFormat, CsvExportSource, DecoderConfig, ProtocolVersion, RawByteSource,
    SourceError, analyze_capture_file,
};
use tempfile::tempdir;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture(name: &str) -> PathBuf {
    repo_root().join("tests").join("fixtures").join(name)
}

#[test]
fn csv_source_skips_non_data_rows() {
    let mut source = CsvExportSource::open(&fixture("bus.csv")).unwrap();
    let mut bytes = 0;
    while let Some(_event) = source.next_byte().unwrap() {
        bytes += 1;
    }
    assert_eq!(bytes, 71);
}

#[test]
fn csv_capture_report() {
    let report = analyze_capture_file(&fixture("bus.csv"), CaptureFormat::Csv, DecoderConfig::default())
        .expect("analyze csv");

    assert_eq!(report.frames.len(), 8);
    let summary = report.capture_summary.as_ref().expect("capture summary");
    assert_eq!(summary.bytes_total, 71);
    assert_eq!(summary.frames_total, 8);
    assert_eq!(report.integrity.checksum_mismatches, 1);
    assert_eq!(report.integrity.malformed_frames, 0);
    assert_eq!(report.integrity.discarded_partials, 1);

    assert_eq!(report.servos.len(), 2);
    let servo = &report.servos[0];
    assert_eq!(servo.id, 1);
    assert_eq!(servo.instruction_frames, 4);
    assert_eq!(servo.status_frames, 3);
    assert_eq!(servo.protocols, vec![ProtocolVersion::V1, ProtocolVersion::V2]);
    assert_eq!(report.servos[1].id, 2);
    assert_eq!(report.servos[1].checksum_errors, 1);
}

#[test]
fn raw_capture_report() {
    let report = analyze_capture_file(
        &fixture("bus.bin"),
        CaptureFormat::Raw { baud: 1_000_000 },
        DecoderConfig::default(),
    )
    .expect("analyze raw");

    assert_eq!(report.frames.len(), 8);
    assert_eq!(report.integrity.discarded_partials, 0);
    assert_eq!(report.input.bytes, 66);
}

#[test]
fn report_serializes_frames_in_order() {
    let report = analyze_capture_file(&fixture("bus.csv"), CaptureFormat::Csv, DecoderConfig::default())
        .expect("analyze csv");
    let value = serde_json::to_value(&report).expect("serialize report");
    let frames = value["frames"].as_array().expect("frames array");
    let kinds: Vec<&str> = frames.iter().filter_map(|f| f["kind"].as_str()).collect();
    assert_eq!(
        kinds,
        vec!["simple", "status", "read", "status", "write", "simple", "simple", "status"]
    );
    assert_eq!(frames[3]["content"]["type"], "registers");
    assert_eq!(frames[3]["content"]["register"]["name"], "PPOS");
}

#[test]
fn csv_without_data_column_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "start_time,duration\n0.0,0.00001\n").unwrap();

    let err = match CsvExportSource::open(&path) {
        Ok(_) => panic!("expected missing column to be rejected"),
        Err(err) => err,
    };
    assert!(matches!(err, SourceError::Csv { line: 1, .. }));
}

#[test]
fn missing_file_is_io_error() {
    let err = match RawByteSource::open(&fixture("does-not-exist.bin"), 1_000_000) {
        Ok(_) => panic!("expected missing file to fail"),
        Err(err) => err,
    };
    assert!(matches!(err, SourceError::Io(_)));
}
