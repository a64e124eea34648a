//! dxlshark core library: passive Dynamixel bus decoding.
//!
//! Byte sources feed timestamped bytes into a `Decoder`, which frames
//! Protocol 1 and Protocol 2 packets, checks their integrity and decodes
//! their payload against the configured register tables. The analysis layer
//! drives a whole capture through the decoder and aggregates a deterministic
//! report. All I/O is isolated in `source`; protocol conventions live in the
//! `protocols::dynamixel` readers so parsers stay minimal.
//!
//! Invariants:
//! - At most one frame is in flight; the decoder returns to idle after every
//!   emitted frame, timeout, or malformed header.
//! - Checksum/CRC mismatches and truncated payloads are annotated, never
//!   fatal to the session.
//! - Report outputs are deterministic and stable across runs.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use dxlshark_core::{CaptureFormat, DecoderConfig, analyze_capture_file};
//!
//! let report = analyze_capture_file(
//!     Path::new("capture.csv"),
//!     CaptureFormat::Csv,
//!     DecoderConfig::default(),
//! )?;
//! println!("frames: {}", report.frames.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::Serialize;

mod analysis;
pub mod config;
pub mod decoder;
pub mod format;
pub mod frame;
pub mod protocols;
pub mod registers;
pub mod source;

pub use analysis::{AnalysisError, CaptureFormat, analyze_capture_file, analyze_source};
pub use config::{ConfigError, DecoderConfig, DisplayBase};
pub use decoder::{Decoder, DecoderStats};
pub use frame::{ByteEvent, DecodedFrame, FrameBody, FrameKind, Integrity, ProtocolVersion};
pub use source::{ByteSource, CsvExportSource, RawByteSource, SourceError, VecSource};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decoded capture with per-servo aggregates.
///
/// # Examples
/// ```
/// use dxlshark_core::{DecoderConfig, InputInfo, make_stub_report};
///
/// let input = InputInfo {
///     path: "capture.csv".to_string(),
///     bytes: 123,
/// };
/// let report = make_stub_report(input, DecoderConfig::default());
/// assert_eq!(report.report_version, dxlshark_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    pub input: InputInfo,
    /// Configuration the capture was decoded with.
    pub config: DecoderConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_summary: Option<CaptureSummary>,
    pub integrity: IntegritySummary,
    /// Per-servo summaries in ID order.
    pub servos: Vec<ServoSummary>,
    /// Every decoded frame in bus order.
    pub frames: Vec<DecodedFrame>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input capture metadata embedded in reports.
#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptureSummary {
    pub bytes_total: u64,
    pub frames_total: u64,
    /// Start of the first byte, in capture seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<f64>,
    /// End of the last byte, in capture seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegritySummary {
    pub checksum_mismatches: u64,
    pub malformed_frames: u64,
    /// Partial frames dropped by the inter-byte timeout.
    pub discarded_partials: u64,
}

impl IntegritySummary {
    pub fn is_clean(&self) -> bool {
        self.checksum_mismatches == 0 && self.malformed_frames == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServoSummary {
    pub id: u8,
    pub instruction_frames: u64,
    pub status_frames: u64,
    pub checksum_errors: u64,
    pub malformed_frames: u64,
    pub protocols: Vec<ProtocolVersion>,
}

/// Build a report with base fields filled and empty aggregates.
pub fn make_stub_report(input: InputInfo, config: DecoderConfig) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "dxlshark".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input,
        config,
        capture_summary: None,
        integrity: IntegritySummary::default(),
        servos: Vec::new(),
        frames: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{DecoderConfig, InputInfo, IntegritySummary, make_stub_report};

    #[test]
    fn stub_report_serializes_without_summary() {
        let input = InputInfo {
            path: "capture.csv".to_string(),
            bytes: 0,
        };
        let report = make_stub_report(input, DecoderConfig::default());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["tool"]["name"], "dxlshark");
        assert!(value.get("capture_summary").is_none());
        assert_eq!(value["config"]["protocol1_family"], "ax");
        assert!(value["frames"].as_array().unwrap().is_empty());
    }

    #[test]
    fn integrity_summary_cleanliness() {
        let mut summary = IntegritySummary::default();
        assert!(summary.is_clean());
        summary.discarded_partials = 3;
        assert!(summary.is_clean());
        summary.malformed_frames = 1;
        assert!(!summary.is_clean());
    }
}
