use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::config::DecoderConfig;
use crate::decoder::Decoder;
use crate::source::{ByteSource, CsvExportSource, RawByteSource, SourceError};
use crate::{CaptureSummary, InputInfo, IntegritySummary, Report, make_stub_report};

mod servos;

use servos::ServoStats;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// On-disk capture layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFormat {
    /// Logic-analyzer async-serial CSV export.
    Csv,
    /// Raw bus bytes; timing is synthesized from the baud rate.
    Raw { baud: u32 },
}

pub fn analyze_capture_file(
    path: &Path,
    format: CaptureFormat,
    config: DecoderConfig,
) -> Result<Report, AnalysisError> {
    let input = InputInfo {
        path: path.display().to_string(),
        bytes: path.metadata()?.len(),
    };
    match format {
        CaptureFormat::Csv => analyze_source(input, CsvExportSource::open(path)?, config),
        CaptureFormat::Raw { baud } => {
            analyze_source(input, RawByteSource::open(path, baud)?, config)
        }
    }
}

/// Runs every byte of `source` through a fresh decoder.
///
/// # Examples
/// ```
/// use dxlshark_core::{DecoderConfig, InputInfo, VecSource, analyze_source};
///
/// let source = VecSource::from_bytes(&[0xFF, 0xFF, 0x01, 0x02, 0x01, 0xFB], 1_000_000);
/// let input = InputInfo {
///     path: "memory".to_string(),
///     bytes: 6,
/// };
/// let report = analyze_source(input, source, DecoderConfig::default())?;
/// assert_eq!(report.frames.len(), 1);
/// assert_eq!(report.servos[0].id, 1);
/// # Ok::<(), dxlshark_core::AnalysisError>(())
/// ```
pub fn analyze_source<S: ByteSource>(
    input: InputInfo,
    mut source: S,
    config: DecoderConfig,
) -> Result<Report, AnalysisError> {
    let mut decoder = Decoder::new(config);
    let mut servo_stats = ServoStats::new();
    let mut frames = Vec::new();
    let mut first_ts = None;
    let mut last_ts = None;

    while let Some(event) = source.next_byte()? {
        update_ts_bounds(&mut first_ts, &mut last_ts, event.start, event.end);
        if let Some(frame) = decoder.push(event) {
            servo_stats.add_frame(&frame);
            frames.push(frame);
        }
    }

    let stats = decoder.stats();
    debug!(
        bytes = stats.bytes,
        frames = stats.frames,
        discarded = stats.discarded_partials,
        "capture decoded"
    );

    let mut report = make_stub_report(input, config);
    report.capture_summary = Some(CaptureSummary {
        bytes_total: stats.bytes,
        frames_total: stats.frames,
        time_start: first_ts,
        time_end: last_ts,
    });
    report.integrity = IntegritySummary {
        checksum_mismatches: stats.checksum_mismatches,
        malformed_frames: stats.malformed_frames,
        discarded_partials: stats.discarded_partials,
    };
    report.servos = servo_stats.into_summaries();
    report.frames = frames;
    Ok(report)
}

fn update_ts_bounds(first: &mut Option<f64>, last: &mut Option<f64>, start: f64, end: f64) {
    match first {
        Some(existing) if *existing <= start => {}
        _ => *first = Some(start),
    }
    match last {
        Some(existing) if *existing >= end => {}
        _ => *last = Some(end),
    }
}
