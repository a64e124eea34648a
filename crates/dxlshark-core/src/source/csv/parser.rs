use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::trace;

use super::error::CsvSourceError;
use super::layout;
use super::reader::{Columns, Timing, parse_byte, parse_seconds, split_record};
use crate::frame::ByteEvent;
use crate::source::{ByteSource, SourceError};

/// Byte source over a logic-analyzer async-serial CSV export.
///
/// Rows whose `type` is not `data`, or that carry a framing/parity error,
/// are skipped.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use dxlshark_core::{ByteSource, CsvExportSource};
///
/// let csv = "name,type,start_time,duration,data,error\n\
///            Async Serial,data,0.0,0.00001,0xFF,\n";
/// let mut source = CsvExportSource::from_reader(Cursor::new(csv))?;
/// let event = source.next_byte()?.expect("one byte");
/// assert_eq!(event.value, 0xFF);
/// # Ok::<(), dxlshark_core::SourceError>(())
/// ```
pub struct CsvExportSource<R: BufRead> {
    lines: Lines<R>,
    columns: Columns,
    line: usize,
}

impl CsvExportSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: BufRead> CsvExportSource<R> {
    pub fn from_reader(reader: R) -> Result<Self, SourceError> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(CsvSourceError::Header {
                    message: "empty file".to_string(),
                }
                .into());
            }
        };
        let header = header.trim_start_matches('\u{feff}');
        let columns = Columns::from_header(&split_record(header))?;
        Ok(Self {
            lines,
            columns,
            line: 1,
        })
    }

    fn parse_row(&self, fields: &[String]) -> Result<Option<ByteEvent>, CsvSourceError> {
        let columns = &self.columns;
        if let Some(kind) = columns.kind.and_then(|index| fields.get(index)) {
            if !kind.trim().eq_ignore_ascii_case(layout::DATA_ROW_TYPE) {
                return Ok(None);
            }
        }
        if let Some(error) = columns.error.and_then(|index| fields.get(index)) {
            if !error.trim().is_empty() {
                trace!(line = self.line, error = %error.trim(), "skipping errored byte");
                return Ok(None);
            }
        }

        let start = self.seconds(fields, columns.start, "start_time")?;
        let end = match columns.timing {
            Timing::Duration(index) => start + self.seconds(fields, index, "duration")?,
            Timing::End(index) => self.seconds(fields, index, "end_time")?,
        };
        let raw = self.field(fields, columns.data, "data")?;
        let value = parse_byte(raw).ok_or_else(|| self.row_error(format!("invalid byte value {raw:?}")))?;
        Ok(Some(ByteEvent::new(value, start, end)))
    }

    fn field<'f>(&self, fields: &'f [String], index: usize, label: &str) -> Result<&'f str, CsvSourceError> {
        fields
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.row_error(format!("missing {label} field")))
    }

    fn seconds(&self, fields: &[String], index: usize, label: &str) -> Result<f64, CsvSourceError> {
        let raw = self.field(fields, index, label)?;
        parse_seconds(raw).ok_or_else(|| self.row_error(format!("invalid {label} {raw:?}")))
    }

    fn row_error(&self, message: String) -> CsvSourceError {
        CsvSourceError::Row {
            line: self.line,
            message,
        }
    }
}

impl<R: BufRead> ByteSource for CsvExportSource<R> {
    fn next_byte(&mut self) -> Result<Option<ByteEvent>, SourceError> {
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            let line = line?;
            self.line += 1;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_record(&line);
            if let Some(event) = self.parse_row(&fields)? {
                return Ok(Some(event));
            }
        }
    }
}
