pub mod csv;
mod memory;
mod raw;

pub use csv::CsvExportSource;
pub use memory::VecSource;
pub use raw::{BITS_PER_BYTE, RawByteSource};

use thiserror::Error;

use crate::frame::ByteEvent;

/// Anything that yields timestamped bus bytes in arrival order.
pub trait ByteSource {
    fn next_byte(&mut self) -> Result<Option<ByteEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error (line {line}): {message}")]
    Csv { line: usize, message: String },
    #[error("invalid baud rate: {baud}")]
    InvalidBaud { baud: u32 },
}

impl From<csv::error::CsvSourceError> for SourceError {
    fn from(value: csv::error::CsvSourceError) -> Self {
        match value {
            csv::error::CsvSourceError::Io(err) => SourceError::Io(err),
            csv::error::CsvSourceError::Header { message } => SourceError::Csv { line: 1, message },
            csv::error::CsvSourceError::Row { line, message } => SourceError::Csv { line, message },
        }
    }
}
