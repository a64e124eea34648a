use std::fs::File;
use std::io::{BufReader, Bytes, Read};
use std::path::Path;

use super::{ByteSource, SourceError};
use crate::frame::ByteEvent;

/// Start bit, 8 data bits, stop bit.
pub const BITS_PER_BYTE: u32 = 10;

pub(crate) fn byte_time(baud: u32) -> f64 {
    f64::from(BITS_PER_BYTE) / f64::from(baud.max(1))
}

/// Raw binary dump of bus traffic with synthesized timing.
///
/// Bytes are laid out back-to-back at the given baud rate, so the timeout
/// monitor never fires on this source.
pub struct RawByteSource<R: Read> {
    bytes: Bytes<R>,
    byte_time: f64,
    index: u64,
}

impl RawByteSource<BufReader<File>> {
    pub fn open(path: &Path, baud: u32) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), baud)
    }
}

impl<R: Read> RawByteSource<R> {
    pub fn from_reader(reader: R, baud: u32) -> Result<Self, SourceError> {
        if baud == 0 {
            return Err(SourceError::InvalidBaud { baud });
        }
        Ok(Self {
            bytes: reader.bytes(),
            byte_time: byte_time(baud),
            index: 0,
        })
    }
}

impl<R: Read> ByteSource for RawByteSource<R> {
    fn next_byte(&mut self) -> Result<Option<ByteEvent>, SourceError> {
        let Some(byte) = self.bytes.next().transpose()? else {
            return Ok(None);
        };
        let start = self.index as f64 * self.byte_time;
        self.index += 1;
        Ok(Some(ByteEvent::new(byte, start, start + self.byte_time)))
    }
}
