use std::collections::VecDeque;

use super::{ByteSource, SourceError};
use crate::frame::ByteEvent;

/// In-memory byte source.
///
/// # Examples
/// ```
/// use dxlshark_core::{ByteSource, VecSource};
///
/// let mut source = VecSource::from_bytes(&[0xFF, 0xFF], 1_000_000);
/// let first = source.next_byte().unwrap().unwrap();
/// assert_eq!(first.value, 0xFF);
/// assert!(source.next_byte().unwrap().is_some());
/// assert!(source.next_byte().unwrap().is_none());
/// ```
#[derive(Debug, Default, Clone)]
pub struct VecSource {
    events: VecDeque<ByteEvent>,
}

impl VecSource {
    pub fn new(events: Vec<ByteEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }

    /// Bytes sent back-to-back at `baud`, starting at t = 0.
    pub fn from_bytes(bytes: &[u8], baud: u32) -> Self {
        let byte_time = super::raw::byte_time(baud);
        let events = bytes
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let start = index as f64 * byte_time;
                ByteEvent::new(*value, start, start + byte_time)
            })
            .collect();
        Self { events }
    }
}

impl ByteSource for VecSource {
    fn next_byte(&mut self) -> Result<Option<ByteEvent>, SourceError> {
        Ok(self.events.pop_front())
    }
}
