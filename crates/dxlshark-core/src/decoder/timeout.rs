use crate::frame::ByteEvent;

/// Inter-byte gap, in byte durations, after which a partial frame is dropped.
pub const TIMEOUT_FACTOR: f64 = 3.0;

/// Tracks the previous byte so the next one can be checked for a bus gap.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeoutMonitor {
    last: Option<ByteEvent>,
}

impl TimeoutMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the gap when `next` arrives too long after the previous byte.
    pub fn gap_exceeded(&self, next: &ByteEvent) -> Option<f64> {
        let last = self.last?;
        let gap = next.start - last.end;
        (gap > TIMEOUT_FACTOR * last.duration()).then_some(gap)
    }

    pub fn record(&mut self, event: ByteEvent) {
        self.last = Some(event);
    }
}

#[cfg(test)]
mod tests {
    use super::TimeoutMonitor;
    use crate::frame::ByteEvent;

    #[test]
    fn back_to_back_bytes_never_time_out() {
        let mut monitor = TimeoutMonitor::new();
        monitor.record(ByteEvent::new(0xFF, 0.0, 1.0));
        assert_eq!(monitor.gap_exceeded(&ByteEvent::new(0xFF, 1.0, 2.0)), None);
    }

    #[test]
    fn gap_is_compared_to_previous_byte_duration() {
        let mut monitor = TimeoutMonitor::new();
        monitor.record(ByteEvent::new(0xFF, 0.0, 1.0));
        assert_eq!(monitor.gap_exceeded(&ByteEvent::new(0x01, 4.0, 5.0)), None);
        assert_eq!(monitor.gap_exceeded(&ByteEvent::new(0x01, 4.5, 5.5)), Some(3.5));
    }

    #[test]
    fn first_byte_has_nothing_to_compare() {
        let monitor = TimeoutMonitor::new();
        assert_eq!(monitor.gap_exceeded(&ByteEvent::new(0xFF, 100.0, 101.0)), None);
    }
}
