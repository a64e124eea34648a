use std::collections::{BTreeMap, BTreeSet};

use crate::ServoSummary;
use crate::frame::{DecodedFrame, FrameBody, ProtocolVersion};

#[derive(Debug, Default)]
struct ServoCounters {
    instruction_frames: u64,
    status_frames: u64,
    checksum_errors: u64,
    malformed_frames: u64,
    protocols: BTreeSet<ProtocolVersion>,
}

/// Per-ID frame counters, kept in ID order.
#[derive(Debug, Default)]
pub(crate) struct ServoStats {
    servos: BTreeMap<u8, ServoCounters>,
}

impl ServoStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_frame(&mut self, frame: &DecodedFrame) {
        let counters = self.servos.entry(frame.id).or_default();
        counters.protocols.insert(frame.protocol);
        match frame.body {
            FrameBody::Status { .. } => counters.status_frames += 1,
            FrameBody::Error { .. } => counters.malformed_frames += 1,
            _ => counters.instruction_frames += 1,
        }
        if !frame.integrity.is_valid() {
            counters.checksum_errors += 1;
        }
    }

    pub fn into_summaries(self) -> Vec<ServoSummary> {
        self.servos
            .into_iter()
            .map(|(id, counters)| ServoSummary {
                id,
                instruction_frames: counters.instruction_frames,
                status_frames: counters.status_frames,
                checksum_errors: counters.checksum_errors,
                malformed_frames: counters.malformed_frames,
                protocols: counters.protocols.into_iter().collect(),
            })
            .collect()
    }
}
