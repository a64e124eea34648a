//! Byte-at-a-time framing engine.
//!
//! The `Decoder` owns the only mutable session state: the framing state
//! machine, the timeout monitor and the request context used to interpret
//! status packets. Feed it one `ByteEvent` at a time; it returns at most one
//! `DecodedFrame` per byte.

mod bulk;
mod context;
mod state;
mod timeout;

use serde::Serialize;
use tracing::{debug, trace};

pub use bulk::{BulkCorrelation, BulkRequest};
pub use context::{ReadRequest, RequestContext};
pub use state::FrameState;
pub use timeout::{TIMEOUT_FACTOR, TimeoutMonitor};

use crate::config::DecoderConfig;
use crate::frame::{ByteEvent, DecodedFrame, Integrity, ProtocolVersion};
use crate::protocols::dynamixel::instruction::Instruction;
use crate::protocols::dynamixel::layout;
use crate::protocols::dynamixel::parser::{FrameMeta, dispatch};
use crate::protocols::dynamixel::stuffing::unstuff;
use state::ParserState;

/// Running counters for one decoding session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecoderStats {
    pub bytes: u64,
    pub frames: u64,
    pub checksum_mismatches: u64,
    pub malformed_frames: u64,
    /// Partial frames dropped on an inter-byte timeout.
    pub discarded_partials: u64,
}

/// Passive decoder for a Dynamixel bus.
///
/// # Examples
/// ```
/// use dxlshark_core::{ByteEvent, Decoder, DecoderConfig, FrameKind};
///
/// let mut decoder = Decoder::new(DecoderConfig::default());
/// let bytes = [0xFF, 0xFF, 0x01, 0x02, 0x01, 0xFB];
/// let events = bytes
///     .iter()
///     .enumerate()
///     .map(|(i, b)| ByteEvent::new(*b, i as f64, i as f64 + 1.0));
/// let frames = decoder.decode(events);
/// assert_eq!(frames.len(), 1);
/// assert_eq!(frames[0].id, 1);
/// assert_eq!(frames[0].kind(), FrameKind::Simple);
/// ```
#[derive(Debug)]
pub struct Decoder {
    config: DecoderConfig,
    state: ParserState,
    timeout: TimeoutMonitor,
    context: RequestContext,
    stats: DecoderStats,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            state: ParserState::new(),
            timeout: TimeoutMonitor::new(),
            context: RequestContext::new(),
            stats: DecoderStats::default(),
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn frame_state(&self) -> FrameState {
        self.state.phase
    }

    /// Feeds one byte; returns a frame when this byte completed one.
    pub fn push(&mut self, event: ByteEvent) -> Option<DecodedFrame> {
        self.stats.bytes += 1;
        if !self.state.is_idle() {
            if let Some(gap) = self.timeout.gap_exceeded(&event) {
                debug!(
                    gap,
                    state = ?self.state.phase,
                    buffered = self.state.payload.len(),
                    "inter-byte timeout, dropping partial frame"
                );
                self.stats.discarded_partials += 1;
                self.state.reset();
            }
        }
        self.timeout.record(event);
        self.step(event)
    }

    /// Decodes every event in order.
    pub fn decode<I>(&mut self, events: I) -> Vec<DecodedFrame>
    where
        I: IntoIterator<Item = ByteEvent>,
    {
        events
            .into_iter()
            .filter_map(|event| self.push(event))
            .collect()
    }

    fn step(&mut self, event: ByteEvent) -> Option<DecodedFrame> {
        let byte = event.value;
        let state = &mut self.state;
        match state.phase {
            FrameState::Idle => {
                if byte == layout::PREAMBLE_BYTE {
                    state.frame_start = event.start;
                    state.phase = FrameState::Preamble2;
                }
            }
            FrameState::Preamble2 => {
                if byte == layout::PREAMBLE_BYTE {
                    state.second_start = event.start;
                    state.phase = FrameState::ReadId;
                } else {
                    state.reset();
                }
            }
            FrameState::ReadId => {
                if byte == layout::PREAMBLE_BYTE {
                    state.slide_preamble(event.start);
                } else {
                    state.id = byte;
                    state.begin_integrity(byte);
                    state.phase = FrameState::ReadLength1;
                }
            }
            FrameState::ReadLength1 => {
                if state.id == layout::PROTOCOL2_RESERVED_ID
                    && byte == layout::PROTOCOL2_RESERVED_BYTE
                {
                    trace!("protocol 2 header");
                    state.protocol = ProtocolVersion::V2;
                    state.crc.update(byte);
                    state.phase = FrameState::P2ReadId;
                } else if u16::from(byte) < layout::PROTOCOL1_MIN_LENGTH {
                    trace!(id = state.id, length = byte, "protocol 1 length too small");
                    state.reset();
                } else {
                    state.protocol = ProtocolVersion::V1;
                    state.length = u16::from(byte);
                    state.checksum.update(byte);
                    state.phase = FrameState::P1Instruction;
                }
            }
            FrameState::P1Instruction => {
                state.instruction = byte;
                state.checksum.update(byte);
                state.phase = if state.payload_target() == 0 {
                    FrameState::P1Checksum
                } else {
                    FrameState::P1Data
                };
            }
            FrameState::P1Data => {
                state.payload.push(byte);
                state.checksum.update(byte);
                if state.payload.len() >= state.payload_target() {
                    state.phase = FrameState::P1Checksum;
                }
            }
            FrameState::P1Checksum => {
                let integrity =
                    Integrity::check(u16::from(state.checksum.value()), u16::from(byte));
                return Some(self.finish(event.end, integrity));
            }
            FrameState::P2ReadId => {
                state.id = byte;
                state.crc.update(byte);
                state.phase = FrameState::P2Length1;
            }
            FrameState::P2Length1 => {
                state.length = u16::from(byte);
                state.crc.update(byte);
                state.phase = FrameState::P2Length2;
            }
            FrameState::P2Length2 => {
                state.length |= u16::from(byte) << 8;
                state.crc.update(byte);
                if state.length < layout::PROTOCOL2_MIN_LENGTH {
                    trace!(id = state.id, length = state.length, "protocol 2 length too small");
                    state.reset();
                } else {
                    state.phase = FrameState::P2Instruction;
                }
            }
            FrameState::P2Instruction => {
                state.instruction = byte;
                state.crc.update(byte);
                state.phase = if state.payload_target() == 0 {
                    FrameState::P2Crc1
                } else {
                    FrameState::P2Data
                };
            }
            FrameState::P2Data => {
                state.payload.push(byte);
                state.crc.update(byte);
                if state.payload.len() >= state.payload_target() {
                    state.phase = FrameState::P2Crc1;
                }
            }
            FrameState::P2Crc1 => {
                state.crc_low = byte;
                state.phase = FrameState::P2Crc2;
            }
            FrameState::P2Crc2 => {
                let actual = u16::from_le_bytes([state.crc_low, byte]);
                let integrity = Integrity::check(state.crc.value(), actual);
                return Some(self.finish(event.end, integrity));
            }
        }
        None
    }

    fn finish(&mut self, end: f64, integrity: Integrity) -> DecodedFrame {
        let state = &mut self.state;
        let protocol = state.protocol;
        let id = state.id;
        let slot = state.instruction;

        // Protocol 1 replies carry the error byte where requests carry the
        // opcode.
        let (instruction, payload) = match protocol {
            ProtocolVersion::V1 => {
                let instruction = Instruction::from(slot);
                if instruction == Instruction::Status || self.context.awaiting_reply(id) {
                    let mut payload = Vec::with_capacity(state.payload.len() + 1);
                    payload.push(slot);
                    payload.extend_from_slice(&state.payload);
                    (Instruction::Status, payload)
                } else {
                    (instruction, std::mem::take(&mut state.payload))
                }
            }
            ProtocolVersion::V2 => (Instruction::from(slot), unstuff(&state.payload)),
        };

        if let Integrity::Mismatch { expected, actual } = integrity {
            debug!(id, %protocol, expected, actual, "integrity mismatch");
            self.stats.checksum_mismatches += 1;
        }

        let meta = FrameMeta {
            protocol,
            id,
            instruction,
        };
        let body = dispatch(&meta, &payload, &self.config, &mut self.context);
        let frame = DecodedFrame {
            start: state.frame_start,
            end,
            protocol,
            id,
            instruction,
            integrity,
            body,
        };

        self.stats.frames += 1;
        if frame.is_malformed() {
            self.stats.malformed_frames += 1;
        }
        trace!(id, %protocol, instruction = %instruction.name(), "frame");
        state.reset();
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::{Decoder, FrameState};
    use crate::config::DecoderConfig;
    use crate::frame::{ByteEvent, FrameBody, Integrity, ProtocolVersion};
    use crate::protocols::dynamixel::instruction::Instruction;
    use hex_literal::hex;

    fn events(bytes: &[u8]) -> Vec<ByteEvent> {
        bytes
            .iter()
            .enumerate()
            .map(|(i, b)| ByteEvent::new(*b, i as f64, i as f64 + 1.0))
            .collect()
    }

    #[test]
    fn protocol1_ping() {
        let mut decoder = Decoder::new(DecoderConfig::default());
        let frames = decoder.decode(events(&hex!("FF FF 01 02 01 FB")));
        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert_eq!(frame.protocol, ProtocolVersion::V1);
        assert_eq!(frame.instruction, Instruction::Ping);
        assert_eq!(frame.integrity, Integrity::Valid);
        assert_eq!((frame.start, frame.end), (0.0, 6.0));
        assert!(decoder.frame_state() == FrameState::Idle);
    }

    #[test]
    fn protocol2_ping() {
        let mut decoder = Decoder::new(DecoderConfig::default());
        let frames = decoder.decode(events(&hex!("FF FF FD 00 01 03 00 01 19 4E")));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].protocol, ProtocolVersion::V2);
        assert_eq!(frames[0].id, 1);
        assert_eq!(frames[0].integrity, Integrity::Valid);
    }

    #[test]
    fn non_preamble_noise_is_ignored() {
        let mut decoder = Decoder::new(DecoderConfig::default());
        let frames = decoder.decode(events(&hex!("00 12 FF 34 FF FF 01 02 01 FB")));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].start, 4.0);
    }

    #[test]
    fn short_protocol1_length_resets() {
        let mut decoder = Decoder::new(DecoderConfig::default());
        let frames = decoder.decode(events(&hex!("FF FF 01 01 FF FF 01 02 01 FB")));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].start, 4.0);
    }

    #[test]
    fn protocol1_reply_after_read_is_status() {
        let mut decoder = Decoder::new(DecoderConfig::default());
        let frames = decoder.decode(events(&hex!(
            "FF FF 01 04 02 24 02 D2 FF FF 01 04 00 00 02 F8"
        )));
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].instruction, Instruction::Status);
        assert!(matches!(frames[1].body, FrameBody::Status { .. }));
        assert_eq!(decoder.stats().frames, 2);
    }
}
