use crate::frame::ProtocolVersion;
use crate::protocols::dynamixel::checksum::{Checksum, Crc16};
use crate::protocols::dynamixel::layout;

/// Position of the framing state machine inside the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Idle,
    Preamble2,
    ReadId,
    ReadLength1,
    P1Instruction,
    P1Data,
    P1Checksum,
    P2ReadId,
    P2Length1,
    P2Length2,
    P2Instruction,
    P2Data,
    P2Crc1,
    P2Crc2,
}

/// Everything known about the frame currently on the wire.
///
/// Both integrity accumulators run from the ID byte on, since the protocol
/// version is only known once the first length byte has been seen.
#[derive(Debug, Clone)]
pub(crate) struct ParserState {
    pub phase: FrameState,
    pub protocol: ProtocolVersion,
    pub id: u8,
    pub length: u16,
    pub instruction: u8,
    pub payload: Vec<u8>,
    pub checksum: Checksum,
    pub crc: Crc16,
    pub crc_low: u8,
    pub frame_start: f64,
    pub second_start: f64,
}

impl ParserState {
    pub fn new() -> Self {
        Self {
            phase: FrameState::Idle,
            protocol: ProtocolVersion::V1,
            id: 0,
            length: 0,
            instruction: 0,
            payload: Vec::new(),
            checksum: Checksum::new(),
            crc: Crc16::new(),
            crc_low: 0,
            frame_start: 0.0,
            second_start: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.phase = FrameState::Idle;
        self.protocol = ProtocolVersion::V1;
        self.id = 0;
        self.length = 0;
        self.instruction = 0;
        self.payload.clear();
        self.checksum = Checksum::new();
        self.crc = Crc16::new();
        self.crc_low = 0;
    }

    pub fn is_idle(&self) -> bool {
        self.phase == FrameState::Idle
    }

    /// Drops the oldest preamble candidate when a run of 0xFF continues.
    pub fn slide_preamble(&mut self, start: f64) {
        self.frame_start = self.second_start;
        self.second_start = start;
    }

    pub fn begin_integrity(&mut self, id: u8) {
        self.checksum = Checksum::new();
        self.checksum.update(id);
        self.crc = Crc16::new();
        for byte in layout::PREAMBLE {
            self.crc.update(byte);
        }
        self.crc.update(id);
    }

    /// Params still expected before the trailer.
    pub fn payload_target(&self) -> usize {
        let overhead = match self.protocol {
            ProtocolVersion::V1 => layout::PROTOCOL1_HEADER_OVERHEAD,
            ProtocolVersion::V2 => layout::PROTOCOL2_HEADER_OVERHEAD,
        };
        usize::from(self.length).saturating_sub(overhead)
    }
}
