//! Input and output records of the decoder.
//!
//! `ByteEvent` is what the capture front end hands in; `DecodedFrame` is the
//! only thing that comes out. Each `FrameBody` variant carries just the
//! fields that make sense for its instruction family.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocols::dynamixel::error::PayloadError;
use crate::protocols::dynamixel::instruction::Instruction;
use crate::protocols::dynamixel::status::StatusError;
use crate::registers::{RegisterRef, RegisterValue};

/// One byte off the bus with its capture timestamps (seconds).
///
/// # Examples
/// ```
/// use dxlshark_core::ByteEvent;
///
/// let event = ByteEvent::new(0xFF, 0.0, 0.000_010);
/// assert!((event.duration() - 0.000_010).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByteEvent {
    pub value: u8,
    pub start: f64,
    pub end: f64,
}

impl ByteEvent {
    pub fn new(value: u8, start: f64, end: f64) -> Self {
        Self { value, start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolVersion {
    #[serde(rename = "1")]
    V1,
    #[serde(rename = "2")]
    V2,
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::V1 => write!(f, "1"),
            ProtocolVersion::V2 => write!(f, "2"),
        }
    }
}

/// Outcome of the checksum/CRC comparison. A mismatch is reported, never
/// fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Integrity {
    Valid,
    Mismatch { expected: u16, actual: u16 },
}

impl Integrity {
    pub fn check(expected: u16, actual: u16) -> Self {
        if expected == actual {
            Integrity::Valid
        } else {
            Integrity::Mismatch { expected, actual }
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Integrity::Valid)
    }
}

/// A fully framed and decoded packet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedFrame {
    /// Start of the first accepted preamble byte.
    pub start: f64,
    /// End of the last trailer byte.
    pub end: f64,
    pub protocol: ProtocolVersion,
    pub id: u8,
    pub instruction: Instruction,
    pub integrity: Integrity,
    #[serde(flatten)]
    pub body: FrameBody,
}

impl DecodedFrame {
    pub fn kind(&self) -> FrameKind {
        self.body.kind()
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.body, FrameBody::Error { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameBody {
    /// Ping, Action, FactoryReset, Reboot.
    Simple {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        params: Vec<u8>,
    },
    Read {
        register: RegisterRef,
        count: u16,
    },
    /// Write and RegWrite.
    Write {
        register: RegisterRef,
        values: Vec<RegisterValue>,
    },
    SyncWrite {
        register: RegisterRef,
        count: u16,
        servos: Vec<ServoValues>,
    },
    BulkRead {
        entries: Vec<BulkReadEntry>,
    },
    BulkWrite {
        entries: Vec<BulkWriteEntry>,
    },
    Status {
        error: StatusError,
        content: StatusContent,
    },
    /// Payload passed through without structural decode.
    Raw {
        bytes: Vec<u8>,
    },
    /// Payload too short for its instruction's structure.
    Error {
        error: PayloadError,
        bytes: Vec<u8>,
    },
}

impl FrameBody {
    pub fn kind(&self) -> FrameKind {
        match self {
            FrameBody::Simple { .. } => FrameKind::Simple,
            FrameBody::Read { .. } => FrameKind::Read,
            FrameBody::Write { .. } => FrameKind::Write,
            FrameBody::Status { .. } => FrameKind::Reply,
            FrameBody::SyncWrite { .. }
            | FrameBody::BulkRead { .. }
            | FrameBody::BulkWrite { .. }
            | FrameBody::Raw { .. } => FrameKind::Generic,
            FrameBody::Error { .. } => FrameKind::Error,
        }
    }
}

/// Render template selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Simple,
    Read,
    Write,
    Reply,
    Generic,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusContent {
    Empty,
    /// Reply to a Ping.
    PingInfo { model: u16, firmware: u8 },
    /// Reply decoded against a known register request.
    Registers {
        register: RegisterRef,
        count: u16,
        values: Vec<RegisterValue>,
    },
    Raw { bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServoValues {
    pub id: u8,
    pub values: Vec<RegisterValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkReadEntry {
    pub id: u8,
    pub register: RegisterRef,
    pub count: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkWriteEntry {
    pub id: u8,
    pub register: RegisterRef,
    pub count: u16,
    pub values: Vec<RegisterValue>,
}

#[cfg(test)]
mod tests {
    use super::{DecodedFrame, FrameBody, FrameKind, Integrity, ProtocolVersion};
    use crate::protocols::dynamixel::instruction::Instruction;

    #[test]
    fn integrity_check() {
        assert_eq!(Integrity::check(0xFB, 0xFB), Integrity::Valid);
        assert_eq!(
            Integrity::check(0xFB, 0xFC),
            Integrity::Mismatch {
                expected: 0xFB,
                actual: 0xFC
            }
        );
    }

    #[test]
    fn frame_serializes_flat_with_kind_tag() {
        let frame = DecodedFrame {
            start: 0.0,
            end: 1.0,
            protocol: ProtocolVersion::V1,
            id: 1,
            instruction: Instruction::Ping,
            integrity: Integrity::Valid,
            body: FrameBody::Simple { params: Vec::new() },
        };
        assert_eq!(frame.kind(), FrameKind::Simple);

        let value = serde_json::to_value(&frame).expect("frame json");
        assert_eq!(value["kind"], "simple");
        assert_eq!(value["protocol"], "1");
        assert_eq!(value["instruction"], "ping");
        assert_eq!(value["integrity"]["status"], "valid");
        assert!(value.get("params").is_none());
    }
}
