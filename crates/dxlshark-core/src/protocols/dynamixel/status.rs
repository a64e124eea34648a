//! Servo status reporting.
//!
//! Protocol 1 servos report a bitfield of fault conditions; Protocol 2
//! servos report a single result code plus a hardware alert bit.

use bitflags::bitflags;
use num_enum::FromPrimitive;
use serde::Serialize;

use super::layout;
use crate::frame::ProtocolVersion;

bitflags! {
    /// Protocol 1 status error bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct ErrorFlags: u8 {
        const INPUT_VOLTAGE = 0x01;
        const ANGLE_LIMIT = 0x02;
        const OVERHEATING = 0x04;
        const RANGE = 0x08;
        const CHECKSUM = 0x10;
        const OVERLOAD = 0x20;
        const INSTRUCTION = 0x40;
    }
}

impl ErrorFlags {
    pub fn labels(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum StatusCode {
    None = 0x00,
    ResultFail = 0x01,
    InstructionError = 0x02,
    CrcError = 0x03,
    DataRangeError = 0x04,
    DataLengthError = 0x05,
    DataLimitError = 0x06,
    AccessError = 0x07,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl StatusCode {
    pub fn code(self) -> u8 {
        match self {
            StatusCode::None => 0x00,
            StatusCode::ResultFail => 0x01,
            StatusCode::InstructionError => 0x02,
            StatusCode::CrcError => 0x03,
            StatusCode::DataRangeError => 0x04,
            StatusCode::DataLengthError => 0x05,
            StatusCode::DataLimitError => 0x06,
            StatusCode::AccessError => 0x07,
            StatusCode::Unknown(code) => code,
        }
    }

    pub fn label(self) -> String {
        let label = match self {
            StatusCode::None => "OK",
            StatusCode::ResultFail => "Result Fail",
            StatusCode::InstructionError => "Instruction Error",
            StatusCode::CrcError => "CRC Error",
            StatusCode::DataRangeError => "Data Range Error",
            StatusCode::DataLengthError => "Data Length Error",
            StatusCode::DataLimitError => "Data Limit Error",
            StatusCode::AccessError => "Access Error",
            StatusCode::Unknown(code) => return format!("0x{code:02X}"),
        };
        label.to_string()
    }
}

/// Error byte of a status packet, interpreted per protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "protocol", rename_all = "snake_case")]
pub enum StatusError {
    Protocol1 { flags: ErrorFlags },
    Protocol2 { code: StatusCode, alert: bool },
}

impl StatusError {
    pub fn from_byte(protocol: ProtocolVersion, byte: u8) -> Self {
        match protocol {
            ProtocolVersion::V1 => StatusError::Protocol1 {
                flags: ErrorFlags::from_bits_retain(byte),
            },
            ProtocolVersion::V2 => StatusError::Protocol2 {
                code: StatusCode::from(byte & layout::STATUS_CODE_MASK),
                alert: byte & layout::STATUS_ALERT_BIT != 0,
            },
        }
    }

    pub fn is_error(&self) -> bool {
        match self {
            StatusError::Protocol1 { flags } => !flags.is_empty(),
            StatusError::Protocol2 { code, alert } => *code != StatusCode::None || *alert,
        }
    }

    /// Raw error byte as it appeared on the wire.
    pub fn bits(&self) -> u8 {
        match self {
            StatusError::Protocol1 { flags } => flags.bits(),
            StatusError::Protocol2 { code, alert } => {
                let code = code.code();
                if *alert {
                    code | layout::STATUS_ALERT_BIT
                } else {
                    code
                }
            }
        }
    }
}
