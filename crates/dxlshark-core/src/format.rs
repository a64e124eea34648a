//! Text rendering of decoded frames.
//!
//! One template per `FrameKind`; every scalar goes through the configured
//! display base.

use crate::config::{DecoderConfig, DisplayBase};
use crate::frame::{DecodedFrame, FrameBody, Integrity, StatusContent};
use crate::protocols::dynamixel::status::StatusError;
use crate::registers::RegisterValue;

/// # Examples
/// ```
/// use dxlshark_core::config::DisplayBase;
/// use dxlshark_core::format::format_scalar;
///
/// assert_eq!(format_scalar(512, DisplayBase::Auto), "512");
/// assert_eq!(format_scalar(512, DisplayBase::Hex), "0x200");
/// ```
pub fn format_scalar(value: u32, base: DisplayBase) -> String {
    match base {
        DisplayBase::Auto | DisplayBase::Dec => value.to_string(),
        DisplayBase::Hex => format!("0x{value:X}"),
    }
}

pub fn format_bytes(bytes: &[u8], base: DisplayBase) -> String {
    bytes
        .iter()
        .map(|byte| format_scalar(u32::from(*byte), base))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Register values as whole numbers, or byte by byte when `pairs` is off.
pub fn format_register_values(values: &[RegisterValue], base: DisplayBase, pairs: bool) -> String {
    if pairs {
        values
            .iter()
            .map(|value| format_scalar(value.value, base))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        let bytes: Vec<u8> = values.iter().flat_map(|value| value.bytes.iter().copied()).collect();
        format_bytes(&bytes, base)
    }
}

pub fn format_status_error(error: &StatusError, base: DisplayBase) -> String {
    if !error.is_error() {
        return format_scalar(0, base);
    }
    match error {
        StatusError::Protocol1 { flags } => flags.labels().join("|"),
        StatusError::Protocol2 { code, alert } => {
            let mut label = code.label();
            if *alert {
                label.push_str("+ALERT");
            }
            label
        }
    }
}

/// Renders `frame` as a single display line.
///
/// # Examples
/// ```
/// use dxlshark_core::{ByteEvent, Decoder, DecoderConfig, format::render_frame};
///
/// let config = DecoderConfig::default();
/// let mut decoder = Decoder::new(config);
/// let bytes = [0xFF, 0xFF, 0x01, 0x04, 0x03, 0x03, 0x01, 0xF3];
/// let events = bytes
///     .iter()
///     .enumerate()
///     .map(|(i, b)| ByteEvent::new(*b, i as f64, i as f64 + 1.0));
/// let frames = decoder.decode(events);
/// assert_eq!(render_frame(&frames[0], &config), "Write ID:1 R:ID = 1");
/// ```
pub fn render_frame(frame: &DecodedFrame, config: &DecoderConfig) -> String {
    let base = config.display_base;
    let pairs = config.register_pairs;
    let cmd = frame.instruction.name();
    let id = format_scalar(u32::from(frame.id), base);

    let mut line = match &frame.body {
        FrameBody::Simple { params } if params.is_empty() => format!("{cmd} ID:{id}"),
        FrameBody::Simple { params } => {
            format!("{cmd} ID:{id} {}", format_bytes(params, base))
        }
        FrameBody::Write { register, values } => format!(
            "{cmd} ID:{id} R:{register} = {}",
            format_register_values(values, base, pairs)
        ),
        FrameBody::Read { register, count } => format!(
            "{cmd} ID:{id} R:{register} #:{}",
            format_scalar(u32::from(*count), base)
        ),
        FrameBody::Status { error, content } => {
            let err = format_status_error(error, base);
            match content {
                StatusContent::Empty => format!("{cmd} ID:{id} Err:{err}"),
                StatusContent::PingInfo { model, firmware } => format!(
                    "{cmd} ID:{id} Err:{err} Model:{} FW:{}",
                    format_scalar(u32::from(*model), base),
                    format_scalar(u32::from(*firmware), base)
                ),
                StatusContent::Registers {
                    register,
                    count,
                    values,
                } => format!(
                    "{cmd} ID:{id} Err:{err} R:{register} #:{} {}",
                    format_scalar(u32::from(*count), base),
                    format_register_values(values, base, pairs)
                ),
                StatusContent::Raw { bytes } => {
                    format!("{cmd} ID:{id} Err:{err} {}", format_bytes(bytes, base))
                }
            }
        }
        FrameBody::SyncWrite {
            register,
            count,
            servos,
        } => {
            let data = servos
                .iter()
                .map(|servo| {
                    format!(
                        "{}: {}",
                        format_scalar(u32::from(servo.id), base),
                        format_register_values(&servo.values, base, pairs)
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "ID:{id} {cmd} R:{register} #:{} {data}",
                format_scalar(u32::from(*count), base)
            )
        }
        FrameBody::BulkRead { entries } => {
            let data = entries
                .iter()
                .map(|entry| {
                    format!(
                        "{}({}, {}):",
                        format_scalar(u32::from(entry.id), base),
                        entry.register,
                        format_scalar(u32::from(entry.count), base)
                    )
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!("ID:{id} {cmd} {data}")
        }
        FrameBody::BulkWrite { entries } => {
            let data = entries
                .iter()
                .map(|entry| {
                    format!(
                        "{}({}, {}): {}",
                        format_scalar(u32::from(entry.id), base),
                        entry.register,
                        format_scalar(u32::from(entry.count), base),
                        format_register_values(&entry.values, base, pairs)
                    )
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!("ID:{id} {cmd} {data}")
        }
        FrameBody::Raw { bytes } => format!("ID:{id} {cmd} {}", format_bytes(bytes, base)),
        FrameBody::Error { error, bytes } => {
            format!("ID:{id} {cmd} !err {error}: {}", format_bytes(bytes, base))
        }
    };

    if let Integrity::Mismatch { expected, actual } = frame.integrity {
        line.push_str(&format!(
            " !chk {} != {}",
            format_scalar(u32::from(expected), DisplayBase::Hex),
            format_scalar(u32::from(actual), DisplayBase::Hex)
        ));
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_register_values, format_status_error, render_frame};
    use crate::config::{DecoderConfig, DisplayBase};
    use crate::frame::{DecodedFrame, FrameBody, Integrity, ProtocolVersion, StatusContent};
    use crate::protocols::dynamixel::instruction::Instruction;
    use crate::protocols::dynamixel::status::StatusError;
    use crate::registers::AX;

    fn frame(instruction: Instruction, body: FrameBody) -> DecodedFrame {
        DecodedFrame {
            start: 0.0,
            end: 1.0,
            protocol: ProtocolVersion::V1,
            id: 1,
            instruction,
            integrity: Integrity::Valid,
            body,
        }
    }

    #[test]
    fn simple_template() {
        let frame = frame(Instruction::Ping, FrameBody::Simple { params: Vec::new() });
        assert_eq!(render_frame(&frame, &DecoderConfig::default()), "Ping ID:1");
    }

    #[test]
    fn read_template() {
        let frame = frame(
            Instruction::Read,
            FrameBody::Read {
                register: AX.reference(36),
                count: 2,
            },
        );
        assert_eq!(render_frame(&frame, &DecoderConfig::default()), "Read ID:1 R:PPOS #:2");
    }

    #[test]
    fn reply_template_in_hex() {
        let config = DecoderConfig {
            display_base: DisplayBase::Hex,
            ..DecoderConfig::default()
        };
        let frame = frame(
            Instruction::Status,
            FrameBody::Status {
                error: StatusError::from_byte(ProtocolVersion::V1, 0),
                content: StatusContent::Registers {
                    register: AX.reference(36),
                    count: 2,
                    values: AX.split_values(36, &[0x00, 0x02]),
                },
            },
        );
        assert_eq!(render_frame(&frame, &config), "Reply ID:0x1 Err:0x0 R:PPOS #:0x2 0x200");
    }

    #[test]
    fn checksum_mismatch_is_appended() {
        let mut frame = frame(Instruction::Ping, FrameBody::Simple { params: Vec::new() });
        frame.integrity = Integrity::Mismatch {
            expected: 0xFB,
            actual: 0xFC,
        };
        assert_eq!(
            render_frame(&frame, &DecoderConfig::default()),
            "Ping ID:1 !chk 0xFB != 0xFC"
        );
    }

    #[test]
    fn register_pairs_off_shows_bytes() {
        let values = AX.split_values(30, &[0x00, 0x02]);
        assert_eq!(format_register_values(&values, DisplayBase::Dec, true), "512");
        assert_eq!(format_register_values(&values, DisplayBase::Dec, false), "0 2");
    }

    #[test]
    fn unknown_opcode_renders_hex_name() {
        let frame = frame(Instruction::from(0x7A), FrameBody::Raw { bytes: vec![1, 2] });
        assert_eq!(render_frame(&frame, &DecoderConfig::default()), "ID:1 0x7A 1 2");
    }

    #[test]
    fn protocol1_error_flags_render_by_name() {
        let error = StatusError::from_byte(ProtocolVersion::V1, 0x24);
        assert_eq!(format_status_error(&error, DisplayBase::Auto), "OVERHEATING|OVERLOAD");
    }
}
