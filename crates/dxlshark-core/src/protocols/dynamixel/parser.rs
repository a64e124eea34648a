//! Instruction dispatcher: turns a framed payload into a `FrameBody`.
//!
//! `payload` is the unstuffed parameter area. For status packets it starts
//! with the error byte in both protocol versions.

use tracing::debug;

use super::error::PayloadError;
use super::instruction::Instruction;
use super::layout;
use super::reader::{PayloadReader, field_width};
use super::status::StatusError;
use crate::config::DecoderConfig;
use crate::decoder::{BulkRequest, ReadRequest, RequestContext};
use crate::frame::{
    BulkReadEntry, BulkWriteEntry, FrameBody, ProtocolVersion, ServoValues, StatusContent,
};
use crate::registers::{RegisterTable, table_for};

/// Addressing of the frame being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMeta {
    pub protocol: ProtocolVersion,
    pub id: u8,
    pub instruction: Instruction,
}

/// Decodes `payload` for `meta.instruction`, updating `context` with what
/// later status packets need to know.
///
/// Structural problems come back as `FrameBody::Error`; this never fails.
///
/// # Examples
/// ```
/// use dxlshark_core::config::DecoderConfig;
/// use dxlshark_core::decoder::RequestContext;
/// use dxlshark_core::frame::{FrameBody, ProtocolVersion};
/// use dxlshark_core::protocols::dynamixel::instruction::Instruction;
/// use dxlshark_core::protocols::dynamixel::parser::{FrameMeta, dispatch};
///
/// let meta = FrameMeta {
///     protocol: ProtocolVersion::V1,
///     id: 1,
///     instruction: Instruction::Read,
/// };
/// let mut context = RequestContext::new();
/// let body = dispatch(&meta, &[0x24, 0x02], &DecoderConfig::default(), &mut context);
/// let FrameBody::Read { register, count } = body else {
///     panic!("expected read");
/// };
/// assert_eq!(register.name, Some("PPOS"));
/// assert_eq!(count, 2);
/// ```
pub fn dispatch(
    meta: &FrameMeta,
    payload: &[u8],
    config: &DecoderConfig,
    context: &mut RequestContext,
) -> FrameBody {
    let table = table_for(config, meta.protocol, meta.id);
    if meta.instruction != Instruction::Status {
        context.begin_request(meta.instruction);
        if meta.instruction.expects_reply() && meta.id != layout::BROADCAST_ID {
            context.expect_reply(meta.id);
        }
    }

    let result = match meta.instruction {
        Instruction::Status => parse_status(meta, payload, table, context),
        Instruction::Ping => Ok(FrameBody::Simple {
            params: payload.to_vec(),
        }),
        Instruction::Action | Instruction::FactoryReset | Instruction::Reboot => {
            Ok(FrameBody::Simple {
                params: payload.to_vec(),
            })
        }
        Instruction::Read => parse_read(meta, payload, table, context),
        Instruction::Write | Instruction::RegWrite => parse_write(meta, payload, table),
        Instruction::SyncWrite => parse_sync_write(meta, payload, config),
        Instruction::BulkRead => parse_bulk_read(meta, payload, config, context),
        Instruction::BulkWrite => parse_bulk_write(meta, payload, config),
        Instruction::Clear
        | Instruction::ControlTableBackup
        | Instruction::SyncRead
        | Instruction::FastSyncRead
        | Instruction::FastBulkRead
        | Instruction::Unknown(_) => Ok(FrameBody::Raw {
            bytes: payload.to_vec(),
        }),
    };

    match result {
        Ok(body) => body,
        Err(error) => {
            debug!(
                id = meta.id,
                protocol = %meta.protocol,
                instruction = %meta.instruction.name(),
                %error,
                "malformed payload"
            );
            FrameBody::Error {
                error,
                bytes: payload.to_vec(),
            }
        }
    }
}

fn parse_status(
    meta: &FrameMeta,
    payload: &[u8],
    table: &RegisterTable,
    context: &mut RequestContext,
) -> Result<FrameBody, PayloadError> {
    context.reply_received(meta.id);
    let mut reader = PayloadReader::new(payload);
    let error = StatusError::from_byte(meta.protocol, reader.read_u8()?);
    let data = reader.read_rest();
    let content = status_content(meta.id, data, table, context);
    Ok(FrameBody::Status { error, content })
}

fn status_content(
    id: u8,
    data: &[u8],
    table: &RegisterTable,
    context: &RequestContext,
) -> StatusContent {
    if data.is_empty() {
        return StatusContent::Empty;
    }
    match context.last_instruction() {
        Some(Instruction::Ping) if data.len() >= layout::PING_INFO_LEN => StatusContent::PingInfo {
            model: u16::from_le_bytes([data[0], data[1]]),
            firmware: data[2],
        },
        Some(Instruction::BulkRead) => match context.bulk().get(id) {
            Some(request) => StatusContent::Registers {
                register: table.reference(request.register),
                count: request.count,
                values: table.split_values(request.register, data),
            },
            None => StatusContent::Raw {
                bytes: data.to_vec(),
            },
        },
        Some(Instruction::Read) => match context.last_read() {
            Some(request) => StatusContent::Registers {
                register: table.reference(request.register),
                count: request.count,
                values: table.split_values(request.register, data),
            },
            None => StatusContent::Raw {
                bytes: data.to_vec(),
            },
        },
        _ => StatusContent::Raw {
            bytes: data.to_vec(),
        },
    }
}

fn parse_read(
    meta: &FrameMeta,
    payload: &[u8],
    table: &RegisterTable,
    context: &mut RequestContext,
) -> Result<FrameBody, PayloadError> {
    let mut reader = PayloadReader::new(payload);
    reader.require_len(2 * field_width(meta.protocol))?;
    let register = reader.read_field(meta.protocol)?;
    let count = reader.read_field(meta.protocol)?;

    context.record_read(ReadRequest { register, count });
    Ok(FrameBody::Read {
        register: table.reference(register),
        count,
    })
}

fn parse_write(
    meta: &FrameMeta,
    payload: &[u8],
    table: &RegisterTable,
) -> Result<FrameBody, PayloadError> {
    let mut reader = PayloadReader::new(payload);
    let register = reader.read_field(meta.protocol)?;
    let data = reader.read_rest();
    Ok(FrameBody::Write {
        register: table.reference(register),
        values: table.split_values(register, data),
    })
}

fn parse_sync_write(
    meta: &FrameMeta,
    payload: &[u8],
    config: &DecoderConfig,
) -> Result<FrameBody, PayloadError> {
    let mut reader = PayloadReader::new(payload);
    reader.require_len(2 * field_width(meta.protocol))?;
    let register = reader.read_field(meta.protocol)?;
    let count = reader.read_field(meta.protocol)?;

    let entry_len = 1 + usize::from(count);
    let mut servos = Vec::new();
    while !reader.is_empty() {
        if reader.remaining() < entry_len {
            return Err(PayloadError::TruncatedEntry {
                index: servos.len(),
                needed: entry_len,
                remaining: reader.remaining(),
            });
        }
        let id = reader.read_u8()?;
        let data = reader.read_slice(usize::from(count))?;
        let table = table_for(config, meta.protocol, id);
        servos.push(ServoValues {
            id,
            values: table.split_values(register, data),
        });
    }

    let table = table_for(config, meta.protocol, meta.id);
    Ok(FrameBody::SyncWrite {
        register: table.reference(register),
        count,
        servos,
    })
}

fn parse_bulk_read(
    meta: &FrameMeta,
    payload: &[u8],
    config: &DecoderConfig,
    context: &mut RequestContext,
) -> Result<FrameBody, PayloadError> {
    let mut reader = PayloadReader::new(payload);
    let mut requests = Vec::new();
    match meta.protocol {
        ProtocolVersion::V1 => {
            // Leading reserved byte, then {count, id, register} triples.
            reader.read_u8()?;
            while !reader.is_empty() {
                check_entry(&reader, requests.len(), layout::PROTOCOL1_BULK_READ_ENTRY_LEN)?;
                let count = u16::from(reader.read_u8()?);
                let id = reader.read_u8()?;
                let register = u16::from(reader.read_u8()?);
                requests.push((id, BulkRequest { register, count }));
            }
        }
        ProtocolVersion::V2 => {
            while !reader.is_empty() {
                check_entry(&reader, requests.len(), layout::PROTOCOL2_BULK_READ_ENTRY_LEN)?;
                let id = reader.read_u8()?;
                let register = reader.read_u16_le()?;
                let count = reader.read_u16_le()?;
                requests.push((id, BulkRequest { register, count }));
            }
        }
    }

    let mut entries = Vec::with_capacity(requests.len());
    for (id, request) in requests {
        context.record_bulk(id, request);
        context.expect_reply(id);
        entries.push(BulkReadEntry {
            id,
            register: table_for(config, meta.protocol, id).reference(request.register),
            count: request.count,
        });
    }
    Ok(FrameBody::BulkRead { entries })
}

fn parse_bulk_write(
    meta: &FrameMeta,
    payload: &[u8],
    config: &DecoderConfig,
) -> Result<FrameBody, PayloadError> {
    let mut reader = PayloadReader::new(payload);
    let mut entries = Vec::new();
    while !reader.is_empty() {
        let index = entries.len();
        check_entry(&reader, index, layout::PROTOCOL2_BULK_WRITE_HEADER_LEN)?;
        let id = reader.read_u8()?;
        let register = reader.read_u16_le()?;
        let count = reader.read_u16_le()?;
        check_entry(&reader, index, usize::from(count))?;
        let data = reader.read_slice(usize::from(count))?;

        let table = table_for(config, meta.protocol, id);
        entries.push(BulkWriteEntry {
            id,
            register: table.reference(register),
            count,
            values: table.split_values(register, data),
        });
    }
    Ok(FrameBody::BulkWrite { entries })
}

fn check_entry(reader: &PayloadReader<'_>, index: usize, needed: usize) -> Result<(), PayloadError> {
    if reader.remaining() < needed {
        return Err(PayloadError::TruncatedEntry {
            index,
            needed,
            remaining: reader.remaining(),
        });
    }
    Ok(())
}
