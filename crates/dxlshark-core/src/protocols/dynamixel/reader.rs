use super::error::PayloadError;
use crate::frame::ProtocolVersion;

/// Sequential, bounds-checked reader over an instruction payload.
pub struct PayloadReader<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.payload.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn require_len(&self, needed: usize) -> Result<(), PayloadError> {
        if self.remaining() < needed {
            return Err(PayloadError::TooShort {
                needed: self.offset + needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, PayloadError> {
        let bytes = self.read_slice(1)?;
        Ok(bytes[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, PayloadError> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Reads an address or count field: one byte in Protocol 1, two
    /// little-endian bytes in Protocol 2.
    pub fn read_field(&mut self, protocol: ProtocolVersion) -> Result<u16, PayloadError> {
        match protocol {
            ProtocolVersion::V1 => self.read_u8().map(u16::from),
            ProtocolVersion::V2 => self.read_u16_le(),
        }
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], PayloadError> {
        self.require_len(len)?;
        let start = self.offset;
        self.offset += len;
        self.payload
            .get(start..self.offset)
            .ok_or(PayloadError::TooShort {
                needed: self.offset,
                actual: self.payload.len(),
            })
    }

    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.payload[self.offset..];
        self.offset = self.payload.len();
        rest
    }
}

pub fn field_width(protocol: ProtocolVersion) -> usize {
    match protocol {
        ProtocolVersion::V1 => 1,
        ProtocolVersion::V2 => 2,
    }
}
