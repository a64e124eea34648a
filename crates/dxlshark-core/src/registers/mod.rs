//! Register Table Catalog.
//!
//! One immutable table per servo family, mapping control-table addresses to
//! a short symbolic name and a byte width. Tables are sparse; addresses that
//! are not listed are still valid and render as a hex offset.

mod ax;
mod cm730;
mod mx;
mod x_series;
mod xl320;

use std::fmt;

use serde::Serialize;

use crate::config::{ControllerHint, DecoderConfig, Protocol1Family, Protocol2Family};
use crate::frame::ProtocolVersion;
use crate::protocols::dynamixel::layout;

pub use ax::AX;
pub use cm730::CM730;
pub use mx::MX;
pub use x_series::X_SERIES;
pub use xl320::XL320;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ByteWidth {
    One,
    Two,
    Four,
}

impl ByteWidth {
    pub fn len(self) -> usize {
        match self {
            ByteWidth::One => 1,
            ByteWidth::Two => 2,
            ByteWidth::Four => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RegisterDescriptor {
    pub address: u16,
    pub name: &'static str,
    pub width: ByteWidth,
}

pub(crate) const fn reg(address: u16, name: &'static str, width: ByteWidth) -> RegisterDescriptor {
    RegisterDescriptor {
        address,
        name,
        width,
    }
}

/// Address plus its symbolic name, when the active table knows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RegisterRef {
    pub address: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
}

impl fmt::Display for RegisterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "0x{:X}", self.address),
        }
    }
}

/// A chunk of register data, aligned to one table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterValue {
    pub register: RegisterRef,
    pub bytes: Vec<u8>,
    /// Little-endian value of `bytes`.
    pub value: u32,
}

#[derive(Debug)]
pub struct RegisterTable {
    pub name: &'static str,
    entries: &'static [RegisterDescriptor],
}

impl RegisterTable {
    /// `entries` must be sorted by address.
    pub const fn new(name: &'static str, entries: &'static [RegisterDescriptor]) -> Self {
        Self { name, entries }
    }

    pub fn entries(&self) -> &'static [RegisterDescriptor] {
        self.entries
    }

    pub fn lookup(&self, address: u16) -> Option<&'static RegisterDescriptor> {
        let entries = self.entries;
        entries
            .binary_search_by_key(&address, |entry| entry.address)
            .ok()
            .map(|index| &entries[index])
    }

    pub fn reference(&self, address: u16) -> RegisterRef {
        RegisterRef {
            address,
            name: self.lookup(address).map(|entry| entry.name),
        }
    }

    /// Splits `data` into register-sized chunks starting at `start`.
    ///
    /// Known registers take their width (or whatever is left of `data`);
    /// unknown addresses take a single byte.
    ///
    /// # Examples
    /// ```
    /// use dxlshark_core::registers::AX;
    ///
    /// // GOAL (2 bytes) then GSPEED (2 bytes)
    /// let values = AX.split_values(30, &[0x00, 0x02, 0x64, 0x00]);
    /// assert_eq!(values.len(), 2);
    /// assert_eq!(values[0].value, 512);
    /// assert_eq!(values[1].register.name, Some("GSPEED"));
    /// ```
    pub fn split_values(&self, start: u16, data: &[u8]) -> Vec<RegisterValue> {
        let mut values = Vec::new();
        let mut address = start;
        let mut rest = data;
        while !rest.is_empty() {
            let register = self.reference(address);
            let width = self
                .lookup(address)
                .map(|entry| entry.width.len())
                .unwrap_or(1)
                .min(rest.len());
            let (chunk, tail) = rest.split_at(width);
            values.push(RegisterValue {
                register,
                bytes: chunk.to_vec(),
                value: le_value(chunk),
            });
            address = address.wrapping_add(width as u16);
            rest = tail;
        }
        values
    }
}

fn le_value(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .rev()
        .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte))
}

pub fn protocol1_table(family: Protocol1Family) -> &'static RegisterTable {
    match family {
        Protocol1Family::Ax => &AX,
        Protocol1Family::Mx => &MX,
        Protocol1Family::Xl320 => &XL320,
        Protocol1Family::X => &X_SERIES,
    }
}

pub fn protocol2_table(family: Protocol2Family) -> &'static RegisterTable {
    match family {
        Protocol2Family::X | Protocol2Family::Mx => &X_SERIES,
        Protocol2Family::Xl320 => &XL320,
    }
}

/// Table consulted for a frame of `protocol` to/from servo `id`.
pub fn table_for(
    config: &DecoderConfig,
    protocol: ProtocolVersion,
    id: u8,
) -> &'static RegisterTable {
    match protocol {
        ProtocolVersion::V1 => match config.controller {
            ControllerHint::ControllerBoard => &CM730,
            ControllerHint::ReservedId if id == layout::CONTROLLER_BOARD_ID => &CM730,
            _ => protocol1_table(config.protocol1_family),
        },
        ProtocolVersion::V2 => protocol2_table(config.protocol2_family),
    }
}

#[cfg(test)]
mod tests {
    use super::{AX, CM730, MX, RegisterTable, X_SERIES, XL320, table_for};
    use crate::config::{ControllerHint, DecoderConfig, Protocol1Family, Protocol2Family};
    use crate::frame::ProtocolVersion;

    fn all_tables() -> [&'static RegisterTable; 5] {
        [&AX, &MX, &XL320, &X_SERIES, &CM730]
    }

    #[test]
    fn tables_are_sorted_and_do_not_overlap() {
        for table in all_tables() {
            for pair in table.entries().windows(2) {
                let end = pair[0].address + pair[0].width.len() as u16;
                assert!(
                    end <= pair[1].address,
                    "{}: {} overlaps {}",
                    table.name,
                    pair[0].name,
                    pair[1].name
                );
            }
        }
    }

    #[test]
    fn ax_id_register() {
        let reference = AX.reference(3);
        assert_eq!(reference.name, Some("ID"));
        assert_eq!(reference.to_string(), "ID");
    }

    #[test]
    fn unknown_address_renders_hex() {
        let reference = AX.reference(0x31);
        assert_eq!(reference.name, None);
        assert_eq!(reference.to_string(), "0x31");
    }

    #[test]
    fn split_values_reads_little_endian_widths() {
        let values = X_SERIES.split_values(116, &[0x00, 0x08, 0x00, 0x00]);
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].register.name, Some("GOAL"));
        assert_eq!(values[0].value, 2048);
    }

    #[test]
    fn split_values_truncates_last_register() {
        let values = AX.split_values(30, &[0x10, 0x00, 0x20]);
        assert_eq!(values.len(), 2);
        assert_eq!(values[1].register.name, Some("GSPEED"));
        assert_eq!(values[1].bytes, vec![0x20]);
        assert_eq!(values[1].value, 0x20);
    }

    #[test]
    fn split_values_walks_unknown_bytes_one_at_a_time() {
        let values = AX.split_values(19, &[1, 2, 3, 4, 5, 6]);
        let addresses: Vec<u16> = values.iter().map(|v| v.register.address).collect();
        assert_eq!(addresses, vec![19, 20, 21, 22, 23, 24]);
        assert_eq!(values[5].register.name, Some("TENABLE"));
    }

    #[test]
    fn table_selection_follows_config() {
        let config = DecoderConfig::default();
        assert_eq!(table_for(&config, ProtocolVersion::V1, 1).name, AX.name);
        assert_eq!(table_for(&config, ProtocolVersion::V2, 1).name, X_SERIES.name);

        let config = DecoderConfig {
            protocol1_family: Protocol1Family::Mx,
            protocol2_family: Protocol2Family::Xl320,
            ..DecoderConfig::default()
        };
        assert_eq!(table_for(&config, ProtocolVersion::V1, 1).name, MX.name);
        assert_eq!(table_for(&config, ProtocolVersion::V2, 1).name, XL320.name);
    }

    #[test]
    fn controller_hint_selects_board_table() {
        let config = DecoderConfig {
            controller: ControllerHint::ReservedId,
            ..DecoderConfig::default()
        };
        assert_eq!(table_for(&config, ProtocolVersion::V1, 200).name, CM730.name);
        assert_eq!(table_for(&config, ProtocolVersion::V1, 1).name, AX.name);

        let config = DecoderConfig {
            controller: ControllerHint::ControllerBoard,
            ..DecoderConfig::default()
        };
        assert_eq!(table_for(&config, ProtocolVersion::V1, 1).name, CM730.name);
        assert_eq!(table_for(&config, ProtocolVersion::V2, 1).name, X_SERIES.name);
    }
}
