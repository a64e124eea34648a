pub const PREAMBLE_BYTE: u8 = 0xFF;
pub const PREAMBLE: [u8; 2] = [PREAMBLE_BYTE, PREAMBLE_BYTE];

/// ID value that, followed by a zero length byte, marks a Protocol 2 header.
pub const PROTOCOL2_RESERVED_ID: u8 = 0xFD;
pub const PROTOCOL2_RESERVED_BYTE: u8 = 0x00;
pub const PROTOCOL2_STUFFING_BYTE: u8 = 0xFD;

pub const BROADCAST_ID: u8 = 0xFE;
/// Factory ID of CM-730 style controller boards.
pub const CONTROLLER_BOARD_ID: u8 = 200;

/// Protocol 1 length counts instruction + params + checksum.
pub const PROTOCOL1_HEADER_OVERHEAD: usize = 2;
/// Protocol 2 length counts instruction + params + 2 CRC bytes.
pub const PROTOCOL2_HEADER_OVERHEAD: usize = 3;

pub const PROTOCOL1_MIN_LENGTH: u16 = PROTOCOL1_HEADER_OVERHEAD as u16;
pub const PROTOCOL2_MIN_LENGTH: u16 = PROTOCOL2_HEADER_OVERHEAD as u16;

pub const PROTOCOL2_BULK_READ_ENTRY_LEN: usize = 5;
pub const PROTOCOL2_BULK_WRITE_HEADER_LEN: usize = 5;
pub const PROTOCOL1_BULK_READ_ENTRY_LEN: usize = 3;

pub const STATUS_ALERT_BIT: u8 = 0x80;
pub const STATUS_CODE_MASK: u8 = 0x7F;

/// Ping replies carry model number (2 bytes LE) and firmware version.
pub const PING_INFO_LEN: usize = 3;
