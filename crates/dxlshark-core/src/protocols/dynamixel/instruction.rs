use num_enum::FromPrimitive;
use serde::Serialize;

/// Instruction opcode carried in the instruction slot of a frame.
///
/// Opcodes that this decoder does not know are kept as `Unknown` and
/// rendered as hex rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Instruction {
    #[num_enum(alternatives = [0x00])]
    Status = 0x55,
    Ping = 0x01,
    Read = 0x02,
    Write = 0x03,
    RegWrite = 0x04,
    Action = 0x05,
    FactoryReset = 0x06,
    Reboot = 0x08,
    Clear = 0x10,
    ControlTableBackup = 0x20,
    SyncRead = 0x82,
    SyncWrite = 0x83,
    FastSyncRead = 0x8A,
    BulkRead = 0x92,
    BulkWrite = 0x93,
    FastBulkRead = 0x9A,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Instruction {
    pub fn opcode(self) -> u8 {
        match self {
            Instruction::Status => 0x55,
            Instruction::Ping => 0x01,
            Instruction::Read => 0x02,
            Instruction::Write => 0x03,
            Instruction::RegWrite => 0x04,
            Instruction::Action => 0x05,
            Instruction::FactoryReset => 0x06,
            Instruction::Reboot => 0x08,
            Instruction::Clear => 0x10,
            Instruction::ControlTableBackup => 0x20,
            Instruction::SyncRead => 0x82,
            Instruction::SyncWrite => 0x83,
            Instruction::FastSyncRead => 0x8A,
            Instruction::BulkRead => 0x92,
            Instruction::BulkWrite => 0x93,
            Instruction::FastBulkRead => 0x9A,
            Instruction::Unknown(code) => code,
        }
    }

    /// Short display name used in rendered frames.
    pub fn name(self) -> String {
        let name = match self {
            Instruction::Status => "Reply",
            Instruction::Ping => "Ping",
            Instruction::Read => "Read",
            Instruction::Write => "Write",
            Instruction::RegWrite => "REG_WRITE",
            Instruction::Action => "Action",
            Instruction::FactoryReset => "Reset",
            Instruction::Reboot => "Reboot",
            Instruction::Clear => "Clear",
            Instruction::ControlTableBackup => "Backup",
            Instruction::SyncRead => "SRead",
            Instruction::SyncWrite => "SWrite",
            Instruction::FastSyncRead => "FSRead",
            Instruction::BulkRead => "BulkRead",
            Instruction::BulkWrite => "BulkWrite",
            Instruction::FastBulkRead => "FBulkRead",
            Instruction::Unknown(code) => return format!("0x{code:02X}"),
        };
        name.to_string()
    }

    /// Instructions an addressed servo answers with exactly one status packet.
    pub fn expects_reply(self) -> bool {
        matches!(
            self,
            Instruction::Ping
                | Instruction::Read
                | Instruction::Write
                | Instruction::RegWrite
                | Instruction::Action
                | Instruction::FactoryReset
                | Instruction::Reboot
        )
    }
}
