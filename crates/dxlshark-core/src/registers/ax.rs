//! AX-series control table (Protocol 1).

use super::ByteWidth::{One, Two};
use super::{RegisterDescriptor, RegisterTable, reg};

const ENTRIES: &[RegisterDescriptor] = &[
    reg(0, "MODEL", Two),
    reg(2, "VER", One),
    reg(3, "ID", One),
    reg(4, "BAUD", One),
    reg(5, "DELAY", One),
    reg(6, "CWL", Two),
    reg(8, "CCWL", Two),
    reg(11, "LTEMP", One),
    reg(12, "LVOLTD", One),
    reg(13, "LVOLTU", One),
    reg(14, "MTORQUE", Two),
    reg(16, "RLEVEL", One),
    reg(17, "ALED", One),
    reg(18, "ASHUT", One),
    reg(24, "TENABLE", One),
    reg(25, "LED", One),
    reg(26, "CWMAR", One),
    reg(27, "CCWMAR", One),
    reg(28, "CWSLOPE", One),
    reg(29, "CCWSLOPE", One),
    reg(30, "GOAL", Two),
    reg(32, "GSPEED", Two),
    reg(34, "TLIMIT", Two),
    reg(36, "PPOS", Two),
    reg(38, "PSPEED", Two),
    reg(40, "PLOAD", Two),
    reg(42, "PVOLT", One),
    reg(43, "PTEMP", One),
    reg(44, "RINST", One),
    reg(46, "MOVING", One),
    reg(47, "LOCK", One),
    reg(48, "PUNCH", Two),
];

pub static AX: RegisterTable = RegisterTable::new("AX", ENTRIES);
