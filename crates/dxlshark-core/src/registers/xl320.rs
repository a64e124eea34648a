//! XL-320 control table. Shared by both protocol versions.

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
    reg(11, "CMODE", One),
    reg(12, "LTEMP", One),
    reg(13, "LVOLTD", One),
    reg(14, "LVOLTU", One),
    reg(15, "MTORQUE", Two),
    reg(17, "RLEVEL", One),
    reg(18, "ASHUT", One),
    reg(24, "TENABLE", One),
    reg(25, "LED", One),
    reg(27, "DGAIN", One),
    reg(28, "IGAIN", One),
    reg(29, "PGAIN", One),
    reg(30, "GOAL", Two),
    reg(32, "GSPEED", Two),
    reg(35, "TLIMIT", Two),
    reg(37, "PPOS", Two),
    reg(39, "PSPEED", Two),
    reg(41, "PLOAD", Two),
    reg(45, "PVOLT", One),
    reg(46, "PTEMP", One),
    reg(47, "RINST", One),
    reg(49, "MOVING", One),
    reg(50, "HSTAT", One),
    reg(51, "PUNCH", Two),
];

pub static XL320: RegisterTable = RegisterTable::new("XL320", ENTRIES);
