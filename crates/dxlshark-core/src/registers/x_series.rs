//! X-series control table. MX servos running Protocol 2 firmware use the
//! same layout.

use super::ByteWidth::{Four, One, Two};
use super::{RegisterDescriptor, RegisterTable, reg};

const ENTRIES: &[RegisterDescriptor] = &[
    reg(0, "MODEL", Two),
    reg(2, "MINFO", Four),
    reg(6, "VER", One),
    reg(7, "ID", One),
    reg(8, "BAUD", One),
    reg(9, "DELAY", One),
    reg(10, "DMODE", One),
    reg(11, "OMODE", One),
    reg(12, "S-ID", One),
    reg(13, "PROT", One),
    reg(20, "HOFF", Four),
    reg(24, "MOVT", Four),
    reg(31, "TLIMIT", One),
    reg(32, "VMAX", Two),
    reg(34, "VMIN", Two),
    reg(36, "PWML", Two),
    reg(38, "CLIMIT", Two),
    reg(40, "ACCLL", Four),
    reg(44, "VLMT", Four),
    reg(48, "MXPOS", Four),
    reg(52, "MNPOS", Four),
    reg(60, "SCONFIG", One),
    reg(63, "SHUTDN", One),
    reg(64, "TENABLE", One),
    reg(65, "LED", One),
    reg(68, "RETL", One),
    reg(69, "RINST", One),
    reg(70, "HERR", One),
    reg(76, "VIGAIN", Two),
    reg(78, "VPGAIN", Two),
    reg(80, "POSDG", Two),
    reg(82, "POSIG", Two),
    reg(84, "POSPG", Two),
    reg(88, "FF2G", Two),
    reg(90, "FF1G", Two),
    reg(98, "BWATCH", One),
    reg(100, "GPWM", Two),
    reg(104, "GVEL", Four),
    reg(108, "PACCL", Four),
    reg(112, "PRVEL", Four),
    reg(116, "GOAL", Four),
    reg(120, "RTICK", Two),
    reg(122, "MOVING", One),
    reg(123, "MSTATUS", One),
    reg(124, "PPWM", Two),
    reg(126, "PLOAD", Two),
    reg(128, "PVEL", Four),
    reg(132, "PPOS", Four),
    reg(136, "VELT", Four),
    reg(140, "POST", Four),
    reg(144, "PVOLT", Two),
    reg(146, "PTEMP", One),
    reg(147, "BACKRDY", One),
];

pub static X_SERIES: RegisterTable = RegisterTable::new("X", ENTRIES);
