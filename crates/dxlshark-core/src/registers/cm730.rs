//! CM-730 sub-controller board, addressed with Protocol 1.

use super::ByteWidth::{One, Two};
use super::{RegisterDescriptor, RegisterTable, reg};

const ENTRIES: &[RegisterDescriptor] = &[
    reg(0, "MODEL", Two),
    reg(2, "VER", One),
    reg(3, "ID", One),
    reg(4, "BAUD", One),
    reg(5, "DELAY", One),
    reg(12, "LVOLTD", One),
    reg(13, "LVOLTU", One),
    reg(16, "RLEVEL", One),
    reg(24, "POWER", One),
    reg(25, "LPANNEL", One),
    reg(26, "LHEAD", Two),
    reg(28, "LEYE", Two),
    reg(30, "BUTTON", One),
    reg(32, "D1", One),
    reg(33, "D2", One),
    reg(34, "D3", One),
    reg(35, "D4", One),
    reg(36, "D5", One),
    reg(37, "D6", One),
    reg(38, "GYROZ", Two),
    reg(40, "GYROY", Two),
    reg(42, "GYROX", Two),
    reg(44, "ACCX", Two),
    reg(46, "ACCY", Two),
    reg(48, "ACCZ", Two),
    reg(50, "ADC0", One),
    reg(51, "ADC1", Two),
    reg(53, "ADC2", Two),
    reg(55, "ADC3", Two),
    reg(57, "ADC4", Two),
    reg(59, "ADC5", Two),
    reg(61, "ADC6", Two),
    reg(63, "ADC7", Two),
    reg(65, "ADC8", Two),
    reg(67, "ADC9", Two),
    reg(69, "ADC10", Two),
    reg(71, "ADC11", Two),
    reg(73, "ADC12", Two),
    reg(75, "ADC13", Two),
    reg(77, "ADC14", Two),
    reg(79, "ADC15", Two),
];

pub static CM730: RegisterTable = RegisterTable::new("CM730", ENTRIES);
