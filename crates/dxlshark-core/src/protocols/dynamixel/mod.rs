//! Dynamixel Protocol 1 and Protocol 2.
//!
//! Both versions share the `FF FF` preamble. Protocol 2 is recognized by the
//! reserved `FD 00` that follows it.

pub mod checksum;
pub mod error;
pub mod instruction;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod status;
pub mod stuffing;

pub use error::PayloadError;
pub use instruction::Instruction;
pub use status::{ErrorFlags, StatusCode, StatusError};
