//! Logic-analyzer CSV export source.
//!
//! Reads the async-serial table exported by common logic analyzer software:
//! one row per decoded byte with a start timestamp, a duration (or end
//! timestamp) and the byte value.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::CsvExportSource;
