pub const FIELD_SEPARATOR: char = ',';
pub const QUOTE: char = '"';

/// Accepted header names, compared case-insensitively.
pub const START_TIME_COLUMNS: &[&str] = &["start_time", "time [s]", "time"];
pub const DURATION_COLUMNS: &[&str] = &["duration"];
pub const END_TIME_COLUMNS: &[&str] = &["end_time"];
pub const DATA_COLUMNS: &[&str] = &["data", "value"];
pub const TYPE_COLUMNS: &[&str] = &["type"];
pub const ERROR_COLUMNS: &[&str] = &["error"];

/// `type` value of rows that carry a byte.
pub const DATA_ROW_TYPE: &str = "data";
