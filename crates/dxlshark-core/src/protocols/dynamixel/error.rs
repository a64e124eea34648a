use serde::Serialize;
use thiserror::Error;

/// Structural problems inside a frame payload.
///
/// These never abort a decoding session: the decoder turns them into an
/// error frame and moves on to the next preamble.
///
/// # Examples
/// ```
/// use dxlshark_core::protocols::dynamixel::error::PayloadError;
///
/// let err = PayloadError::TooShort { needed: 4, actual: 2 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum PayloadError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("entry {index} truncated: need {needed} bytes, {remaining} remain")]
    TruncatedEntry {
        index: usize,
        needed: usize,
        remaining: usize,
    },
}
