//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: wire constants (source of truth)
//! - `reader`: bounds-checked payload access and protocol conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; the decoder owns framing state and
//! sources handle file access.

pub mod dynamixel;
