use super::layout;

/// Removes Protocol 2 byte stuffing (`FF FF FD FD` -> `FF FF FD`).
///
/// Length and CRC on the wire cover the stuffed form; payload decoding works
/// on the result of this function.
pub fn unstuff(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len());
    let mut skipped = false;
    for &byte in payload {
        if !skipped && byte == layout::PROTOCOL2_STUFFING_BYTE && ends_with_header(&out) {
            skipped = true;
            continue;
        }
        skipped = false;
        out.push(byte);
    }
    out
}

fn ends_with_header(out: &[u8]) -> bool {
    out.ends_with(&[
        layout::PREAMBLE_BYTE,
        layout::PREAMBLE_BYTE,
        layout::PROTOCOL2_STUFFING_BYTE,
    ])
}
