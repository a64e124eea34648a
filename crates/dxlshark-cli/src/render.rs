use std::io::{self, Write};

use dxlshark_core::format::render_frame;
use dxlshark_core::{DecodedFrame, DecoderConfig};

/// One `{start} {rendered}` line per frame.
pub fn format_line(frame: &DecodedFrame, config: &DecoderConfig) -> String {
    format!("{:.6} {}", frame.start, render_frame(frame, config))
}

pub fn write_frames<W: Write>(
    out: &mut W,
    frames: &[DecodedFrame],
    config: &DecoderConfig,
) -> io::Result<()> {
    for frame in frames {
        writeln!(out, "{}", format_line(frame, config))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_frames;
    use dxlshark_core::{ByteEvent, Decoder, DecoderConfig};

    #[test]
    fn lines_carry_start_time() {
        let config = DecoderConfig::default();
        let bytes = [0xFF, 0xFF, 0x01, 0x02, 0x01, 0xFB];
        let events = bytes
            .iter()
            .enumerate()
            .map(|(i, b)| ByteEvent::new(*b, 0.5 + i as f64 * 1e-5, 0.5 + (i + 1) as f64 * 1e-5));
        let frames = Decoder::new(config).decode(events);

        let mut out = Vec::new();
        write_frames(&mut out, &frames, &config).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0.500000 Ping ID:1\n");
    }
}
