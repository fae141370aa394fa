use std::io::Write;

use qrcode::types::Color;
use tracing::debug;

/// Light modules kept around the symbol so scanners can find its edges.
const QUIET_ZONE: usize = 1;

/// Draw `code` with half-block glyphs, one text line per pair of module rows.
pub fn render_qr_compact(code: &qrcode::QrCode) -> String {
    let width = code.width();
    let side = width + 2 * QUIET_ZONE;

    let mut grid = vec![vec![false; side]; side];
    for (i, color) in code.to_colors().into_iter().enumerate() {
        grid[QUIET_ZONE + i / width][QUIET_ZONE + i % width] = color == Color::Dark;
    }

    grid.chunks(2)
        .map(|pair| {
            let upper = &pair[0];
            let lower = pair.get(1);
            let mut line: String = (0..side)
                .map(|x| glyph(upper[x], lower.is_some_and(|row| row[x])))
                .collect();
            line.push('\n');
            line
        })
        .collect()
}

fn glyph(upper: bool, lower: bool) -> char {
    match (upper, lower) {
        (true, true) => '\u{2588}',
        (true, false) => '\u{2580}',
        (false, true) => '\u{2584}',
        (false, false) => ' ',
    }
}

/// Write `link` as a QR code, preceded by a blank line. Links too long to
/// encode are skipped.
pub fn write_qr(w: &mut dyn Write, link: &str) {
    match qrcode::QrCode::new(link) {
        Ok(code) => {
            let _ = write!(w, "\n{}", render_qr_compact(&code));
        }
        Err(e) => debug!(error = %e, "link not rendered as QR code"),
    }
}
