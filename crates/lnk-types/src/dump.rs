use std::fmt::Write as _;

/// Bytes shown per dump line.
const LINE_WIDTH: usize = 16;

/// Render `data` as a canonical hex dump.
///
/// ```text
/// 00000000  54 72 61 63 6b 65 72 00  00 00 00 00 00 00 00 00  |Tracker.........|
/// 00000010  01 02                                             |..|
/// ```
///
/// Each line holds the offset, sixteen bytes split into two groups of
/// eight, and a printable-ASCII gutter. Every line ends in `\n`. Empty
/// input gives an empty string.
#[must_use]
pub fn hex_dump(data: &[u8]) -> String {
    let lines = data.len().div_ceil(LINE_WIDTH);
    let mut out = String::with_capacity(lines * 79);

    for (i, chunk) in data.chunks(LINE_WIDTH).enumerate() {
        let _ = write!(out, "{:08x}  ", i * LINE_WIDTH);

        for col in 0..LINE_WIDTH {
            match chunk.get(col) {
                Some(b) => {
                    let _ = write!(out, "{b:02x} ");
                }
                None => out.push_str("   "),
            }
            if col == 7 {
                out.push(' ');
            }
        }

        out.push_str(" |");
        out.extend(chunk.iter().map(|&b| {
            if (0x20..=0x7E).contains(&b) {
                b as char
            } else {
                '.'
            }
        }));
        out.push_str("|\n");
    }

    out
}
