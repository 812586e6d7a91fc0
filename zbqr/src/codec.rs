//! Text ↔ grid encoding.
//!
//! Each of the seven columns carries one 6-bit symbol code, most significant
//! bit at the top. Columns 1 and 5 run through the marker rows, so they skip
//! rows 1 and 5 and spill their last two bits into row 6: bit 4 into their
//! own column and bit 5 into the outer neighbour (column 0 or 6).

use crate::alphabet::{self, IGNORE_CODE};
use crate::error::DecodeError;
use crate::grid::{Grid, CHECKSUM_COLS, CHECKSUM_ROW, GRID_SIZE};
use crate::orientation::{self, Rotation};

/// Number of symbols carried by one grid.
pub const MESSAGE_LEN: usize = GRID_SIZE;

const BITS_PER_SYMBOL: usize = 6;

/// A decoded grid: the text and the rotation that was undone to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub rotation: Rotation,
}

/// Grid cells `(row, col)` holding the bits of column `col`'s symbol, MSB first.
fn bit_cells(col: usize) -> [(usize, usize); BITS_PER_SYMBOL] {
    match col {
        1 => [(0, 1), (2, 1), (3, 1), (4, 1), (6, 1), (6, 0)],
        5 => [(0, 5), (2, 5), (3, 5), (4, 5), (6, 5), (6, 6)],
        _ => [(0, col), (1, col), (2, col), (3, col), (4, col), (5, col)],
    }
}

/// Symbol codes for `text`: the first seven characters, unknown ones replaced
/// by the ignore marker, padded with ignore markers.
pub fn message_codes(text: &str) -> [u8; MESSAGE_LEN] {
    let mut codes = [IGNORE_CODE; MESSAGE_LEN];
    let mut chars = text.chars();
    for (slot, c) in codes.iter_mut().zip(chars.by_ref()) {
        *slot = alphabet::symbol_or_ignore(c);
    }
    if chars.next().is_some() {
        log::debug!(
            "truncating {:?} to its first {MESSAGE_LEN} characters",
            text
        );
    }
    codes
}

/// Encode `text` into a grid in canonical orientation.
///
/// Never fails: text longer than seven characters is truncated and characters
/// outside the alphabet are encoded as the ignore marker.
pub fn encode(text: &str) -> Grid {
    let codes = message_codes(text);
    let mut grid = Grid::new();

    for (col, &code) in codes.iter().enumerate() {
        for (bit, &(r, c)) in bit_cells(col).iter().enumerate() {
            let on = (code >> (BITS_PER_SYMBOL - 1 - bit)) & 1 == 1;
            grid.set(r, c, on);
        }
    }

    orientation::set_markers(&mut grid);

    let sum = checksum(&grid);
    write_checksum(&mut grid, sum);
    grid
}

/// On cells outside the checksum field, mod 8.
pub fn checksum(grid: &Grid) -> u8 {
    let in_field = CHECKSUM_COLS
        .iter()
        .filter(|&&c| grid.get(CHECKSUM_ROW, c))
        .count() as u32;
    ((grid.count_on() - in_field) % 8) as u8
}

/// The 3-bit value stored in the checksum field.
pub fn stored_checksum(grid: &Grid) -> u8 {
    CHECKSUM_COLS
        .iter()
        .fold(0u8, |acc, &c| (acc << 1) | grid.get(CHECKSUM_ROW, c) as u8)
}

fn write_checksum(grid: &mut Grid, sum: u8) {
    for (i, &c) in CHECKSUM_COLS.iter().enumerate() {
        grid.set(CHECKSUM_ROW, c, (sum >> (2 - i)) & 1 == 1);
    }
}

/// Raw symbol codes of a canonically oriented grid, in column order.
pub fn column_codes(grid: &Grid) -> [u8; MESSAGE_LEN] {
    let mut codes = [0u8; MESSAGE_LEN];
    for (col, code) in codes.iter_mut().enumerate() {
        *code = bit_cells(col)
            .iter()
            .fold(0u8, |acc, &(r, c)| (acc << 1) | grid.get(r, c) as u8);
    }
    codes
}

/// Decode a grid held at any quarter-turn rotation.
pub fn decode(grid: &Grid) -> Result<String, DecodeError> {
    decode_oriented(grid).map(|d| d.text)
}

/// Like [`decode`], also reporting the rotation that was undone.
///
/// Orientation is checked before the checksum, so a grid with a bad marker
/// pattern is always reported as [`DecodeError::InvalidOrientation`].
pub fn decode_oriented(grid: &Grid) -> Result<Decoded, DecodeError> {
    let rotation = orientation::detect_rotation(grid)?;
    let grid = grid.rotated(rotation);

    let stored = stored_checksum(&grid);
    let computed = checksum(&grid);
    if stored != computed {
        return Err(DecodeError::ChecksumMismatch { stored, computed });
    }

    let text = column_codes(&grid)
        .iter()
        .map(|&code| alphabet::code_to_symbol(code))
        .filter(|&c| !alphabet::is_ignore(c))
        .collect();

    Ok(Decoded { text, rotation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MARKER_CELLS;

    #[test]
    fn bit_cells_cover_payload_exactly_once() {
        let mut seen = Grid::new();
        for col in 0..GRID_SIZE {
            for (r, c) in bit_cells(col) {
                assert!(Grid::is_payload(r, c), "({r}, {c}) is not payload");
                assert!(!seen.get(r, c), "({r}, {c}) used twice");
                seen.set(r, c, true);
            }
        }
        assert_eq!(seen.count_on(), 42);
    }

    #[test]
    fn hello_pads_with_ignore() {
        let codes = message_codes("HELLO");
        assert_eq!(codes[5], IGNORE_CODE);
        assert_eq!(codes[6], IGNORE_CODE);
        assert_eq!(decode(&encode("HELLO")).unwrap(), "HELLO");
    }

    #[test]
    fn empty_text_is_all_ignore() {
        assert_eq!(message_codes(""), [IGNORE_CODE; MESSAGE_LEN]);
        assert_eq!(decode(&encode("")).unwrap(), "");
    }

    #[test]
    fn long_text_truncated() {
        assert_eq!(decode(&encode("ABCDEFGHIJ")).unwrap(), "ABCDEFG");
    }

    #[test]
    fn unknown_characters_dropped() {
        assert_eq!(decode(&encode("a!b?c")).unwrap(), "abc");
    }

    #[test]
    fn embedded_ignore_marker_dropped() {
        assert_eq!(decode(&encode("ab%cd")).unwrap(), "abcd");
    }

    #[test]
    fn encoded_grid_is_canonical() {
        let g = encode("Zq 91x");
        assert!(!g.get(1, 1));
        for &(r, c) in &MARKER_CELLS[1..] {
            assert!(g.get(r, c));
        }
    }

    #[test]
    fn regular_column_layout() {
        // '7' = 7 = 0b000111 in column 0
        let g = encode("7");
        let bits: Vec<bool> = (0..6).map(|r| g.get(r, 0)).collect();
        assert_eq!(bits, [false, false, false, true, true, true]);
    }

    #[test]
    fn special_column_layout() {
        // 'Z' = 35 = 0b100011 in column 1
        let g = encode("0Z");
        assert!(g.get(0, 1)); // bit 0
        assert!(!g.get(2, 1)); // bit 1
        assert!(!g.get(3, 1)); // bit 2
        assert!(!g.get(4, 1)); // bit 3
        assert!(g.get(6, 1)); // bit 4
        assert!(g.get(6, 0)); // bit 5, borrowed from column 0
    }

    #[test]
    fn column_five_overflows_right() {
        // ' ' = 63 = 0b111111 in column 5, '0' elsewhere
        let g = encode("00000 0");
        assert!(g.get(6, 6));
        assert!(g.get(6, 5));
        assert_eq!(column_codes(&g), [0, 0, 0, 0, 0, 63, 0]);
    }

    #[test]
    fn checksum_stored_msb_first() {
        let g = encode("HELLO");
        assert_eq!(stored_checksum(&g), checksum(&g));

        // All '0' symbols: only the three on markers count.
        let g = encode("0000000");
        assert_eq!(checksum(&g), 3);
        assert!(!g.get(6, 2));
        assert!(g.get(6, 3));
        assert!(g.get(6, 4));
    }

    #[test]
    fn checksum_mismatch_reported() {
        let mut g = encode("HELLO");
        g.toggle(0, 0);
        let err = decode(&g).unwrap_err();
        assert!(matches!(err, DecodeError::ChecksumMismatch { .. }), "{err:?}");
    }

    #[test]
    fn orientation_checked_before_checksum() {
        let mut g = encode("HELLO");
        g.set(1, 1, true);
        g.toggle(3, 3);
        assert_eq!(
            decode(&g),
            Err(DecodeError::InvalidOrientation { markers_off: 0 })
        );
    }

    #[test]
    fn decode_reads_the_normalized_grid() {
        let g = encode("Zq 91x");
        for rot in Rotation::ALL {
            let turned = g.rotated(rot);
            let d = decode_oriented(&turned).unwrap();
            assert_eq!(orientation::normalize(&turned), Ok(turned.rotated(d.rotation)));
            assert_eq!(turned.rotated(d.rotation), g, "{rot:?}");
        }
    }

    #[test]
    fn decode_reports_rotation() {
        let g = encode("abc");
        let d = decode_oriented(&g.rotated(Rotation::Deg90)).unwrap();
        assert_eq!(d.text, "abc");
        assert_eq!(d.rotation, Rotation::Deg270);
    }
}
