use std::fmt;

use crate::orientation::{self, Rotation};

/// Side length of the code, in cells.
pub const GRID_SIZE: usize = 7;

/// Orientation marker cells as `(row, col)`.
pub const MARKER_CELLS: [(usize, usize); 4] = [(1, 1), (1, 5), (5, 1), (5, 5)];

/// Row holding the 3-bit checksum.
pub const CHECKSUM_ROW: usize = 6;

/// Columns of [`CHECKSUM_ROW`] holding the checksum, most significant bit first.
pub const CHECKSUM_COLS: [usize; 3] = [2, 3, 4];

/// A 7×7 boolean matrix, indexed `[row][col]`. `true` is an "on" (black) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [[bool; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// A grid with every cell off.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(cells: [[bool; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[[bool; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, on: bool) {
        self.cells[row][col] = on;
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        self.cells[row][col] = !self.cells[row][col];
    }

    /// Number of on cells in the whole grid.
    pub fn count_on(&self) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|&&on| on)
            .count() as u32
    }

    /// This grid rotated counter-clockwise.
    pub fn rotated(&self, rotation: Rotation) -> Grid {
        let rows: Vec<Vec<bool>> = self.cells.iter().map(|r| r.to_vec()).collect();
        let turned = orientation::rotate(&rows, rotation);

        let mut out = Grid::new();
        for (r, row) in turned.iter().enumerate() {
            for (c, &on) in row.iter().enumerate() {
                out.cells[r][c] = on;
            }
        }
        out
    }

    pub fn is_marker(row: usize, col: usize) -> bool {
        MARKER_CELLS.contains(&(row, col))
    }

    pub fn is_checksum(row: usize, col: usize) -> bool {
        row == CHECKSUM_ROW && CHECKSUM_COLS.contains(&col)
    }

    /// Whether the cell carries character bits.
    pub fn is_payload(row: usize, col: usize) -> bool {
        row < GRID_SIZE
            && col < GRID_SIZE
            && !Self::is_marker(row, col)
            && !Self::is_checksum(row, col)
    }
}

/// Rows of `1`/`0` separated by spaces, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<&str> = row.iter().map(|&on| if on { "1" } else { "0" }).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
