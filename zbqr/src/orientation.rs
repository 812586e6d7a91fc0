//! Orientation markers and quarter-turn rotation.
//!
//! A valid grid has exactly one of its four marker cells off. In canonical
//! orientation that cell is (1,1); wherever it is found tells how far the
//! grid was turned.

use crate::error::DecodeError;
use crate::grid::{Grid, MARKER_CELLS};

/// A counter-clockwise quarter-turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Rotation by `n` counter-clockwise quarter turns. Negative `n` turns clockwise.
    pub fn from_quarter_turns(n: i32) -> Self {
        match n.rem_euclid(4) {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// `None` unless `degrees` is a multiple of 90.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(Self::from_quarter_turns(degrees / 90))
    }

    pub fn quarter_turns(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    pub fn degrees(self) -> u32 {
        self.quarter_turns() as u32 * 90
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        Self::from_quarter_turns(-self.quarter_turns())
    }

    /// This rotation followed by `next`.
    pub fn then(self, next: Rotation) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + next.quarter_turns())
    }
}

/// Rotate a rectangular matrix counter-clockwise.
///
/// An `M×N` input becomes `N×M` for 90° and 270°. Rows are assumed to share
/// the length of the first row.
pub fn rotate<T: Clone>(m: &[Vec<T>], rotation: Rotation) -> Vec<Vec<T>> {
    let rows = m.len();
    let cols = m.first().map_or(0, |r| r.len());
    if rows == 0 || cols == 0 {
        return m.to_vec();
    }

    match rotation {
        Rotation::Deg0 => m.to_vec(),
        Rotation::Deg90 => (0..cols)
            .map(|i| (0..rows).map(|j| m[j][cols - 1 - i].clone()).collect())
            .collect(),
        Rotation::Deg180 => (0..rows)
            .map(|i| (0..cols).map(|j| m[rows - 1 - i][cols - 1 - j].clone()).collect())
            .collect(),
        Rotation::Deg270 => (0..cols)
            .map(|i| (0..rows).map(|j| m[rows - 1 - j][i].clone()).collect())
            .collect(),
    }
}

/// Rotation that brings a grid to canonical orientation, keyed by which
/// marker is off. Order matches [`MARKER_CELLS`].
const MARKER_ROTATIONS: [Rotation; 4] = [
    Rotation::Deg0,
    Rotation::Deg90,
    Rotation::Deg270,
    Rotation::Deg180,
];

/// Find the rotation that brings `grid` to canonical orientation.
pub fn detect_rotation(grid: &Grid) -> Result<Rotation, DecodeError> {
    let mut found = None;
    let mut markers_off = 0;
    for (&(r, c), &rotation) in MARKER_CELLS.iter().zip(MARKER_ROTATIONS.iter()) {
        if !grid.get(r, c) {
            markers_off += 1;
            found = Some(rotation);
        }
    }

    match found {
        Some(rotation) if markers_off == 1 => Ok(rotation),
        _ => Err(DecodeError::InvalidOrientation { markers_off }),
    }
}

/// Rotate `grid` into canonical orientation.
///
/// This is the orientation step of [`crate::codec::decode_oriented`], which
/// calls [`detect_rotation`] directly because it also reports the rotation.
pub fn normalize(grid: &Grid) -> Result<Grid, DecodeError> {
    let rotation = detect_rotation(grid)?;
    Ok(grid.rotated(rotation))
}

/// Write the canonical marker pattern: (1,1) off, the other three on.
pub fn set_markers(grid: &mut Grid) {
    for (i, &(r, c)) in MARKER_CELLS.iter().enumerate() {
        grid.set(r, c, i != 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(rows: usize, cols: usize) -> Vec<Vec<usize>> {
        (0..rows)
            .map(|r| (0..cols).map(|c| r * cols + c).collect())
            .collect()
    }

    #[test]
    fn rotate_90_rectangular() {
        // 0 1 2        2 5
        // 3 4 5   ->   1 4
        //              0 3
        let m = numbered(2, 3);
        let r = rotate(&m, Rotation::Deg90);
        assert_eq!(r, vec![vec![2, 5], vec![1, 4], vec![0, 3]]);
    }

    #[test]
    fn rotate_180_rectangular() {
        let m = numbered(2, 3);
        let r = rotate(&m, Rotation::Deg180);
        assert_eq!(r, vec![vec![5, 4, 3], vec![2, 1, 0]]);
    }

    #[test]
    fn rotate_270_rectangular() {
        let m = numbered(2, 3);
        let r = rotate(&m, Rotation::Deg270);
        assert_eq!(r, vec![vec![3, 0], vec![4, 1], vec![5, 2]]);
    }

    #[test]
    fn rotate_then_inverse_is_identity() {
        let m = numbered(3, 5);
        for rot in Rotation::ALL {
            let back = rotate(&rotate(&m, rot), rot.inverse());
            assert_eq!(back, m, "{rot:?}");
        }
    }

    #[test]
    fn four_quarter_turns_is_identity() {
        let m = numbered(4, 2);
        let mut v = m.clone();
        for _ in 0..4 {
            v = rotate(&v, Rotation::Deg90);
        }
        assert_eq!(v, m);
    }

    #[test]
    fn rotate_empty() {
        let m: Vec<Vec<u8>> = Vec::new();
        assert!(rotate(&m, Rotation::Deg90).is_empty());
    }

    #[test]
    fn rotation_arithmetic() {
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(450), Some(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::Deg90.then(Rotation::Deg270), Rotation::Deg0);
        assert_eq!(Rotation::Deg90.inverse(), Rotation::Deg270);
        assert_eq!(Rotation::Deg180.degrees(), 180);
    }

    fn canonical() -> Grid {
        let mut g = Grid::new();
        set_markers(&mut g);
        g
    }

    #[test]
    fn canonical_needs_no_rotation() {
        assert_eq!(detect_rotation(&canonical()), Ok(Rotation::Deg0));
    }

    #[test]
    fn each_marker_maps_to_its_rotation() {
        for (&(r, c), &expected) in MARKER_CELLS.iter().zip(MARKER_ROTATIONS.iter()) {
            let mut g = Grid::new();
            for &(mr, mc) in &MARKER_CELLS {
                g.set(mr, mc, (mr, mc) != (r, c));
            }
            assert_eq!(detect_rotation(&g), Ok(expected), "marker ({r}, {c})");
        }
    }

    #[test]
    fn normalize_undoes_any_rotation() {
        let mut g = canonical();
        g.set(0, 0, true);
        g.set(3, 6, true);
        for rot in Rotation::ALL {
            let turned = g.rotated(rot);
            assert_eq!(normalize(&turned), Ok(g), "{rot:?}");
        }
    }

    #[test]
    fn all_markers_on_rejected() {
        let mut g = Grid::new();
        for &(r, c) in &MARKER_CELLS {
            g.set(r, c, true);
        }
        assert_eq!(
            detect_rotation(&g),
            Err(DecodeError::InvalidOrientation { markers_off: 0 })
        );
    }

    #[test]
    fn two_markers_off_rejected() {
        let mut g = canonical();
        g.set(5, 5, false);
        assert_eq!(
            normalize(&g),
            Err(DecodeError::InvalidOrientation { markers_off: 2 })
        );
        assert_eq!(
            normalize(&Grid::new()),
            Err(DecodeError::InvalidOrientation { markers_off: 4 })
        );
    }
}
