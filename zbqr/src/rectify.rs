//! Minimal perspective rectification: a 4-point homography and a warp that
//! resamples a quad from a source image onto a square binary raster.
//!
//! Stands in for a full vision library; it does not look for the quad.

use crate::corners::OrderedCorners;
use crate::raster::{Raster, BLACK, WHITE};

/// A 3x3 homography matrix.
#[derive(Debug, Clone, Copy)]
pub struct Homography {
    pub data: [[f64; 3]; 3],
}

/// The two DLT rows contributed by one correspondence `s -> d`, with the
/// right-hand side in the last column (`h[8]` fixed to 1).
fn dlt_rows(s: [f64; 2], d: [f64; 2]) -> [[f64; 9]; 2] {
    let [sx, sy] = s;
    let [dx, dy] = d;
    [
        [sx, sy, 1.0, 0.0, 0.0, 0.0, -sx * dx, -sy * dx, dx],
        [0.0, 0.0, 0.0, sx, sy, 1.0, -sx * dy, -sy * dy, dy],
    ]
}

/// Solve an 8×8 system given as an augmented matrix, by Gauss-Jordan
/// elimination with partial pivoting.
fn solve8(mut a: [[f64; 9]; 8]) -> Option<[f64; 8]> {
    for col in 0..8 {
        let pivot_row = (col..8).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot_row][col].abs() < 1e-10 {
            return None;
        }
        a.swap(col, pivot_row);

        let pivot = a[col];
        let scaled = pivot.map(|v| v / pivot[col]);
        a[col] = scaled;
        for (row, r) in a.iter_mut().enumerate() {
            if row == col || r[col] == 0.0 {
                continue;
            }
            let factor = r[col];
            for (v, p) in r.iter_mut().zip(scaled.iter()).skip(col) {
                *v -= factor * p;
            }
        }
    }
    Some(std::array::from_fn(|i| a[i][8]))
}

impl Homography {
    /// Solve for the homography mapping each `src[i]` onto `dst[i]`.
    ///
    /// Returns `None` when the correspondences are degenerate (for example,
    /// three collinear points).
    pub fn from_correspondences(src: &[[f64; 2]; 4], dst: &[[f64; 2]; 4]) -> Option<Self> {
        let mut a = [[0.0f64; 9]; 8];
        for (i, (&s, &d)) in src.iter().zip(dst.iter()).enumerate() {
            let [r0, r1] = dlt_rows(s, d);
            a[2 * i] = r0;
            a[2 * i + 1] = r1;
        }

        let h = solve8(a)?;
        Some(Homography {
            data: [[h[0], h[1], h[2]], [h[3], h[4], h[5]], [h[6], h[7], 1.0]],
        })
    }

    /// Map the corners of a `side`×`side` pixel square onto a quad.
    ///
    /// Square pixel `(0,0)` lands on the top-left corner and
    /// `(side-1, side-1)` on the bottom-right one.
    pub fn square_to_quad(side: u32, corners: &OrderedCorners) -> Option<Self> {
        let s = side.saturating_sub(1) as f64;
        let square = [[0.0, 0.0], [s, 0.0], [0.0, s], [s, s]];
        Self::from_correspondences(&square, &corners.to_array())
    }

    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        let [u, v, w] = self.data.map(|row| row[0] * x + row[1] * y + row[2]);
        (u / w, v / w)
    }

    pub fn inverse(&self) -> Option<Self> {
        let m = &self.data;
        // Signed cofactor of (r, c) via cyclic indices.
        let cof = |r: usize, c: usize| {
            let (r1, r2) = ((r + 1) % 3, (r + 2) % 3);
            let (c1, c2) = ((c + 1) % 3, (c + 2) % 3);
            m[r1][c1] * m[r2][c2] - m[r1][c2] * m[r2][c1]
        };

        let det: f64 = (0..3).map(|c| m[0][c] * cof(0, c)).sum();
        if det.abs() < 1e-10 {
            return None;
        }

        let data = std::array::from_fn(|r| std::array::from_fn(|c| cof(c, r) / det));
        Some(Homography { data })
    }
}

/// Resample the quad bounded by `corners` onto a `side`×`side` raster.
///
/// Each output pixel is bilinearly sampled from `img` and binarized: values
/// above `threshold` become white, the rest black. Returns `None` if the
/// corners are degenerate or `img` has no pixels.
pub fn warp_to_square(
    img: &Raster,
    corners: &OrderedCorners,
    side: u32,
    threshold: u8,
) -> Option<Raster> {
    if img.width == 0 || img.height == 0 {
        return None;
    }
    let h = Homography::square_to_quad(side, corners)?;
    let mut out = Raster::new(side, side, WHITE);
    let t = threshold as f64;

    for y in 0..side {
        for x in 0..side {
            let (px, py) = h.project(x as f64, y as f64);
            if !px.is_finite() || !py.is_finite() {
                continue;
            }
            // Pixel centres sit at +0.5 in `interpolate`'s convention.
            let v = img.interpolate(px + 0.5, py + 0.5);
            out.set(x, y, if v > t { WHITE } else { BLACK });
        }
    }
    Some(out)
}

/// Flip an image left to right.
pub fn mirror_horizontal(img: &Raster) -> Raster {
    let mut out = Raster::new(img.width, img.height, 0);
    for y in 0..img.height {
        for x in 0..img.width {
            out.set(img.width - 1 - x, y, img.get(x, y));
        }
    }
    out
}
