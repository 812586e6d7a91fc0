//! Grid ↔ pixel mapping for the 330×330 raster form.
//!
//! ```text
//! | 15 px black | 10 px white | 7 × 40 px cells | 10 px white | 15 px black |
//! ```

use crate::error::RasterError;
use crate::grid::{Grid, GRID_SIZE};

/// Side of one cell in pixels.
pub const CELL_SIZE: u32 = 40;
/// Width of the outer black frame.
pub const BLACK_BORDER: u32 = 15;
/// Width of the white quiet zone inside the black frame.
pub const WHITE_BORDER: u32 = 10;
/// Combined border on each side.
pub const BORDER_SIZE: u32 = BLACK_BORDER + WHITE_BORDER;
/// Side of the full raster.
pub const IMAGE_SIZE: u32 = CELL_SIZE * GRID_SIZE as u32 + 2 * BORDER_SIZE;

pub const BLACK: u8 = 0;
pub const WHITE: u8 = 255;

/// Grayscale image with row-major pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub stride: u32,
    pub buf: Vec<u8>,
}

impl Raster {
    /// Create a new image filled with `fill`.
    pub fn new(width: u32, height: u32, fill: u8) -> Self {
        let stride = width;
        let buf = vec![fill; (stride * height) as usize];
        Self { width, height, stride, buf }
    }

    /// Create an image from existing pixel data.
    ///
    /// `stride` must be >= `width`, and `buf` must contain at least `stride * height` bytes.
    pub fn from_buf(width: u32, height: u32, stride: u32, buf: Vec<u8>) -> Self {
        assert!(stride >= width);
        assert!(buf.len() >= (stride * height) as usize);
        Self { width, height, stride, buf }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.buf[(y * self.stride + x) as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, val: u8) {
        self.buf[(y * self.stride + x) as usize] = val;
    }

    /// Pixel rows without stride padding.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.buf
            .chunks(self.stride as usize)
            .take(self.height as usize)
            .map(move |row| &row[..self.width as usize])
    }

    /// Bilinear interpolation at sub-pixel coordinates.
    ///
    /// Pixel `(i, j)` is centred at `(i + 0.5, j + 0.5)`; samples outside the
    /// image clamp to the nearest edge pixel. The image must not be empty.
    pub fn interpolate(&self, px: f64, py: f64) -> f64 {
        let (x, y) = (px - 0.5, py - 0.5);
        let (fx, fy) = (x - x.floor(), y - y.floor());
        let clamp = |v: f64, len: u32| (v as i64).clamp(0, len as i64 - 1) as u32;

        let (x0, x1) = (clamp(x.floor(), self.width), clamp(x.floor() + 1.0, self.width));
        let (y0, y1) = (clamp(y.floor(), self.height), clamp(y.floor() + 1.0, self.height));

        let lerp = |a: u8, b: u8, t: f64| a as f64 + (b as f64 - a as f64) * t;
        let top = lerp(self.get(x0, y0), self.get(x1, y0), fx);
        let bottom = lerp(self.get(x0, y1), self.get(x1, y1), fx);
        top + (bottom - top) * fy
    }
}

/// Region a raster pixel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    BlackBorder,
    WhiteBorder,
    /// Payload cell at `(row, col)`.
    Cell(usize, usize),
}

/// Classify raster pixel `(x, y)`. Coordinates must be below [`IMAGE_SIZE`].
pub fn classify_pixel(x: u32, y: u32) -> CellKind {
    let far = IMAGE_SIZE - BLACK_BORDER;
    if x < BLACK_BORDER || x >= far || y < BLACK_BORDER || y >= far {
        return CellKind::BlackBorder;
    }
    let far = IMAGE_SIZE - BORDER_SIZE;
    if x < BORDER_SIZE || x >= far || y < BORDER_SIZE || y >= far {
        return CellKind::WhiteBorder;
    }
    let row = ((y - BORDER_SIZE) / CELL_SIZE) as usize;
    let col = ((x - BORDER_SIZE) / CELL_SIZE) as usize;
    CellKind::Cell(row, col)
}

/// Render a grid as a black-and-white raster of side [`IMAGE_SIZE`].
pub fn grid_to_raster(grid: &Grid) -> Raster {
    let mut img = Raster::new(IMAGE_SIZE, IMAGE_SIZE, WHITE);
    for y in 0..IMAGE_SIZE {
        for x in 0..IMAGE_SIZE {
            let black = match classify_pixel(x, y) {
                CellKind::BlackBorder => true,
                CellKind::WhiteBorder => false,
                CellKind::Cell(r, c) => grid.get(r, c),
            };
            img.set(x, y, if black { BLACK } else { WHITE });
        }
    }
    img
}

/// Pixel `(x, y)` at the centre of each cell, indexed `[row][col]`.
pub fn sample_points() -> [[(u32, u32); GRID_SIZE]; GRID_SIZE] {
    sample_points_for(IMAGE_SIZE)
}

/// Cell-centre sample points scaled to a square raster of side `side`.
///
/// Each canonical centre pixel is mapped through the pixel-centre convention
/// `(p + 0.5) * side / IMAGE_SIZE`, so for `side == IMAGE_SIZE` the points
/// are exactly those of [`sample_points`]. `side` must be non-zero.
pub fn sample_points_for(side: u32) -> [[(u32, u32); GRID_SIZE]; GRID_SIZE] {
    let scale = |p: u32| {
        let scaled = (2 * p as u64 + 1) * side as u64 / (2 * IMAGE_SIZE as u64);
        (scaled as u32).min(side.saturating_sub(1))
    };
    let center = |i: usize| scale(BORDER_SIZE + i as u32 * CELL_SIZE + CELL_SIZE / 2);
    let mut points = [[(0, 0); GRID_SIZE]; GRID_SIZE];
    for (r, row) in points.iter_mut().enumerate() {
        for (c, p) in row.iter_mut().enumerate() {
            *p = (center(c), center(r));
        }
    }
    points
}

/// Read a grid back from a square raster of any side.
///
/// The 49 canonical sample points are scaled to the raster's side, so a
/// rescaled code of side `S` reads like the 330-pixel original. A cell is on
/// only if its sample pixel is exactly [`BLACK`]; anything lighter, including
/// anti-aliased gray, reads as off.
pub fn raster_to_grid(img: &Raster) -> Result<Grid, RasterError> {
    if img.width != img.height {
        return Err(RasterError::NotSquare {
            width: img.width,
            height: img.height,
        });
    }
    if img.width == 0 {
        return Err(RasterError::Empty);
    }

    let mut grid = Grid::new();
    for (r, row) in sample_points_for(img.width).iter().enumerate() {
        for (c, &(x, y)) in row.iter().enumerate() {
            grid.set(r, c, img.get(x, y) == BLACK);
        }
    }
    Ok(grid)
}
