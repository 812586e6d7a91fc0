//! Synthetic scenes: a rendered code warped into a larger image.
#![allow(dead_code)]

use zbqr::raster::{Raster, IMAGE_SIZE};
use zbqr::rectify::Homography;

/// A scene image plus the scene positions of the code's own corners,
/// in code order `[TL, TR, BL, BR]`.
pub struct Scene {
    pub image: Raster,
    pub quad: [[f64; 2]; 4],
}

/// Paint `code` (a 330×330 raster) into a `width`×`height` gray scene so that
/// its corners land on `quad`. Pixels outside the code keep `background`.
pub fn place_code(width: u32, height: u32, background: u8, code: &Raster, quad: [[f64; 2]; 4]) -> Scene {
    assert_eq!(code.width, IMAGE_SIZE);
    let s = (IMAGE_SIZE - 1) as f64;
    let square = [[0.0, 0.0], [s, 0.0], [0.0, s], [s, s]];
    let inv = Homography::from_correspondences(&square, &quad)
        .and_then(|h| h.inverse())
        .expect("placement quad should be non-degenerate");

    let mut image = Raster::new(width, height, background);
    for iy in 0..height {
        for ix in 0..width {
            let (cx, cy) = inv.project(ix as f64, iy as f64);
            let (cx, cy) = (cx.round(), cy.round());
            if cx < 0.0 || cy < 0.0 || cx > s || cy > s {
                continue;
            }
            image.set(ix, iy, code.get(cx as u32, cy as u32));
        }
    }

    Scene { image, quad }
}

/// Small deterministic generator so property loops are reproducible.
pub struct Lcg(pub u64);

impl Lcg {
    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    pub fn below(&mut self, n: u32) -> u32 {
        self.next_u32() % n
    }
}
