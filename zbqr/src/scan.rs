//! Frame-level scanning: source image + quad corners → text.

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::codec;
use crate::corners::{self, OrderedCorners};
use crate::error::{RasterError, ScanError};
use crate::orientation::Rotation;
use crate::raster::{self, Raster, IMAGE_SIZE};
use crate::rectify;

/// Per-frame scan settings. Passed by reference into every call; nothing is
/// kept between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanConfig {
    /// Gray level at or below which a rectified pixel counts as black.
    pub threshold: u8,
    /// Flip the frame left to right before scanning (front-facing cameras).
    pub mirrored: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: 180,
            mirrored: false,
        }
    }
}

#[cfg(feature = "serde")]
impl ScanConfig {
    /// Parse a TOML config. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

/// One source image with the four corner points believed to bound a code.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: Raster,
    pub quad: [[f64; 2]; 4],
}

/// A successfully scanned code.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub text: String,
    /// Corners in the (possibly mirrored) frame, classified.
    pub corners: OrderedCorners,
    /// Rotation undone to bring the grid upright.
    pub rotation: Rotation,
}

/// Rectify the quad, sample the grid and decode it.
pub fn scan_frame(
    image: &Raster,
    quad: &[[f64; 2]; 4],
    config: &ScanConfig,
) -> Result<ScanResult, ScanError> {
    if image.width == 0 || image.height == 0 {
        return Err(RasterError::Empty.into());
    }

    let mirrored;
    let (image, quad) = if config.mirrored {
        mirrored = rectify::mirror_horizontal(image);
        let w = image.width as f64 - 1.0;
        (&mirrored, (*quad).map(|[x, y]| [w - x, y]))
    } else {
        (image, *quad)
    };

    let corners = corners::classify_corners(&quad)?;
    let rectified = rectify::warp_to_square(image, &corners, IMAGE_SIZE, config.threshold)
        .ok_or(ScanError::DegenerateQuad)?;
    let grid = raster::raster_to_grid(&rectified)?;

    let decoded = codec::decode_oriented(&grid).map_err(|e| {
        log::debug!("rejected frame: {e}");
        e
    })?;

    Ok(ScanResult {
        text: decoded.text,
        corners,
        rotation: decoded.rotation,
    })
}

/// Scan every frame independently, in order.
#[cfg(not(feature = "parallel"))]
pub fn scan_frames(frames: &[Frame], config: &ScanConfig) -> Vec<Result<ScanResult, ScanError>> {
    frames
        .iter()
        .map(|f| scan_frame(&f.image, &f.quad, config))
        .collect()
}

/// Scan every frame independently; results keep the input order.
#[cfg(feature = "parallel")]
pub fn scan_frames(frames: &[Frame], config: &ScanConfig) -> Vec<Result<ScanResult, ScanError>> {
    frames
        .par_iter()
        .map(|f| scan_frame(&f.image, &f.quad, config))
        .collect()
}
