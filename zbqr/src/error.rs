use thiserror::Error;

/// A character outside the 64-symbol alphabet.
///
/// The encoder recovers from this by writing the ignore marker instead, so it
/// is only ever seen by callers of [`crate::alphabet::symbol_to_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("character {0:?} is not in the alphabet")]
pub struct UnknownSymbol(pub char);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected exactly one orientation marker off, found {markers_off}")]
    InvalidOrientation { markers_off: usize },

    #[error("checksum does not match: stored {stored}, computed {computed}")]
    ChecksumMismatch { stored: u8, computed: u8 },
}

/// Quadrant of a corner point relative to the quad centroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Quadrant::TopLeft => "top-left",
            Quadrant::TopRight => "top-right",
            Quadrant::BottomLeft => "bottom-left",
            Quadrant::BottomRight => "bottom-right",
        };
        f.write_str(name)
    }
}

/// Four points that cannot be assigned one-to-one to the four quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmbiguousCorners {
    #[error("point {index} lies on a centroid axis")]
    OnAxis { index: usize },

    #[error("more than one point in the {quadrant} quadrant")]
    QuadrantConflict { quadrant: Quadrant },

    #[error("no point in the {quadrant} quadrant")]
    EmptyQuadrant { quadrant: Quadrant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("raster is {width}x{height}, expected a square")]
    NotSquare { width: u32, height: u32 },

    #[error("raster has no pixels")]
    Empty,
}

/// Failure of the frame-level scan pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("corner classification failed: {0}")]
    Corners(#[from] AmbiguousCorners),

    #[error("corner points do not define a perspective transform")]
    DegenerateQuad,

    #[error("raster error: {0}")]
    Raster(#[from] RasterError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}
