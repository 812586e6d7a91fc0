//! Assigning four detected quad corners to top-left/top-right/bottom-left/
//! bottom-right before rectification.

use crate::error::{AmbiguousCorners, Quadrant};

/// Quad corners in image coordinates (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderedCorners {
    pub top_left: [f64; 2],
    pub top_right: [f64; 2],
    pub bottom_left: [f64; 2],
    pub bottom_right: [f64; 2],
}

impl OrderedCorners {
    /// Corners as `[TL, TR, BL, BR]`.
    pub fn to_array(&self) -> [[f64; 2]; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }
}

/// Arithmetic mean of the four points.
pub fn mean_centroid(points: &[[f64; 2]; 4]) -> [f64; 2] {
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
    [sx / 4.0, sy / 4.0]
}

/// Area-weighted centroid of the quad taken as a polygon in the given order.
///
/// This is the centre of mass a contour-moments routine reports for the
/// outline. Returns `None` for a zero-area polygon.
pub fn area_centroid(points: &[[f64; 2]; 4]) -> Option<[f64; 2]> {
    let mut a = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..4 {
        let [x0, y0] = points[i];
        let [x1, y1] = points[(i + 1) % 4];
        let cross = x0 * y1 - x1 * y0;
        a += cross;
        cx += (x0 + x1) * cross;
        cy += (y0 + y1) * cross;
    }
    if a.abs() < 1e-12 {
        return None;
    }
    let a = a / 2.0;
    Some([cx / (6.0 * a), cy / (6.0 * a)])
}

/// Classify four unordered points by quadrant around their mean.
pub fn classify_corners(points: &[[f64; 2]; 4]) -> Result<OrderedCorners, AmbiguousCorners> {
    classify_corners_about(points, mean_centroid(points))
}

/// Classify four points by the sign of their offset from `centroid`.
///
/// A point exactly on the centroid's horizontal or vertical axis has no
/// quadrant and fails with [`AmbiguousCorners::OnAxis`].
pub fn classify_corners_about(
    points: &[[f64; 2]; 4],
    centroid: [f64; 2],
) -> Result<OrderedCorners, AmbiguousCorners> {
    let [cx, cy] = centroid;
    let mut slots: [Option<[f64; 2]>; 4] = [None; 4];

    for (index, &p) in points.iter().enumerate() {
        let dx = p[0] - cx;
        let dy = p[1] - cy;
        let quadrant = match (dx < 0.0, dx > 0.0, dy < 0.0, dy > 0.0) {
            (true, _, true, _) => Quadrant::TopLeft,
            (_, true, true, _) => Quadrant::TopRight,
            (true, _, _, true) => Quadrant::BottomLeft,
            (_, true, _, true) => Quadrant::BottomRight,
            _ => return Err(AmbiguousCorners::OnAxis { index }),
        };

        let slot = &mut slots[quadrant as usize];
        if slot.is_some() {
            return Err(AmbiguousCorners::QuadrantConflict { quadrant });
        }
        *slot = Some(p);
    }

    let take = |quadrant: Quadrant| {
        slots[quadrant as usize].ok_or(AmbiguousCorners::EmptyQuadrant { quadrant })
    };

    Ok(OrderedCorners {
        top_left: take(Quadrant::TopLeft)?,
        top_right: take(Quadrant::TopRight)?,
        bottom_left: take(Quadrant::BottomLeft)?,
        bottom_right: take(Quadrant::BottomRight)?,
    })
}
