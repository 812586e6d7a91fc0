pub mod error;
pub mod alphabet;
pub mod grid;
pub mod orientation;
pub mod codec;
pub mod raster;
pub mod corners;
pub mod rectify;
pub mod scan;

pub use codec::{decode, encode};
pub use corners::{classify_corners, OrderedCorners};
pub use error::{AmbiguousCorners, DecodeError, RasterError, ScanError, UnknownSymbol};
pub use grid::Grid;
pub use orientation::Rotation;
pub use raster::Raster;
pub use scan::{scan_frame, ScanConfig};

/// Encode `text` straight to its 330×330 raster.
pub fn encode_raster(text: &str) -> Raster {
    raster::grid_to_raster(&codec::encode(text))
}

/// Decode a rectified square raster of any side.
pub fn decode_raster(img: &Raster) -> Result<String, ScanError> {
    let grid = raster::raster_to_grid(img)?;
    Ok(codec::decode(&grid)?)
}
