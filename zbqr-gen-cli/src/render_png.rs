//! PNG output for code rasters.

use anyhow::{Context, Result};
use std::path::Path;
use zbqr::raster::{Raster, BLACK};

/// Write a raster as a 1-bit grayscale PNG. Pure black stays black; every
/// other value is written as white.
pub fn write_raster_png(img: &Raster, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let w = std::io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, img.width, img.height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::One);

    let data: Vec<u8> = img.rows().flat_map(pack_row).collect();

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("writing PNG header for {}", path.display()))?;
    writer
        .write_image_data(&data)
        .with_context(|| format!("writing PNG data for {}", path.display()))?;

    Ok(())
}

/// Pack one row into bytes, most significant bit first, `1` = white.
fn pack_row(row: &[u8]) -> Vec<u8> {
    row.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &v)| {
                    if v == BLACK {
                        byte
                    } else {
                        byte | (0x80 >> i)
                    }
                })
        })
        .collect()
}
