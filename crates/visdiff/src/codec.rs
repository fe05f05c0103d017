use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;

use crate::compare::raster::RasterBuffer;

/// Decode an encoded image (PNG, JPEG, ...) into an RGBA raster.
pub fn decode(bytes: &[u8]) -> Result<RasterBuffer> {
    let img = image::load_from_memory(bytes)
        .context("Failed to decode image")?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(RasterBuffer::from_raw(width, height, img.into_raw())?)
}

/// Decode an image file into an RGBA raster.
pub fn decode_file(path: &Path) -> Result<RasterBuffer> {
    let img = image::ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(RasterBuffer::from_raw(width, height, img.into_raw())?)
}

/// Encode a raster as PNG bytes.
pub fn encode_png(raster: RasterBuffer) -> Result<Vec<u8>> {
    let (width, height) = (raster.width(), raster.height());
    let img = RgbaImage::from_raw(width, height, raster.into_raw())
        .context("Raster buffer length does not match its dimensions")?;
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(png)
}

/// Render encoded PNG bytes as an embeddable data URI.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}
