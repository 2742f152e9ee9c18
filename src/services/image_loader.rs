//! PNG decoding into the row-major RGBA8 layout the extractor reads.

use std::path::Path;

use color_ramps::{ConfigError, PixelBuffer};

use crate::error::AppError;

/// An owned RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbaImage {
    /// Borrow the pixels for extraction.
    pub fn buffer(&self) -> Result<PixelBuffer<'_>, ConfigError> {
        PixelBuffer::new(self.width, self.height, &self.data)
    }
}

pub fn load_png(path: &Path) -> Result<RgbaImage, AppError> {
    let bytes = std::fs::read(path).map_err(|e| AppError::read(path, e))?;
    let image = decode_png(&bytes)?;
    tracing::info!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        "Loaded image"
    );
    Ok(image)
}

/// Decode any PNG color type to RGBA8. Palette images are expanded and
/// 16-bit channels are reduced to 8 bits.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, AppError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(AppError::UnsupportedPng(format!(
            "bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let data: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(AppError::UnsupportedPng(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    Ok(RgbaImage {
        width: info.width,
        height: info.height,
        data,
    })
}
