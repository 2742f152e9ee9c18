//! Test images and file helpers.

use std::path::{Path, PathBuf};

use color_ramps::Color;

/// Four greys, evenly spaced in V: 0.2, 0.4, 0.6, 0.8.
pub const GREY_STRIP: [Color; 4] = [
    Color::rgb(51, 51, 51),
    Color::rgb(102, 102, 102),
    Color::rgb(153, 153, 153),
    Color::rgb(204, 204, 204),
];

/// Five reds of rising brightness.
pub const RED_STRIP: [Color; 5] = [
    Color::rgb(60, 10, 10),
    Color::rgb(100, 20, 20),
    Color::rgb(140, 30, 30),
    Color::rgb(180, 40, 40),
    Color::rgb(220, 50, 50),
];

/// Flatten colors into RGBA8 bytes.
pub fn rgba_bytes(colors: &[Color]) -> Vec<u8> {
    colors.iter().flat_map(|c| c.to_bytes()).collect()
}

/// Encode `colors` (row-major) as an RGBA PNG.
pub fn encode_png(width: u32, height: u32, colors: &[Color]) -> Vec<u8> {
    assert_eq!(colors.len(), (width * height) as usize, "pixel count");
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&rgba_bytes(colors)).unwrap();
    }
    out
}

/// Write a PNG into `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, colors: &[Color]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_png(width, height, colors)).unwrap();
    path
}

/// Two rows of greys above two rows of reds, with a transparent pixel
/// closing each red row so the widths match.
pub fn two_material_pixels() -> (u32, u32, Vec<Color>) {
    let clear = Color::new(0, 0, 0, 0);
    let greys = [
        Color::rgb(40, 40, 40),
        Color::rgb(80, 80, 80),
        Color::rgb(120, 120, 120),
        Color::rgb(160, 160, 160),
        Color::rgb(200, 200, 200),
        Color::rgb(240, 240, 240),
    ];
    let mut pixels = Vec::new();
    pixels.extend_from_slice(&greys);
    pixels.extend_from_slice(&greys);
    for _ in 0..2 {
        pixels.extend_from_slice(&RED_STRIP);
        pixels.push(clear);
    }
    (6, 4, pixels)
}

/// Write a file with `content` into `dir`.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
