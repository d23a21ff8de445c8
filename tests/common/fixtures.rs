//! Test fixtures: PNG inputs written into a temporary directory.

use std::path::PathBuf;
use tempfile::TempDir;

/// Config file with a custom palette and default
pub const CONFIG_YAML: &str = r##"
palettes:
  sepia:
    description: Dark brown to cream
    colors: ["#2b1d0e", "#8a6a45", "#f1e7d0"]
default_palette: sepia
"##;

/// A temporary directory that is removed when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file and return its path
    pub fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, bytes).expect("Failed to write fixture");
        path
    }
}

/// Encode an 8-bit RGB PNG whose pixel at (x, y) is `f(x, y)`
pub fn rgb_png(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&f(x, y));
        }
    }
    encode(width, height, png::ColorType::Rgb, png::BitDepth::Eight, &data)
}

/// Encode an 8-bit RGBA PNG from raw pixel bytes
pub fn rgba_png(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    encode(width, height, png::ColorType::Rgba, png::BitDepth::Eight, data)
}

/// Encode a 16-bit greyscale PNG where every pixel is `value`
pub fn grey16_png(width: u32, height: u32, value: u16) -> Vec<u8> {
    let data: Vec<u8> = (0..width * height)
        .flat_map(|_| value.to_be_bytes())
        .collect();
    encode(
        width,
        height,
        png::ColorType::Grayscale,
        png::BitDepth::Sixteen,
        &data,
    )
}

/// Horizontal grey ramp from black to white
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    rgb_png(width, height, |x, _| {
        let v = (x * 255 / (width - 1).max(1)) as u8;
        [v, v, v]
    })
}

fn encode(
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    data: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        let mut writer = encoder.write_header().expect("Failed to write header");
        writer.write_image_data(data).expect("Failed to write data");
    }
    buf
}
