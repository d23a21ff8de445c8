use crate::error::ConvertError;
use quant::{PalettedImage, Rgba64, Rgba64Image};
use std::io::Cursor;

/// Decode any PNG into 16-bit color, alpha-compositing against white.
///
/// Indexed, greyscale and low bit depth images are expanded first; 8-bit
/// samples are widened with `v * 257`. The result is opaque and covers
/// `(0,0)-(width,height)`.
pub fn decode_png(bytes: &[u8]) -> Result<Rgba64Image, ConvertError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ConvertError::Decode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ConvertError::Decode(e.to_string()))?;

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(ConvertError::Decode(
                "indexed data was not expanded".to_string(),
            ))
        }
    };
    let wide = info.bit_depth == png::BitDepth::Sixteen;
    let sample_bytes = if wide { 2 } else { 1 };
    let pixel_bytes = channels * sample_bytes;
    let width = info.width as usize;

    let mut pixels = Vec::with_capacity(width * info.height as usize);
    for row in buf[..info.buffer_size()].chunks(info.line_size) {
        for px in row[..width * pixel_bytes].chunks_exact(pixel_bytes) {
            let sample = |i: usize| -> u16 {
                if wide {
                    u16::from_be_bytes([px[2 * i], px[2 * i + 1]])
                } else {
                    u16::from(px[i]) * 257
                }
            };
            let (r, g, b, a) = match channels {
                1 => (sample(0), sample(0), sample(0), 0xffff),
                2 => (sample(0), sample(0), sample(0), sample(1)),
                3 => (sample(0), sample(1), sample(2), 0xffff),
                _ => (sample(0), sample(1), sample(2), sample(3)),
            };
            pixels.push(over_white(r, g, b, a));
        }
    }

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        bit_depth = ?info.bit_depth,
        "Decoded PNG"
    );

    Rgba64Image::from_pixels(info.width, info.height, pixels)
        .ok_or_else(|| ConvertError::Decode("truncated image data".to_string()))
}

/// Composite a straight-alpha color onto white.
fn over_white(r: u16, g: u16, b: u16, a: u16) -> Rgba64 {
    match a {
        0xffff => Rgba64::opaque(r, g, b),
        0 => Rgba64::WHITE,
        _ => {
            let a = u32::from(a);
            let blend = |c: u16| ((u32::from(c) * a + 0xffff * (0xffff - a)) / 0xffff) as u16;
            Rgba64::opaque(blend(r), blend(g), blend(b))
        }
    }
}

/// PNG bit depth for a palette of `len` colors, with the matching bits per
/// pixel.
pub fn bit_depth_for(len: usize) -> (png::BitDepth, u8) {
    match len {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    }
}

/// Encode an indexed image as a palette PNG.
///
/// The `PLTE` chunk holds the 8-bit palette colors in index order; the bit
/// depth is the smallest that fits the palette. With `optimize` the result
/// is re-compressed with oxipng.
pub fn encode_indexed_png(image: &PalettedImage, optimize: bool) -> Result<Vec<u8>, ConvertError> {
    let palette = image.palette();
    if !palette.fits_indexed() {
        return Err(ConvertError::Encode(format!(
            "{} colors do not fit an indexed PNG",
            palette.len()
        )));
    }

    let (depth, bits) = bit_depth_for(palette.len());
    let plte: Vec<u8> = palette.colors().iter().flat_map(|c| c.to_rgb8()).collect();
    let packed = if bits == 8 {
        image.indices().to_vec()
    } else {
        pack_nbits(image.indices(), image.width(), bits)
    };

    // Fast settings; oxipng re-compresses when asked to
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_palette(plte);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ConvertError::Encode(e.to_string()))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| ConvertError::Encode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }
    let before = png_bytes.len();
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    tracing::debug!(before, after = optimized.len(), "Optimized PNG");
    Ok(optimized)
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
pub fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        for group in row.chunks(pixels_per_byte) {
            let mut byte = 0u8;
            for (i, &idx) in group.iter().enumerate() {
                let shift = (8 - bits) - i as u8 * bits;
                byte |= (idx & mask) << shift;
            }
            packed.push(byte);
        }
    }

    packed
}
