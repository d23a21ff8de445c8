//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::io::Cursor;

/// Header and raw indices of an indexed PNG
pub struct IndexedPng {
    pub width: u32,
    pub height: u32,
    pub bit_depth: png::BitDepth,
    /// PLTE entries as `[r, g, b]`
    pub palette: Vec<[u8; 3]>,
    /// One palette index per pixel, row-major
    pub indices: Vec<u8>,
}

/// Decode an indexed PNG without expanding it, unpacking sub-byte rows.
pub fn read_indexed_png(bytes: &[u8]) -> IndexedPng {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().expect("Not a PNG");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("Bad PNG frame");
    assert_eq!(
        info.color_type,
        png::ColorType::Indexed,
        "Expected an indexed PNG"
    );

    let palette = reader
        .info()
        .palette
        .as_deref()
        .expect("Indexed PNG without PLTE")
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    let bits = info.bit_depth as u8 as usize;
    let per_byte = 8 / bits;
    let mask = ((1u16 << bits) - 1) as u8;
    let mut indices = Vec::with_capacity((info.width * info.height) as usize);
    for row in buf[..info.buffer_size()].chunks(info.line_size) {
        for x in 0..info.width as usize {
            let byte = row[x / per_byte];
            let shift = 8 - bits * (x % per_byte + 1);
            indices.push((byte >> shift) & mask);
        }
    }

    IndexedPng {
        width: info.width,
        height: info.height,
        bit_depth: info.bit_depth,
        palette,
        indices,
    }
}

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert every pixel index is below the palette size
pub fn assert_indices_in_palette(png: &IndexedPng) {
    let max = png.palette.len();
    assert!(
        png.indices.iter().all(|&i| (i as usize) < max),
        "Index outside the {max}-color palette"
    );
}
