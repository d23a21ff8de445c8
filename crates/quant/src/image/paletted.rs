//! Indexed raster: one `u8` palette index per pixel.
//!
//! [`PalettedImage`] is both the output of the ditherer and the destination
//! type the ditherer recognizes. The indexed form is canonical; colors are
//! resolved through the owned palette on demand.

use super::{DrawImage, Image, Point, Rectangle, SubImage};
use crate::color::Rgba64;
use crate::palette::{ColorPalette, PaletteError, MAX_INDEXED_COLORS};

/// An image that stores palette indices.
///
/// # Example
///
/// ```
/// use quant::{ColorPalette, Image, PalettedImage, Rectangle, Rgba64};
///
/// let palette = ColorPalette::new(vec![Rgba64::BLACK, Rgba64::WHITE]).unwrap();
/// let mut image = PalettedImage::new(Rectangle::new(0, 0, 2, 2), palette).unwrap();
/// image.set_color_index(1, 0, 1);
///
/// assert_eq!(image.indices(), &[0, 1, 0, 0]);
/// assert_eq!(image.at(1, 0), Rgba64::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalettedImage {
    /// Palette indices, row-major.
    pix: Vec<u8>,
    stride: usize,
    bounds: Rectangle,
    palette: ColorPalette,
}

impl PalettedImage {
    /// Create an image over `bounds` with every pixel at index 0.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::TooLarge`] if the palette has more entries
    /// than a `u8` can index.
    pub fn new(bounds: Rectangle, palette: ColorPalette) -> Result<Self, PaletteError> {
        if !palette.fits_indexed() {
            return Err(PaletteError::TooLarge {
                len: palette.len(),
                max: MAX_INDEXED_COLORS,
            });
        }
        Ok(Self {
            pix: vec![0; bounds.area()],
            stride: bounds.dx().max(0) as usize,
            bounds,
            palette,
        })
    }

    /// Palette indices in row-major order.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.pix
    }

    /// Rows of palette indices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks() panics on 0; an empty image has no rows anyway
        self.pix.chunks(self.stride.max(1))
    }

    #[inline]
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bounds.dx().max(0) as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bounds.dy().max(0) as u32
    }

    /// Index at `(x, y)`, or 0 outside the bounds.
    #[inline]
    pub fn color_index_at(&self, x: i32, y: i32) -> u8 {
        self.offset(x, y).map(|i| self.pix[i]).unwrap_or(0)
    }

    /// Store an index at `(x, y)`.
    ///
    /// Writes outside the bounds are ignored, and so are indices past the
    /// end of the palette: every stored index always resolves to a color.
    #[inline]
    pub fn set_color_index(&mut self, x: i32, y: i32, idx: u8) {
        if idx as usize >= self.palette.len() {
            return;
        }
        if let Some(i) = self.offset(x, y) {
            self.pix[i] = idx;
        }
    }

    /// Flat `[R, G, B, ...]` bytes from the 8-bit palette colors.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pix.len() * 3);
        for &idx in &self.pix {
            rgb.extend_from_slice(&self.palette[idx as usize].to_rgb8());
        }
        rgb
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds.contains(Point::new(x, y)) {
            return None;
        }
        let col = (x - self.bounds.min.x) as usize;
        let row = (y - self.bounds.min.y) as usize;
        Some(row * self.stride + col)
    }
}

impl Image for PalettedImage {
    #[inline]
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Palette color at `(x, y)`; the first palette color outside the
    /// bounds.
    #[inline]
    fn at(&self, x: i32, y: i32) -> Rgba64 {
        self.palette[self.color_index_at(x, y) as usize]
    }

    fn sub_image(&self, r: Rectangle) -> Option<SubImage<'_>> {
        Some(SubImage::new(self, r))
    }

    fn as_paletted(&self) -> Option<&PalettedImage> {
        Some(self)
    }
}

impl DrawImage for PalettedImage {
    /// Store the index of the palette entry nearest to `color`.
    #[inline]
    fn set(&mut self, x: i32, y: i32, color: Rgba64) {
        if let Some(i) = self.offset(x, y) {
            // fits_indexed() was checked in new()
            self.pix[i] = self.palette.index(color) as u8;
        }
    }

    fn as_paletted_mut(&mut self) -> Option<&mut PalettedImage> {
        Some(self)
    }
}
