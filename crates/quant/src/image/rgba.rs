//! Owned full-color raster.

use super::{DrawImage, Image, Point, Rectangle, SubImage};
use crate::color::Rgba64;

/// An in-memory image of [`Rgba64`] pixels, row-major over its bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rgba64Image {
    pix: Vec<Rgba64>,
    stride: usize,
    bounds: Rectangle,
}

impl Rgba64Image {
    /// A transparent-black image covering `bounds`.
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            pix: vec![Rgba64::default(); bounds.area()],
            stride: bounds.dx().max(0) as usize,
            bounds,
        }
    }

    /// An image whose pixel at `(x, y)` is `f(x, y)`.
    pub fn from_fn(bounds: Rectangle, mut f: impl FnMut(i32, i32) -> Rgba64) -> Self {
        let mut img = Self::new(bounds);
        for y in bounds.min.y..bounds.max.y {
            for x in bounds.min.x..bounds.max.x {
                img.set(x, y, f(x, y));
            }
        }
        img
    }

    /// Wrap row-major pixels for a `width` x `height` image at the origin.
    ///
    /// Returns `None` if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba64>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            pix: pixels,
            stride: width as usize,
            bounds: Rectangle::from_size(width, height),
        })
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba64] {
        &self.pix
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

impl Image for Rgba64Image {
    #[inline]
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    #[inline]
    fn at(&self, x: i32, y: i32) -> Rgba64 {
        self.offset(x, y)
            .map(|i| self.pix[i])
            .unwrap_or_default()
    }

    fn sub_image(&self, r: Rectangle) -> Option<SubImage<'_>> {
        Some(SubImage::new(self, r))
    }
}

impl DrawImage for Rgba64Image {
    #[inline]
    fn set(&mut self, x: i32, y: i32, color: Rgba64) {
        if let Some(i) = self.offset(x, y) {
            self.pix[i] = color;
        }
    }
}
