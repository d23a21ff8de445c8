//! Rasters, views and the plain copy operation.
//!
//! Sources implement [`Image`]; destinations implement [`DrawImage`].
//! Richer behavior is discovered through explicit capability queries
//! rather than downcasting:
//!
//! - [`Image::sub_image`] returns a cropped view when the source supports
//!   one.
//! - [`Image::as_paletted`] / [`DrawImage::as_paletted_mut`] expose a
//!   [`PalettedImage`] when the raster stores palette indices.
//!
//! Callers branch on the `Option` and take a documented fallback when the
//! capability is missing.

mod draw;
mod geometry;
mod paletted;
mod rgba;

pub(crate) use draw::clip;
pub use draw::draw_src;
pub use geometry::{Point, Rectangle};
pub use paletted::PalettedImage;
pub use rgba::Rgba64Image;

use crate::color::Rgba64;

/// A read-only grid of colors over a bounds rectangle.
pub trait Image {
    /// The domain over which [`at()`](Image::at) returns valid colors.
    fn bounds(&self) -> Rectangle;

    /// Color at `(x, y)`. Implementations return a defined fallback color
    /// outside [`bounds()`](Image::bounds) and never panic.
    fn at(&self, x: i32, y: i32) -> Rgba64;

    /// A view of the part of this image inside `r`, or `None` if this image
    /// cannot provide views.
    fn sub_image(&self, _r: Rectangle) -> Option<SubImage<'_>> {
        None
    }

    /// The indexed representation, if this image stores palette indices.
    fn as_paletted(&self) -> Option<&PalettedImage> {
        None
    }
}

/// A mutable image that pixels can be written to.
pub trait DrawImage: Image {
    /// Store `color` at `(x, y)`. Writes outside the bounds are ignored.
    fn set(&mut self, x: i32, y: i32, color: Rgba64);

    /// The indexed representation, if this destination stores palette
    /// indices.
    fn as_paletted_mut(&mut self) -> Option<&mut PalettedImage> {
        None
    }
}

/// A borrowed, bounds-restricted view of another image.
///
/// Pixels are read through from the parent; reads outside the view's bounds
/// return transparent black.
#[derive(Clone, Copy)]
pub struct SubImage<'a> {
    parent: &'a dyn Image,
    bounds: Rectangle,
}

impl<'a> SubImage<'a> {
    /// View of `parent` restricted to `r ∩ parent.bounds()`.
    pub fn new(parent: &'a dyn Image, r: Rectangle) -> Self {
        Self {
            bounds: r.intersect(parent.bounds()),
            parent,
        }
    }
}

impl Image for SubImage<'_> {
    #[inline]
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    #[inline]
    fn at(&self, x: i32, y: i32) -> Rgba64 {
        if self.bounds.contains(Point::new(x, y)) {
            self.parent.at(x, y)
        } else {
            Rgba64::default()
        }
    }

    fn sub_image(&self, r: Rectangle) -> Option<SubImage<'_>> {
        Some(SubImage::new(self.parent, r.intersect(self.bounds)))
    }
}

impl std::fmt::Debug for SubImage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubImage")
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}
