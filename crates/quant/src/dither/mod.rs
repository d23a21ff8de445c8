//! Drawing with error diffusion.
//!
//! # Architecture
//!
//! A [`Drawer`] paints a region of a source [`Image`] onto a
//! [`DrawImage`]. Two drawers are provided:
//!
//! - [`Dither211`]: error diffusion onto indexed destinations, falling back
//!   to a plain copy when the destination is not indexed or the source
//!   cannot be cropped.
//! - [`Src`]: plain opaque copy; onto an indexed destination that means
//!   nearest-color mapping without any diffusion.
//!
//! The scan itself is [`dither211()`], which turns a whole source image
//! into a fresh [`PalettedImage`](crate::PalettedImage).
//!
//! # Example
//!
//! ```
//! use quant::{ColorPalette, Dither211, Drawer, Image, PalettedImage, Point, Rectangle,
//!             Rgba64, Rgba64Image};
//!
//! let src = Rgba64Image::from_fn(Rectangle::new(0, 0, 4, 4), |_, _| {
//!     Rgba64::opaque(0x6000, 0x6000, 0x6000)
//! });
//! let palette = ColorPalette::new(vec![Rgba64::BLACK, Rgba64::WHITE]).unwrap();
//! let mut dst = PalettedImage::new(src.bounds(), palette).unwrap();
//! let r = dst.bounds();
//!
//! Dither211.draw(&mut dst, r, &src, Point::ZERO).unwrap();
//! assert_eq!(&dst.indices()[..4], &[0, 1, 0, 1]);
//! ```

mod dither211;

pub use dither211::{dither211, Dither211};

use thiserror::Error;

use crate::image::{draw_src, DrawImage, Image, Point, Rectangle};
use crate::palette::PaletteError;

/// Failure of a dithering operation.
///
/// Unsupported destinations, sources without sub-image views and empty
/// regions are not errors; they are handled by falling back or doing
/// nothing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DitherError {
    /// The palette cannot be addressed by 8-bit indices
    #[error("cannot dither with {len} colors: indexed output supports at most {max}")]
    PaletteTooLarge {
        /// Number of colors in the palette
        len: usize,
        /// Largest supported palette
        max: usize,
    },
    /// The output raster could not be created
    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// Paints a region of a source image onto a destination.
pub trait Drawer {
    /// Draw the pixels of `src` starting at `sp` onto `dst` over `r`.
    ///
    /// `r` is in destination coordinates; the pixel written at `r.min`
    /// comes from `sp` in source coordinates. Whatever part of `r` falls
    /// outside either image is skipped.
    fn draw(
        &self,
        dst: &mut dyn DrawImage,
        r: Rectangle,
        src: &dyn Image,
        sp: Point,
    ) -> Result<(), DitherError>;
}

/// Plain copy, no error diffusion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Src;

impl Drawer for Src {
    fn draw(
        &self,
        dst: &mut dyn DrawImage,
        r: Rectangle,
        src: &dyn Image,
        sp: Point,
    ) -> Result<(), DitherError> {
        draw_src(dst, r, src, sp);
        Ok(())
    }
}
