#![allow(
    clippy::should_implement_trait,
    clippy::needless_range_loop,
    clippy::module_inception
)]

//! quant: palette quantization with error-diffusion dithering
//!
//! This library reduces full-color images to a fixed palette and writes the
//! result as palette indices. Palettes are supplied by the caller; the crate
//! does not derive palettes from image statistics.
//!
//! # Quick Start
//!
//! Draw a source image onto an indexed destination with [`Dither211`]:
//!
//! ```
//! use quant::{ColorPalette, Dither211, Drawer, Image, PalettedImage, Point, Rectangle,
//!             Rgba64, Rgba64Image};
//!
//! let src = Rgba64Image::from_fn(Rectangle::new(0, 0, 16, 16), |x, y| {
//!     let v = ((x + y) as u16) * 0x0800;
//!     Rgba64::opaque(v, v, v)
//! });
//! let palette = ColorPalette::from_hex(&["#000", "#555", "#aaa", "#fff"]).unwrap();
//!
//! let mut dst = PalettedImage::new(src.bounds(), palette).unwrap();
//! let r = dst.bounds();
//! Dither211.draw(&mut dst, r, &src, Point::ZERO).unwrap();
//!
//! assert_eq!(dst.indices().len(), 256);
//! ```
//!
//! Or produce a fresh indexed image with a [`Quantizer`]:
//!
//! ```
//! use quant::{ColorPalette, FixedPaletteQuantizer, Quantizer, Rectangle, Rgba64, Rgba64Image};
//!
//! let src = Rgba64Image::from_fn(Rectangle::new(0, 0, 4, 4), |_, _| Rgba64::WHITE);
//! let palette = ColorPalette::new(vec![Rgba64::BLACK, Rgba64::WHITE]).unwrap();
//!
//! let out = FixedPaletteQuantizer::new(palette).image(&src).unwrap();
//! assert!(out.indices().iter().all(|&i| i == 1));
//! ```
//!
//! # Palettes
//!
//! [`Palette`] is the nearest-color contract: `index`, `convert` and
//! `color_palette`. [`LinearPalette`] answers it with an exhaustive scan
//! (exact squared distance over the four 16-bit channels, ties to the lowest
//! index). Faster implementations must return the same indices.
//!
//! # Error Diffusion
//!
//! [`Dither211`] carries half of each pixel's residual to its right
//! neighbor and a quarter into a per-column slot for the row below. Channels
//! are unsigned 16-bit and saturate instead of wrapping; a palette color
//! brighter than the target contributes nothing. The scan is exact and
//! deterministic, so its output is pinned by golden tests.
//!
//! # Images
//!
//! Sources implement [`Image`]; destinations implement [`DrawImage`].
//! Indexed destinations and cropped source views are discovered through
//! capability queries ([`DrawImage::as_paletted_mut`],
//! [`Image::sub_image`]). When either is missing the drawer falls back to a
//! plain copy with [`draw_src`].

pub mod color;
pub mod dither;
pub mod image;
pub mod palette;
pub mod quantizer;
pub mod stats;


pub use color::{ParseColorError, Rgba64};
pub use dither::{dither211, Dither211, DitherError, Drawer, Src};
pub use image::{draw_src, DrawImage, Image, PalettedImage, Point, Rectangle, Rgba64Image, SubImage};
pub use palette::{ColorPalette, LinearPalette, Palette, PaletteError, MAX_INDEXED_COLORS};
pub use quantizer::{FixedPaletteQuantizer, Quantizer};
pub use stats::{index_histogram, mean_color_error};
