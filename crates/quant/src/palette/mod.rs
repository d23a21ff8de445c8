//! Palette types and the nearest-color contract.
//!
//! [`Palette`] is the capability the ditherer needs: map any color to the
//! index of a palette entry and to that entry's color. [`ColorPalette`] is
//! the plain ordered list of colors; [`LinearPalette`] implements
//! [`Palette`] over it with an exhaustive scan.

mod error;
mod palette;

pub use error::PaletteError;
pub use palette::{ColorPalette, LinearPalette, Palette, MAX_INDEXED_COLORS};
