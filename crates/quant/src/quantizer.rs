//! Quantizers: something that can pick a palette for an image and realize
//! the image in it.

use tracing::debug;

use crate::dither::{dither211, DitherError};
use crate::image::{draw_src, Image, PalettedImage};
use crate::palette::{ColorPalette, LinearPalette, Palette, MAX_INDEXED_COLORS};

/// A color quantizer for images.
pub trait Quantizer {
    /// Quantize `src` into an indexed image with the same bounds.
    fn image(&self, src: &dyn Image) -> Result<PalettedImage, DitherError>;

    /// The palette this quantizer would use for `src`.
    fn palette(&self, src: &dyn Image) -> LinearPalette;
}

/// A quantizer that always uses the palette it was built with.
///
/// With dithering enabled (the default) images go through
/// [`dither211`]; otherwise every pixel is mapped to its nearest entry.
///
/// # Example
///
/// ```
/// use quant::{ColorPalette, FixedPaletteQuantizer, Quantizer, Rectangle, Rgba64,
///             Rgba64Image};
///
/// let palette = ColorPalette::new(vec![Rgba64::BLACK, Rgba64::WHITE]).unwrap();
/// let src = Rgba64Image::from_fn(Rectangle::new(0, 0, 4, 1), |_, _| {
///     Rgba64::opaque(0x6000, 0x6000, 0x6000)
/// });
///
/// let dithered = FixedPaletteQuantizer::new(palette.clone()).image(&src).unwrap();
/// assert_eq!(dithered.indices(), &[0, 1, 0, 1]);
///
/// let flat = FixedPaletteQuantizer::new(palette).dither(false).image(&src).unwrap();
/// assert_eq!(flat.indices(), &[0, 0, 0, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct FixedPaletteQuantizer {
    palette: LinearPalette,
    dither: bool,
}

impl FixedPaletteQuantizer {
    pub fn new(palette: ColorPalette) -> Self {
        Self {
            palette: LinearPalette::new(palette),
            dither: true,
        }
    }

    /// Enable or disable error diffusion.
    pub fn dither(mut self, enabled: bool) -> Self {
        self.dither = enabled;
        self
    }

    pub fn is_dithering(&self) -> bool {
        self.dither
    }
}

impl Quantizer for FixedPaletteQuantizer {
    fn image(&self, src: &dyn Image) -> Result<PalettedImage, DitherError> {
        if self.dither {
            return dither211(src, &self.palette);
        }

        let colors = self.palette.color_palette();
        if !colors.fits_indexed() {
            return Err(DitherError::PaletteTooLarge {
                len: colors.len(),
                max: MAX_INDEXED_COLORS,
            });
        }
        let b = src.bounds();
        debug!(bounds = %b, "nearest-color mapping");
        let mut out = PalettedImage::new(b, colors.clone())?;
        draw_src(&mut out, b, src, b.min);
        Ok(out)
    }

    fn palette(&self, _src: &dyn Image) -> LinearPalette {
        self.palette.clone()
    }
}
