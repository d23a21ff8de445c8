//! Two-neighbor error diffusion over unsigned 16-bit channels.
//!
//! Each pixel's residual is halved and carried to the right neighbor; that
//! carry is halved again into a per-column slot for the row below, and the
//! slot of the current column also picks up the same amount. Only the
//! first slot seeds the next row's carry.
//!
//! All arithmetic is unsigned and saturates at `0xffff`: a palette channel
//! brighter than the adjusted color contributes no residual.

use tracing::{debug, trace};

use super::{DitherError, Drawer};
use crate::color::Rgba64;
use crate::image::{clip, draw_src, DrawImage, Image, PalettedImage, Point, Rectangle};
use crate::palette::{LinearPalette, Palette, MAX_INDEXED_COLORS};

/// Error-diffusion drawer for indexed destinations.
///
/// Drawing onto anything other than a [`PalettedImage`] degrades to a plain
/// copy, as does a source that cannot hand out a sub-image view of the
/// requested region.
///
/// # Example
///
/// ```
/// use quant::{ColorPalette, Dither211, Drawer, Image, PalettedImage, Point, Rectangle,
///             Rgba64, Rgba64Image};
///
/// let src = Rgba64Image::from_fn(Rectangle::new(0, 0, 8, 8), |x, _| {
///     let v = (x as u16) * 0x2000;
///     Rgba64::opaque(v, v, v)
/// });
/// let palette = ColorPalette::new(vec![Rgba64::BLACK, Rgba64::WHITE]).unwrap();
/// let mut dst = PalettedImage::new(Rectangle::new(0, 0, 4, 4), palette).unwrap();
///
/// // Dither the right half of the source into the destination
/// Dither211
///     .draw(&mut dst, Rectangle::new(0, 0, 4, 4), &src, Point::new(4, 0))
///     .unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Dither211;

impl Dither211 {
    /// Like [`Drawer::draw`], but choose indices with `palette` instead of
    /// an exhaustive search over the destination palette.
    ///
    /// The dithered raster carries `palette.color_palette()`; if that
    /// differs from the destination palette, colors are re-indexed when
    /// composited.
    ///
    /// # Errors
    ///
    /// Returns [`DitherError::PaletteTooLarge`] when `palette` has more
    /// than 256 colors. The destination is left untouched in that case.
    pub fn draw_with<P: Palette + ?Sized>(
        &self,
        dst: &mut dyn DrawImage,
        r: Rectangle,
        src: &dyn Image,
        sp: Point,
        palette: &P,
    ) -> Result<(), DitherError> {
        let dst_bounds = dst.bounds();
        let pd = match dst.as_paletted_mut() {
            Some(pd) => pd,
            None => {
                debug!("destination is not indexed, copying");
                draw_src(dst, r, src, sp);
                return Ok(());
            }
        };

        let (ir, ssp) = clip(dst_bounds, r, src.bounds(), sp);
        if ir.is_empty() {
            trace!(region = %r, "nothing to draw");
            return Ok(());
        }
        let sr = Rectangle {
            min: ssp,
            max: Point::new(ssp.x + ir.dx(), ssp.y + ir.dy()),
        };

        let view;
        let src: &dyn Image = if sr.same_area(&src.bounds()) {
            src
        } else {
            match src.sub_image(sr) {
                Some(sub) => {
                    view = sub;
                    &view
                }
                None => {
                    debug!(region = %sr, "source has no sub-image view, copying");
                    draw_src(pd, r, src, sp);
                    return Ok(());
                }
            }
        };

        let out = dither211(src, palette)?;
        draw_src(pd, ir, &out, sr.min);
        Ok(())
    }
}

impl Drawer for Dither211 {
    fn draw(
        &self,
        dst: &mut dyn DrawImage,
        r: Rectangle,
        src: &dyn Image,
        sp: Point,
    ) -> Result<(), DitherError> {
        let palette = match dst.as_paletted() {
            Some(pd) => LinearPalette::new(pd.palette().clone()),
            None => {
                draw_src(dst, r, src, sp);
                return Ok(());
            }
        };
        self.draw_with(dst, r, src, sp, &palette)
    }
}

/// Dither the whole of `src` into a new indexed image with the same bounds.
///
/// Indices are chosen with `palette.index` on the error-adjusted color
/// (alpha forced opaque); the output carries `palette.color_palette()`.
///
/// # Errors
///
/// Returns [`DitherError::PaletteTooLarge`] if the palette cannot be
/// addressed with 8-bit indices.
pub fn dither211<P: Palette + ?Sized>(
    src: &dyn Image,
    palette: &P,
) -> Result<PalettedImage, DitherError> {
    let colors = palette.color_palette();
    if !colors.fits_indexed() {
        return Err(DitherError::PaletteTooLarge {
            len: colors.len(),
            max: MAX_INDEXED_COLORS,
        });
    }

    let b = src.bounds();
    let mut out = PalettedImage::new(b, colors.clone())?;
    if b.is_empty() {
        return Ok(out);
    }
    debug!(bounds = %b, colors = colors.len(), "dithering");

    // One slot per column plus a sentinel that only ever receives
    let mut down = vec![[0u16; 3]; b.dx() as usize + 1];

    for y in b.min.y..b.max.y {
        let mut carry = std::mem::take(&mut down[0]);
        for (col, x) in (b.min.x..b.max.x).enumerate() {
            let c = src.at(x, y).rgb();
            let adj: [u16; 3] = std::array::from_fn(|ch| c[ch].saturating_add(carry[ch]));

            let idx = palette.index(Rgba64::opaque(adj[0], adj[1], adj[2]));
            out.set_color_index(x, y, idx as u8);

            let p = colors[idx].rgb();
            for ch in 0..3 {
                carry[ch] = adj[ch].saturating_sub(p[ch]) / 2;
                down[col + 1][ch] = carry[ch] / 2;
                down[col][ch] = down[col][ch].saturating_add(down[col + 1][ch]);
            }
        }
    }

    Ok(out)
}
