//! `ColorPalette` storage, the `Palette` trait and its baseline
//! implementation.

use std::ops::Index;
use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgba64;

/// Largest palette an indexed raster can address with `u8` indices.
pub const MAX_INDEXED_COLORS: usize = 256;

/// Nearest-color lookup over an ordered set of colors.
///
/// Implementations may keep acceleration structures (k-d trees, caches),
/// but [`index()`](Palette::index) must return the same entry as the
/// exhaustive scan in [`ColorPalette::index`]: minimum squared Euclidean
/// distance over the four 16-bit channels, ties to the lowest index.
///
/// All methods take `&self`; a palette is never mutated while dithering and
/// can be shared between threads when the implementation is `Sync`.
pub trait Palette {
    /// The color of the palette entry nearest to `color`.
    fn convert(&self, color: Rgba64) -> Rgba64 {
        self.color_palette()[self.index(color)]
    }

    /// Index of the palette entry nearest to `color`, in `0..len`.
    fn index(&self, color: Rgba64) -> usize;

    /// The full ordered list of palette colors.
    fn color_palette(&self) -> &ColorPalette;
}

/// An ordered, non-empty list of palette colors.
///
/// Indices are stable for the lifetime of the value. Duplicate colors are
/// permitted; lookups resolve them to the lowest index.
///
/// # Example
///
/// ```
/// use quant::{ColorPalette, Rgba64};
///
/// let palette = ColorPalette::new(vec![Rgba64::BLACK, Rgba64::WHITE]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.index(Rgba64::from_rgb8(200, 200, 200)), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    colors: Vec<Rgba64>,
}

impl ColorPalette {
    /// Create a palette from its colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Empty`] if `colors` is empty, since an empty
    /// palette has no nearest entry for any color.
    pub fn new(colors: Vec<Rgba64>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Create a palette from hex color strings such as `"#FF0000"` or `"F00"`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] naming the first entry that does
    /// not parse, or [`PaletteError::Empty`].
    ///
    /// ```
    /// use quant::ColorPalette;
    ///
    /// let palette = ColorPalette::from_hex(&["#000", "#fff", "#ff0000"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Rgba64::from_str(s.as_ref())
                    .map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Rgba64] {
        &self.colors
    }

    /// Whether every index fits in a `u8`.
    #[inline]
    pub fn fits_indexed(&self) -> bool {
        self.colors.len() <= MAX_INDEXED_COLORS
    }

    /// Index of the nearest entry by exhaustive scan.
    ///
    /// Exact matches return immediately.
    pub fn index(&self, color: Rgba64) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u64::MAX;

        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(entry);
            if dist == 0 {
                return i;
            }
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }

    /// The nearest entry's color.
    #[inline]
    pub fn convert(&self, color: Rgba64) -> Rgba64 {
        self.colors[self.index(color)]
    }
}

impl Index<usize> for ColorPalette {
    type Output = Rgba64;

    #[inline]
    fn index(&self, idx: usize) -> &Rgba64 {
        &self.colors[idx]
    }
}

/// [`Palette`] implementation with no acceleration.
///
/// This is the reference behavior: every lookup scans all entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearPalette {
    palette: ColorPalette,
}

impl LinearPalette {
    pub fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    pub fn into_inner(self) -> ColorPalette {
        self.palette
    }
}

impl From<ColorPalette> for LinearPalette {
    fn from(palette: ColorPalette) -> Self {
        Self::new(palette)
    }
}

impl Palette for LinearPalette {
    #[inline]
    fn convert(&self, color: Rgba64) -> Rgba64 {
        self.palette.convert(color)
    }

    #[inline]
    fn index(&self, color: Rgba64) -> usize {
        self.palette.index(color)
    }

    #[inline]
    fn color_palette(&self) -> &ColorPalette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bwr() -> ColorPalette {
        ColorPalette::new(vec![
            Rgba64::BLACK,
            Rgba64::WHITE,
            Rgba64::opaque(0xffff, 0, 0),
        ])
        .unwrap()
    }

    #[test]
    fn test_palette_empty_error() {
        assert_eq!(ColorPalette::new(Vec::new()), Err(PaletteError::Empty));
        assert_eq!(
            ColorPalette::from_hex::<&str>(&[]),
            Err(PaletteError::Empty)
        );
    }

    #[test]
    fn test_index_exact_match() {
        let palette = bwr();
        for (i, &color) in palette.colors().iter().enumerate() {
            assert_eq!(palette.index(color), i);
        }
    }

    #[test]
    fn test_index_nearest() {
        let palette = bwr();
        assert_eq!(palette.index(Rgba64::from_rgb8(30, 20, 20)), 0);
        assert_eq!(palette.index(Rgba64::from_rgb8(230, 240, 235)), 1);
        assert_eq!(palette.index(Rgba64::from_rgb8(200, 40, 30)), 2);
    }

    #[test]
    fn test_index_tie_goes_to_lowest() {
        // Equidistant from both entries
        let palette = ColorPalette::new(vec![
            Rgba64::opaque(0, 0, 0),
            Rgba64::opaque(0x200, 0, 0),
        ])
        .unwrap();
        assert_eq!(palette.index(Rgba64::opaque(0x100, 0, 0)), 0);

        // Duplicates resolve to the first occurrence
        let dup = ColorPalette::new(vec![Rgba64::WHITE, Rgba64::BLACK, Rgba64::BLACK]).unwrap();
        assert_eq!(dup.index(Rgba64::BLACK), 1);
    }

    #[test]
    fn test_index_is_deterministic() {
        let palette = LinearPalette::new(bwr());
        let color = Rgba64::from_rgb8(127, 64, 64);
        let first = palette.index(color);
        for _ in 0..10 {
            assert_eq!(palette.index(color), first);
        }
    }

    #[test]
    fn test_alpha_participates_in_distance() {
        let palette = ColorPalette::new(vec![
            Rgba64::new(0, 0, 0, 0),
            Rgba64::new(0x1000, 0x1000, 0x1000, 0xffff),
        ])
        .unwrap();
        assert_eq!(palette.index(Rgba64::BLACK), 1);
        assert_eq!(palette.index(Rgba64::new(0, 0, 0, 0)), 0);
    }

    #[test]
    fn test_convert_matches_index() {
        let palette = LinearPalette::new(bwr());
        let color = Rgba64::from_rgb8(180, 60, 50);
        assert_eq!(
            palette.convert(color),
            palette.color_palette()[palette.index(color)]
        );
        assert_eq!(palette.convert(color), Rgba64::opaque(0xffff, 0, 0));
    }

    #[test]
    fn test_default_convert_uses_index() {
        // A palette that only implements the required methods
        struct FirstEntry(ColorPalette);
        impl Palette for FirstEntry {
            fn index(&self, _color: Rgba64) -> usize {
                0
            }
            fn color_palette(&self) -> &ColorPalette {
                &self.0
            }
        }

        let palette = FirstEntry(bwr());
        assert_eq!(palette.convert(Rgba64::WHITE), Rgba64::BLACK);
    }

    #[test]
    fn test_from_hex() {
        let palette = ColorPalette::from_hex(&["#000000", "fff", "#FF000080"]).unwrap();
        assert_eq!(palette[0], Rgba64::BLACK);
        assert_eq!(palette[1], Rgba64::WHITE);
        assert_eq!(palette[2], Rgba64::from_rgba8(255, 0, 0, 0x80));
    }

    #[test]
    fn test_from_hex_reports_failing_index() {
        let result = ColorPalette::from_hex(&["#000", "#fff", "#zzzzzz"]);
        assert!(matches!(
            result,
            Err(PaletteError::ParseColor { index: 2, .. })
        ));
    }

    #[test]
    fn test_fits_indexed() {
        let grey = |n: usize| -> Vec<Rgba64> {
            (0..n).map(|i| Rgba64::opaque(i as u16, i as u16, i as u16)).collect()
        };
        assert!(ColorPalette::new(grey(256)).unwrap().fits_indexed());
        assert!(!ColorPalette::new(grey(257)).unwrap().fits_indexed());
    }
}
