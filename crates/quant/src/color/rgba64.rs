//! 16-bit-per-channel RGBA color.

use std::str::FromStr;

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3, 6 or 8 digits after stripping '#')
    #[error("invalid hex color length {0} (expected 3, 6 or 8 digits)")]
    InvalidLength(usize),
    /// Hex string contains non-ASCII characters
    #[error("hex color contains non-ASCII characters")]
    NonAscii,
    /// A character other than `0-9`, `a-f` or `A-F`
    #[error("invalid hex character: {0:?}")]
    InvalidHex(char),
}

/// A color with four 16-bit channels (0..=0xffff).
///
/// Channel values are straight (not premultiplied). The dithering core
/// reads red, green and blue and ignores alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba64 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Rgba64 {
    /// Opaque black.
    pub const BLACK: Rgba64 = Rgba64::new(0, 0, 0, 0xffff);
    /// Opaque white.
    pub const WHITE: Rgba64 = Rgba64::new(0xffff, 0xffff, 0xffff, 0xffff);

    #[inline]
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 16-bit channels.
    #[inline]
    pub const fn opaque(r: u16, g: u16, b: u16) -> Self {
        Self::new(r, g, b, 0xffff)
    }

    /// Opaque color from 8-bit channels.
    ///
    /// Each channel is widened by replication (`v * 257`), so 0xff maps to
    /// 0xffff exactly.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 0xff)
    }

    /// Color from 8-bit channels including alpha.
    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as u16 * 257,
            g: g as u16 * 257,
            b: b as u16 * 257,
            a: a as u16 * 257,
        }
    }

    /// Red, green and blue as an array, in that order.
    #[inline]
    pub const fn rgb(self) -> [u16; 3] {
        [self.r, self.g, self.b]
    }

    /// Narrow to 8-bit RGB by dropping the low byte.
    #[inline]
    pub const fn to_rgb8(self) -> [u8; 3] {
        [(self.r >> 8) as u8, (self.g >> 8) as u8, (self.b >> 8) as u8]
    }

    /// Squared Euclidean distance over all four channels.
    ///
    /// Computed in `u64` so the sum of four squared 16-bit differences
    /// cannot overflow.
    #[inline]
    pub fn distance_squared(self, other: Rgba64) -> u64 {
        fn sq(a: u16, b: u16) -> u64 {
            let d = (a as i64 - b as i64).unsigned_abs();
            d * d
        }
        sq(self.r, other.r) + sq(self.g, other.g) + sq(self.b, other.b) + sq(self.a, other.a)
    }
}

impl From<[u8; 3]> for Rgba64 {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_rgb8(bytes[0], bytes[1], bytes[2])
    }
}

impl From<[u8; 4]> for Rgba64 {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_rgba8(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl FromStr for Rgba64 {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepted forms, with or without a leading `#`:
    /// - `RGB` - shorthand, each digit is doubled
    /// - `RRGGBB` - opaque color
    /// - `RRGGBBAA` - color with alpha
    ///
    /// Parsing is case-insensitive. Surrounding whitespace is trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::NonAscii);
        }

        let digits = s
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ParseColorError::InvalidHex(c)))
            .collect::<Result<Vec<u8>, _>>()?;
        let byte = |i: usize| (digits[2 * i] << 4) | digits[2 * i + 1];

        match digits.len() {
            // Shorthand: 0xF -> 0xFF
            3 => Ok(Self::from_rgb8(digits[0] * 17, digits[1] * 17, digits[2] * 17)),
            6 => Ok(Self::from_rgb8(byte(0), byte(1), byte(2))),
            8 => Ok(Self::from_rgba8(byte(0), byte(1), byte(2), byte(3))),
            len => Err(ParseColorError::InvalidLength(len)),
        }
    }
}
