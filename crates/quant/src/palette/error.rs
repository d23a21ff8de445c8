//! Error types for palette construction.

use thiserror::Error;

use crate::color::ParseColorError;

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    Empty,
    /// More colors than an indexed raster can address
    #[error("palette has {len} colors, indexed images support at most {max}")]
    TooLarge {
        /// Number of colors supplied
        len: usize,
        /// Largest supported palette
        max: usize,
    },
    /// A hex color string could not be parsed
    #[error("invalid color at index {index}: {source}")]
    ParseColor {
        /// Position of the offending entry
        index: usize,
        #[source]
        source: ParseColorError,
    },
}
