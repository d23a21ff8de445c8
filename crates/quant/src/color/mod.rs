//! Color type used throughout the crate.
//!
//! Every pixel and palette entry is an [`Rgba64`]: four 16-bit channels.
//! Dithering only looks at red, green and blue; alpha is carried along so
//! that palettes and images can round-trip it.
//!
//! # Example
//!
//! ```
//! use quant::Rgba64;
//!
//! let orange = Rgba64::from_rgb8(255, 128, 0);
//! assert_eq!(orange.r, 0xffff);
//! assert_eq!(orange.to_rgb8(), [255, 128, 0]);
//!
//! let parsed: Rgba64 = "#ff8000".parse().unwrap();
//! assert_eq!(parsed, orange);
//! ```

mod rgba64;

pub use rgba64::{ParseColorError, Rgba64};
