//! quantpng - reduce PNG images to a fixed palette
//!
//! Decodes PNGs, dithers them onto a configured palette with the `quant`
//! crate and writes palette-indexed PNGs.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
