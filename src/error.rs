use std::path::PathBuf;

use quant::{DitherError, PaletteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Dither error: {0}")]
    Dither(#[from] DitherError),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Invalid region: {0}")]
    Region(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
