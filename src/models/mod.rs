pub mod config;

pub use config::{AppConfig, PaletteConfig, CONFIG_ENV};
