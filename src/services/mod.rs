pub mod convert;

pub use convert::{
    convert_file, convert_png, parse_colors, parse_region, ConvertOptions, ConvertResult,
    ConvertStats,
};
