pub mod png_io;

pub use png_io::{bit_depth_for, decode_png, encode_indexed_png, pack_nbits};
