use std::path::Path;

use quant::{
    index_histogram, mean_color_error, ColorPalette, Dither211, Drawer, FixedPaletteQuantizer,
    Image, Quantizer, Rectangle,
};
use serde::Serialize;

use crate::error::ConvertError;
use crate::rendering::{decode_png, encode_indexed_png};

/// Options for one conversion
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub palette: ColorPalette,
    /// Area to dither; the whole image when `None`. Pixels outside it are
    /// mapped to their nearest palette color.
    pub region: Option<Rectangle>,
    pub dither: bool,
    /// Re-compress the output with oxipng
    pub optimize: bool,
}

impl ConvertOptions {
    pub fn new(palette: ColorPalette) -> Self {
        Self {
            palette,
            region: None,
            dither: true,
            optimize: true,
        }
    }
}

/// Result from converting one image
pub struct ConvertResult {
    /// Indexed PNG bytes
    pub png_bytes: Vec<u8>,
    pub stats: ConvertStats,
}

/// Summary of a conversion, printed as JSON with `--stats`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConvertStats {
    pub width: u32,
    pub height: u32,
    pub colors: usize,
    pub dithered: bool,
    /// Dithered area as `[x, y, width, height]`
    pub region: Option<[i32; 4]>,
    /// Difference between source and output region means, 16-bit units
    pub mean_color_error: f64,
    /// Pixels per palette index
    pub histogram: Vec<usize>,
    pub bytes: usize,
}

/// Convert PNG bytes to an indexed PNG in the given palette.
pub fn convert_png(input: &[u8], options: &ConvertOptions) -> Result<ConvertResult, ConvertError> {
    let src = decode_png(input)?;
    let bounds = src.bounds();

    // Nearest-color base; the dithered region is drawn over it
    let mut out = FixedPaletteQuantizer::new(options.palette.clone())
        .dither(false)
        .image(&src)?;

    let mut region = None;
    if options.dither {
        let r = options.region.unwrap_or(bounds);
        if r.intersect(bounds).is_empty() {
            return Err(ConvertError::Region(format!(
                "{} lies outside the {}x{} image",
                r,
                bounds.dx(),
                bounds.dy()
            )));
        }
        Dither211.draw(&mut out, r, &src, r.min)?;
        let r = r.intersect(bounds);
        region = Some([r.min.x, r.min.y, r.dx(), r.dy()]);
    } else if options.region.is_some() {
        tracing::debug!("Region ignored without dithering");
    }

    let png_bytes = encode_indexed_png(&out, options.optimize)?;
    let stats = ConvertStats {
        width: out.width(),
        height: out.height(),
        colors: options.palette.len(),
        dithered: options.dither,
        region,
        mean_color_error: mean_color_error(&src, &out),
        histogram: index_histogram(&out),
        bytes: png_bytes.len(),
    };

    Ok(ConvertResult { png_bytes, stats })
}

/// Convert the PNG at `input` and write the result to `output`.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertStats, ConvertError> {
    let bytes = std::fs::read(input)?;
    let result = convert_png(&bytes, options)?;
    std::fs::write(output, &result.png_bytes)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        width = result.stats.width,
        height = result.stats.height,
        colors = result.stats.colors,
        bytes = result.stats.bytes,
        "Converted image"
    );
    Ok(result.stats)
}

/// Parse a region given as `X,Y,W,H`.
pub fn parse_region(s: &str) -> Result<Rectangle, ConvertError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, w, h] = parts[..] else {
        return Err(ConvertError::Region(format!(
            "expected X,Y,W,H, got {s:?}"
        )));
    };

    let int = |v: &str| {
        v.parse::<i32>()
            .map_err(|e| ConvertError::Region(format!("{v:?}: {e}")))
    };
    let (x, y, w, h) = (int(x)?, int(y)?, int(w)?, int(h)?);
    if w <= 0 || h <= 0 {
        return Err(ConvertError::Region(format!(
            "width and height must be positive, got {w}x{h}"
        )));
    }

    let x1 = x
        .checked_add(w)
        .ok_or_else(|| ConvertError::Region(format!("{s:?} overflows")))?;
    let y1 = y
        .checked_add(h)
        .ok_or_else(|| ConvertError::Region(format!("{s:?} overflows")))?;
    Ok(Rectangle::new(x, y, x1, y1))
}

/// Parse comma-separated hex colors (e.g. `"#000000,#FFFFFF,#FF0000"`).
pub fn parse_colors(s: &str) -> Result<ColorPalette, ConvertError> {
    let colors: Vec<&str> = s
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    Ok(ColorPalette::from_hex(&colors)?)
}
