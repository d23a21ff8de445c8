//! Error measurements between a source image and its indexed rendition.

use crate::image::{Image, PalettedImage};

/// How far the average displayed color of `dst` is from the average color
/// of `src`, over the area both cover.
///
/// For each of R, G and B this is the absolute difference between the two
/// region means, in 16-bit channel units; the result is the mean of the
/// three. Dithering trades per-pixel error for a better region average, so
/// this is the figure that improves when it works. Returns `0.0` when the
/// images do not overlap.
pub fn mean_color_error(src: &dyn Image, dst: &PalettedImage) -> f64 {
    let r = src.bounds().intersect(dst.bounds());
    if r.is_empty() {
        return 0.0;
    }

    let mut src_sum = [0u64; 3];
    let mut dst_sum = [0u64; 3];
    for y in r.min.y..r.max.y {
        for x in r.min.x..r.max.x {
            let s = src.at(x, y).rgb();
            let d = dst.at(x, y).rgb();
            for ch in 0..3 {
                src_sum[ch] += u64::from(s[ch]);
                dst_sum[ch] += u64::from(d[ch]);
            }
        }
    }

    let n = r.area() as f64;
    let total: f64 = (0..3)
        .map(|ch| (src_sum[ch] as f64 / n - dst_sum[ch] as f64 / n).abs())
        .sum();
    total / 3.0
}

/// Number of pixels using each palette index.
///
/// The result has one slot per palette entry.
pub fn index_histogram(dst: &PalettedImage) -> Vec<usize> {
    let mut counts = vec![0; dst.palette().len()];
    for &idx in dst.indices() {
        counts[idx as usize] += 1;
    }
    counts
}
