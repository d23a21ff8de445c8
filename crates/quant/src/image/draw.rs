//! Opaque rectangle copy between images.

use super::{DrawImage, Image, Point, Rectangle};

/// Clip `r` to the destination and the source and shift `sp` by the same
/// amount `r.min` moved.
///
/// The source offset is computed in `i64`: any `sp` is accepted, and an
/// offset that leaves the `i32` range simply yields an empty region.
pub(crate) fn clip(
    dst_bounds: Rectangle,
    r: Rectangle,
    src_bounds: Rectangle,
    sp: Point,
) -> (Rectangle, Point) {
    let base = r.intersect(dst_bounds);
    let ox = i64::from(r.min.x) - i64::from(sp.x);
    let oy = i64::from(r.min.y) - i64::from(sp.y);

    let x0 = i64::from(base.min.x).max(i64::from(src_bounds.min.x) + ox);
    let y0 = i64::from(base.min.y).max(i64::from(src_bounds.min.y) + oy);
    let x1 = i64::from(base.max.x).min(i64::from(src_bounds.max.x) + ox);
    let y1 = i64::from(base.max.y).min(i64::from(src_bounds.max.y) + oy);
    if x0 >= x1 || y0 >= y1 {
        return (Rectangle::ZERO, sp);
    }

    // Both corners lie inside `base`, and the shifted source point inside
    // `src_bounds`, so every narrowing below is lossless.
    let clipped = Rectangle {
        min: Point::new(x0 as i32, y0 as i32),
        max: Point::new(x1 as i32, y1 as i32),
    };
    (clipped, Point::new((x0 - ox) as i32, (y0 - oy) as i32))
}

/// Copy the pixels of `src` starting at `sp` onto `dst` over `r`,
/// replacing whatever `dst` held (no blending).
///
/// The region is clipped to both images first; an empty result is a no-op.
/// When both images are indexed with equal palettes the indices are copied
/// verbatim; otherwise every color goes through [`DrawImage::set`], which
/// for an indexed destination means nearest-color mapping.
pub fn draw_src(dst: &mut dyn DrawImage, r: Rectangle, src: &dyn Image, sp: Point) {
    let (r, sp) = clip(dst.bounds(), r, src.bounds(), sp);
    if r.is_empty() {
        return;
    }
    if let Some(src_pi) = src.as_paletted() {
        if let Some(dst_pi) = dst.as_paletted_mut() {
            if dst_pi.palette() == src_pi.palette() {
                for (y, sy) in (r.min.y..r.max.y).zip(sp.y..) {
                    for (x, sx) in (r.min.x..r.max.x).zip(sp.x..) {
                        dst_pi.set_color_index(x, y, src_pi.color_index_at(sx, sy));
                    }
                }
                return;
            }
        }
    }

    for (y, sy) in (r.min.y..r.max.y).zip(sp.y..) {
        for (x, sx) in (r.min.x..r.max.x).zip(sp.x..) {
            dst.set(x, y, src.at(sx, sy));
        }
    }
}
