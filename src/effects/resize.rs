use image::RgbaImage;

use crate::{
    config::ResizeFilter,
    foundation::{
        error::{CatfaceError, CatfaceResult},
        math::{mul_div255_u8, round_u8},
    },
};

/// Resize a straight-alpha sprite to `width` x `height`.
///
/// All four channels are resampled, so the keyed mask survives. [`ResizeFilter::Area`] averages
/// in premultiplied space to keep transparent background colour from bleeding into edges.
pub fn resize_sprite(
    src: &RgbaImage,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> CatfaceResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(CatfaceError::validation(format!(
            "cannot resize sprite to {width}x{height}"
        )));
    }
    if src.width() == 0 || src.height() == 0 {
        return Err(CatfaceError::validation("cannot resize an empty sprite"));
    }
    if src.dimensions() == (width, height) {
        return Ok(src.clone());
    }
    Ok(match filter {
        ResizeFilter::Nearest => {
            image::imageops::resize(src, width, height, image::imageops::FilterType::Nearest)
        }
        ResizeFilter::Area => resize_area(src, width, height),
    })
}

/// Source pixels covering each destination pixel along one axis, with coverage weights.
///
/// All taps share one buffer; `spans[d]` is the `(start, len)` slice for destination `d`.
struct AxisWeights {
    spans: Vec<(usize, usize)>,
    taps: Vec<(u32, f64)>,
}

impl AxisWeights {
    fn new(src_len: u32, dst_len: u32) -> Self {
        let scale = f64::from(src_len) / f64::from(dst_len);
        // Each destination pixel touches at most ceil(scale) + 1 source pixels.
        let per = scale.ceil() as usize + 1;
        let mut spans = Vec::with_capacity(dst_len as usize);
        let mut taps = Vec::with_capacity(dst_len as usize * per);
        for d in 0..dst_len {
            let start = f64::from(d) * scale;
            let end = start + scale;
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_len);
            let begin = taps.len();
            for s in first..last {
                let lo = start.max(f64::from(s));
                let hi = end.min(f64::from(s + 1));
                if hi > lo {
                    taps.push((s, hi - lo));
                }
            }
            spans.push((begin, taps.len() - begin));
        }
        Self { spans, taps }
    }

    fn taps(&self, d: u32) -> &[(u32, f64)] {
        let (start, len) = self.spans[d as usize];
        &self.taps[start..start + len]
    }
}

fn resize_area(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premul: Vec<[u8; 4]> = src
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            let a16 = u16::from(a);
            [
                mul_div255_u8(u16::from(r), a16),
                mul_div255_u8(u16::from(g), a16),
                mul_div255_u8(u16::from(b), a16),
                a,
            ]
        })
        .collect();
    let sw = src.width() as usize;
    let xw = AxisWeights::new(src.width(), width);
    let yw = AxisWeights::new(src.height(), height);

    RgbaImage::from_fn(width, height, |dx, dy| {
        let mut acc = [0.0f64; 4];
        let mut total = 0.0f64;
        for &(sy, wy) in yw.taps(dy) {
            for &(sx, wx) in xw.taps(dx) {
                let w = wx * wy;
                let p = premul[sy as usize * sw + sx as usize];
                for c in 0..4 {
                    acc[c] += f64::from(p[c]) * w;
                }
                total += w;
            }
        }
        if total <= 0.0 {
            return image::Rgba([0, 0, 0, 0]);
        }
        let alpha = acc[3] / total;
        let a = round_u8(alpha);
        if a == 0 {
            return image::Rgba([0, 0, 0, 0]);
        }
        // Un-premultiply: colour = (sum c*a) / (sum a).
        let unpremul = |c: f64| round_u8(c * 255.0 / acc[3]);
        image::Rgba([unpremul(acc[0]), unpremul(acc[1]), unpremul(acc[2]), a])
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/resize.rs"]
mod tests;
