use image::{ImageBuffer, Pixel, RgbaImage};

use crate::foundation::math::blend_channel;

/// Straight-alpha RGBA8 source pixel.
pub type StraightRgba8 = [u8; 4];

/// Result of a single paste.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The sprite was blended into the frame.
    Applied,
    /// The sprite would not fit entirely inside the frame; nothing was written.
    ClipRejected,
}

/// Blend `src` over the colour channels of `dst`: `a*src + (1-a)*dst`, `a = src.alpha / 255`.
///
/// Rounds half up, so opaque sources replace and transparent sources leave `dst` untouched.
pub fn over(dst: [u8; 3], src: StraightRgba8) -> [u8; 3] {
    match src[3] {
        0 => dst,
        255 => [src[0], src[1], src[2]],
        a => [
            blend_channel(src[0], dst[0], a),
            blend_channel(src[1], dst[1], a),
            blend_channel(src[2], dst[2], a),
        ],
    }
}

/// `true` when a `w` x `h` sprite at (`x`, `y`) lies entirely inside a `frame_w` x `frame_h` frame.
pub fn fits_inside(x: i64, y: i64, w: u32, h: u32, frame_w: u32, frame_h: u32) -> bool {
    x >= 0
        && y >= 0
        && x.checked_add(i64::from(w)).is_some_and(|r| r <= i64::from(frame_w))
        && y.checked_add(i64::from(h)).is_some_and(|b| b <= i64::from(frame_h))
}

/// Alpha-blend `sprite` onto `frame` with its top-left corner at (`x`, `y`).
///
/// Sprites that would cross any frame edge are dropped whole (no cropping). Only the covered
/// rectangle is written, and only the first three channels of each frame pixel; an alpha
/// channel on the frame, if any, is left as is. The sprite is never modified.
pub fn paste<P>(frame: &mut ImageBuffer<P, Vec<u8>>, sprite: &RgbaImage, x: i64, y: i64) -> PasteOutcome
where
    P: Pixel<Subpixel = u8>,
{
    let (fw, fh) = frame.dimensions();
    let (sw, sh) = sprite.dimensions();
    if P::CHANNEL_COUNT < 3 || !fits_inside(x, y, sw, sh, fw, fh) {
        return PasteOutcome::ClipRejected;
    }
    let (ox, oy) = (x as u32, y as u32);

    for (sx, sy, spx) in sprite.enumerate_pixels() {
        if spx.0[3] == 0 {
            continue;
        }
        let dpx = frame.get_pixel_mut(ox + sx, oy + sy);
        let ch = dpx.channels_mut();
        let out = over([ch[0], ch[1], ch[2]], spx.0);
        ch[..3].copy_from_slice(&out);
    }
    PasteOutcome::Applied
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
