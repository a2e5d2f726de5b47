use crate::config::KeyThresholds;

/// Saturation and value (brightness) of an 8-bit colour, both on a 0-255 scale.
///
/// Channel order does not matter: both quantities depend only on the max and min channel.
pub fn saturation_value(c0: u8, c1: u8, c2: u8) -> (u8, u8) {
    let v = c0.max(c1).max(c2);
    let min = c0.min(c1).min(c2);
    if v == 0 {
        return (0, 0);
    }
    let diff = u32::from(v - min);
    let v32 = u32::from(v);
    let s = (diff * 255 + v32 / 2) / v32;
    (s as u8, v)
}

/// Near-white, low-colour pixels are background.
pub fn is_background(c0: u8, c1: u8, c2: u8, th: KeyThresholds) -> bool {
    let (s, v) = saturation_value(c0, c1, c2);
    s < th.max_saturation && v > th.min_value
}

/// Turn the solid background of `img` into full transparency.
///
/// Colour channels are copied unchanged. Alpha is 0 for background pixels and for pixels that
/// were already fully transparent in the source, 255 everywhere else; there is no partial alpha.
pub fn apply_key(img: &image::DynamicImage, th: KeyThresholds) -> image::RgbaImage {
    let source_has_alpha = img.color().has_alpha();
    let mut out = img.to_rgba8();
    for px in out.pixels_mut() {
        let [r, g, b, a] = px.0;
        let transparent = (source_has_alpha && a == 0) || is_background(r, g, b, th);
        px.0[3] = if transparent { 0 } else { 255 };
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/key.rs"]
mod tests;
