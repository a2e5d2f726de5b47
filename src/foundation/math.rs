/// `round(x * y / 255)` for 8-bit operands.
pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Straight-alpha blend of one channel: `round(a*src + (1-a)*dst)` with `a = alpha/255`.
///
/// `alpha == 255` yields `src` and `alpha == 0` yields `dst` exactly.
pub(crate) fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    let v = u32::from(src) * a + u32::from(dst) * (255 - a);
    ((v + 127) / 255) as u8
}

/// Round a non-negative float to the nearest `u8`, saturating.
pub(crate) fn round_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
