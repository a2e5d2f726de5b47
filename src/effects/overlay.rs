use image::RgbImage;

use crate::foundation::core::{FaceRect, Rgb8};

/// Stroke width of debug face boxes.
pub const DEBUG_BOX_THICKNESS: i32 = 2;
/// Radius of the debug centre dot.
pub const DEBUG_DOT_RADIUS: i32 = 5;

fn put_clipped(frame: &mut RgbImage, x: i64, y: i64, color: Rgb8) {
    if x < 0 || y < 0 || x >= i64::from(frame.width()) || y >= i64::from(frame.height()) {
        return;
    }
    frame.put_pixel(x as u32, y as u32, image::Rgb(color.to_array()));
}

/// Outline `rect` with a stroke of `thickness` pixels drawn inward; clipped to the frame.
pub fn draw_rect_outline(frame: &mut RgbImage, rect: FaceRect, color: Rgb8, thickness: i32) {
    if rect.is_degenerate() || thickness <= 0 {
        return;
    }
    let (x0, y0) = (i64::from(rect.x), i64::from(rect.y));
    let (x1, y1) = (x0 + i64::from(rect.width), y0 + i64::from(rect.height));
    let t = i64::from(thickness);
    for y in y0..y1 {
        for x in x0..x1 {
            let edge = x < x0 + t || x >= x1 - t || y < y0 + t || y >= y1 - t;
            if edge {
                put_clipped(frame, x, y, color);
            }
        }
    }
}

/// Filled disc centred on (`cx`, `cy`); clipped to the frame.
pub fn draw_filled_circle(frame: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb8) {
    if radius < 0 {
        return;
    }
    let r = i64::from(radius);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put_clipped(frame, i64::from(cx) + dx, i64::from(cy) + dy, color);
            }
        }
    }
}

/// Red box and centre dot for every detection, drawn before faces are replaced.
pub fn draw_debug_overlay(frame: &mut RgbImage, faces: &[FaceRect]) {
    for &face in faces {
        draw_rect_outline(frame, face, Rgb8::RED, DEBUG_BOX_THICKNESS);
        if !face.is_degenerate() {
            let (cx, cy) = face.center();
            draw_filled_circle(frame, cx, cy, DEBUG_DOT_RADIUS, Rgb8::RED);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/overlay.rs"]
mod tests;
