use image::Rgba;

use super::*;

#[test]
fn zero_target_is_an_error() {
    let src = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
    assert!(resize_sprite(&src, 0, 4, ResizeFilter::Area).is_err());
    assert!(resize_sprite(&src, 4, 0, ResizeFilter::Nearest).is_err());
    assert!(resize_sprite(&RgbaImage::new(0, 0), 4, 4, ResizeFilter::Area).is_err());
}

#[test]
fn same_size_is_identity() {
    let src = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 7, 200]));
    assert_eq!(resize_sprite(&src, 3, 2, ResizeFilter::Area).unwrap(), src);
}

#[test]
fn upscale_uniform_opaque_stays_exact() {
    let src = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
    for filter in [ResizeFilter::Area, ResizeFilter::Nearest] {
        let out = resize_sprite(&src, 80, 80, filter).unwrap();
        assert_eq!(out.dimensions(), (80, 80));
        assert!(out.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }
}

#[test]
fn area_downscale_averages_blocks() {
    // 2x2 blocks of distinct grey levels, all opaque.
    let src = RgbaImage::from_fn(4, 2, |x, _| {
        let v = if x < 2 { 40 } else { 200 };
        Rgba([v, v, v, 255])
    });
    let out = resize_sprite(&src, 2, 1, ResizeFilter::Area).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [40, 40, 40, 255]);
    assert_eq!(out.get_pixel(1, 0).0, [200, 200, 200, 255]);

    let out = resize_sprite(&src, 1, 1, ResizeFilter::Area).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [120, 120, 120, 255]);
}

#[test]
fn area_preserves_alpha_mask() {
    // Left half transparent white, right half opaque blue.
    let src = RgbaImage::from_fn(4, 4, |x, _| {
        if x < 2 {
            Rgba([255, 255, 255, 0])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    let out = resize_sprite(&src, 2, 2, ResizeFilter::Area).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(out.get_pixel(1, 1).0, [0, 0, 255, 255]);

    // Straddling pixel: half coverage, and no white bleed into the colour.
    let out = resize_sprite(&src, 1, 1, ResizeFilter::Area).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 255, 128]);
}

#[test]
fn nearest_keeps_hard_alpha() {
    let src = RgbaImage::from_fn(2, 2, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([10, 20, 30, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let out = resize_sprite(&src, 7, 5, ResizeFilter::Nearest).unwrap();
    assert!(out.pixels().all(|p| p.0[3] == 0 || p.0[3] == 255));
    assert!(out.pixels().any(|p| p.0[3] == 255));
}

#[test]
fn axis_weights_cover_the_source_exactly() {
    let w = AxisWeights::new(10, 4);
    assert_eq!(w.spans.len(), 4);
    let total: f64 = (0..4).flat_map(|d| w.taps(d)).map(|&(_, wt)| wt).sum();
    assert!((total - 10.0).abs() < 1e-9);
    for d in 0..4 {
        let sum: f64 = w.taps(d).iter().map(|&(_, wt)| wt).sum();
        assert!((sum - 2.5).abs() < 1e-9);
    }
    // 2.5 source pixels per destination: 0..2.5 touches sources 0, 1, 2.
    assert_eq!(w.taps(0).iter().map(|&(s, _)| s).collect::<Vec<_>>(), vec![0, 1, 2]);
}
