use std::io::Cursor;

use super::*;

fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_channel_layout() {
    let rgb = image::RgbImage::from_pixel(3, 2, image::Rgb([1, 2, 3]));
    let decoded = decode_image(&png_bytes(image::DynamicImage::ImageRgb8(rgb))).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (3, 2));
    assert_eq!(decoded.color().channel_count(), 3);

    let rgba = image::RgbaImage::from_pixel(1, 1, image::Rgba([9, 8, 7, 6]));
    let decoded = decode_image(&png_bytes(image::DynamicImage::ImageRgba8(rgba))).unwrap();
    assert_eq!(decoded.color().channel_count(), 4);
    assert_eq!(decoded.to_rgba8().get_pixel(0, 0).0, [9, 8, 7, 6]);
}

#[test]
fn decode_garbage_is_asset_load_error() {
    assert!(matches!(
        decode_image(b"not an image"),
        Err(CatfaceError::AssetLoad(_))
    ));
    assert!(matches!(decode_image(&[]), Err(CatfaceError::AssetLoad(_))));
}

#[test]
fn missing_file_is_asset_load_error() {
    let err = load_image_file(Path::new("target/does/not/exist.png")).unwrap_err();
    assert!(matches!(err, CatfaceError::AssetLoad(_)));
    assert!(err.to_string().contains("exist.png"));
}
