use super::*;
use crate::config::SheetLayout;

fn synthetic_sheet(cell: u32) -> image::DynamicImage {
    // 4x4 cells, each a coloured square on a white margin.
    let mut img = image::RgbImage::from_pixel(cell * 4, cell * 4, image::Rgb([255, 255, 255]));
    for col in 0..4 {
        for row in 0..4 {
            let idx = (col * 4 + row) as u8;
            for y in row * cell + 1..(row + 1) * cell - 1 {
                for x in col * cell + 1..(col + 1) * cell - 1 {
                    img.put_pixel(x, y, image::Rgb([idx * 15, 40, 200 - idx * 10]));
                }
            }
        }
    }
    image::DynamicImage::ImageRgb8(img)
}

fn uniform_cfg(cell: u32) -> EffectConfig {
    EffectConfig {
        sheet: SheetLayout::uniform(4, 4, cell * 4, cell * 4),
        ..EffectConfig::default()
    }
}

#[test]
fn from_image_keys_every_cell_in_order() {
    let sheet = SpriteSheet::from_image(&synthetic_sheet(8), &uniform_cfg(8)).unwrap();
    assert_eq!(sheet.len(), 16);
    for (i, sprite) in sheet.iter().enumerate() {
        assert_eq!(sprite.index(), i);
        assert_eq!((sprite.width(), sprite.height()), (8, 8));
        // White margin is keyed out, the centre stays opaque with its cell colour.
        assert_eq!(sprite.image().get_pixel(0, 0).0[3], 0);
        let c = sprite.image().get_pixel(4, 4).0;
        assert_eq!(c, [i as u8 * 15, 40, 200 - i as u8 * 10, 255]);
    }
}

#[test]
fn sprites_are_pairwise_distinct() {
    let sheet = SpriteSheet::from_image(&synthetic_sheet(6), &uniform_cfg(6)).unwrap();
    for a in 0..sheet.len() {
        for b in a + 1..sheet.len() {
            assert_ne!(sheet.get(a).unwrap().image(), sheet.get(b).unwrap().image());
        }
    }
}

#[test]
fn empty_inputs_are_rejected() {
    assert!(SpriteSheet::from_sprites(Vec::new()).is_err());
    assert!(Sprite::new(0, image::RgbaImage::new(0, 3)).is_err());
}

#[test]
fn load_missing_sheet_is_asset_load_error() {
    let err = load_sprite_sheet(Path::new("target/missing/cat.png"), &EffectConfig::default())
        .unwrap_err();
    assert!(matches!(err, CatfaceError::AssetLoad(_)));
}

#[test]
fn load_sheet_from_disk() {
    let dir = std::path::PathBuf::from("target").join("unit_store");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sheet.png");
    synthetic_sheet(5).save(&path).unwrap();

    let sheet = load_sprite_sheet(&path, &uniform_cfg(5)).unwrap();
    assert_eq!(sheet.len(), 16);
    assert!(!sheet.is_empty());
    assert!(sheet.get(16).is_none());
}
