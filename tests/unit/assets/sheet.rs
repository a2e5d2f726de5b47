use super::*;

#[test]
fn default_layout_cells_on_nominal_sheet() {
    let layout = SheetLayout::default();
    // Column-major: cells 0..4 walk down the first column.
    assert_eq!(
        cell_rect(&layout, 1000, 997, 0).unwrap(),
        CellRect {
            x: 0,
            y: 0,
            width: 250,
            height: 189
        }
    );
    assert_eq!(
        cell_rect(&layout, 1000, 997, 1).unwrap(),
        CellRect {
            x: 0,
            y: 189,
            width: 250,
            height: 249
        }
    );
    assert_eq!(
        cell_rect(&layout, 1000, 997, 3).unwrap(),
        CellRect {
            x: 0,
            y: 667,
            width: 250,
            height: 330
        }
    );
    assert_eq!(
        cell_rect(&layout, 1000, 997, 4).unwrap(),
        CellRect {
            x: 250,
            y: 0,
            width: 250,
            height: 189
        }
    );
    assert_eq!(
        cell_rect(&layout, 1000, 997, 15).unwrap(),
        CellRect {
            x: 750,
            y: 667,
            width: 250,
            height: 330
        }
    );
    assert!(cell_rect(&layout, 1000, 997, 16).is_err());
}

#[test]
fn boundaries_rescale_to_actual_size() {
    let layout = SheetLayout::default();
    let r = cell_rect(&layout, 500, 997 * 2, 5).unwrap();
    assert_eq!(
        r,
        CellRect {
            x: 125,
            y: 378,
            width: 125,
            height: 498
        }
    );
    // The last boundary always lands on the true edge.
    let last = cell_rect(&layout, 333, 101, 15).unwrap();
    assert_eq!(last.x + last.width, 333);
    assert_eq!(last.y + last.height, 101);
}

#[test]
fn cells_tile_the_sheet_without_overlap_or_gaps() {
    let layout = SheetLayout::default();
    let (w, h) = (1000u32, 997u32);
    let mut cover = vec![0u8; (w * h) as usize];
    for i in 0..layout.count {
        let r = cell_rect(&layout, w, h, i).unwrap();
        assert!(r.width > 0 && r.height > 0);
        for y in r.y..r.y + r.height {
            for x in r.x..r.x + r.width {
                cover[(y * w + x) as usize] += 1;
            }
        }
    }
    assert!(cover.iter().all(|&c| c == 1));
}

#[test]
fn slice_sheet_extracts_distinct_cells() {
    // Every pixel encodes its cell so each slice has a unique colour.
    let layout = SheetLayout::default();
    let (w, h) = (100u32, 100u32);
    let mut img = image::RgbImage::new(w, h);
    for i in 0..layout.count {
        let r = cell_rect(&layout, w, h, i).unwrap();
        for y in r.y..r.y + r.height {
            for x in r.x..r.x + r.width {
                img.put_pixel(x, y, image::Rgb([i as u8 * 10, 0, 255 - i as u8]));
            }
        }
    }
    let cells = slice_sheet(&image::DynamicImage::ImageRgb8(img), &layout).unwrap();
    assert_eq!(cells.len(), 16);
    for (i, cell) in cells.iter().enumerate() {
        assert_eq!(cell.color().channel_count(), 3);
        let rgb = cell.to_rgb8();
        assert!(rgb.pixels().all(|p| p.0 == [i as u8 * 10, 0, 255 - i as u8]));
    }
}

#[test]
fn slice_sheet_honours_count() {
    let mut layout = SheetLayout::uniform(2, 2, 4, 4);
    layout.count = 3;
    let sheet = image::DynamicImage::ImageRgba8(image::RgbaImage::new(4, 4));
    let cells = slice_sheet(&sheet, &layout).unwrap();
    assert_eq!(cells.len(), 3);
    assert!(cells.iter().all(|c| c.width() == 2 && c.height() == 2));
}

#[test]
fn slice_sheet_rejects_sheets_too_small_for_the_grid() {
    let layout = SheetLayout::default();
    let sheet = image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2));
    assert!(matches!(
        slice_sheet(&sheet, &layout),
        Err(CatfaceError::AssetLoad(_))
    ));
}
