use image::GenericImageView;

use crate::{
    config::SheetLayout,
    foundation::error::{CatfaceError, CatfaceResult},
};

/// Pixel region of one grid cell inside the decoded sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Rescale a nominal boundary to the decoded extent.
fn scale_bound(b: u32, nominal: u32, actual: u32) -> u32 {
    if b >= nominal {
        return actual;
    }
    (u64::from(b) * u64::from(actual) / u64::from(nominal)) as u32
}

/// Region of cell `index` for a sheet of `width` x `height` pixels.
///
/// Cells are numbered column-major: `index / rows` selects the column (uniform x-boundaries),
/// `index % rows` selects the row (ragged y-boundaries).
pub fn cell_rect(
    layout: &SheetLayout,
    width: u32,
    height: u32,
    index: u32,
) -> CatfaceResult<CellRect> {
    if index >= layout.count {
        return Err(CatfaceError::validation(format!(
            "cell {index} out of range (count {})",
            layout.count
        )));
    }
    let col = (index / layout.rows) as usize;
    let row = (index % layout.rows) as usize;
    if col + 1 >= layout.col_bounds.len() || row + 1 >= layout.row_bounds.len() {
        return Err(CatfaceError::validation(format!(
            "cell {index} maps outside the {}x{} grid",
            layout.rows, layout.cols
        )));
    }

    let x0 = scale_bound(layout.col_bounds[col], layout.nominal_width, width);
    let x1 = scale_bound(layout.col_bounds[col + 1], layout.nominal_width, width);
    let y0 = scale_bound(layout.row_bounds[row], layout.nominal_height, height);
    let y1 = scale_bound(layout.row_bounds[row + 1], layout.nominal_height, height);
    Ok(CellRect {
        x: x0,
        y: y0,
        width: x1.saturating_sub(x0),
        height: y1.saturating_sub(y0),
    })
}

/// Cut the first `layout.count` cells out of `sheet`.
///
/// The returned images keep the sheet's channel layout; no keying happens here.
pub fn slice_sheet(
    sheet: &image::DynamicImage,
    layout: &SheetLayout,
) -> CatfaceResult<Vec<image::DynamicImage>> {
    layout.validate()?;
    let (width, height) = sheet.dimensions();
    if width == 0 || height == 0 {
        return Err(CatfaceError::asset_load("sprite sheet has zero size"));
    }

    (0..layout.count)
        .map(|i| {
            let r = cell_rect(layout, width, height, i)?;
            if r.width == 0 || r.height == 0 {
                return Err(CatfaceError::asset_load(format!(
                    "sprite cell {i} is empty for a {width}x{height} sheet"
                )));
            }
            Ok(sheet.crop_imm(r.x, r.y, r.width, r.height))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sheet.rs"]
mod tests;
