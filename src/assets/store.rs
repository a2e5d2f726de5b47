use std::path::Path;

use rayon::prelude::*;

use crate::{
    assets::{decode::load_image_file, key::apply_key, sheet::slice_sheet},
    config::EffectConfig,
    foundation::error::{CatfaceError, CatfaceResult},
};

#[derive(Clone, Debug, PartialEq)]
/// One keyed sprite: straight-alpha RGBA8 with a hard 0/255 mask.
pub struct Sprite {
    index: usize,
    image: image::RgbaImage,
}

impl Sprite {
    /// Wrap an already keyed image taken from cell `index`.
    ///
    /// Fails for empty images.
    pub fn new(index: usize, image: image::RgbaImage) -> CatfaceResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(CatfaceError::asset_load(format!("sprite {index} is empty")));
        }
        Ok(Self { index, image })
    }

    /// Source grid cell.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pixel data.
    pub fn image(&self) -> &image::RgbaImage {
        &self.image
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[derive(Clone, Debug)]
/// Ordered, immutable set of sprites loaded once per session.
pub struct SpriteSheet {
    sprites: Vec<Sprite>,
}

impl SpriteSheet {
    /// Build a sheet from sprites already in index order.
    pub fn from_sprites(sprites: Vec<Sprite>) -> CatfaceResult<Self> {
        if sprites.is_empty() {
            return Err(CatfaceError::asset_load("sprite sheet holds no sprites"));
        }
        Ok(Self { sprites })
    }

    /// Slice and key a decoded sheet. Keying fans out across the rayon pool.
    #[tracing::instrument(skip_all, fields(w = sheet.width(), h = sheet.height()))]
    pub fn from_image(sheet: &image::DynamicImage, cfg: &EffectConfig) -> CatfaceResult<Self> {
        let cells = slice_sheet(sheet, &cfg.sheet)?;
        let key = cfg.key;
        let sprites = cells
            .par_iter()
            .enumerate()
            .map(|(i, cell)| Sprite::new(i, apply_key(cell, key)))
            .collect::<CatfaceResult<Vec<_>>>()?;
        tracing::info!(count = sprites.len(), "sprite sheet ready");
        Self::from_sprites(sprites)
    }

    /// Number of sprites (`N`).
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Never true for a constructed sheet.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite at `index`.
    pub fn get(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }

    /// Sprites in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sprite> {
        self.sprites.iter()
    }
}

/// Read, slice and key the sprite sheet at `path`.
///
/// Any failure is an [`CatfaceError::AssetLoad`]; there is no partial sheet.
pub fn load_sprite_sheet(path: &Path, cfg: &EffectConfig) -> CatfaceResult<SpriteSheet> {
    let img = load_image_file(path)?;
    SpriteSheet::from_image(&img, cfg).map_err(|e| match e {
        CatfaceError::Validation(msg) => CatfaceError::asset_load(msg),
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
