use std::path::Path;

use crate::foundation::error::{CatfaceError, CatfaceResult};

/// Decode encoded image bytes (PNG, JPEG, ...) keeping the source channel layout.
pub fn decode_image(bytes: &[u8]) -> CatfaceResult<image::DynamicImage> {
    if bytes.is_empty() {
        return Err(CatfaceError::asset_load("image data is empty"));
    }
    image::load_from_memory(bytes)
        .map_err(|e| CatfaceError::asset_load(format!("decode image from memory: {e}")))
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> CatfaceResult<image::DynamicImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| CatfaceError::asset_load(format!("read '{}': {e}", path.display())))?;
    decode_image(&bytes).map_err(|e| match e {
        CatfaceError::AssetLoad(msg) => {
            CatfaceError::asset_load(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
