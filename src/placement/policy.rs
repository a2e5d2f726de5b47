use crate::foundation::core::FaceRect;

/// Fully resolved instruction to paste one sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Position of the face in the detector's output.
    pub face_index: usize,
    /// Sprite to draw, an index into the sprite sheet.
    pub sprite_index: usize,
    /// Destination left edge; may be negative.
    pub x: i64,
    /// Destination top edge; may be negative.
    pub y: i64,
    /// Destination width, `> 0`.
    pub width: u32,
    /// Destination height, `> 0`.
    pub height: u32,
}

/// Why a face produced no placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The detection had a zero or negative dimension.
    DegenerateFace,
    /// Scaling produced a zero-sized or unrepresentable destination.
    DegenerateScale,
    /// The sheet holds no sprites to choose from.
    NoSprites,
}

/// Per-frame inputs to [`compute_placements`].
#[derive(Clone, Copy, Debug)]
pub struct PlacementParams<'a> {
    /// Number of sprites in the sheet (`N`).
    pub sprite_count: usize,
    /// Session rotation of sprite assignment.
    pub cursor_offset: usize,
    /// Session scale, already inside the accepted range.
    pub scale_factor: f64,
    /// Explicit sprite per face; entries beyond its length fall back to the rotation.
    pub overrides: Option<&'a [usize]>,
}

/// Sprite chosen for the face at position `face_index`.
pub fn sprite_for_face(face_index: usize, params: &PlacementParams<'_>) -> Option<usize> {
    let n = params.sprite_count;
    if n == 0 {
        return None;
    }
    let chosen = params
        .overrides
        .and_then(|o| o.get(face_index).copied())
        .unwrap_or_else(|| face_index.wrapping_add(params.cursor_offset % n));
    Some(chosen % n)
}

/// Destination rectangle for `face` at `scale`: scaled size, centred over the face.
pub fn scaled_rect(face: FaceRect, scale: f64) -> Result<(i64, i64, u32, u32), SkipReason> {
    if face.is_degenerate() {
        return Err(SkipReason::DegenerateFace);
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(SkipReason::DegenerateScale);
    }
    let dw = (f64::from(face.width) * scale).round();
    let dh = (f64::from(face.height) * scale).round();
    if dw < 1.0 || dh < 1.0 || dw > f64::from(u32::MAX) || dh > f64::from(u32::MAX) {
        return Err(SkipReason::DegenerateScale);
    }
    let (dw, dh) = (dw as i64, dh as i64);
    // Integer division truncates toward zero.
    let x = i64::from(face.x) - (dw - i64::from(face.width)) / 2;
    let y = i64::from(face.y) - (dh - i64::from(face.height)) / 2;
    Ok((x, y, dw as u32, dh as u32))
}

/// Output of [`compute_placements`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacementPlan {
    /// Placements in detector order.
    pub placements: Vec<Placement>,
    /// Faces left out, with the reason.
    pub skipped: Vec<(usize, SkipReason)>,
}

/// Map detections to placements, preserving detector order.
///
/// Faces that cannot be placed are left out of `placements` and listed in `skipped`. The session
/// state behind `params` is only read.
pub fn compute_placements(faces: &[FaceRect], params: &PlacementParams<'_>) -> PlacementPlan {
    let mut placements = Vec::with_capacity(faces.len());
    let mut skipped = Vec::new();
    for (face_index, &face) in faces.iter().enumerate() {
        let Some(sprite_index) = sprite_for_face(face_index, params) else {
            skipped.push((face_index, SkipReason::NoSprites));
            continue;
        };
        match scaled_rect(face, params.scale_factor) {
            Ok((x, y, width, height)) => placements.push(Placement {
                face_index,
                sprite_index,
                x,
                y,
                width,
                height,
            }),
            Err(reason) => {
                tracing::debug!(face_index, ?face, ?reason, "placement skipped");
                skipped.push((face_index, reason));
            }
        }
    }
    PlacementPlan {
        placements,
        skipped,
    }
}

/// Drop any detection whose IoU with an earlier kept detection exceeds `threshold`.
///
/// Order of the survivors is unchanged. Not applied unless configured.
pub fn suppress_overlapping(faces: &[FaceRect], threshold: f64) -> Vec<FaceRect> {
    let mut kept: Vec<FaceRect> = Vec::with_capacity(faces.len());
    for &face in faces {
        if kept.iter().all(|k| k.iou(face) <= threshold) {
            kept.push(face);
        }
    }
    kept
}

#[cfg(test)]
#[path = "../../tests/unit/placement/policy.rs"]
mod tests;
