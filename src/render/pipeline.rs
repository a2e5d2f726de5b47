use std::sync::Arc;

use crate::{
    assets::store::SpriteSheet,
    config::{EffectConfig, ResizeFilter},
    effects::{
        composite::{PasteOutcome, fits_inside, paste},
        overlay::draw_debug_overlay,
        resize::resize_sprite,
    },
    foundation::core::FaceRect,
    placement::policy::{PlacementParams, compute_placements, suppress_overlapping},
    session::state::SessionSnapshot,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Per-frame counters.
pub struct FrameStats {
    /// Detections received.
    pub faces: usize,
    /// Detections dropped by overlap suppression.
    pub suppressed: usize,
    /// Placements computed.
    pub placements: usize,
    /// Sprites blended into the frame.
    pub applied: usize,
    /// Placements dropped because the sprite would cross a frame edge.
    pub clip_rejected: usize,
    /// Faces with unusable geometry.
    pub skipped: usize,
    /// Placements whose resize failed.
    pub failed: usize,
}

/// Per-frame orchestration: placement, resize and composite for every detected face.
///
/// Holds the session's sprite sheet; everything else comes in per call.
#[derive(Clone, Debug)]
pub struct FrameEffectPipeline {
    sheet: Arc<SpriteSheet>,
    filter: ResizeFilter,
    suppress_iou: Option<f64>,
}

impl FrameEffectPipeline {
    /// Build a pipeline over a fully loaded sheet.
    pub fn new(sheet: Arc<SpriteSheet>, cfg: &EffectConfig) -> Self {
        Self {
            sheet,
            filter: cfg.resize_filter,
            suppress_iou: cfg.suppress_overlap_iou,
        }
    }

    /// The sheet sprites are drawn from.
    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    /// Replace every face in `frame` with its sprite.
    pub fn process(
        &self,
        frame: &mut image::RgbImage,
        faces: &[FaceRect],
        session: &SessionSnapshot,
    ) -> FrameStats {
        self.process_with_overrides(frame, faces, session, None)
    }

    /// Like [`Self::process`], with an explicit sprite per face for the first faces.
    ///
    /// Placements are applied in detector order, so later faces draw over earlier ones. A face
    /// that cannot be resized or pasted is dropped without affecting the others.
    #[tracing::instrument(level = "debug", skip_all, fields(faces = faces.len()))]
    pub fn process_with_overrides(
        &self,
        frame: &mut image::RgbImage,
        faces: &[FaceRect],
        session: &SessionSnapshot,
        overrides: Option<&[usize]>,
    ) -> FrameStats {
        let mut stats = FrameStats {
            faces: faces.len(),
            ..FrameStats::default()
        };

        let filtered;
        let faces = match self.suppress_iou {
            Some(iou) => {
                filtered = suppress_overlapping(faces, iou);
                stats.suppressed = faces.len() - filtered.len();
                filtered.as_slice()
            }
            None => faces,
        };

        if session.debug_overlay {
            draw_debug_overlay(frame, faces);
        }

        let params = PlacementParams {
            sprite_count: self.sheet.len(),
            cursor_offset: session.cursor_offset,
            scale_factor: session.scale_factor,
            overrides,
        };
        let plan = compute_placements(faces, &params);
        stats.placements = plan.placements.len();
        stats.skipped = plan.skipped.len();

        let (fw, fh) = frame.dimensions();
        for p in &plan.placements {
            // Reject before resizing: the destination size is unbounded by the frame.
            if !fits_inside(p.x, p.y, p.width, p.height, fw, fh) {
                tracing::debug!(
                    face_index = p.face_index,
                    x = p.x,
                    y = p.y,
                    w = p.width,
                    h = p.height,
                    "sprite crosses frame edge, skipped"
                );
                stats.clip_rejected += 1;
                continue;
            }
            let Some(sprite) = self.sheet.get(p.sprite_index) else {
                stats.failed += 1;
                continue;
            };
            let resized = match resize_sprite(sprite.image(), p.width, p.height, self.filter) {
                Ok(img) => img,
                Err(err) => {
                    tracing::debug!(face_index = p.face_index, %err, "resize failed");
                    stats.failed += 1;
                    continue;
                }
            };
            match paste(frame, &resized, p.x, p.y) {
                PasteOutcome::Applied => stats.applied += 1,
                PasteOutcome::ClipRejected => stats.clip_rejected += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
