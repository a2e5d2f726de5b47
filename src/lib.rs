//! Catface replaces every face in a video frame with a cat head cut from a sprite sheet.
//!
//! # Pipeline overview
//!
//! 1. **Load** (once per session): decode the sheet, slice it into cells, key the near-white
//!    background to transparent -> [`SpriteSheet`]
//! 2. **Place** (per frame): map each detection to a sprite and a scaled, centred destination
//!    rectangle -> [`PlacementPlan`]
//! 3. **Composite** (per placement): resize the sprite and alpha-blend it into the frame, or
//!    reject it whole if it would cross a frame edge -> [`PasteOutcome`]
//!
//! [`FrameEffectPipeline`] runs steps 2 and 3 for one frame. [`FrameLoop`] drives capture,
//! detection, compositing and presentation over a stream, applying [`Command`]s between frames.
//! Camera capture and face detection stay behind the [`FrameSource`] and [`FaceDetector`]
//! traits.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO per frame**: all decoding happens when the sheet is loaded; a failed sheet load
//!   ends the session before the first frame.
//! - **Per-face isolation**: a face that cannot be placed, resized or pasted is skipped without
//!   affecting the rest of the frame.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod detect;
mod effects;
mod foundation;
mod placement;
mod render;
mod session;

pub use assets::decode::{decode_image, load_image_file};
pub use assets::key::{apply_key, is_background, saturation_value};
pub use assets::sheet::{CellRect, cell_rect, slice_sheet};
pub use assets::store::{Sprite, SpriteSheet, load_sprite_sheet};
pub use config::{EffectConfig, InfoPanel, KeyThresholds, ResizeFilter, ScaleLimits, SheetLayout};
pub use detect::{
    DEFAULT_CASCADE_NAME, FaceDetector, FrameSource, MemoryFrameSource, StaticDetector,
    default_cascade_search_paths, locate_cascade,
};
pub use effects::composite::{PasteOutcome, StraightRgba8, fits_inside, over, paste};
pub use effects::overlay::{
    DEBUG_BOX_THICKNESS, DEBUG_DOT_RADIUS, draw_debug_overlay, draw_filled_circle,
    draw_rect_outline,
};
pub use effects::panel::{PanelReadout, dim_info_panel};
pub use effects::resize::resize_sprite;
pub use foundation::core::{FaceRect, Rgb8, largest_face};
pub use foundation::error::{CASCADE_DOWNLOAD_URL, CatfaceError, CatfaceResult};
pub use placement::policy::{
    Placement, PlacementParams, PlacementPlan, SkipReason, compute_placements, scaled_rect,
    sprite_for_face, suppress_overlapping,
};
pub use render::frame_loop::{FrameLoop, FrameOutcome, FrameSink, LoopStats};
pub use render::pipeline::{FrameEffectPipeline, FrameStats};
pub use render::snapshot::SnapshotWriter;
pub use session::state::{
    Command, CommandOutcome, ScaleStep, SessionSnapshot, SessionState, SharedSession,
};
