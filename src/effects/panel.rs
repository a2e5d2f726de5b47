use image::RgbImage;

use crate::{
    config::InfoPanel,
    foundation::math::{blend_channel, round_u8},
};

/// Blend black over the top `panel.height` rows: `out = (1 - shade) * in`.
///
/// Rows past the frame are ignored. Applied after compositing, so stills saved from the loop
/// carry the band too.
pub fn dim_info_panel(frame: &mut RgbImage, panel: &InfoPanel) {
    let alpha = round_u8(panel.shade.clamp(0.0, 1.0) * 255.0);
    if alpha == 0 {
        return;
    }
    let rows = panel.height.min(frame.height()) as usize;
    for row in frame.rows_mut().take(rows) {
        for px in row {
            for c in px.0.iter_mut() {
                *c = blend_channel(0, *c, alpha);
            }
        }
    }
}

/// Status values shown over the panel for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelReadout {
    /// Detections in the frame.
    pub faces: usize,
    /// Current sprite set (cursor offset).
    pub cat_set: usize,
    /// Current scale factor.
    pub scale_factor: f64,
    /// Whether the debug overlay is on.
    pub debug: bool,
}

impl PanelReadout {
    /// Text lines in display order.
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![
            format!("Faces Detected: {}", self.faces),
            format!("Cat Set: {}", self.cat_set),
            format!("Scale: {:.1}x", self.scale_factor),
        ];
        if self.debug {
            out.push("DEBUG MODE - RED BOXES".to_string());
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/panel.rs"]
mod tests;
