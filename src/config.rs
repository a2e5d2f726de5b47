use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{CatfaceError, CatfaceResult};

/// Grid calibration for a packed sprite sheet.
///
/// Boundaries are expressed in *nominal* sheet pixels and rescaled to the decoded sheet size
/// at load time. Row boundaries are ragged because the artwork does not fill each cell evenly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetLayout {
    /// Logical grid rows.
    pub rows: u32,
    /// Logical grid columns.
    pub cols: u32,
    /// Number of cells to extract (`<= rows * cols`).
    pub count: u32,
    /// Width the boundaries were calibrated against.
    pub nominal_width: u32,
    /// Height the boundaries were calibrated against.
    pub nominal_height: u32,
    /// Vertical cut positions, `rows + 1` strictly increasing values.
    pub row_bounds: Vec<u32>,
    /// Horizontal cut positions, `cols + 1` strictly increasing values.
    pub col_bounds: Vec<u32>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        let h = 997u32;
        let w = 1000u32;
        Self {
            rows: 4,
            cols: 4,
            count: 16,
            nominal_width: w,
            nominal_height: h,
            // 0, H/4-60, H/2-60, 3H/4-80, H
            row_bounds: vec![0, h / 4 - 60, h / 2 - 60, 3 * h / 4 - 80, h],
            col_bounds: vec![0, w / 4, w / 2, 3 * w / 4, w],
        }
    }
}

impl SheetLayout {
    /// Evenly divided grid, handy for synthetic sheets.
    pub fn uniform(rows: u32, cols: u32, width: u32, height: u32) -> Self {
        Self {
            rows,
            cols,
            count: rows.saturating_mul(cols),
            nominal_width: width,
            nominal_height: height,
            row_bounds: (0..=rows)
                .map(|r| (u64::from(height) * u64::from(r) / u64::from(rows.max(1))) as u32)
                .collect(),
            col_bounds: (0..=cols)
                .map(|c| (u64::from(width) * u64::from(c) / u64::from(cols.max(1))) as u32)
                .collect(),
        }
    }

    /// Check grid shape and boundary monotonicity.
    pub fn validate(&self) -> CatfaceResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(CatfaceError::validation("sheet grid must have rows and cols > 0"));
        }
        if self.count == 0 || self.count > self.rows.saturating_mul(self.cols) {
            return Err(CatfaceError::validation(format!(
                "sheet count {} must be in 1..={}",
                self.count,
                self.rows.saturating_mul(self.cols)
            )));
        }
        if self.nominal_width == 0 || self.nominal_height == 0 {
            return Err(CatfaceError::validation("sheet nominal size must be non-zero"));
        }
        check_bounds("row_bounds", &self.row_bounds, self.rows, self.nominal_height)?;
        check_bounds("col_bounds", &self.col_bounds, self.cols, self.nominal_width)?;
        Ok(())
    }
}

fn check_bounds(name: &str, bounds: &[u32], cells: u32, extent: u32) -> CatfaceResult<()> {
    if bounds.len() != cells as usize + 1 {
        return Err(CatfaceError::validation(format!(
            "{name} must have {} entries, got {}",
            cells + 1,
            bounds.len()
        )));
    }
    if bounds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(CatfaceError::validation(format!(
            "{name} must be strictly increasing"
        )));
    }
    if bounds.last().copied().unwrap_or(0) > extent {
        return Err(CatfaceError::validation(format!(
            "{name} exceed nominal extent {extent}"
        )));
    }
    Ok(())
}

/// Background classification thresholds on the 0-255 HSV scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyThresholds {
    /// Pixels with saturation strictly below this are candidates.
    pub max_saturation: u8,
    /// Pixels with brightness strictly above this are candidates.
    pub min_value: u8,
}

impl Default for KeyThresholds {
    fn default() -> Self {
        Self {
            max_saturation: 25,
            min_value: 180,
        }
    }
}

/// Accepted scale range and the step used by `+`/`-` commands.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleLimits {
    /// Scale at session start.
    pub initial: f64,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Increment for a single step command.
    pub step: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            initial: 1.3,
            min: 0.5,
            max: 3.0,
            step: 0.1,
        }
    }
}

impl ScaleLimits {
    /// `true` when `v` lies inside `[min, max]`.
    pub fn contains(&self, v: f64) -> bool {
        v.is_finite() && v >= self.min && v <= self.max
    }

    /// Check that the range is well formed and holds `initial`.
    pub fn validate(&self) -> CatfaceResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max)
        {
            return Err(CatfaceError::validation(
                "scale limits must satisfy 0 < min <= max",
            ));
        }
        if !self.contains(self.initial) {
            return Err(CatfaceError::validation(format!(
                "initial scale {} outside {}-{}",
                self.initial, self.min, self.max
            )));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(CatfaceError::validation("scale step must be > 0"));
        }
        Ok(())
    }
}

/// Interpolation used when fitting a sprite to a face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Coverage-weighted box average.
    #[default]
    Area,
    /// Nearest neighbour.
    Nearest,
}

/// Dimmed band across the top of each presented frame, behind the status readout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InfoPanel {
    /// Band height in pixels, clipped to the frame.
    pub height: u32,
    /// Weight of black over the band, `0.0` (no change) to `1.0` (black).
    pub shade: f64,
}

impl Default for InfoPanel {
    fn default() -> Self {
        Self {
            height: 180,
            shade: 0.6,
        }
    }
}

impl InfoPanel {
    /// Check the shade weight.
    pub fn validate(&self) -> CatfaceResult<()> {
        if !(self.shade.is_finite() && (0.0..=1.0).contains(&self.shade)) {
            return Err(CatfaceError::validation("info panel shade must be in [0, 1]"));
        }
        Ok(())
    }
}

/// Complete effect configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectConfig {
    /// Sprite sheet calibration.
    pub sheet: SheetLayout,
    /// Background keying thresholds.
    pub key: KeyThresholds,
    /// Scale range and step.
    pub scale: ScaleLimits,
    /// Sprite resize interpolation.
    pub resize_filter: ResizeFilter,
    /// Drop later detections overlapping an earlier one above this IoU. Off when `None`.
    pub suppress_overlap_iou: Option<f64>,
    /// Directory used by the save-frame command.
    pub snapshot_dir: PathBuf,
    /// Initial state of the debug overlay.
    pub debug_overlay: bool,
    /// Status band for the live loop. Off when `None`.
    pub info_panel: Option<InfoPanel>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            sheet: SheetLayout::default(),
            key: KeyThresholds::default(),
            scale: ScaleLimits::default(),
            resize_filter: ResizeFilter::default(),
            suppress_overlap_iou: None,
            snapshot_dir: PathBuf::from("outputs"),
            debug_overlay: false,
            info_panel: None,
        }
    }
}

impl EffectConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> CatfaceResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse effect config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> CatfaceResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read effect config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check every section.
    pub fn validate(&self) -> CatfaceResult<()> {
        self.sheet.validate()?;
        self.scale.validate()?;
        if let Some(panel) = &self.info_panel {
            panel.validate()?;
        }
        if let Some(iou) = self.suppress_overlap_iou
            && !(iou.is_finite() && iou > 0.0 && iou <= 1.0)
        {
            return Err(CatfaceError::validation(
                "suppress_overlap_iou must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
