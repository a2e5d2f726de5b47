use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    config::{EffectConfig, ScaleLimits},
    foundation::error::{CatfaceError, CatfaceResult},
};

/// Direction of a single scale step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleStep {
    /// Grow sprites by one step.
    Up,
    /// Shrink sprites by one step.
    Down,
}

/// Discrete user command, applied between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Rotate sprite assignment by one.
    AdvanceSet,
    /// Change scale by one configured step.
    StepScale(ScaleStep),
    /// Set an absolute scale.
    SetScale(f64),
    /// Show or hide detection boxes.
    ToggleDebug,
    /// Save the next composited frame.
    SaveFrame,
}

/// What a command changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandOutcome {
    /// New cursor offset.
    SetAdvanced(usize),
    /// New scale factor.
    ScaleChanged(f64),
    /// Scale request outside the range; the scale is unchanged.
    ScaleRejected(f64),
    /// New debug overlay state.
    DebugToggled(bool),
    /// The caller should save the current frame.
    SaveRequested,
}

/// Consistent copy of the values a frame reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSnapshot {
    /// Rotation of sprite assignment, `< sprite_count`.
    pub cursor_offset: usize,
    /// Sprite scale relative to the face.
    pub scale_factor: f64,
    /// Whether detection boxes are drawn.
    pub debug_overlay: bool,
}

/// Mutable per-session settings. Written by command handling, read by the frame pipeline.
#[derive(Clone, Debug)]
pub struct SessionState {
    cursor_offset: usize,
    scale_factor: f64,
    debug_overlay: bool,
    sprite_count: usize,
    limits: ScaleLimits,
}

impl SessionState {
    /// Fresh session for a sheet of `sprite_count` sprites.
    pub fn new(sprite_count: usize, cfg: &EffectConfig) -> CatfaceResult<Self> {
        if sprite_count == 0 {
            return Err(CatfaceError::validation("session needs at least one sprite"));
        }
        cfg.scale.validate()?;
        Ok(Self {
            cursor_offset: 0,
            scale_factor: cfg.scale.initial,
            debug_overlay: cfg.debug_overlay,
            sprite_count,
            limits: cfg.scale,
        })
    }

    /// Current cursor offset.
    pub fn cursor_offset(&self) -> usize {
        self.cursor_offset
    }

    /// Current scale factor.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Current debug overlay state.
    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    /// Copy out the per-frame view.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cursor_offset: self.cursor_offset,
            scale_factor: self.scale_factor,
            debug_overlay: self.debug_overlay,
        }
    }

    /// Move to the next sprite set, wrapping after `sprite_count` steps.
    pub fn advance_set(&mut self) -> usize {
        self.cursor_offset = (self.cursor_offset + 1) % self.sprite_count;
        tracing::info!(cursor_offset = self.cursor_offset, "sprite set changed");
        self.cursor_offset
    }

    /// Set the scale if it lies in the configured range; otherwise keep the old value.
    pub fn set_scale(&mut self, scale: f64) -> CatfaceResult<f64> {
        if !self.limits.contains(scale) {
            tracing::warn!(
                requested = scale,
                min = self.limits.min,
                max = self.limits.max,
                "scale out of range"
            );
            return Err(CatfaceError::ScaleRejected {
                requested: scale,
                min: self.limits.min,
                max: self.limits.max,
            });
        }
        self.scale_factor = scale;
        tracing::info!(scale_factor = scale, "scale changed");
        Ok(scale)
    }

    /// Change the scale by one step. The result is snapped to hundredths so that repeated
    /// steps land exactly on the range ends.
    pub fn step_scale(&mut self, dir: ScaleStep) -> CatfaceResult<f64> {
        let delta = match dir {
            ScaleStep::Up => self.limits.step,
            ScaleStep::Down => -self.limits.step,
        };
        let next = ((self.scale_factor + delta) * 100.0).round() / 100.0;
        self.set_scale(next)
    }

    /// Flip the debug overlay.
    pub fn toggle_debug(&mut self) -> bool {
        self.debug_overlay = !self.debug_overlay;
        self.debug_overlay
    }

    /// Apply one command atomically.
    pub fn apply(&mut self, cmd: Command) -> CommandOutcome {
        match cmd {
            Command::AdvanceSet => CommandOutcome::SetAdvanced(self.advance_set()),
            Command::StepScale(dir) => {
                let r = self.step_scale(dir);
                scale_result_of(r, self.scale_factor)
            }
            Command::SetScale(v) => {
                let r = self.set_scale(v);
                scale_result_of(r, self.scale_factor)
            }
            Command::ToggleDebug => CommandOutcome::DebugToggled(self.toggle_debug()),
            Command::SaveFrame => CommandOutcome::SaveRequested,
        }
    }
}

fn scale_result_of(r: CatfaceResult<f64>, current: f64) -> CommandOutcome {
    match r {
        Ok(v) => CommandOutcome::ScaleChanged(v),
        Err(_) => CommandOutcome::ScaleRejected(current),
    }
}

/// Cloneable handle for sharing one [`SessionState`] between a command thread and the frame loop.
#[derive(Clone, Debug)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionState>>,
}

impl SharedSession {
    /// Wrap a session.
    pub fn new(state: SessionState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Apply a command under the lock.
    ///
    /// [`CommandOutcome::SaveRequested`] is only reported; send [`Command::SaveFrame`] through a
    /// frame loop's command channel to have the frame written.
    pub fn apply(&self, cmd: Command) -> CommandOutcome {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(cmd)
    }

    /// Take a consistent per-frame snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
