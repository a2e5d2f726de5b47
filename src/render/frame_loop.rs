use std::{
    sync::mpsc::Receiver,
    time::{Duration, Instant},
};

use crate::{
    config::InfoPanel,
    detect::{FaceDetector, FrameSource},
    effects::panel::{PanelReadout, dim_info_panel},
    foundation::error::{CatfaceError, CatfaceResult},
    render::{
        pipeline::{FrameEffectPipeline, FrameStats},
        snapshot::SnapshotWriter,
    },
    session::state::{Command, CommandOutcome, SharedSession},
};

/// Receiver of composited frames (a window, an encoder, a test buffer).
pub trait FrameSink {
    /// Consume one finished frame.
    fn present(&mut self, frame: &image::RgbImage, stats: &FrameStats) -> CatfaceResult<()>;
}

impl<F> FrameSink for F
where
    F: FnMut(&image::RgbImage, &FrameStats) -> CatfaceResult<()>,
{
    fn present(&mut self, frame: &image::RgbImage, stats: &FrameStats) -> CatfaceResult<()> {
        self(frame, stats)
    }
}

/// Result of one loop iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A frame was processed and presented.
    Rendered(FrameStats),
    /// The source has no more frames.
    EndOfStream,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Totals for a whole [`FrameLoop::run`].
pub struct LoopStats {
    /// Frames presented.
    pub frames: u64,
    /// Frames abandoned after a capture or detection failure.
    pub dropped: u64,
    /// Sprites blended across all frames.
    pub applied: u64,
    /// Stills written by the save command.
    pub snapshots: u64,
    /// Wall time spent in [`FrameLoop::run`].
    pub elapsed: Duration,
}

impl LoopStats {
    /// Presented frames per second; zero before any time has passed.
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }
}

/// Capture, detect, composite, present; one frame at a time.
///
/// Commands queued on the channel are applied only between frames, so every frame sees one
/// consistent session snapshot.
pub struct FrameLoop {
    pipeline: FrameEffectPipeline,
    session: SharedSession,
    commands: Option<Receiver<Command>>,
    snapshots: SnapshotWriter,
    pending_save: bool,
    info_panel: Option<InfoPanel>,
    last_readout: Option<PanelReadout>,
}

impl FrameLoop {
    /// Build a loop; commands can be applied directly through `session`.
    pub fn new(
        pipeline: FrameEffectPipeline,
        session: SharedSession,
        snapshots: SnapshotWriter,
    ) -> Self {
        Self {
            pipeline,
            session,
            commands: None,
            snapshots,
            pending_save: false,
            info_panel: None,
            last_readout: None,
        }
    }

    /// Dim a status band at the top of every presented frame.
    pub fn with_info_panel(mut self, panel: InfoPanel) -> Self {
        self.info_panel = Some(panel);
        self
    }

    /// Status values of the last presented frame, for sinks that draw the panel text.
    pub fn last_readout(&self) -> Option<PanelReadout> {
        self.last_readout
    }

    /// Also drain `rx` before every frame.
    pub fn with_commands(mut self, rx: Receiver<Command>) -> Self {
        self.commands = Some(rx);
        self
    }

    /// Shared session handle.
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Ask for the next composited frame to be saved.
    pub fn request_save(&mut self) {
        self.pending_save = true;
    }

    fn drain_commands(&mut self) {
        let Some(rx) = &self.commands else {
            return;
        };
        for cmd in rx.try_iter() {
            if self.session.apply(cmd) == CommandOutcome::SaveRequested {
                self.pending_save = true;
            }
        }
    }

    /// Run one iteration.
    ///
    /// Capture and detection failures are returned as [`CatfaceError::Capture`]; the caller
    /// decides whether to skip the frame or stop.
    pub fn run_frame(
        &mut self,
        source: &mut dyn FrameSource,
        detector: &mut dyn FaceDetector,
        sink: &mut dyn FrameSink,
    ) -> CatfaceResult<FrameOutcome> {
        self.drain_commands();
        let snapshot = self.session.snapshot();

        let Some(mut frame) = source.next_frame().map_err(as_capture)? else {
            return Ok(FrameOutcome::EndOfStream);
        };
        let faces = detector.detect(&frame).map_err(as_capture)?;
        let stats = self.pipeline.process(&mut frame, &faces, &snapshot);
        if let Some(panel) = &self.info_panel {
            dim_info_panel(&mut frame, panel);
        }
        self.last_readout = Some(PanelReadout {
            faces: stats.faces,
            cat_set: snapshot.cursor_offset,
            scale_factor: snapshot.scale_factor,
            debug: snapshot.debug_overlay,
        });

        if std::mem::take(&mut self.pending_save)
            && let Err(err) = self.snapshots.save(&frame)
        {
            tracing::warn!(%err, "could not save frame");
        }

        sink.present(&frame, &stats)?;
        Ok(FrameOutcome::Rendered(stats))
    }

    /// Iterate until the source ends, skipping frames whose capture or detection fails.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        detector: &mut dyn FaceDetector,
        sink: &mut dyn FrameSink,
    ) -> CatfaceResult<LoopStats> {
        let mut totals = LoopStats::default();
        let started = Instant::now();
        let saved_before = self.snapshots.saved();
        loop {
            match self.run_frame(source, detector, sink) {
                Ok(FrameOutcome::EndOfStream) => break,
                Ok(FrameOutcome::Rendered(stats)) => {
                    totals.frames += 1;
                    totals.applied += stats.applied as u64;
                }
                Err(CatfaceError::Capture(msg)) => {
                    tracing::warn!(%msg, "frame dropped");
                    totals.dropped += 1;
                }
                Err(err) => return Err(err),
            }
        }
        totals.snapshots = u64::from(self.snapshots.saved() - saved_before);
        totals.elapsed = started.elapsed();
        tracing::info!(
            frames = totals.frames,
            dropped = totals.dropped,
            snapshots = totals.snapshots,
            fps = totals.fps(),
            "frame loop finished"
        );
        Ok(totals)
    }
}

fn as_capture(err: CatfaceError) -> CatfaceError {
    match err {
        CatfaceError::Capture(_) => err,
        other => CatfaceError::capture(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame_loop.rs"]
mod tests;
