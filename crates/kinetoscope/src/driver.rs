//! Frame drivers: per-frame updates of scene lines.
//!
//! A driver owns the sampled data and the handles of the lines it may
//! rewrite. Each call to [`FrameDriver::render`] fully replaces the data of
//! those lines; nothing carries over from the previous frame.

use kinematics::{LissajousSampler, TrajectorySet};
use scene::{LineHandle, Scene};
use tracing::trace;

/// Updates scene lines for a frame index.
pub trait FrameDriver {
    /// Frames in one pass of the animation.
    fn frame_count(&self) -> usize;

    /// Rewrites the driven lines for `frame`.
    fn render(&mut self, scene: &mut Scene, frame: usize);
}

/// Reveals each trajectory progressively: frame `f` shows its first `f`
/// samples, so frame 0 shows nothing.
#[derive(Debug, Clone)]
pub struct BallisticDriver {
    trajectories: TrajectorySet,
    lines: Vec<LineHandle>,
    frames: usize,
}

impl BallisticDriver {
    /// Pairs trajectories with lines in order.
    ///
    /// Extra trajectories or lines on either side are left alone.
    pub fn new(trajectories: TrajectorySet, lines: Vec<LineHandle>, frames: usize) -> Self {
        Self {
            trajectories,
            lines,
            frames,
        }
    }

    /// The sampled trajectories.
    pub const fn trajectories(&self) -> &TrajectorySet {
        &self.trajectories
    }
}

impl FrameDriver for BallisticDriver {
    fn frame_count(&self) -> usize {
        self.frames
    }

    fn render(&mut self, scene: &mut Scene, frame: usize) {
        for (trajectory, &line) in self.trajectories.iter().zip(&self.lines) {
            let (xs, ys) = trajectory.prefix(frame);
            scene.set_data(line, xs, ys);
        }
        trace!(frame, "revealed trajectory prefixes");
    }
}

/// Redraws the whole curve each frame with the y phase advanced by
/// `2π·f/F`.
#[derive(Debug, Clone)]
pub struct LissajousDriver {
    sampler: LissajousSampler,
    line: LineHandle,
    y: Vec<f64>,
}

impl LissajousDriver {
    pub fn new(sampler: LissajousSampler, line: LineHandle) -> Self {
        let y = Vec::with_capacity(sampler.x().len());
        Self { sampler, line, y }
    }

    pub const fn sampler(&self) -> &LissajousSampler {
        &self.sampler
    }
}

impl FrameDriver for LissajousDriver {
    fn frame_count(&self) -> usize {
        self.sampler.frames()
    }

    fn render(&mut self, scene: &mut Scene, frame: usize) {
        self.sampler.y_into(frame, &mut self.y);
        scene.set_data(self.line, self.sampler.x(), &self.y);
        trace!(frame, phase = self.sampler.phase_offset(frame), "rotated phase");
    }
}
