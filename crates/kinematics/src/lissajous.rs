//! Phase-rotating Lissajous figures.
//!
//! The x curve is fixed for the whole animation; the y curve is shifted by a
//! phase offset that advances by `2π / frames` per frame:
//!
//! ```text
//! x(θ)    = A · cos(fx · θ)
//! y(θ, f) = A · sin(fy · θ − 2π · f / F)
//! ```
//!
//! After `F` frames the offset has completed exactly one revolution, so frame
//! `F` draws the same curve as frame `0` and playback loops without a seam.

use std::f64::consts::TAU;

use crate::grid::linspace;

/// Amplitude and frequencies of a Lissajous figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lissajous {
    amplitude: f64,
    freq_x: f64,
    freq_y: f64,
}

impl Lissajous {
    /// Creates a curve with amplitude `A` and frequencies `fx`, `fy`.
    #[inline]
    pub const fn new(amplitude: f64, freq_x: f64, freq_y: f64) -> Self {
        Self {
            amplitude,
            freq_x,
            freq_y,
        }
    }

    /// Amplitude shared by both axes.
    #[inline]
    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Frequency along x.
    #[inline]
    pub const fn freq_x(&self) -> f64 {
        self.freq_x
    }

    /// Frequency along y.
    #[inline]
    pub const fn freq_y(&self) -> f64 {
        self.freq_y
    }

    /// x at phase angle `theta`.
    #[inline]
    pub fn x(&self, theta: f64) -> f64 {
        self.amplitude * (self.freq_x * theta).cos()
    }

    /// y at phase angle `theta` with the given phase offset (radians).
    #[inline]
    pub fn y(&self, theta: f64, phase_offset: f64) -> f64 {
        self.amplitude * (self.freq_y * theta - phase_offset).sin()
    }
}

/// Precomputed phase grid and x curve, with per-frame y sampling.
///
/// # Example
///
/// ```rust
/// use kinematics::{Lissajous, LissajousSampler};
///
/// let sampler = LissajousSampler::new(Lissajous::new(1.5, 3.0, 5.0), 2000, 480);
/// let mut y = Vec::new();
///
/// for frame in 0..sampler.frames() {
///     sampler.y_into(frame, &mut y);
///     assert_eq!(y.len(), sampler.x().len());
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LissajousSampler {
    curve: Lissajous,
    theta: Vec<f64>,
    x: Vec<f64>,
    frames: usize,
}

impl LissajousSampler {
    /// Samples `points` phase angles over `[0, 2π]` for an animation of
    /// `frames` frames.
    ///
    /// A frame count of zero is treated as one so the phase step stays finite.
    pub fn new(curve: Lissajous, points: usize, frames: usize) -> Self {
        let theta = linspace(0.0, TAU, points);
        let x = theta.iter().map(|&t| curve.x(t)).collect();
        Self {
            curve,
            theta,
            x,
            frames: frames.max(1),
        }
    }

    /// The curve parameters.
    #[inline]
    pub const fn curve(&self) -> &Lissajous {
        &self.curve
    }

    /// Phase angles, `points` values over `[0, 2π]`.
    #[inline]
    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    /// The time-invariant x curve.
    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Frames per full phase revolution.
    #[inline]
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// Phase offset applied at `frame`: `2π · frame / frames`.
    #[inline]
    pub fn phase_offset(&self, frame: usize) -> f64 {
        TAU * frame as f64 / self.frames as f64
    }

    /// The y curve at `frame`.
    pub fn y(&self, frame: usize) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.theta.len());
        self.y_into(frame, &mut out);
        out
    }

    /// Writes the y curve at `frame` into `out`, replacing its contents.
    pub fn y_into(&self, frame: usize, out: &mut Vec<f64>) {
        let offset = self.phase_offset(frame);
        out.clear();
        out.extend(self.theta.iter().map(|&t| self.curve.y(t, offset)));
    }
}
