#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]

//! # Kinematics
//!
//! Closed-form samplers for 2D animations.
//!
//! Kinematics provides:
//! - **Time grids**: uniformly spaced sample points, both ends included
//! - **Ballistic**: drag-free projectile trajectories for a set of launch angles
//! - **Lissajous**: a fixed x curve and a phase-rotating y curve that loops
//!   after a given number of frames
//!
//! Every sampler is a pure function of its inputs: the same parameters always
//! produce bit-identical arrays.
//!
//! ## Ballistic Example
//!
//! ```rust
//! use kinematics::{angle_series, Ballistic, TrajectorySet, STANDARD_GRAVITY};
//!
//! let ballistic = Ballistic::new(20.0, STANDARD_GRAVITY);
//! let angles = angle_series(0.0, 15.0, 6);
//! let set = TrajectorySet::sample(&ballistic, &angles, 4.5, 300);
//!
//! assert_eq!(set.len(), 6);
//! assert_eq!(set.times().len(), 300);
//! ```
//!
//! ## Lissajous Example
//!
//! ```rust
//! use kinematics::{Lissajous, LissajousSampler};
//!
//! let sampler = LissajousSampler::new(Lissajous::new(1.5, 3.0, 5.0), 2000, 480);
//!
//! // The phase offset completes one revolution over the frame count
//! let first = sampler.y(0);
//! let wrapped = sampler.y(480);
//! assert!(first.iter().zip(&wrapped).all(|(a, b)| (a - b).abs() < 1e-9));
//! ```

mod ballistic;
mod grid;
mod lissajous;

pub use ballistic::{
    angle_series, trajectory_x, trajectory_y, Ballistic, Trajectory, TrajectorySet,
    STANDARD_GRAVITY,
};
pub use grid::linspace;
pub use lissajous::{Lissajous, LissajousSampler};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::ballistic::{
        angle_series, Ballistic, Trajectory, TrajectorySet, STANDARD_GRAVITY,
    };
    pub use crate::grid::linspace;
    pub use crate::lissajous::{Lissajous, LissajousSampler};
}
