//! Drag-free projectile trajectories.
//!
//! Positions are closed-form functions of time, so every sample is computed
//! directly instead of being integrated frame by frame:
//!
//! ```text
//! x(t) = v0 · cos(α) · t
//! y(t) = v0 · sin(α) · t − ½ · g · t²
//! ```
//!
//! The coordinate system is the traditional one: origin at the launch point,
//! y increasing upward, gravity pulling toward negative y.
//!
//! # Example
//!
//! ```rust
//! use kinematics::{Ballistic, STANDARD_GRAVITY};
//!
//! let ballistic = Ballistic::new(20.0, STANDARD_GRAVITY);
//! let times = kinematics::linspace(0.0, 4.5, 300);
//! let trajectory = ballistic.sample(45.0, &times);
//!
//! assert_eq!(trajectory.len(), 300);
//! ```

use crate::grid::linspace;

/// Standard gravity near the Earth's surface, in N/kg.
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Horizontal position at `time` for a launch at `angle_radians`.
#[inline]
pub fn trajectory_x(time: f64, initial_speed: f64, angle_radians: f64) -> f64 {
    initial_speed * angle_radians.cos() * time
}

/// Vertical position at `time` for a launch at `angle_radians` under `gravity`.
#[inline]
pub fn trajectory_y(time: f64, initial_speed: f64, angle_radians: f64, gravity: f64) -> f64 {
    initial_speed * angle_radians.sin() * time - 0.5 * gravity * time * time
}

/// Returns `count` launch angles (degrees) forming an arithmetic progression.
///
/// ```rust
/// use kinematics::angle_series;
///
/// assert_eq!(angle_series(0.0, 15.0, 6), vec![0.0, 15.0, 30.0, 45.0, 60.0, 75.0]);
/// ```
pub fn angle_series(start_degrees: f64, step_degrees: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| start_degrees + i as f64 * step_degrees)
        .collect()
}

/// Launch parameters shared by every trajectory of a set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistic {
    initial_speed: f64,
    gravity: f64,
}

impl Ballistic {
    /// Creates a launcher with the given muzzle speed (m/s) and gravity (N/kg).
    #[inline]
    pub const fn new(initial_speed: f64, gravity: f64) -> Self {
        Self {
            initial_speed,
            gravity,
        }
    }

    /// Returns the initial speed.
    #[inline]
    pub const fn initial_speed(&self) -> f64 {
        self.initial_speed
    }

    /// Returns the gravitational constant.
    #[inline]
    pub const fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Position at `time` for a launch at `angle_degrees`.
    #[inline]
    pub fn position(&self, angle_degrees: f64, time: f64) -> (f64, f64) {
        let angle = angle_degrees.to_radians();
        (
            trajectory_x(time, self.initial_speed, angle),
            trajectory_y(time, self.initial_speed, angle, self.gravity),
        )
    }

    /// Samples one trajectory over the given time grid.
    pub fn sample(&self, angle_degrees: f64, times: &[f64]) -> Trajectory {
        let angle = angle_degrees.to_radians();
        let x = times
            .iter()
            .map(|&t| trajectory_x(t, self.initial_speed, angle))
            .collect();
        let y = times
            .iter()
            .map(|&t| trajectory_y(t, self.initial_speed, angle, self.gravity))
            .collect();
        Trajectory {
            angle_degrees,
            x,
            y,
        }
    }

    /// Time at which the projectile reaches its highest point.
    ///
    /// Returns `None` without gravity, where there is no apex.
    pub fn apex_time(&self, angle_degrees: f64) -> Option<f64> {
        if self.gravity == 0.0 {
            return None;
        }
        Some(self.initial_speed * angle_degrees.to_radians().sin() / self.gravity)
    }

    /// Time until the projectile returns to launch height.
    pub fn time_of_flight(&self, angle_degrees: f64) -> Option<f64> {
        self.apex_time(angle_degrees).map(|t| 2.0 * t)
    }

    /// Horizontal distance covered when back at launch height.
    pub fn range(&self, angle_degrees: f64) -> Option<f64> {
        let angle = angle_degrees.to_radians();
        self.time_of_flight(angle_degrees)
            .map(|t| trajectory_x(t, self.initial_speed, angle))
    }
}

/// Sampled positions of one projectile, index-aligned with its time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    angle_degrees: f64,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Trajectory {
    /// Launch angle in degrees.
    #[inline]
    pub const fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    /// Horizontal positions.
    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Vertical positions.
    #[inline]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if the trajectory holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// First `count` samples, clamped to the trajectory length.
    pub fn prefix(&self, count: usize) -> (&[f64], &[f64]) {
        let n = count.min(self.len());
        (&self.x[..n], &self.y[..n])
    }

    /// Index of the highest sample (the first one on ties).
    pub fn apex_index(&self) -> Option<usize> {
        self.y
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &y)| match best {
                Some((_, top)) if top >= y => best,
                _ => Some((i, y)),
            })
            .map(|(i, _)| i)
    }
}

/// Trajectories for several launch angles sharing one time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySet {
    times: Vec<f64>,
    trajectories: Vec<Trajectory>,
}

impl TrajectorySet {
    /// Samples every angle over `points` instants spanning `[0, duration]`.
    pub fn sample(ballistic: &Ballistic, angles_degrees: &[f64], duration: f64, points: usize) -> Self {
        let times = linspace(0.0, duration, points);
        let trajectories = angles_degrees
            .iter()
            .map(|&angle| ballistic.sample(angle, &times))
            .collect();
        Self {
            times,
            trajectories,
        }
    }

    /// The shared time grid.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of trajectories.
    #[inline]
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    /// Returns true if there are no trajectories.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Trajectory at `index`, in angle order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Trajectory> {
        self.trajectories.get(index)
    }

    /// Iterates over the trajectories in angle order.
    pub fn iter(&self) -> std::slice::Iter<'_, Trajectory> {
        self.trajectories.iter()
    }
}

impl<'a> IntoIterator for &'a TrajectorySet {
    type Item = &'a Trajectory;
    type IntoIter = std::slice::Iter<'a, Trajectory>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
