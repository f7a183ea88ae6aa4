#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::return_self_not_must_use)]

//! # Kinetoscope
//!
//! Classroom kinematics animations for the terminal:
//! - **ballistic**: projectile trajectories at several launch angles, drawn
//!   point by point
//! - **lissajous**: an oscilloscope-like Lissajous figure whose phase turns
//!   once per loop
//!
//! An [`Animation`] couples a [`scene::Scene`] with a [`FrameDriver`] that
//! rewrites its lines for each frame index. It can be played in the terminal
//! with a [`Player`] or encoded to a video file with [`export_to_file`]; the
//! two are independent.
//!
//! ## Example
//!
//! ```rust
//! use kinetoscope::{Animation, BallisticConfig};
//!
//! let mut animation = Animation::ballistic(&BallisticConfig::default());
//! assert_eq!(animation.frame_count(), 300);
//!
//! animation.render_frame(120);
//! assert!(animation.scene().lines().iter().all(|line| line.len() == 120));
//! ```

pub mod animation;
pub mod cli;
pub mod config;
pub mod driver;
pub mod export;
pub mod logging;
pub mod player;
pub mod prompt;

pub use animation::Animation;
pub use config::{
    BallisticConfig, ConfigError, ExportSettings, LissajousConfig, PlaybackSettings,
    ballistic_style, lissajous_style,
};
pub use driver::{BallisticDriver, FrameDriver, LissajousDriver};
pub use export::{ExportError, ExportSummary, FfmpegEncoder, VideoEncoder, VideoSpec, export_to_file};
pub use player::{Player, PlayerError, PlayerOptions};
pub use prompt::{is_affirmative, prompt_save};
