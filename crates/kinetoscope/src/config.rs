//! Animation configuration.
//!
//! Each animation is described by one immutable value: [`BallisticConfig`] or
//! [`LissajousConfig`]. The defaults reproduce the classic classroom
//! animations; any subset of fields can be overridden from a TOML file.
//!
//! ```toml
//! initial_speed = 25.0
//! angles = [10.0, 30.0, 50.0]
//!
//! [playback]
//! frames = 300
//! frame_interval_ms = 17
//!
//! [export]
//! file_name = "steep.mp4"
//! bitrate_kbps = 2000
//! ```
//!
//! Tables are replaced as a whole: a `[style]` table that sets only a few keys
//! takes the generic [`SceneStyle`] defaults for the rest. Print the complete
//! defaults with `kinetoscope config <animation>` as a starting point.

use std::fs;
use std::path::{Path, PathBuf};

use kinematics::{STANDARD_GRAVITY, angle_series};
use scene::{Annotation, Axis, Color, FigureSize, GridLine, InvalidStyle, SceneStyle, Ticks};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Encoder program used when neither the configuration nor the environment
/// names one.
pub const DEFAULT_ENCODER: &str = "ffmpeg";

/// Environment variable naming the encoder program.
pub const ENCODER_ENV: &str = "KINETOSCOPE_FFMPEG";

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this animation.
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range.
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: String, reason: String },

    /// The configuration could not be written as TOML.
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    fn style(err: InvalidStyle) -> Self {
        Self::invalid(format!("style.{}", err.field), err.reason)
    }
}

fn ensure(ok: bool, field: &str, reason: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, reason))
    }
}

fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// How the animation is paced when viewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackSettings {
    /// Frames in one pass of the animation.
    pub frames: usize,
    /// Nominal delay between frames in interactive playback.
    pub frame_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            frames: 300,
            frame_interval_ms: 17,
        }
    }
}

impl PlaybackSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.frames >= 1, "playback.frames", "must be at least 1")
    }
}

/// Video export parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Output file.
    pub file_name: PathBuf,
    /// Frames per second of the video.
    pub fps: u32,
    /// Pixels per inch of figure size.
    pub dpi: f64,
    /// Target video bitrate.
    pub bitrate_kbps: u32,
    /// Encoder codec name.
    pub codec: String,
    /// Encoder program; falls back to `KINETOSCOPE_FFMPEG`, then `ffmpeg`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoder: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: PathBuf::from("animation.mp4"),
            fps: 60,
            dpi: 100.0,
            bitrate_kbps: 1000,
            codec: "h264".to_string(),
            encoder: None,
        }
    }
}

impl ExportSettings {
    /// The encoder program to run.
    pub fn encoder_program(&self) -> String {
        self.encoder
            .clone()
            .or_else(|| std::env::var(ENCODER_ENV).ok().filter(|p| !p.is_empty()))
            .unwrap_or_else(|| DEFAULT_ENCODER.to_string())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !self.file_name.as_os_str().is_empty(),
            "export.file_name",
            "must not be empty",
        )?;
        ensure(self.fps >= 1, "export.fps", "must be at least 1")?;
        ensure(
            self.dpi.is_finite() && self.dpi > 0.0,
            "export.dpi",
            "must be a positive number",
        )?;
        ensure(self.bitrate_kbps > 0, "export.bitrate_kbps", "must be positive")?;
        ensure(!self.codec.trim().is_empty(), "export.codec", "must not be empty")
    }
}

/// Projectile trajectories revealed point by point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BallisticConfig {
    /// Launch speed in m/s.
    pub initial_speed: f64,
    /// Gravitational acceleration in m/s².
    pub gravity: f64,
    /// Launch angles in degrees, one trajectory each, drawn in this order.
    pub angles: Vec<f64>,
    /// Simulated time span in seconds.
    pub duration: f64,
    /// Samples per trajectory.
    pub points: usize,
    pub playback: PlaybackSettings,
    pub export: ExportSettings,
    pub style: SceneStyle,
}

impl Default for BallisticConfig {
    fn default() -> Self {
        Self {
            initial_speed: 20.0,
            gravity: STANDARD_GRAVITY,
            angles: angle_series(0.0, 15.0, 6),
            duration: 4.5,
            points: 300,
            playback: PlaybackSettings {
                frames: 300,
                frame_interval_ms: 17,
            },
            export: ExportSettings {
                file_name: PathBuf::from("ballistic.mp4"),
                bitrate_kbps: 1000,
                ..ExportSettings::default()
            },
            style: ballistic_style(),
        }
    }
}

impl BallisticConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value
    /// is out of range.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            self.initial_speed.is_finite(),
            "initial_speed",
            "must be a finite number",
        )?;
        ensure(
            self.gravity.is_finite() && self.gravity >= 0.0,
            "gravity",
            "must be a finite, non-negative number",
        )?;
        ensure(!self.angles.is_empty(), "angles", "must list at least one angle")?;
        ensure(
            self.angles.iter().all(|a| a.is_finite()),
            "angles",
            "must be finite numbers",
        )?;
        ensure(
            self.duration.is_finite() && self.duration > 0.0,
            "duration",
            "must be a positive number",
        )?;
        ensure(self.points >= 2, "points", "must be at least 2")?;
        self.playback.validate()?;
        // One sample is revealed per frame
        ensure(
            self.points == self.playback.frames,
            "points",
            &format!("must equal playback.frames ({})", self.playback.frames),
        )?;
        self.export.validate()?;
        self.style.validate().map_err(ConfigError::style)
    }

    /// The configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has no TOML representation.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// An oscilloscope-like Lissajous figure with a rotating phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LissajousConfig {
    /// Amplitude of both components.
    pub amplitude: f64,
    /// Frequency of the x component.
    pub freq_x: f64,
    /// Frequency of the y component.
    pub freq_y: f64,
    /// Samples along the curve.
    pub points: usize,
    pub playback: PlaybackSettings,
    pub export: ExportSettings,
    pub style: SceneStyle,
}

impl Default for LissajousConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.5,
            freq_x: 3.0,
            freq_y: 5.0,
            points: 2000,
            playback: PlaybackSettings {
                frames: 480,
                frame_interval_ms: 17,
            },
            export: ExportSettings {
                file_name: PathBuf::from("lissajou4.mp4"),
                bitrate_kbps: 1500,
                ..ExportSettings::default()
            },
            style: lissajous_style(),
        }
    }
}

impl LissajousConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value
    /// is out of range.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            self.amplitude.is_finite() && self.amplitude > 0.0,
            "amplitude",
            "must be a positive number",
        )?;
        for (field, freq) in [("freq_x", self.freq_x), ("freq_y", self.freq_y)] {
            ensure(
                freq.is_finite() && freq != 0.0,
                field,
                "must be a finite, nonzero number",
            )?;
        }
        ensure(self.points >= 2, "points", "must be at least 2")?;
        self.playback.validate()?;
        self.export.validate()?;
        self.style.validate().map_err(ConfigError::style)
    }

    /// The configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has no TOML representation.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

const RED: Color = Color::new(0xff, 0x00, 0x00);
const BLUE: Color = Color::new(0x00, 0x00, 0xff);
const GREEN: Color = Color::new(0x00, 0x80, 0x00);
const YELLOW: Color = Color::new(0xff, 0xff, 0x00);
const MAGENTA: Color = Color::new(0xff, 0x00, 0xff);
const CYAN: Color = Color::new(0x00, 0xff, 0xff);

/// Dark figure with dotted grid, bold zero lines and a six-color palette.
pub fn ballistic_style() -> SceneStyle {
    let text_size = 14.0;
    SceneStyle {
        window_title: Some("Ballistic trajectories".to_string()),
        title: Some("Ballistic trajectories".to_string()),
        figure_size: FigureSize::new(10.0, 8.0),
        background: Color::new(0x30, 0x30, 0x30),
        foreground: Color::new(0xd0, 0xd0, 0xd0),
        x_axis: Axis::new(-1.0, 45.0).label("X"),
        y_axis: Axis::new(-5.0, 20.0).label("Y"),
        grid: GridLine::Dotted,
        tick_labels: true,
        frame: false,
        zero_line_width: 2.0,
        text_size,
        title_size: text_size + 5.0,
        line_width: 3.0,
        palette: vec![RED, BLUE, GREEN, YELLOW, MAGENTA, CYAN],
        annotations: Vec::new(),
    }
}

/// Oscilloscope look: green trace on a dark dashed graticule.
pub fn lissajous_style() -> SceneStyle {
    SceneStyle {
        window_title: Some("Lissajous".to_string()),
        title: None,
        figure_size: FigureSize::new(10.0, 8.0),
        background: Color::new(0x20, 0x20, 0x20),
        foreground: Color::new(0x60, 0x60, 0x60),
        x_axis: Axis::new(-2.0, 2.0).ticks(Ticks::Count(11)),
        y_axis: Axis::new(-2.0, 2.0).ticks(Ticks::Count(9)),
        grid: GridLine::Dashed,
        tick_labels: false,
        frame: true,
        zero_line_width: 1.5,
        text_size: 10.0,
        title_size: 12.0,
        line_width: 2.0,
        palette: vec![Color::new(0x00, 0xb0, 0x00)],
        annotations: vec![Annotation {
            x: -2.3,
            y: 2.3,
            text: "Pytronix".to_string(),
            size: 22.0,
        }],
    }
}
