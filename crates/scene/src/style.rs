//! Static scene styling: figure, axes, grid, palette and annotations.
//!
//! A [`SceneStyle`] is established once before animation begins and never
//! changes afterwards. It is plain data, so it can be embedded in a TOML
//! configuration file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

/// Figure size in inches; the pixel size is this times the export DPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FigureSize {
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
}

impl FigureSize {
    /// Creates a figure size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self::new(10.0, 8.0)
    }
}

/// Where tick marks (and their grid lines) are placed along an axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ticks {
    /// Round 1-2-5 steps chosen from the axis limits.
    #[default]
    Auto,
    /// `n` evenly spaced ticks from the lower to the upper limit.
    Count(usize),
    /// Explicit positions in data coordinates.
    Values(Vec<f64>),
}

/// Limits, label and ticks of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Axis {
    /// Lower limit in data coordinates.
    pub min: f64,
    /// Upper limit in data coordinates.
    pub max: f64,
    /// Axis label.
    pub label: Option<String>,
    /// Tick placement.
    pub ticks: Ticks,
}

impl Axis {
    /// Creates an axis spanning `[min, max]` with automatic ticks.
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            label: None,
            ticks: Ticks::Auto,
        }
    }

    /// Sets the axis label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the tick placement.
    #[must_use]
    pub fn ticks(mut self, ticks: Ticks) -> Self {
        self.ticks = ticks;
        self
    }

    /// Width of the axis range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self::new(-1.0, 1.0)
    }
}

/// Line pattern for grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLine {
    /// No grid.
    Hidden,
    /// Continuous lines.
    Solid,
    /// Long dashes.
    Dashed,
    /// Dots.
    #[default]
    Dotted,
}

/// Free text placed at a data coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Annotation {
    /// Left edge in data coordinates.
    pub x: f64,
    /// Baseline in data coordinates.
    pub y: f64,
    /// The text.
    pub text: String,
    /// Font size in points.
    #[serde(default = "default_annotation_size")]
    pub size: f64,
}

const fn default_annotation_size() -> f64 {
    14.0
}

/// Complete static styling of a scene.
///
/// # Example
///
/// ```rust
/// use scene::{Axis, Color, GridLine, SceneStyle};
///
/// let style = SceneStyle {
///     title: Some("Ballistic trajectories".into()),
///     background: Color::new(0x30, 0x30, 0x30),
///     x_axis: Axis::new(-1.0, 45.0).label("X"),
///     y_axis: Axis::new(-5.0, 20.0).label("Y"),
///     grid: GridLine::Dotted,
///     ..SceneStyle::default()
/// };
/// assert!(style.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneStyle {
    /// Title of the window (or terminal) showing the scene.
    pub window_title: Option<String>,
    /// Title drawn above the plot area.
    pub title: Option<String>,
    /// Figure size in inches.
    pub figure_size: FigureSize,
    /// Figure and plot background.
    pub background: Color,
    /// Color of axes, grid, ticks and text.
    pub foreground: Color,
    /// Horizontal axis.
    pub x_axis: Axis,
    /// Vertical axis.
    pub y_axis: Axis,
    /// Grid pattern, drawn at tick positions.
    pub grid: GridLine,
    /// Whether tick values are printed.
    pub tick_labels: bool,
    /// Whether the plot area is boxed in by spines.
    pub frame: bool,
    /// Width in points of the lines through the origin; `0` hides them.
    pub zero_line_width: f64,
    /// Tick and axis label size in points.
    pub text_size: f64,
    /// Title size in points.
    pub title_size: f64,
    /// Series line width in points.
    pub line_width: f64,
    /// Series colors, assigned cyclically in line order.
    pub palette: Vec<Color>,
    /// Free text.
    pub annotations: Vec<Annotation>,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            window_title: None,
            title: None,
            figure_size: FigureSize::default(),
            background: Color::new(0xff, 0xff, 0xff),
            foreground: Color::new(0x00, 0x00, 0x00),
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            grid: GridLine::Hidden,
            tick_labels: true,
            frame: true,
            zero_line_width: 0.0,
            text_size: 10.0,
            title_size: 12.0,
            line_width: 1.5,
            palette: vec![Color::new(0x1f, 0x77, 0xb4)],
            annotations: Vec::new(),
        }
    }
}

/// A style value that cannot be drawn.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid style field `{field}`: {reason}")]
pub struct InvalidStyle {
    /// Offending field path.
    pub field: &'static str,
    /// What is wrong with it.
    pub reason: String,
}

impl InvalidStyle {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl SceneStyle {
    /// Color for the line at `index`, cycling through the palette.
    pub fn series_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return self.foreground;
        }
        self.palette[index % self.palette.len()]
    }

    /// Checks that the style describes a drawable scene.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStyle`] naming the first field with an unusable value.
    pub fn validate(&self) -> Result<(), InvalidStyle> {
        check_axis("x_axis", &self.x_axis)?;
        check_axis("y_axis", &self.y_axis)?;

        let FigureSize { width, height } = self.figure_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(InvalidStyle::new(
                "figure_size",
                format!("must be positive, got {width}x{height}"),
            ));
        }
        if self.palette.is_empty() {
            return Err(InvalidStyle::new("palette", "needs at least one color"));
        }
        for (field, value) in [
            ("text_size", self.text_size),
            ("title_size", self.title_size),
            ("line_width", self.line_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(InvalidStyle::new(field, format!("must be positive, got {value}")));
            }
        }
        if !(self.zero_line_width.is_finite() && self.zero_line_width >= 0.0) {
            return Err(InvalidStyle::new(
                "zero_line_width",
                format!("must be zero or positive, got {}", self.zero_line_width),
            ));
        }
        Ok(())
    }
}

fn check_axis(field: &'static str, axis: &Axis) -> Result<(), InvalidStyle> {
    if !(axis.min.is_finite() && axis.max.is_finite()) {
        return Err(InvalidStyle::new(field, "limits must be finite"));
    }
    if axis.min >= axis.max {
        return Err(InvalidStyle::new(
            field,
            format!("min ({}) must be below max ({})", axis.min, axis.max),
        ));
    }
    if let Ticks::Values(values) = &axis.ticks
        && values.iter().any(|v| !v.is_finite())
    {
        return Err(InvalidStyle::new(field, "tick values must be finite"));
    }
    Ok(())
}
