//! Data-to-surface mapping shared by the terminal and raster renderers.

use kinematics::linspace;

use crate::style::{Axis, Ticks};

/// Fraction of the figure width left of the plot area.
pub const PLOT_LEFT: f64 = 0.125;
/// Fraction of the figure width at which the plot area ends.
pub const PLOT_RIGHT: f64 = 0.9;
/// Fraction of the figure height below the plot area.
pub const PLOT_BOTTOM: f64 = 0.11;
/// Fraction of the figure height at which the plot area ends.
pub const PLOT_TOP: f64 = 0.88;

/// Roughly how many ticks automatic placement aims for.
const TARGET_TICKS: f64 = 6.0;

/// Axis-aligned rectangle in surface units, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The plot area of a figure of the given size, using the standard insets.
    pub fn plot_area(figure_width: f64, figure_height: f64) -> Self {
        let left = figure_width * PLOT_LEFT;
        let top = figure_height * (1.0 - PLOT_TOP);
        Self::new(
            left,
            top,
            figure_width * PLOT_RIGHT - left,
            figure_height * (1.0 - PLOT_BOTTOM) - top,
        )
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Maps data coordinates into a surface rectangle.
///
/// The lower axis limits land on the left and bottom edges, the upper
/// limits on the right and top edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    rect: Rect,
}

impl Viewport {
    /// Creates a viewport showing the given axes inside `rect`.
    pub const fn new(x_axis: &Axis, y_axis: &Axis, rect: Rect) -> Self {
        Self {
            x_min: x_axis.min,
            x_max: x_axis.max,
            y_min: y_axis.min,
            y_max: y_axis.max,
            rect,
        }
    }

    /// The target rectangle.
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Surface x of data x.
    pub fn map_x(&self, x: f64) -> f64 {
        self.rect.left + (x - self.x_min) / (self.x_max - self.x_min) * self.rect.width
    }

    /// Surface y of data y.
    pub fn map_y(&self, y: f64) -> f64 {
        self.rect.top + (self.y_max - y) / (self.y_max - self.y_min) * self.rect.height
    }

    /// Surface position of a data point.
    pub fn map(&self, x: f64, y: f64) -> (f64, f64) {
        (self.map_x(x), self.map_y(y))
    }
}

/// Tick positions for an axis, restricted to its limits.
pub fn tick_values(axis: &Axis) -> Vec<f64> {
    match &axis.ticks {
        Ticks::Auto => auto_ticks(axis.min, axis.max),
        Ticks::Count(n) => linspace(axis.min, axis.max, *n),
        Ticks::Values(values) => values
            .iter()
            .copied()
            .filter(|v| *v >= axis.min && *v <= axis.max)
            .collect(),
    }
}

/// Round 1-2-5 ticks covering `[min, max]`.
///
/// ```rust
/// use scene::layout::auto_ticks;
///
/// assert_eq!(auto_ticks(-1.0, 45.0), vec![0.0, 10.0, 20.0, 30.0, 40.0]);
/// assert_eq!(auto_ticks(-5.0, 20.0), vec![-5.0, 0.0, 5.0, 10.0, 15.0, 20.0]);
/// ```
pub fn auto_ticks(min: f64, max: f64) -> Vec<f64> {
    let span = max - min;
    if !(span.is_finite() && span > 0.0) {
        return Vec::new();
    }

    let raw = span / TARGET_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil();
    let tolerance = step * 1e-9;
    (0_i32..)
        .map(|i| (first + f64::from(i)) * step)
        .take_while(|v| *v <= max + tolerance)
        .take(1000)
        .map(|v| if v.abs() < tolerance { 0.0 } else { v })
        .collect()
}

/// Compact label for a tick value: integers without decimals, others with
/// at most three significant decimals.
pub fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        let rounded = value.round();
        // Avoid "-0"
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        return format!("{rounded:.0}");
    }
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Clips the segment `a`-`b` to `rect` (Liang-Barsky).
///
/// Returns the visible part, or `None` when the segment lies entirely
/// outside or has a non-finite endpoint.
pub fn clip_segment(a: (f64, f64), b: (f64, f64), rect: Rect) -> Option<((f64, f64), (f64, f64))> {
    if !(a.0.is_finite() && a.1.is_finite() && b.0.is_finite() && b.1.is_finite()) {
        return None;
    }

    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, a.0 - rect.left),
        (dx, rect.right() - a.0),
        (-dy, a.1 - rect.top),
        (dy, rect.bottom() - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}
