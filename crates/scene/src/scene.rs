//! Scene construction and line storage.
//!
//! The [`SceneBuilder`] hands out one [`LineHandle`] per data series; the
//! built [`Scene`] owns the line buffers and only lets them change through
//! [`Scene::set_data`], which replaces a line's coordinates wholesale.

use tracing::warn;

use crate::color::Color;
use crate::style::SceneStyle;

/// Opaque reference to a line of the scene that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineHandle(usize);

impl LineHandle {
    /// Position of the line in drawing order.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One drawable data series.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    color: Color,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Line {
    fn empty(color: Color) -> Self {
        Self {
            color,
            xs: Vec::new(),
            ys: Vec::new(),
        }
    }

    /// Stroke color.
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Current x data.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Current y data.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of points currently shown.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the line has no data.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterates over `(x, y)` points.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// One-time construction of a scene.
///
/// # Example
///
/// ```rust
/// use scene::{SceneBuilder, SceneStyle};
///
/// let mut builder = SceneBuilder::new(SceneStyle::default());
/// let handle = builder.add_line();
/// let mut scene = builder.build();
///
/// assert!(scene.line(handle).unwrap().is_empty());
/// scene.set_data(handle, &[0.0, 1.0], &[0.0, 1.0]);
/// assert_eq!(scene.line(handle).unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    style: SceneStyle,
    lines: Vec<Line>,
}

impl SceneBuilder {
    /// Starts a scene with the given style and no lines.
    pub fn new(style: SceneStyle) -> Self {
        Self {
            style,
            lines: Vec::new(),
        }
    }

    /// Adds an empty line colored from the palette by its position.
    pub fn add_line(&mut self) -> LineHandle {
        let color = self.style.series_color(self.lines.len());
        self.add_line_with_color(color)
    }

    /// Adds an empty line with an explicit color.
    pub fn add_line_with_color(&mut self, color: Color) -> LineHandle {
        self.lines.push(Line::empty(color));
        LineHandle(self.lines.len() - 1)
    }

    /// Finishes construction.
    pub fn build(self) -> Scene {
        Scene {
            style: self.style,
            lines: self.lines,
        }
    }
}

/// A styled plot with mutable line data.
#[derive(Debug, Clone)]
pub struct Scene {
    style: SceneStyle,
    lines: Vec<Line>,
}

impl Scene {
    /// The static style.
    pub const fn style(&self) -> &SceneStyle {
        &self.style
    }

    /// All lines in drawing order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The line behind `handle`, or `None` for a handle this scene did not
    /// issue.
    pub fn line(&self, handle: LineHandle) -> Option<&Line> {
        self.lines.get(handle.0)
    }

    /// Replaces the data of a line.
    ///
    /// Both buffers are overwritten; when the slices differ in length the
    /// shorter one bounds the number of points kept.
    pub fn set_data(&mut self, handle: LineHandle, xs: &[f64], ys: &[f64]) {
        let Some(line) = self.lines.get_mut(handle.0) else {
            warn!(line = handle.0, "ignoring data for a line this scene does not own");
            return;
        };
        let n = xs.len().min(ys.len());
        line.xs.clear();
        line.xs.extend_from_slice(&xs[..n]);
        line.ys.clear();
        line.ys.extend_from_slice(&ys[..n]);
    }

    /// Empties every line, returning the scene to its initial state.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.xs.clear();
            line.ys.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette_style() -> SceneStyle {
        SceneStyle {
            palette: vec![Color::new(255, 0, 0), Color::new(0, 0, 255)],
            ..SceneStyle::default()
        }
    }

    #[test]
    fn lines_start_empty() {
        let mut builder = SceneBuilder::new(palette_style());
        let handles: Vec<_> = (0..3).map(|_| builder.add_line()).collect();
        let scene = builder.build();

        assert_eq!(scene.lines().len(), 3);
        assert!(handles.iter().all(|&h| scene.line(h).unwrap().is_empty()));
    }

    #[test]
    fn colors_cycle_by_line_order() {
        let mut builder = SceneBuilder::new(palette_style());
        let handles: Vec<_> = (0..3).map(|_| builder.add_line()).collect();
        let scene = builder.build();

        assert_eq!(scene.line(handles[0]).unwrap().color(), Color::new(255, 0, 0));
        assert_eq!(scene.line(handles[1]).unwrap().color(), Color::new(0, 0, 255));
        assert_eq!(scene.line(handles[2]).unwrap().color(), Color::new(255, 0, 0));
    }

    #[test]
    fn set_data_replaces_not_appends() {
        let mut builder = SceneBuilder::new(SceneStyle::default());
        let h = builder.add_line();
        let mut scene = builder.build();

        scene.set_data(h, &[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        scene.set_data(h, &[7.0], &[8.0]);

        assert_eq!(scene.line(h).unwrap().xs(), &[7.0]);
        assert_eq!(scene.line(h).unwrap().ys(), &[8.0]);
    }

    #[test]
    fn set_data_truncates_to_shorter_slice() {
        let mut builder = SceneBuilder::new(SceneStyle::default());
        let h = builder.add_line();
        let mut scene = builder.build();

        scene.set_data(h, &[1.0, 2.0, 3.0], &[4.0]);
        assert_eq!(scene.line(h).unwrap().len(), 1);
        assert_eq!(scene.line(h).unwrap().points().collect::<Vec<_>>(), vec![(1.0, 4.0)]);
    }

    #[test]
    fn foreign_handle_is_ignored() {
        let mut big = SceneBuilder::new(SceneStyle::default());
        big.add_line();
        let foreign = big.add_line();

        let mut small = SceneBuilder::new(SceneStyle::default());
        small.add_line();
        let mut scene = small.build();

        scene.set_data(foreign, &[1.0], &[1.0]);
        assert!(scene.lines().iter().all(Line::is_empty));
        assert!(scene.line(foreign).is_none());
    }

    #[test]
    fn clear_restores_initial_state() {
        let mut builder = SceneBuilder::new(SceneStyle::default());
        let h = builder.add_line();
        let mut scene = builder.build();

        scene.set_data(h, &[1.0, 2.0], &[1.0, 2.0]);
        scene.clear();
        assert!(scene.line(h).unwrap().is_empty());
    }

    #[test]
    fn explicit_color_overrides_palette() {
        let mut builder = SceneBuilder::new(palette_style());
        let h = builder.add_line_with_color(Color::new(1, 2, 3));
        assert_eq!(builder.build().line(h).unwrap().color(), Color::new(1, 2, 3));
    }
}
