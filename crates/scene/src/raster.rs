//! RGB frame rendering for video export.
//!
//! Frames are drawn with plotters into a caller-owned `rgb24` buffer of
//! `width × height × 3` bytes, rows top to bottom. Dimensions come from the
//! figure size in inches times the DPI, rounded down to even numbers so the
//! frames can be encoded as `yuv420p`.
//!
//! Text needs a TrueType font registered through [`load_font`]. Without one
//! the frame is still drawn, only labels and annotations are left out.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, DrawingArea, IntoDrawingArea, PathElement, RGBColor, Rectangle, Text,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontDesc, FontFamily, FontStyle, ShapeStyle, register_font};
use tracing::{debug, warn};

use crate::color::Color;
use crate::error::RenderError;
use crate::layout::{Rect, Viewport, clip_segment, format_tick, tick_values};
use crate::scene::Scene;
use crate::style::{FigureSize, GridLine, SceneStyle};

/// Family name under which the loaded font is registered.
const FONT_FAMILY: &str = "kinetoscope-sans";

/// Fonts tried, in order, when no explicit font is given.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/local/share/fonts/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT: OnceLock<PathBuf> = OnceLock::new();

/// Points per inch.
const POINTS_PER_INCH: f64 = 72.0;
const GRID_WIDTH_PT: f64 = 0.8;
const FRAME_WIDTH_PT: f64 = 0.8;
const TICK_LENGTH_PT: f64 = 3.5;
const TICK_PAD_PT: f64 = 3.5;
const TITLE_PAD_PT: f64 = 6.0;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Pixel size of a figure at `dpi`, each side rounded down to an even
/// number of at least 2.
///
/// ```rust
/// use scene::{FigureSize, frame_dimensions};
///
/// assert_eq!(frame_dimensions(FigureSize::new(10.0, 8.0), 100.0), (1000, 800));
/// assert_eq!(frame_dimensions(FigureSize::new(1.01, 1.0), 100.0), (100, 100));
/// ```
pub fn frame_dimensions(figure: FigureSize, dpi: f64) -> (u32, u32) {
    (even_pixels(figure.width * dpi), even_pixels(figure.height * dpi))
}

fn even_pixels(value: f64) -> u32 {
    let pixels = if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    };
    (pixels - pixels % 2).max(2)
}

/// Registers a font for frame text.
///
/// Only the first font registered in a process is used. With an explicit
/// `path` a missing file is an error. A file that does not parse is an error
/// too, unless a font is already registered, in which case the earlier one
/// is kept. Without a path a list
/// of common system locations is searched. Returns whether a font is
/// available.
pub fn load_font(path: Option<&Path>) -> Result<bool, RenderError> {
    if let Some(path) = path {
        fs::metadata(path).map_err(|source| RenderError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        register(path)?;
        return Ok(true);
    }
    if FONT.get().is_some() {
        return Ok(true);
    }

    for candidate in FONT_CANDIDATES.iter().map(Path::new) {
        if !candidate.is_file() {
            continue;
        }
        match register(candidate) {
            Ok(()) => return Ok(true),
            Err(err) => debug!(%err, "skipping font candidate"),
        }
    }

    warn!("no usable font found, exported frames will have no text");
    Ok(false)
}

/// Whether [`load_font`] has registered a font.
pub fn font_loaded() -> bool {
    FONT.get().is_some()
}

/// Path of the registered font, if any.
pub fn registered_font() -> Option<&'static Path> {
    FONT.get().map(PathBuf::as_path)
}

fn register(path: &Path) -> Result<(), RenderError> {
    // Registration happens at most once per process
    if let Some(active) = FONT.get() {
        if active != path {
            warn!(
                active = %active.display(),
                requested = %path.display(),
                "a font is already registered, keeping it"
            );
        }
        return Ok(());
    }

    let bytes = fs::read(path).map_err(|source| RenderError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    // plotters keeps registered font data for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| RenderError::FontInvalid {
        path: path.to_path_buf(),
    })?;
    let _ = FONT.set(path.to_path_buf());
    debug!(path = %path.display(), "registered font");
    Ok(())
}

/// Draws scenes into `rgb24` frames of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rasterizer {
    width: u32,
    height: u32,
    dpi: f64,
}

impl Rasterizer {
    /// A rasterizer for `figure` at `dpi`.
    pub fn new(figure: FigureSize, dpi: f64) -> Self {
        let (width, height) = frame_dimensions(figure, dpi);
        Self { width, height, dpi }
    }

    /// A rasterizer sized for the figure of `style`.
    pub fn for_style(style: &SceneStyle, dpi: f64) -> Self {
        Self::new(style.figure_size, dpi)
    }

    /// Frame size in pixels as `(width, height)`.
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes in one frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// Renders the scene into a new buffer.
    pub fn render(&self, scene: &Scene) -> Result<Vec<u8>, RenderError> {
        let mut frame = vec![0; self.frame_len()];
        self.render_into(scene, &mut frame)?;
        Ok(frame)
    }

    /// Renders the scene into `frame`, which must hold exactly
    /// [`frame_len`](Self::frame_len) bytes.
    pub fn render_into(&self, scene: &Scene, frame: &mut [u8]) -> Result<(), RenderError> {
        if frame.len() != self.frame_len() {
            return Err(RenderError::Draw(format!(
                "frame buffer holds {} bytes, expected {}",
                frame.len(),
                self.frame_len()
            )));
        }

        let root = BitMapBackend::with_buffer(frame, (self.width, self.height)).into_drawing_area();
        let plot = Rect::plot_area(f64::from(self.width), f64::from(self.height));
        let painter = Painter {
            root: &root,
            style: scene.style(),
            viewport: Viewport::new(&scene.style().x_axis, &scene.style().y_axis, plot),
            plot,
            px_per_pt: self.dpi / POINTS_PER_INCH,
            text: font_loaded(),
        };

        painter.background()?;
        painter.grid()?;
        painter.zero_lines()?;
        painter.series(scene)?;
        if painter.style.frame {
            painter.frame()?;
        }
        if painter.text {
            painter.labels()?;
        }

        root.present().map_err(RenderError::draw)
    }
}

struct Painter<'a, 'b> {
    root: &'a Area<'b>,
    style: &'a SceneStyle,
    viewport: Viewport,
    plot: Rect,
    px_per_pt: f64,
    text: bool,
}

impl Painter<'_, '_> {
    fn px(&self, points: f64) -> f64 {
        points * self.px_per_pt
    }

    fn stroke(&self, color: Color, points: f64) -> ShapeStyle {
        let width = self.px(points).round().max(1.0) as u32;
        RGBColor::from(color).stroke_width(width)
    }

    fn path(&self, points: &[(f64, f64)], style: ShapeStyle) -> Result<(), RenderError> {
        let points: Vec<(i32, i32)> = points.iter().map(|&p| pixel(p)).collect();
        self.root
            .draw(&PathElement::new(points, style))
            .map_err(RenderError::draw)
    }

    fn background(&self) -> Result<(), RenderError> {
        self.root
            .fill(&RGBColor::from(self.style.background))
            .map_err(RenderError::draw)
    }

    fn grid(&self) -> Result<(), RenderError> {
        let width = self.px(GRID_WIDTH_PT).max(1.0);
        let pattern = match self.style.grid {
            GridLine::Hidden => return Ok(()),
            GridLine::Solid => None,
            GridLine::Dashed => Some((3.7 * width, 1.6 * width)),
            GridLine::Dotted => Some((width, 1.65 * width)),
        };
        let style = self.stroke(self.style.foreground, GRID_WIDTH_PT);
        let plot = self.plot;

        let mut lines = Vec::new();
        for x in tick_values(&self.style.x_axis) {
            let x = self.viewport.map_x(x);
            lines.push(((x, plot.top), (x, plot.bottom())));
        }
        for y in tick_values(&self.style.y_axis) {
            let y = self.viewport.map_y(y);
            lines.push(((plot.left, y), (plot.right(), y)));
        }

        for (a, b) in lines {
            match pattern {
                None => self.path(&[a, b], style)?,
                Some((dash, gap)) => {
                    for (start, end) in dashes(a, b, dash, gap) {
                        self.path(&[start, end], style)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn zero_lines(&self) -> Result<(), RenderError> {
        let width = self.style.zero_line_width;
        if width <= 0.0 {
            return Ok(());
        }
        let style = self.stroke(self.style.foreground, width);
        let (x_axis, y_axis) = (&self.style.x_axis, &self.style.y_axis);
        let plot = self.plot;

        if (y_axis.min..=y_axis.max).contains(&0.0) {
            let y = self.viewport.map_y(0.0);
            self.path(&[(plot.left, y), (plot.right(), y)], style)?;
        }
        if (x_axis.min..=x_axis.max).contains(&0.0) {
            let x = self.viewport.map_x(0.0);
            self.path(&[(x, plot.top), (x, plot.bottom())], style)?;
        }
        Ok(())
    }

    fn series(&self, scene: &Scene) -> Result<(), RenderError> {
        for line in scene.lines() {
            let style = self.stroke(line.color(), self.style.line_width);
            let mapped: Vec<(f64, f64)> = line
                .points()
                .map(|(x, y)| self.viewport.map(x, y))
                .collect();
            for run in visible_runs(&mapped, self.plot) {
                self.path(&run, style)?;
            }
        }
        Ok(())
    }

    fn frame(&self) -> Result<(), RenderError> {
        let plot = self.plot;
        let style = self.stroke(self.style.foreground, FRAME_WIDTH_PT);
        self.root
            .draw(&Rectangle::new(
                [pixel((plot.left, plot.top)), pixel((plot.right(), plot.bottom()))],
                style,
            ))
            .map_err(RenderError::draw)?;

        let tick = self.px(TICK_LENGTH_PT);
        for x in tick_values(&self.style.x_axis) {
            let x = self.viewport.map_x(x);
            self.path(&[(x, plot.bottom()), (x, plot.bottom() + tick)], style)?;
        }
        for y in tick_values(&self.style.y_axis) {
            let y = self.viewport.map_y(y);
            self.path(&[(plot.left - tick, y), (plot.left, y)], style)?;
        }
        Ok(())
    }

    fn text(&self, text: &str, at: (f64, f64), points: f64, anchor: Pos) -> Result<(), RenderError> {
        let font = FontDesc::new(FontFamily::Name(FONT_FAMILY), self.px(points), FontStyle::Normal)
            .color(&RGBColor::from(self.style.foreground))
            .pos(anchor);
        self.root
            .draw(&Text::new(text.to_owned(), pixel(at), font))
            .map_err(RenderError::draw)
    }

    fn labels(&self) -> Result<(), RenderError> {
        let style = self.style;
        let plot = self.plot;
        let size = style.text_size;
        let offset = self.px(TICK_LENGTH_PT + TICK_PAD_PT);
        let center_x = plot.left + plot.width / 2.0;

        let mut below = plot.bottom() + self.px(TICK_PAD_PT);
        let mut left = plot.left - self.px(TICK_PAD_PT);

        if style.tick_labels {
            for x in tick_values(&style.x_axis) {
                let at = (self.viewport.map_x(x), plot.bottom() + offset);
                self.text(&format_tick(x), at, size, Pos::new(HPos::Center, VPos::Top))?;
            }
            let mut widest = 0.0_f64;
            for y in tick_values(&style.y_axis) {
                let label = format_tick(y);
                widest = widest.max(self.estimate_width(&label, size));
                let at = (plot.left - offset, self.viewport.map_y(y));
                self.text(&label, at, size, Pos::new(HPos::Right, VPos::Center))?;
            }
            below = plot.bottom() + offset + self.px(size) + self.px(TICK_PAD_PT);
            left = plot.left - offset - widest - self.px(TICK_PAD_PT);
        }

        if let Some(label) = &style.x_axis.label {
            self.text(label, (center_x, below), size, Pos::new(HPos::Center, VPos::Top))?;
        }
        if let Some(label) = &style.y_axis.label {
            let at = (left, plot.top + plot.height / 2.0);
            self.text(label, at, size, Pos::new(HPos::Right, VPos::Center))?;
        }
        if let Some(title) = &style.title {
            let at = (center_x, plot.top - self.px(TITLE_PAD_PT));
            self.text(title, at, style.title_size, Pos::new(HPos::Center, VPos::Bottom))?;
        }
        for note in &style.annotations {
            let at = self.viewport.map(note.x, note.y);
            self.text(&note.text, at, note.size, Pos::new(HPos::Left, VPos::Bottom))?;
        }
        Ok(())
    }

    fn estimate_width(&self, text: &str, points: f64) -> f64 {
        0.6 * self.px(points) * text.chars().count() as f64
    }
}

fn pixel((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

/// Splits a polyline into the runs that stay inside `rect`, clipping the
/// segments that cross its border.
fn visible_runs(points: &[(f64, f64)], rect: Rect) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for pair in points.windows(2) {
        match clip_segment(pair[0], pair[1], rect) {
            Some((a, b)) => {
                if !current.last().is_some_and(|&last| close(last, a)) {
                    if current.len() >= 2 {
                        runs.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(a);
                }
                current.push(b);
            }
            None => {
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
            }
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}

fn close(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6
}

/// Dash segments along the straight line `a`-`b`.
fn dashes(a: (f64, f64), b: (f64, f64), dash: f64, gap: f64) -> Vec<((f64, f64), (f64, f64))> {
    let length = (b.0 - a.0).hypot(b.1 - a.1);
    if length <= 0.0 || dash <= 0.0 {
        return Vec::new();
    }
    let (ux, uy) = ((b.0 - a.0) / length, (b.1 - a.1) / length);
    let period = dash + gap.max(0.0);

    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        segments.push(((a.0 + ux * start, a.1 + uy * start), (a.0 + ux * end, a.1 + uy * end)));
        start += period;
    }
    segments
}
