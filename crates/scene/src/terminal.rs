//! Character-cell rendering for terminal playback.
//!
//! Series are drawn on a Braille sub-grid: every cell holds 2×4 dots, which
//! gives lines four times the vertical and twice the horizontal resolution of
//! plain characters. Grid lines, zero lines and the frame use box-drawing
//! characters; any cell carrying series dots takes precedence over them.

use crossterm::style::{ContentStyle, StyledContent};

use crate::color::Color;
use crate::layout::{Rect, Viewport, clip_segment, format_tick, tick_values};
use crate::scene::Scene;
use crate::style::{GridLine, SceneStyle};

const BRAILLE_BASE: u32 = 0x2800;

/// Dot bit for sub-column `[0, 2)` and sub-row `[0, 4)` of a Braille cell.
const BRAILLE_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

const TOO_SMALL: &str = "terminal too small";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Ink {
    Foreground,
    Series(Color),
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    dots: u8,
    ink: Ink,
}

impl Cell {
    const BLANK: Self = Self {
        ch: ' ',
        dots: 0,
        ink: Ink::Foreground,
    };

    fn glyph(&self) -> char {
        if self.dots == 0 {
            self.ch
        } else {
            char::from_u32(BRAILLE_BASE + u32::from(self.dots)).unwrap_or('⣿')
        }
    }
}

struct CellGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols * rows],
        }
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    fn put(&mut self, col: usize, row: usize, ch: char) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.ch = ch;
        }
    }

    fn text(&mut self, col: usize, row: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i, row, ch);
        }
    }

    fn text_centered(&mut self, center: usize, row: usize, text: &str) {
        let len = text.chars().count();
        self.text(center.saturating_sub(len / 2), row, text);
    }

    fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }
}

/// Where the parts of the figure land, in cells.
#[derive(Debug, Clone, Copy)]
struct CellLayout {
    /// First and last interior column of the plot area.
    ix: (usize, usize),
    /// First and last interior row of the plot area.
    iy: (usize, usize),
    title_row: Option<usize>,
    tick_row: Option<usize>,
    label_row: Option<usize>,
    label_col: Option<usize>,
    tick_width: usize,
}

impl CellLayout {
    fn compute(style: &SceneStyle, y_ticks: &[String], cols: usize, rows: usize) -> Option<Self> {
        let title_row = style.title.as_ref().map(|_| 0);
        let top = usize::from(title_row.is_some());

        let label_row = style.x_axis.label.as_ref().map(|_| rows.saturating_sub(1));
        let tick_row = style
            .tick_labels
            .then(|| rows.saturating_sub(1 + usize::from(label_row.is_some())));
        let reserved_below = usize::from(label_row.is_some()) + usize::from(tick_row.is_some());

        let label_col = style.y_axis.label.as_ref().map(|_| 0);
        let tick_width = if style.tick_labels {
            y_ticks.iter().map(|t| t.chars().count()).max().unwrap_or(0)
        } else {
            0
        };
        let mut left = if label_col.is_some() { 2 } else { 0 };
        if tick_width > 0 {
            left += tick_width + 1;
        }

        // One cell of border on every side of the interior for the frame
        let ix0 = left + 1;
        let ix1 = cols.checked_sub(2)?;
        let iy0 = top + 1;
        let iy1 = rows.checked_sub(reserved_below + 2)?;
        if ix1 < ix0 + 1 || iy1 < iy0 + 1 {
            return None;
        }

        Some(Self {
            ix: (ix0, ix1),
            iy: (iy0, iy1),
            title_row,
            tick_row,
            label_row,
            label_col,
            tick_width,
        })
    }

    fn dot_size(&self) -> (usize, usize) {
        (
            (self.ix.1 - self.ix.0 + 1) * 2,
            (self.iy.1 - self.iy.0 + 1) * 4,
        )
    }
}

/// Renders scenes into `cols × rows` character cells.
///
/// # Example
///
/// ```rust
/// use scene::{Axis, SceneBuilder, SceneStyle, TerminalCanvas};
///
/// let style = SceneStyle {
///     x_axis: Axis::new(0.0, 10.0),
///     y_axis: Axis::new(0.0, 10.0),
///     ..SceneStyle::default()
/// };
/// let mut builder = SceneBuilder::new(style);
/// let line = builder.add_line();
/// let mut scene = builder.build();
/// scene.set_data(line, &[0.0, 10.0], &[0.0, 10.0]);
///
/// let lines = TerminalCanvas::new(40, 12).colored(false).render_lines(&scene);
/// assert_eq!(lines.len(), 12);
/// assert!(lines.iter().any(|l| l.chars().any(|c| ('\u{2800}'..='\u{28ff}').contains(&c))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCanvas {
    cols: usize,
    rows: usize,
    colored: bool,
}

impl TerminalCanvas {
    /// Creates a colored canvas of the given size in cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: usize::from(cols),
            rows: usize::from(rows),
            colored: true,
        }
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub const fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Size in cells as `(cols, rows)`.
    pub const fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Renders the scene, one string per terminal row.
    pub fn render_lines(&self, scene: &Scene) -> Vec<String> {
        let style = scene.style();
        let grid = self.draw(scene);
        (0..grid.rows)
            .map(|row| self.encode_row(grid.row(row), style))
            .collect()
    }

    /// Renders the scene as rows joined by newlines.
    pub fn render(&self, scene: &Scene) -> String {
        self.render_lines(scene).join("\n")
    }

    fn draw(&self, scene: &Scene) -> CellGrid {
        let style = scene.style();
        let mut grid = CellGrid::new(self.cols, self.rows);

        let x_ticks = tick_values(&style.x_axis);
        let y_ticks = tick_values(&style.y_axis);
        let y_labels: Vec<String> = y_ticks.iter().map(|&v| format_tick(v)).collect();

        let Some(layout) = CellLayout::compute(style, &y_labels, self.cols, self.rows) else {
            grid.text(0, 0, TOO_SMALL);
            return grid;
        };

        let (dot_w, dot_h) = layout.dot_size();
        let dots = Rect::new(0.0, 0.0, (dot_w - 1) as f64, (dot_h - 1) as f64);
        let viewport = Viewport::new(&style.x_axis, &style.y_axis, dots);

        let x_cols: Vec<usize> = x_ticks
            .iter()
            .map(|&x| layout.ix.0 + dot_index(viewport.map_x(x)) / 2)
            .collect();
        let y_rows: Vec<usize> = y_ticks
            .iter()
            .map(|&y| layout.iy.0 + dot_index(viewport.map_y(y)) / 4)
            .collect();

        draw_grid(&mut grid, &layout, style.grid, &x_cols, &y_rows);
        draw_zero_lines(&mut grid, &layout, style, &viewport);
        if style.frame {
            draw_frame(&mut grid, &layout);
        }
        draw_series(&mut grid, &layout, scene, &viewport, dots);
        draw_text(&mut grid, &layout, style, &viewport, (&x_ticks, &x_cols), (&y_labels, &y_rows));

        grid
    }

    fn encode_row(&self, cells: &[Cell], style: &SceneStyle) -> String {
        if !self.colored {
            return cells.iter().map(Cell::glyph).collect();
        }

        let mut out = String::new();
        let mut run = String::new();
        let mut run_ink = None;
        for cell in cells {
            let ink = if cell.dots == 0 { Ink::Foreground } else { cell.ink };
            if run_ink.is_some_and(|current| current != ink) {
                push_run(&mut out, &run, run_ink, style);
                run.clear();
            }
            run_ink = Some(ink);
            run.push(cell.glyph());
        }
        push_run(&mut out, &run, run_ink, style);
        out
    }
}

fn push_run(out: &mut String, run: &str, ink: Option<Ink>, style: &SceneStyle) {
    if run.is_empty() {
        return;
    }
    let fg = match ink {
        Some(Ink::Series(color)) => color,
        _ => style.foreground,
    };
    let content_style = ContentStyle {
        foreground_color: Some(fg.into()),
        background_color: Some(style.background.into()),
        ..ContentStyle::default()
    };
    out.push_str(&StyledContent::new(content_style, run).to_string());
}

fn dot_index(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value.round() as usize
    } else {
        0
    }
}

fn draw_grid(grid: &mut CellGrid, layout: &CellLayout, pattern: GridLine, x_cols: &[usize], y_rows: &[usize]) {
    let (horizontal, vertical, crossing) = match pattern {
        GridLine::Hidden => return,
        GridLine::Solid => ('─', '│', '┼'),
        GridLine::Dashed => ('╌', '╎', '┼'),
        GridLine::Dotted => ('·', '·', '·'),
    };
    for &row in y_rows {
        for col in layout.ix.0..=layout.ix.1 {
            grid.put(col, row, horizontal);
        }
    }
    for &col in x_cols {
        for row in layout.iy.0..=layout.iy.1 {
            let ch = if y_rows.contains(&row) { crossing } else { vertical };
            grid.put(col, row, ch);
        }
    }
}

fn draw_zero_lines(grid: &mut CellGrid, layout: &CellLayout, style: &SceneStyle, viewport: &Viewport) {
    if style.zero_line_width <= 0.0 {
        return;
    }
    let x_zero = (style.x_axis.min..=style.x_axis.max)
        .contains(&0.0)
        .then(|| layout.ix.0 + dot_index(viewport.map_x(0.0)) / 2);
    let y_zero = (style.y_axis.min..=style.y_axis.max)
        .contains(&0.0)
        .then(|| layout.iy.0 + dot_index(viewport.map_y(0.0)) / 4);

    if let Some(row) = y_zero {
        for col in layout.ix.0..=layout.ix.1 {
            grid.put(col, row, '─');
        }
    }
    if let Some(col) = x_zero {
        for row in layout.iy.0..=layout.iy.1 {
            let ch = if Some(row) == y_zero { '┼' } else { '│' };
            grid.put(col, row, ch);
        }
    }
}

fn draw_frame(grid: &mut CellGrid, layout: &CellLayout) {
    let (left, right) = (layout.ix.0 - 1, layout.ix.1 + 1);
    let (top, bottom) = (layout.iy.0 - 1, layout.iy.1 + 1);
    for col in left + 1..right {
        grid.put(col, top, '─');
        grid.put(col, bottom, '─');
    }
    for row in top + 1..bottom {
        grid.put(left, row, '│');
        grid.put(right, row, '│');
    }
    grid.put(left, top, '┌');
    grid.put(right, top, '┐');
    grid.put(left, bottom, '└');
    grid.put(right, bottom, '┘');
}

fn draw_series(grid: &mut CellGrid, layout: &CellLayout, scene: &Scene, viewport: &Viewport, dots: Rect) {
    let plot = |grid: &mut CellGrid, color: Color, (x, y): (f64, f64)| {
        let (dx, dy) = (dot_index(x), dot_index(y));
        let col = layout.ix.0 + dx / 2;
        let row = layout.iy.0 + dy / 4;
        if col > layout.ix.1 || row > layout.iy.1 {
            return;
        }
        if let Some(cell) = grid.cell_mut(col, row) {
            cell.dots |= BRAILLE_BITS[dx % 2][dy % 4];
            cell.ink = Ink::Series(color);
        }
    };

    for line in scene.lines() {
        let color = line.color();
        let mapped: Vec<(f64, f64)> = line.points().map(|(x, y)| viewport.map(x, y)).collect();

        if let [only] = mapped.as_slice() {
            if clip_segment(*only, *only, dots).is_some() {
                plot(grid, color, *only);
            }
            continue;
        }

        for pair in mapped.windows(2) {
            let Some((a, b)) = clip_segment(pair[0], pair[1], dots) else {
                continue;
            };
            let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil() as usize;
            if steps == 0 {
                plot(grid, color, a);
                continue;
            }
            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                plot(grid, color, (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t));
            }
        }
    }
}

fn draw_text(
    grid: &mut CellGrid,
    layout: &CellLayout,
    style: &SceneStyle,
    viewport: &Viewport,
    (x_ticks, x_cols): (&[f64], &[usize]),
    (y_labels, y_rows): (&[String], &[usize]),
) {
    let center = (layout.ix.0 + layout.ix.1) / 2;

    if let (Some(row), Some(title)) = (layout.title_row, style.title.as_deref()) {
        grid.text_centered(grid.cols / 2, row, title);
    }

    if let Some(row) = layout.tick_row {
        let mut next_free = 0;
        for (&value, &col) in x_ticks.iter().zip(x_cols) {
            let label = format_tick(value);
            let start = col.saturating_sub(label.chars().count() / 2);
            if start >= next_free {
                grid.text(start, row, &label);
                next_free = start + label.chars().count() + 1;
            }
        }

        let label_end = layout.ix.0 - 2;
        for (label, &row) in y_labels.iter().zip(y_rows) {
            let len = label.chars().count().min(layout.tick_width);
            grid.text((label_end + 1).saturating_sub(len), row, label);
        }
    }

    if let (Some(row), Some(label)) = (layout.label_row, style.x_axis.label.as_deref()) {
        grid.text_centered(center, row, label);
    }

    if let (Some(col), Some(label)) = (layout.label_col, style.y_axis.label.as_deref()) {
        let len = label.chars().count();
        let middle = (layout.iy.0 + layout.iy.1) / 2;
        let first = middle.saturating_sub(len / 2).max(layout.iy.0);
        for (i, ch) in label.chars().enumerate() {
            grid.put(col, first + i, ch);
        }
    }

    for note in &style.annotations {
        let (x, y) = viewport.map(note.x, note.y);
        let len = note.text.chars().count();
        let col = signed_cell(layout.ix.0, x / 2.0).min(grid.cols.saturating_sub(len));
        let row = signed_cell(layout.iy.0, y / 4.0).min(grid.rows.saturating_sub(1));
        grid.text(col, row, &note.text);
    }
}

/// `origin + offset` clamped at zero, for positions that may fall left of or
/// above the plot area.
fn signed_cell(origin: usize, offset: f64) -> usize {
    let value = origin as f64 + offset.round();
    if value.is_finite() && value > 0.0 {
        value as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneBuilder;
    use crate::style::{Annotation, Axis, Ticks};

    fn is_braille(c: char) -> bool {
        ('\u{2801}'..='\u{28ff}').contains(&c)
    }

    fn style() -> SceneStyle {
        SceneStyle {
            title: Some("Demo".into()),
            x_axis: Axis::new(-1.0, 45.0).label("X"),
            y_axis: Axis::new(-5.0, 20.0).label("Y"),
            grid: GridLine::Dotted,
            zero_line_width: 2.0,
            frame: false,
            ..SceneStyle::default()
        }
    }

    #[test]
    fn output_matches_canvas_size() {
        let scene = SceneBuilder::new(style()).build();
        let lines = TerminalCanvas::new(60, 20).colored(false).render_lines(&scene);
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|l| l.chars().count() == 60));
    }

    #[test]
    fn empty_scene_has_no_series_dots() {
        let mut builder = SceneBuilder::new(style());
        builder.add_line();
        let scene = builder.build();
        let text = TerminalCanvas::new(60, 20).colored(false).render(&scene);
        assert!(!text.chars().any(is_braille));
    }

    #[test]
    fn line_data_produces_braille() {
        let mut builder = SceneBuilder::new(style());
        let h = builder.add_line();
        let mut scene = builder.build();
        scene.set_data(h, &[0.0, 20.0, 40.0], &[0.0, 15.0, 0.0]);

        let text = TerminalCanvas::new(60, 20).colored(false).render(&scene);
        assert!(text.chars().filter(|&c| is_braille(c)).count() > 10);
    }

    #[test]
    fn single_point_is_drawn() {
        let mut builder = SceneBuilder::new(style());
        let h = builder.add_line();
        let mut scene = builder.build();
        scene.set_data(h, &[10.0], &[10.0]);

        let text = TerminalCanvas::new(60, 20).colored(false).render(&scene);
        assert_eq!(text.chars().filter(|&c| is_braille(c)).count(), 1);
    }

    #[test]
    fn points_outside_limits_are_clipped() {
        let mut builder = SceneBuilder::new(style());
        let h = builder.add_line();
        let mut scene = builder.build();
        scene.set_data(h, &[100.0, 200.0], &[-50.0, -90.0]);

        let text = TerminalCanvas::new(60, 20).colored(false).render(&scene);
        assert!(!text.chars().any(is_braille));
    }

    #[test]
    fn title_labels_and_ticks_present() {
        let scene = SceneBuilder::new(style()).build();
        let lines = TerminalCanvas::new(60, 20).colored(false).render_lines(&scene);
        assert!(lines[0].contains("Demo"));
        assert!(lines[19].contains('X'));
        assert!(lines[18].contains("40"));
        assert!(lines.iter().any(|l| l.starts_with('Y')));
        assert!(lines.iter().any(|l| l.contains("20")));
    }

    #[test]
    fn zero_lines_cross() {
        let scene = SceneBuilder::new(style()).build();
        let text = TerminalCanvas::new(60, 20).colored(false).render(&scene);
        assert!(text.contains('┼'));
    }

    #[test]
    fn frame_draws_corners() {
        let style = SceneStyle {
            frame: true,
            ..style()
        };
        let scene = SceneBuilder::new(style).build();
        let text = TerminalCanvas::new(60, 20).colored(false).render(&scene);
        for corner in ['┌', '┐', '└', '┘'] {
            assert!(text.contains(corner), "missing {corner}");
        }
    }

    #[test]
    fn hidden_tick_labels_and_annotations() {
        let style = SceneStyle {
            title: None,
            tick_labels: false,
            x_axis: Axis::new(-2.0, 2.0).ticks(Ticks::Count(11)),
            y_axis: Axis::new(-2.0, 2.0).ticks(Ticks::Count(9)),
            grid: GridLine::Dashed,
            annotations: vec![Annotation {
                x: -2.3,
                y: 2.3,
                text: "Pytronix".into(),
                size: 22.0,
            }],
            ..SceneStyle::default()
        };
        let scene = SceneBuilder::new(style).build();
        let text = TerminalCanvas::new(60, 20).colored(false).render(&scene);
        assert!(text.contains("Pytronix"));
        assert!(text.contains('╎'));
        assert!(!text.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn tiny_canvas_reports_size() {
        let scene = SceneBuilder::new(style()).build();
        let lines = TerminalCanvas::new(30, 3).colored(false).render_lines(&scene);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("terminal too small"));
    }

    #[test]
    fn colored_output_uses_escape_sequences() {
        let mut builder = SceneBuilder::new(style());
        let h = builder.add_line();
        let mut scene = builder.build();
        scene.set_data(h, &[0.0, 40.0], &[0.0, 10.0]);

        let text = TerminalCanvas::new(60, 20).render(&scene);
        assert!(text.contains("\u{1b}["));
    }
}
