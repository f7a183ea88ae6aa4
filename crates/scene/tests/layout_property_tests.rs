#![allow(clippy::float_cmp)]

//! Property-based tests for the shared layout math and the terminal canvas
//! size contract.

use proptest::prelude::*;
use scene::layout::{Rect, Viewport, auto_ticks, clip_segment};
use scene::{Axis, SceneBuilder, SceneStyle, TerminalCanvas};

const EPS: f64 = 1e-6;

fn limits() -> impl Strategy<Value = (f64, f64)> {
    (-1000.0f64..1000.0, 0.01f64..2000.0).prop_map(|(min, span)| (min, min + span))
}

fn rect() -> impl Strategy<Value = Rect> {
    (0.0f64..100.0, 0.0f64..100.0, 1.0f64..500.0, 1.0f64..500.0)
        .prop_map(|(left, top, width, height)| Rect::new(left, top, width, height))
}

fn inside(point: (f64, f64), rect: Rect) -> bool {
    point.0 >= rect.left - EPS
        && point.0 <= rect.right() + EPS
        && point.1 >= rect.top - EPS
        && point.1 <= rect.bottom() + EPS
}

proptest! {
    #[test]
    fn auto_ticks_stay_within_limits((min, max) in limits()) {
        let ticks = auto_ticks(min, max);
        let tolerance = (max - min) * 1e-9;
        prop_assert!(ticks.len() >= 2, "too few ticks for ({min}, {max}): {ticks:?}");
        prop_assert!(ticks.len() <= 13, "too many ticks for ({min}, {max}): {ticks:?}");
        for t in &ticks {
            prop_assert!(*t >= min - tolerance && *t <= max + tolerance);
        }
        for pair in ticks.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn viewport_maps_limits_to_edges((x_min, x_max) in limits(), (y_min, y_max) in limits(), r in rect()) {
        let viewport = Viewport::new(&Axis::new(x_min, x_max), &Axis::new(y_min, y_max), r);
        let (left, bottom) = viewport.map(x_min, y_min);
        let (right, top) = viewport.map(x_max, y_max);
        prop_assert!((left - r.left).abs() < EPS);
        prop_assert!((right - r.right()).abs() < EPS);
        prop_assert!((top - r.top).abs() < EPS);
        prop_assert!((bottom - r.bottom()).abs() < EPS);
    }

    #[test]
    fn clipped_segments_lie_inside(
        r in rect(),
        a in (-200.0f64..800.0, -200.0f64..800.0),
        b in (-200.0f64..800.0, -200.0f64..800.0),
    ) {
        if let Some((p, q)) = clip_segment(a, b, r) {
            prop_assert!(inside(p, r), "{p:?} outside {r:?}");
            prop_assert!(inside(q, r), "{q:?} outside {r:?}");
        }
    }

    #[test]
    fn segments_inside_are_unchanged(
        r in rect(),
        fa in (0.0f64..=1.0, 0.0f64..=1.0),
        fb in (0.0f64..=1.0, 0.0f64..=1.0),
    ) {
        let a = (r.left + fa.0 * r.width, r.top + fa.1 * r.height);
        let b = (r.left + fb.0 * r.width, r.top + fb.1 * r.height);
        let clipped = clip_segment(a, b, r);
        prop_assert!(clipped.is_some());
        let (p, q) = clipped.unwrap_or_default();
        prop_assert!((p.0 - a.0).abs() < EPS && (p.1 - a.1).abs() < EPS);
        prop_assert!((q.0 - b.0).abs() < EPS && (q.1 - b.1).abs() < EPS);
    }

    #[test]
    fn set_data_keeps_shorter_length(
        xs in prop::collection::vec(-10.0f64..10.0, 0..50),
        ys in prop::collection::vec(-10.0f64..10.0, 0..50),
    ) {
        let mut builder = SceneBuilder::new(SceneStyle::default());
        let handle = builder.add_line();
        let mut scene = builder.build();
        scene.set_data(handle, &xs, &ys);
        let line = scene.line(handle).unwrap();
        prop_assert_eq!(line.len(), xs.len().min(ys.len()));
        prop_assert_eq!(line.xs(), &xs[..line.len()]);
        prop_assert_eq!(line.ys(), &ys[..line.len()]);
    }

    #[test]
    fn plain_canvas_fills_every_cell(
        cols in 30u16..160,
        rows in 10u16..60,
        points in prop::collection::vec((-3.0f64..3.0, -3.0f64..3.0), 0..40),
    ) {
        let mut builder = SceneBuilder::new(SceneStyle::default());
        let handle = builder.add_line();
        let mut scene = builder.build();
        let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        scene.set_data(handle, &xs, &ys);

        let lines = TerminalCanvas::new(cols, rows).colored(false).render_lines(&scene);
        prop_assert_eq!(lines.len(), usize::from(rows));
        for line in &lines {
            prop_assert_eq!(line.chars().count(), usize::from(cols));
        }
    }
}
