#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::cast_precision_loss)]

use kinematics::{
    Ballistic, Lissajous, LissajousSampler, STANDARD_GRAVITY, TrajectorySet, angle_series,
    linspace, trajectory_x, trajectory_y,
};
use proptest::prelude::*;

// =============================================================================
// Time grid properties
// =============================================================================

proptest! {
    #[test]
    fn grid_has_requested_shape(
        duration in 0.0f64..1000.0,
        points in 2usize..5000,
    ) {
        let t = linspace(0.0, duration, points);
        prop_assert_eq!(t.len(), points);
        prop_assert_eq!(t[0], 0.0);
        prop_assert_eq!(t[points - 1], duration);
        prop_assert!(
            t.windows(2).all(|w| w[0] <= w[1]),
            "grid not monotone for duration={}, points={}",
            duration, points
        );
    }

    #[test]
    fn grid_steps_are_uniform(
        start in -100.0f64..100.0,
        span in 0.001f64..100.0,
        points in 3usize..500,
    ) {
        let t = linspace(start, start + span, points);
        let step = span / (points - 1) as f64;
        for w in t.windows(2) {
            prop_assert!(((w[1] - w[0]) - step).abs() < 1e-9 * span.max(1.0));
        }
    }
}

// =============================================================================
// Ballistic sampler properties
// =============================================================================

proptest! {
    #[test]
    fn ballistic_sampling_is_deterministic(
        speed in 0.0f64..100.0,
        gravity in 0.0f64..30.0,
        angle in -90.0f64..90.0,
        points in 2usize..400,
    ) {
        let b = Ballistic::new(speed, gravity);
        let times = linspace(0.0, 5.0, points);
        let first = b.sample(angle, &times);
        let second = b.sample(angle, &times);
        prop_assert_eq!(first.x(), second.x());
        prop_assert_eq!(first.y(), second.y());
    }

    #[test]
    fn horizontal_launch_only_falls(
        speed in 0.1f64..100.0,
        gravity in 0.1f64..30.0,
        t in 0.001f64..10.0,
    ) {
        prop_assert!((trajectory_x(t, speed, 0.0) - speed * t).abs() < 1e-9 * speed * t);
        prop_assert!(trajectory_y(t, speed, 0.0, gravity) < 0.0);
    }

    #[test]
    fn horizontal_launch_without_gravity_stays_level(
        speed in 0.0f64..100.0,
        t in 0.0f64..10.0,
    ) {
        prop_assert_eq!(trajectory_y(t, speed, 0.0, 0.0), 0.0);
    }

    #[test]
    fn apex_sample_matches_closed_form(
        speed in 5.0f64..50.0,
        angle in 10.0f64..80.0,
    ) {
        let b = Ballistic::new(speed, STANDARD_GRAVITY);
        let apex = b.apex_time(angle).unwrap();
        let duration = 2.0 * apex + 1.0;
        let points = 1000;
        let set = TrajectorySet::sample(&b, &[angle], duration, points);
        let step = duration / (points - 1) as f64;
        let index = set.get(0).and_then(|t| t.apex_index()).unwrap();
        prop_assert!(
            (set.times()[index] - apex).abs() <= step,
            "sampled apex at {} but closed form gives {}",
            set.times()[index], apex
        );
    }

    #[test]
    fn prefixes_are_nested(
        angle in 0.0f64..90.0,
        a in 0usize..300,
        b in 0usize..300,
    ) {
        let (f1, f2) = if a <= b { (a, b) } else { (b, a) };
        let set = TrajectorySet::sample(
            &Ballistic::new(20.0, STANDARD_GRAVITY),
            &[angle],
            4.5,
            300,
        );
        let t = set.get(0).unwrap();
        let (x1, y1) = t.prefix(f1);
        let (x2, y2) = t.prefix(f2);
        prop_assert_eq!(x1.len(), f1);
        prop_assert_eq!(x1, &x2[..f1]);
        prop_assert_eq!(y1, &y2[..f1]);
    }
}

// =============================================================================
// Lissajous sampler properties
// =============================================================================

proptest! {
    #[test]
    fn lissajous_loops_after_frame_count(
        fx in 1u32..10,
        fy in 1u32..10,
        frames in 1usize..1000,
    ) {
        let s = LissajousSampler::new(
            Lissajous::new(1.5, f64::from(fx), f64::from(fy)),
            500,
            frames,
        );
        let start = s.y(0);
        let end = s.y(frames);
        for (a, b) in start.iter().zip(&end) {
            prop_assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
        }
    }

    #[test]
    fn lissajous_stays_within_amplitude(
        amplitude in 0.1f64..10.0,
        frame in 0usize..480,
    ) {
        let s = LissajousSampler::new(Lissajous::new(amplitude, 3.0, 5.0), 400, 480);
        let bound = amplitude * (1.0 + 1e-12);
        prop_assert!(s.x().iter().all(|v| v.abs() <= bound));
        prop_assert!(s.y(frame).iter().all(|v| v.abs() <= bound));
    }

    #[test]
    fn lissajous_sampling_is_deterministic(frame in 0usize..960) {
        let s = LissajousSampler::new(Lissajous::new(1.5, 3.0, 5.0), 2000, 480);
        prop_assert_eq!(s.y(frame), s.y(frame));
    }
}

// =============================================================================
// Angle series
// =============================================================================

proptest! {
    #[test]
    fn angle_series_is_arithmetic(
        start in -90.0f64..90.0,
        step in 0.1f64..30.0,
        count in 0usize..50,
    ) {
        let angles = angle_series(start, step, count);
        prop_assert_eq!(angles.len(), count);
        for w in angles.windows(2) {
            prop_assert!(((w[1] - w[0]) - step).abs() < 1e-9);
        }
    }
}
