use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kinematics::{Ballistic, Lissajous, LissajousSampler, TrajectorySet, angle_series};

fn bench_ballistic(c: &mut Criterion) {
    let ballistic = Ballistic::new(20.0, 9.81);
    let angles = angle_series(0.0, 15.0, 6);

    c.bench_function("ballistic/sample_6x300", |b| {
        b.iter(|| TrajectorySet::sample(black_box(&ballistic), black_box(&angles), 4.5, 300));
    });
}

fn bench_lissajous(c: &mut Criterion) {
    let sampler = LissajousSampler::new(Lissajous::new(1.5, 3.0, 5.0), 2000, 480);
    let mut y = Vec::with_capacity(2000);

    c.bench_function("lissajous/y_into_2000", |b| {
        let mut frame = 0;
        b.iter(|| {
            sampler.y_into(black_box(frame), &mut y);
            frame = (frame + 1) % 480;
        });
    });
}

criterion_group!(benches, bench_ballistic, bench_lissajous);
criterion_main!(benches);
