//! Benchmarks for per-frame processing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use motion_coach::{
    constants::{FACE_LEFT_EYE, FACE_RIGHT_EYE, POSE_LEFT_EAR, POSE_NOSE, POSE_RIGHT_EAR},
    detector::{GestureDetector, GestureProfile},
    filters::{create_filter, SignalFilter},
    landmarks::{Landmark, LandmarkFrame, LandmarkSet},
    monitor::{MonitorSettings, WellbeingMonitor},
    session::ExerciseSession,
};

/// Slow side-to-side tilt with landmark jitter
fn noisy_tilt_frames(count: u64) -> Vec<LandmarkFrame> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 0.05;
            let degrees = 25.0 * t.sin() + 2.0 * (rand::random::<f64>() - 0.5);
            let radians = degrees.to_radians();
            LandmarkFrame::new(i * 33).with_pose(
                LandmarkSet::new()
                    .set(POSE_NOSE, Landmark::new(0.5, 0.45))
                    .set(POSE_LEFT_EAR, Landmark::new(0.4, 0.5))
                    .set(
                        POSE_RIGHT_EAR,
                        Landmark::new(0.4 + 0.2 * radians.cos(), 0.5 + 0.2 * radians.sin()),
                    )
                    .build(),
            )
        })
        .collect()
}

fn noisy_face_frames(count: u64) -> Vec<LandmarkFrame> {
    (0..count)
        .map(|i| {
            let ear = (if i % 90 < 4 { 0.05 } else { 0.3 }) + 0.02 * rand::random::<f64>();
            let mut set = LandmarkSet::new();
            for (eye, x) in [(FACE_LEFT_EYE, 0.35), (FACE_RIGHT_EYE, 0.65)] {
                let [top, bottom, outer, inner] = eye;
                set = set
                    .set(top, Landmark::new(x, 0.40))
                    .set(bottom, Landmark::new(x, 0.40 + ear * 0.1))
                    .set(outer, Landmark::new(x - 0.05, 0.42))
                    .set(inner, Landmark::new(x + 0.05, 0.42));
            }
            LandmarkFrame::new(i * 33).with_face(set.build())
        })
        .collect()
}

fn benchmark_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    let samples: Vec<f64> = (0..100)
        .map(|i| 10.0 * (i as f64 * 0.1).sin() + 0.5 * rand::random::<f64>())
        .collect();

    for spec in ["none", "moving_average:5", "moving_average:8", "exponential:0.4"] {
        group.bench_with_input(BenchmarkId::new("sequence_100", spec), &samples, |b, samples| {
            let mut filter: Box<dyn SignalFilter> = create_filter(spec).unwrap();
            b.iter(|| {
                for &value in samples {
                    black_box(filter.apply(black_box(value)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_detectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("detectors");
    let frames = noisy_tilt_frames(300);

    group.bench_function("neck_tilt_300_frames", |b| {
        b.iter(|| {
            let mut detector = GestureDetector::new(GestureProfile::neck_tilt()).unwrap();
            for frame in &frames {
                black_box(detector.process_frame(black_box(frame)));
            }
        });
    });

    group.bench_function("raw_signal", |b| {
        let mut detector = GestureDetector::new(GestureProfile::head_rotation()).unwrap();
        let mut i = 0u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            black_box(detector.process_signal(black_box(0.5 + 0.2 * (f64::from(i) * 0.05).sin())));
        });
    });

    group.finish();
}

fn benchmark_session_and_monitor(c: &mut Criterion) {
    let tilt = noisy_tilt_frames(300);
    let faces = noisy_face_frames(300);

    c.bench_function("session_300_frames", |b| {
        b.iter(|| {
            let mut session = ExerciseSession::new(GestureProfile::neck_tilt(), 1_000, 2_500).unwrap();
            for frame in &tilt {
                black_box(session.process(black_box(frame)));
            }
        });
    });

    c.bench_function("monitor_300_frames", |b| {
        b.iter(|| {
            let mut monitor = WellbeingMonitor::new(MonitorSettings::default()).unwrap();
            for frame in &faces {
                black_box(monitor.process(black_box(frame)));
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_filters,
    benchmark_detectors,
    benchmark_session_and_monitor
);
criterion_main!(benches);
