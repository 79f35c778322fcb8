//! Gesture-classification hot path under a scripted drag storm.

use std::time::{Duration, Instant};

use criterion::{Criterion, criterion_group, criterion_main};
use floatwin_core::event::PointerEvent;
use floatwin_core::gesture::{GestureConfig, GestureInterpreter};
use std::hint::black_box;

fn drag_storm(c: &mut Criterion) {
    c.bench_function("drag_storm_256_moves", |b| {
        let t0 = Instant::now();
        b.iter(|| {
            let mut gi = GestureInterpreter::new(GestureConfig::default());
            let mut n = 0usize;
            gi.process(&PointerEvent::down(100.0, 100.0), t0);
            for i in 0..256 {
                let t = t0 + Duration::from_millis(4 * (i as u64 + 1));
                let events = gi.process(
                    &PointerEvent::moved(100.0 + i as f32 * 2.0, 100.0 + i as f32),
                    t,
                );
                n += events.len();
            }
            gi.process(
                &PointerEvent::up(612.0, 356.0),
                t0 + Duration::from_millis(1100),
            );
            black_box(n)
        });
    });
}

fn pinch_storm(c: &mut Criterion) {
    c.bench_function("pinch_storm_256_samples", |b| {
        let t0 = Instant::now();
        b.iter(|| {
            let mut gi = GestureInterpreter::new(GestureConfig::default());
            let mut acc = 0.0f32;
            gi.process(&PointerEvent::down(100.0, 100.0), t0);
            gi.process(&PointerEvent::SecondaryDown { x: 200.0, y: 100.0 }, t0);
            for i in 0..256 {
                let t = t0 + Duration::from_millis(4 * (i as u64 + 1));
                let x = 200.0 + (i % 64) as f32;
                for ev in gi.process(&PointerEvent::SecondaryMove { x, y: 100.0 }, t) {
                    if let floatwin_core::gesture::GestureEvent::Scale { factor } = ev {
                        acc += factor;
                    }
                }
            }
            black_box(acc)
        });
    });
}

criterion_group!(benches, drag_storm, pinch_storm);
criterion_main!(benches);
