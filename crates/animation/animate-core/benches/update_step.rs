use std::cell::Cell;
use std::rc::Rc;

use animate_core::{AnimationEvents, Engine};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn populated(instances: u32) -> Engine<u32> {
    let sink = Rc::new(Cell::new(0.0_f32));
    let mut engine: Engine<u32> = Engine::default();
    let tpl = engine.create_animation(AnimationEvents::new().on_update(move |_, p, _| {
        sink.set(sink.get() + p);
    }));
    for i in 0..instances {
        engine
            .attach_animation(tpl, i, 1.0 + (i % 7) as f32, 0, AnimationEvents::new())
            .expect("template registered above");
    }
    engine
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_animations");
    for &n in &[100u32, 1_000, 10_000] {
        let mut engine = populated(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| engine.update_animations(black_box(1.0 / 60.0)));
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    // Short-lived instances: every pass finishes each one and attaches a replacement.
    c.bench_function("attach_finish_churn_1000", |b| {
        let mut engine: Engine<u32> = Engine::default();
        let own_id = Rc::new(Cell::new(None));
        let slot = own_id.clone();
        let tpl = engine.create_animation(AnimationEvents::new().on_end(move |eng, i| {
            if let Some(tpl) = slot.get() {
                eng.attach_animation(tpl, *i, 1.0 / 60.0, 1, AnimationEvents::new())
                    .expect("template registered above");
            }
        }));
        own_id.set(Some(tpl));
        for i in 0..1_000 {
            engine
                .attach_animation(tpl, i, 1.0 / 60.0, 1, AnimationEvents::new())
                .expect("template registered above");
        }
        b.iter(|| engine.update_animations(black_box(1.0 / 60.0)));
    });
}

criterion_group!(benches, bench_update, bench_churn);
criterion_main!(benches);
