use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wheel_testing::prelude::*;
use wheel_ui::WheelSpec;

const ITEM_COUNT_SAMPLES: &[usize] = &[100, 10_000];
const VISIBLE_ITEM_SAMPLES: &[i32] = &[5, 11];
const DRAG_STEPS: usize = 32;
const DRAG_STEP_PX: f32 = -12.0;

fn cyclic_spec(visible_items: i32) -> WheelSpec {
    WheelSpec {
        visible_items,
        ..WheelSpec::new().cyclic(true)
    }
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("wheel_drag");
    for &count in ITEM_COUNT_SAMPLES {
        group.bench_with_input(BenchmarkId::new("items", count), &count, |b, &count| {
            let mut rule = WheelTestRule::<TestItemView>::with_adapter(
                cyclic_spec(5),
                numbered_adapter(count),
            );
            // Fill the recycle pools so steady-state reuse is measured.
            rule.capture();

            b.iter(|| {
                rule.perform_touch_input(|scope| {
                    scope.down(100.0);
                    for _ in 0..DRAG_STEPS {
                        scope.move_by(DRAG_STEP_PX);
                        let mut painter = RecordingPainter::new();
                        scope.wheel().draw(&mut painter);
                        black_box(&painter);
                    }
                    scope.hold(100);
                });
                black_box(rule.wheel().current_item());
            });
        });
    }
    group.finish();
}

fn bench_fling(c: &mut Criterion) {
    let mut group = c.benchmark_group("wheel_fling");
    for &count in ITEM_COUNT_SAMPLES {
        group.bench_with_input(BenchmarkId::new("items", count), &count, |b, &count| {
            let mut rule = WheelTestRule::<TestItemView>::with_adapter(
                cyclic_spec(5),
                numbered_adapter(count),
            );
            rule.capture();

            b.iter(|| {
                rule.perform_touch_input(|scope| {
                    scope.down(160.0);
                    scope.swipe_by(-120.0, 4);
                });
                black_box(rule.wheel().current_item());
            });
        });
    }
    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("wheel_rebuild");
    for &visible_items in VISIBLE_ITEM_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("visible_items", visible_items),
            &visible_items,
            |b, &visible_items| {
                let rule = WheelTestRule::<TestItemView>::with_adapter(
                    cyclic_spec(visible_items),
                    numbered_adapter(1_000),
                );
                let mut cursor = 0;

                b.iter(|| {
                    cursor = (cursor + 7) % 1_000;
                    rule.wheel().set_current_item(cursor, false);
                    let painter = rule.capture();
                    black_box(painter.items.len());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_drag, bench_fling, bench_rebuild);
criterion_main!(benches);
