//! Headless date picker: three wheels, scripted gestures, text output.

mod picker;
mod views;

use picker::{Date, DatePicker};
use std::time::Duration;
use web_time::Instant;
use wheel_core::Runtime;
use wheel_foundation::{PointerEvent, PointerEventKind, WheelError};
use wheel_ui::{ScrollLifecycle, WheelView};

const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 2_000;

/// Wall clock shared by pointer events and frame callbacks.
struct Clock {
    start: Instant,
}

impl Clock {
    fn nanos(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }

    fn millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

struct Demo {
    runtime: Runtime,
    clock: Clock,
    picker: DatePicker,
}

impl Demo {
    fn frame(&self) {
        std::thread::sleep(FRAME);
        self.runtime.drain_frame_callbacks(self.clock.nanos());
    }

    fn settle(&self) {
        let mut frames = 0;
        while self.runtime.needs_frame() && frames < MAX_FRAMES {
            self.frame();
            frames += 1;
        }
        log::debug!("settled after {frames} frame(s)");
    }

    fn touch<V: wheel_foundation::ItemView + 'static>(
        &self,
        wheel: &WheelView<V>,
        kind: PointerEventKind,
        y: f32,
    ) {
        wheel.on_touch_event(PointerEvent::new(kind, 0.0, y, self.clock.millis()));
    }

    /// Drags `wheel` by `dy` over `steps` frames, optionally pausing before
    /// release so no fling follows.
    fn drag<V: wheel_foundation::ItemView + 'static>(
        &self,
        wheel: &WheelView<V>,
        dy: f32,
        steps: u32,
        pause_before_release: bool,
    ) {
        let from = wheel.size().height as f32 / 2.0;
        self.touch(wheel, PointerEventKind::Down, from);
        let step = dy / steps.max(1) as f32;
        let mut y = from;
        for _ in 0..steps.max(1) {
            self.frame();
            y += step;
            self.touch(wheel, PointerEventKind::Move, y);
        }
        if pause_before_release {
            for _ in 0..4 {
                self.frame();
            }
        }
        self.touch(wheel, PointerEventKind::Up, y);
        self.settle();
    }

    fn tap<V: wheel_foundation::ItemView + 'static>(&self, wheel: &WheelView<V>, y: f32) {
        self.touch(wheel, PointerEventKind::Down, y);
        self.frame();
        self.touch(wheel, PointerEventKind::Up, y);
        self.settle();
    }

    fn report(&self, step: &str) {
        let [days, months, years] = self.picker.render();
        log::info!("{step}: {}", self.picker.date());
        println!("  day   |{days}|");
        println!("  month |{months}|");
        println!("  year  |{years}|");
    }
}

fn main() -> Result<(), WheelError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let runtime = Runtime::new();
    let initial = Date {
        year: 2024,
        month: 0,
        day: 31,
    };
    let picker = DatePicker::new(&runtime.handle(), initial)?;
    picker.measure_and_layout();
    for (name, wheel) in ["day", "month", "year"].into_iter().zip(picker.wheels()) {
        wheel.add_scrolling_listener(move |wheel, lifecycle| {
            if lifecycle == ScrollLifecycle::Finished {
                log::debug!("{name} wheel stopped on {}", wheel.current_item());
            }
        });
    }
    let demo = Demo {
        runtime,
        clock: Clock {
            start: Instant::now(),
        },
        picker,
    };

    println!("=== Wheel Picker Demo ===");
    demo.report("start");

    let item = demo.picker.months.item_height() as f32;
    demo.drag(&demo.picker.months, -item, 6, true);
    demo.report("month dragged up one row, day clamped to the leap February");

    demo.drag(&demo.picker.years, -2.0 * item, 3, false);
    demo.report("year flung");

    let below_center = demo.picker.days.size().height as f32 / 2.0 + item * 1.5;
    demo.tap(&demo.picker.days, below_center);
    demo.report("tapped the row under the selection");

    demo.picker.months.scroll(-3, 400);
    demo.settle();
    demo.report("months scrolled back three rows, wrapping to the end of the year");

    Ok(())
}
