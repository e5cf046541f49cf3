use crate::views::RecordingPainter;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wheel_core::{Runtime, RuntimeHandle};
use wheel_foundation::{ItemView, PointerEvent, PointerEventKind};
use wheel_graphics::IntSize;
use wheel_ui::{MeasureSpec, ScrollLifecycle, SharedAdapter, WheelSpec, WheelView};

/// Spacing of injected events and of frames driven by [`WheelTestRule::run_until_idle`].
pub const FRAME_INTERVAL_MS: u64 = 16;

const MAX_IDLE_FRAMES: usize = 10_000;

/// Notification observed on the wheel under test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    Changed { old: i32, new: i32 },
    Scroll(ScrollLifecycle),
    Clicked(i32),
}

/// Shared log of wheel notifications, filled by listeners it installs.
#[derive(Clone, Debug, Default)]
pub struct WheelEventLog {
    events: Rc<RefCell<Vec<RecordedEvent>>>,
    invalidations: Rc<Cell<usize>>,
}

impl WheelEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to every notification kind of `wheel`.
    pub fn attach<V: ItemView + 'static>(&self, wheel: &WheelView<V>) {
        let events = Rc::clone(&self.events);
        wheel.add_changing_listener(move |_, old, new| {
            events.borrow_mut().push(RecordedEvent::Changed { old, new });
        });
        let events = Rc::clone(&self.events);
        wheel.add_scrolling_listener(move |_, lifecycle| {
            events.borrow_mut().push(RecordedEvent::Scroll(lifecycle));
        });
        let events = Rc::clone(&self.events);
        wheel.add_clicking_listener(move |_, index| {
            events.borrow_mut().push(RecordedEvent::Clicked(index));
        });
        let invalidations = Rc::clone(&self.invalidations);
        wheel.add_invalidate_callback(move || invalidations.set(invalidations.get() + 1));
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn changes(&self) -> Vec<(i32, i32)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::Changed { old, new } => Some((*old, *new)),
                _ => None,
            })
            .collect()
    }

    pub fn clicks(&self) -> Vec<i32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::Clicked(index) => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn count_scroll(&self, lifecycle: ScrollLifecycle) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| **event == RecordedEvent::Scroll(lifecycle))
            .count()
    }

    /// Redraw requests seen so far.
    pub fn invalidations(&self) -> usize {
        self.invalidations.get()
    }
}

/// Headless harness for exercising a wheel in tests.
///
/// Owns the runtime the wheel schedules its animation frames on and a single
/// monotonic clock shared by injected pointer events and drained frames, so
/// velocity tracking and animations see consistent time.
pub struct WheelTestRule<V: ItemView + 'static> {
    runtime: Runtime,
    wheel: WheelView<V>,
    log: WheelEventLog,
    now_ms: u64,
}

impl<V: ItemView + 'static> WheelTestRule<V> {
    pub fn new(spec: WheelSpec) -> Self {
        let runtime = Runtime::new();
        let wheel = WheelView::new(&runtime.handle(), spec);
        let log = WheelEventLog::new();
        log.attach(&wheel);
        Self {
            runtime,
            wheel,
            log,
            now_ms: 0,
        }
    }

    /// Attaches `adapter`, then measures without constraints and lays the
    /// wheel out at the measured size.
    pub fn with_adapter(spec: WheelSpec, adapter: SharedAdapter<V>) -> Self {
        let rule = Self::new(spec);
        rule.wheel.set_adapter(Some(adapter));
        rule.measure_and_layout();
        rule
    }

    pub fn wheel(&self) -> &WheelView<V> {
        &self.wheel
    }

    pub fn log(&self) -> &WheelEventLog {
        &self.log
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn measure_and_layout(&self) -> IntSize {
        let size = self
            .wheel
            .measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        self.wheel.layout(size.width, size.height);
        size
    }

    /// Moves the clock forward and drains the frame callbacks due by then.
    pub fn advance_frame(&mut self, millis: u64) {
        self.now_ms += millis;
        self.runtime.drain_frame_callbacks(self.now_ms * 1_000_000);
    }

    /// Drives frames until nothing is scheduled. Returns the frame count.
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.needs_frame() {
            self.advance_frame(FRAME_INTERVAL_MS);
            frames += 1;
            if frames > MAX_IDLE_FRAMES {
                panic!("wheel never went idle after {frames} frames");
            }
        }
        log::trace!("idle after {frames} frame(s)");
        frames
    }

    /// Runs `block` with a touch scope, then drives the wheel to idle.
    pub fn perform_touch_input(&mut self, block: impl FnOnce(&mut TouchInjectionScope<'_, V>)) {
        {
            let mut scope = TouchInjectionScope {
                rule: self,
                y: 0.0,
                pressed: false,
            };
            block(&mut scope);
        }
        self.run_until_idle();
    }

    /// Paints the wheel into a fresh [`RecordingPainter`].
    pub fn capture(&self) -> RecordingPainter
    where
        RecordingPainter: wheel_ui::WheelPainter<V>,
    {
        let mut painter = RecordingPainter::new();
        self.wheel.draw(&mut painter);
        painter
    }
}

/// Injects pointer events into the wheel with explicit timing.
///
/// Each event advances the rule's clock by [`FRAME_INTERVAL_MS`] unless
/// stated otherwise, draining frames the way a real event loop would.
pub struct TouchInjectionScope<'a, V: ItemView + 'static> {
    rule: &'a mut WheelTestRule<V>,
    y: f32,
    pressed: bool,
}

impl<V: ItemView + 'static> TouchInjectionScope<'_, V> {
    fn send(&mut self, kind: PointerEventKind, y: f32) {
        self.y = y;
        let event = PointerEvent::new(kind, 0.0, y, self.rule.now_ms);
        self.rule.wheel.on_touch_event(event);
    }

    /// The wheel under test, for assertions mid-gesture.
    pub fn wheel(&self) -> &WheelView<V> {
        &self.rule.wheel
    }

    pub fn current_y(&self) -> f32 {
        self.y
    }

    pub fn down(&mut self, y: f32) {
        self.pressed = true;
        self.send(PointerEventKind::Down, y);
    }

    pub fn move_to(&mut self, y: f32) {
        self.rule.advance_frame(FRAME_INTERVAL_MS);
        self.send(PointerEventKind::Move, y);
    }

    pub fn move_by(&mut self, dy: f32) {
        let y = self.y + dy;
        self.move_to(y);
    }

    /// Moves by `dy` in `steps` equal moves, one per frame interval.
    pub fn swipe_by(&mut self, dy: f32, steps: u32) {
        let steps = steps.max(1);
        let step = dy / steps as f32;
        for _ in 0..steps {
            self.move_by(step);
        }
    }

    /// Lets time pass without moving, e.g. to kill velocity before release.
    pub fn hold(&mut self, millis: u64) {
        self.rule.advance_frame(millis);
    }

    pub fn up(&mut self) {
        if self.pressed {
            self.pressed = false;
            let y = self.y;
            self.send(PointerEventKind::Up, y);
        }
    }

    pub fn cancel(&mut self) {
        if self.pressed {
            self.pressed = false;
            let y = self.y;
            self.send(PointerEventKind::Cancel, y);
        }
    }

    pub fn click(&mut self, y: f32) {
        self.down(y);
        self.hold(FRAME_INTERVAL_MS);
        self.up();
    }
}

impl<V: ItemView + 'static> Drop for TouchInjectionScope<'_, V> {
    fn drop(&mut self) {
        // A gesture left pressed is released where it stands.
        self.up();
    }
}
