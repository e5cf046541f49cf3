//! Scroll engine turning pointer input and frame ticks into offset deltas.
//!
//! [`WheelScroller`] owns no timer. The owner feeds it pointer events and
//! frame times and applies the returned [`ScrollerEvent`]s in order. Between
//! frames the owner checks [`WheelScroller::needs_frame`] to decide whether
//! another frame callback is required.

use crate::gesture_constants::{
    MAX_FLING_DURATION_MS, MAX_FLING_VELOCITY, MIN_DELTA_FOR_SCROLLING, MIN_FLING_VELOCITY,
    SCROLLING_DURATION_MS,
};
use crate::input::{PointerEvent, PointerEventKind};
use crate::velocity_tracker::VelocityTracker1D;
use smallvec::SmallVec;
use wheel_animation::{Easing, FlingCalculator, FlingInfo, SharedInterpolator};

/// Tuning for [`WheelScroller`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollerConfig {
    /// Used by programmatic scrolls that pass a zero duration and by snapping.
    pub scrolling_duration_ms: u64,
    /// Residual offsets at or below this are left alone when justifying.
    pub min_delta_for_scrolling: i32,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
    pub max_fling_duration_ms: u64,
    pub density: f32,
    pub friction: f32,
    pub interpolator: Easing,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            scrolling_duration_ms: SCROLLING_DURATION_MS,
            min_delta_for_scrolling: MIN_DELTA_FOR_SCROLLING,
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
            max_fling_duration_ms: MAX_FLING_DURATION_MS,
            density: 1.0,
            friction: FlingCalculator::DEFAULT_FRICTION,
            interpolator: Easing::ViscousFluid,
        }
    }
}

impl ScrollerConfig {
    pub fn with_scrolling_duration(mut self, duration_ms: u64) -> Self {
        self.scrolling_duration_ms = duration_ms;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_fling_velocity_range(mut self, min: f32, max: f32) -> Self {
        self.min_fling_velocity = min;
        self.max_fling_velocity = max;
        self
    }

    pub fn with_max_fling_duration(mut self, duration_ms: u64) -> Self {
        self.max_fling_duration_ms = duration_ms;
        self
    }

    pub fn with_interpolator(mut self, interpolator: Easing) -> Self {
        self.interpolator = interpolator;
        self
    }
}

/// What the engine asks its owner to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollerEvent {
    /// First movement of a scroll cycle. Emitted once until [`ScrollerEvent::Settled`].
    Started,
    /// Move the content by `delta` pixels; positive moves it down.
    Progress { delta: i32 },
    /// A drag or animation ended away from an item boundary. The owner may
    /// answer with [`WheelScroller::settle_by`].
    JustifyRequested,
    /// The cycle is over.
    Settled,
}

pub type ScrollerEvents = SmallVec<[ScrollerEvent; 4]>;

/// Coarse engine state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollerPhase {
    Idle,
    Dragging,
    Flinging,
    Scrolling,
    /// Snapping back to an item boundary, or waiting one frame to settle.
    Justifying,
}

#[derive(Clone, Copy, Debug)]
enum Trajectory {
    Fling(FlingInfo),
    Tween { distance: i32, duration_ms: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MotionKind {
    Fling,
    Scroll,
    Justify,
}

#[derive(Clone, Copy, Debug)]
struct Motion {
    kind: MotionKind,
    trajectory: Trajectory,
    start_time_nanos: Option<u64>,
    /// Travel already reported through `Progress`.
    reported: i32,
}

impl Motion {
    fn final_position(&self) -> i32 {
        match self.trajectory {
            Trajectory::Fling(info) => info.final_position().round() as i32,
            Trajectory::Tween { distance, .. } => distance,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum State {
    Idle,
    Dragging { last_y: f32 },
    Animating(Motion),
    /// Settles on the next frame unless the owner starts a snap first.
    AwaitingSettle,
}

pub struct WheelScroller {
    config: ScrollerConfig,
    interpolator: SharedInterpolator,
    fling: FlingCalculator,
    tracker: VelocityTracker1D,
    state: State,
    scrolling_performed: bool,
}

impl WheelScroller {
    pub fn new(config: ScrollerConfig) -> Self {
        Self {
            interpolator: config.interpolator.shared(),
            fling: FlingCalculator::new(config.friction, config.density),
            tracker: VelocityTracker1D::new(),
            state: State::Idle,
            scrolling_performed: false,
            config,
        }
    }

    pub fn config(&self) -> &ScrollerConfig {
        &self.config
    }

    pub fn phase(&self) -> ScrollerPhase {
        match self.state {
            State::Idle => ScrollerPhase::Idle,
            State::Dragging { .. } => ScrollerPhase::Dragging,
            State::Animating(motion) => match motion.kind {
                MotionKind::Fling => ScrollerPhase::Flinging,
                MotionKind::Scroll => ScrollerPhase::Scrolling,
                MotionKind::Justify => ScrollerPhase::Justifying,
            },
            State::AwaitingSettle => ScrollerPhase::Justifying,
        }
    }

    /// Whether the owner must deliver another frame.
    pub fn needs_frame(&self) -> bool {
        matches!(self.state, State::Animating(_) | State::AwaitingSettle)
    }

    /// Whether a `Started` was emitted and not yet matched by `Settled`.
    pub fn is_scrolling_performed(&self) -> bool {
        self.scrolling_performed
    }

    /// Swaps the curve used by tween animations, ending any running animation first.
    pub fn set_interpolator(&mut self, interpolator: SharedInterpolator) -> ScrollerEvents {
        let events = self.interrupt();
        self.interpolator = interpolator;
        events
    }

    pub fn on_touch(&mut self, event: PointerEvent) -> ScrollerEvents {
        let mut events = ScrollerEvents::new();
        match event.kind {
            PointerEventKind::Down => {
                // Grabbing the wheel stops any animation without ending the cycle.
                self.state = State::Dragging { last_y: event.y };
                self.tracker.reset();
                self.tracker.add_data_point(event.uptime_ms, event.y);
            }
            PointerEventKind::Move => {
                let State::Dragging { last_y } = self.state else {
                    return events;
                };
                self.tracker.add_data_point(event.uptime_ms, event.y);
                let delta = (event.y - last_y) as i32;
                if delta != 0 {
                    self.start_scrolling(&mut events);
                    events.push(ScrollerEvent::Progress { delta });
                    self.state = State::Dragging { last_y: event.y };
                }
            }
            PointerEventKind::Up => {
                if !matches!(self.state, State::Dragging { .. }) {
                    return events;
                }
                self.tracker.add_data_point(event.uptime_ms, event.y);
                let velocity = self
                    .tracker
                    .calculate_velocity_with_max(self.config.max_fling_velocity * self.config.density);
                if velocity.abs() >= self.config.min_fling_velocity * self.config.density {
                    self.start_fling(velocity, &mut events);
                } else {
                    self.justify(&mut events);
                }
            }
            PointerEventKind::Cancel => {
                if matches!(self.state, State::Dragging { .. }) {
                    self.justify(&mut events);
                }
            }
        }
        events
    }

    /// Animates the content by `distance` pixels over `duration_ms` (or the
    /// configured default when zero). Replaces any running animation.
    pub fn scroll(&mut self, distance: i32, duration_ms: u64) -> ScrollerEvents {
        let mut events = ScrollerEvents::new();
        self.start_tween(MotionKind::Scroll, distance, duration_ms);
        self.start_scrolling(&mut events);
        events
    }

    /// Snap animation answering a [`ScrollerEvent::JustifyRequested`]. Ends with `Settled`.
    pub fn settle_by(&mut self, distance: i32) -> ScrollerEvents {
        let mut events = ScrollerEvents::new();
        self.start_tween(MotionKind::Justify, distance, 0);
        self.start_scrolling(&mut events);
        events
    }

    /// Ends a running fling or scroll where it is and asks for a snap.
    /// Drags and idle engines are left alone.
    pub fn interrupt(&mut self) -> ScrollerEvents {
        let mut events = ScrollerEvents::new();
        match self.state {
            State::Animating(motion) if motion.kind != MotionKind::Justify => {
                log::trace!("interrupting {:?} animation", motion.kind);
                self.justify(&mut events);
            }
            State::Animating(_) => {
                self.state = State::AwaitingSettle;
            }
            _ => {}
        }
        events
    }

    /// Drops all motion state without emitting anything.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.scrolling_performed = false;
        self.tracker.reset();
    }

    /// Advances the running animation to `frame_time_nanos`.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> ScrollerEvents {
        let mut events = ScrollerEvents::new();
        match self.state {
            State::Animating(mut motion) => {
                let start = *motion.start_time_nanos.get_or_insert(frame_time_nanos);
                let elapsed_ms = frame_time_nanos.saturating_sub(start) / 1_000_000;
                let (position, finished) = self.sample(&motion, elapsed_ms);
                let delta = position - motion.reported;
                motion.reported = position;
                if delta != 0 {
                    events.push(ScrollerEvent::Progress { delta });
                }
                if finished {
                    match motion.kind {
                        MotionKind::Fling | MotionKind::Scroll => self.justify(&mut events),
                        MotionKind::Justify => self.finish_scrolling(&mut events),
                    }
                } else {
                    self.state = State::Animating(motion);
                }
            }
            State::AwaitingSettle => self.finish_scrolling(&mut events),
            State::Idle | State::Dragging { .. } => {}
        }
        events
    }

    fn sample(&self, motion: &Motion, elapsed_ms: u64) -> (i32, bool) {
        let target = motion.final_position();
        let position = match motion.trajectory {
            Trajectory::Fling(info) => {
                if info.is_finished(elapsed_ms) {
                    return (target, true);
                }
                info.position(elapsed_ms).round() as i32
            }
            Trajectory::Tween {
                distance,
                duration_ms,
            } => {
                if elapsed_ms >= duration_ms {
                    return (target, true);
                }
                let fraction = elapsed_ms as f32 / duration_ms as f32;
                (distance as f32 * self.interpolator.interpolate(fraction)).round() as i32
            }
        };
        (position, (position - target).abs() < self.config.min_delta_for_scrolling)
    }

    fn start_tween(&mut self, kind: MotionKind, distance: i32, duration_ms: u64) {
        let duration_ms = if duration_ms == 0 {
            self.config.scrolling_duration_ms
        } else {
            duration_ms
        };
        self.state = State::Animating(Motion {
            kind,
            trajectory: Trajectory::Tween {
                distance,
                duration_ms,
            },
            start_time_nanos: None,
            reported: 0,
        });
    }

    fn start_fling(&mut self, velocity: f32, events: &mut ScrollerEvents) {
        let info = self
            .fling
            .fling_info(velocity)
            .with_max_duration(self.config.max_fling_duration_ms);
        log::debug!(
            "fling at {:.0}px/s over {:.0}px in {}ms",
            velocity,
            info.distance,
            info.duration_ms
        );
        self.state = State::Animating(Motion {
            kind: MotionKind::Fling,
            trajectory: Trajectory::Fling(info),
            start_time_nanos: None,
            reported: 0,
        });
        self.start_scrolling(events);
    }

    fn start_scrolling(&mut self, events: &mut ScrollerEvents) {
        if !self.scrolling_performed {
            self.scrolling_performed = true;
            events.push(ScrollerEvent::Started);
        }
    }

    fn justify(&mut self, events: &mut ScrollerEvents) {
        self.state = State::AwaitingSettle;
        events.push(ScrollerEvent::JustifyRequested);
    }

    fn finish_scrolling(&mut self, events: &mut ScrollerEvents) {
        self.state = State::Idle;
        if self.scrolling_performed {
            self.scrolling_performed = false;
            events.push(ScrollerEvent::Settled);
        }
    }
}

impl Default for WheelScroller {
    fn default() -> Self {
        Self::new(ScrollerConfig::default())
    }
}

impl std::fmt::Debug for WheelScroller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelScroller")
            .field("phase", &self.phase())
            .field("scrolling_performed", &self.scrolling_performed)
            .finish()
    }
}
