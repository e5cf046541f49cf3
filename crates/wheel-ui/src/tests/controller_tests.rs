use super::*;
use std::cell::Cell;
use wheel_foundation::{AdapterChange, AdapterObservers};
use wheel_graphics::Brush;

const ITEM_HEIGHT: i32 = 40;
const FRAME_NANOS: u64 = 16_000_000;

#[derive(Clone, Debug, PartialEq)]
struct Label {
    text: String,
}

impl ItemView for Label {
    fn measured_size(&self) -> IntSize {
        IntSize::new(10 * self.text.chars().count() as i32, ITEM_HEIGHT)
    }
}

#[derive(Default)]
struct Labels {
    count: usize,
    created: Cell<usize>,
    observers: AdapterObservers,
}

impl Labels {
    fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    fn create(&self) -> Label {
        self.created.set(self.created.get() + 1);
        Label {
            text: String::new(),
        }
    }
}

impl WheelAdapter for Labels {
    type View = Label;

    fn item_count(&self) -> usize {
        self.count
    }

    fn item(&self, index: usize, convert_view: Option<Label>) -> Option<Label> {
        let mut view = convert_view.unwrap_or_else(|| self.create());
        view.text = format!("item-{index}");
        Some(view)
    }

    fn empty_item(&self, convert_view: Option<Label>) -> Option<Label> {
        let mut view = convert_view.unwrap_or_else(|| self.create());
        view.text.clear();
        Some(view)
    }

    fn observers(&self) -> &AdapterObservers {
        &self.observers
    }
}

#[derive(Default)]
struct RecordingPainter {
    items: Vec<(String, IntRect)>,
    center: Option<IntRect>,
    shadows: Vec<IntRect>,
}

impl WheelPainter<Label> for RecordingPainter {
    fn draw_item(&mut self, view: &Label, placement: &ItemPlacement) {
        self.items.push((view.text.clone(), placement.bounds));
    }

    fn draw_center_filter(&mut self, _brush: &Brush, bounds: IntRect) {
        self.center = Some(bounds);
    }

    fn draw_shadow(&mut self, _brush: &Brush, bounds: IntRect) {
        self.shadows.push(bounds);
    }
}

fn attach(state: &mut WheelState<Label>, adapter: &Rc<Labels>) {
    let observer = adapter.register_observer(Rc::new(|_: AdapterChange| {}));
    let shared: SharedAdapter<Label> = adapter.clone();
    state.attach_adapter(Some(AttachedAdapter {
        adapter: shared,
        observer,
    }));
}

/// Attached, measured with no constraints and laid out at the measured size.
fn measured_wheel(count: usize, cyclic: bool) -> (WheelState<Label>, Rc<Labels>) {
    let mut state = WheelState::new(WheelSpec::new().cyclic(cyclic));
    let adapter = Rc::new(Labels::with_count(count));
    attach(&mut state, &adapter);
    let size = state.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
    state.layout(size.width, size.height);
    state.take_effects();
    (state, adapter)
}

fn run_frames(state: &mut WheelState<Label>) -> Vec<WheelEvent> {
    let mut time = 0;
    while state.scroller.needs_frame() {
        state.on_frame(time);
        time += FRAME_NANOS;
        assert!(time < 1_000 * FRAME_NANOS, "animation never settled");
    }
    state.take_effects().0
}

fn changes(events: &[WheelEvent]) -> Vec<(i32, i32)> {
    events
        .iter()
        .filter_map(|event| match event {
            WheelEvent::Changed { old, new } => Some((*old, *new)),
            _ => None,
        })
        .collect()
}

#[test]
fn cyclic_selection_wraps_both_ways() {
    for count in [1usize, 2, 7, 12] {
        let (mut state, _adapter) = measured_wheel(count, true);
        let count = count as i32;

        state.set_current_item(count, false);
        assert_eq!(state.current_item, 0);

        state.set_current_item(-1, false);
        assert_eq!(state.current_item, count - 1);
    }
}

#[test]
fn bounded_selection_ignores_out_of_range() {
    let (mut state, _adapter) = measured_wheel(7, false);
    state.set_current_item(3, false);
    state.take_effects();

    for index in [-10, -1, 7, 8, 100] {
        state.set_current_item(index, false);
        assert_eq!(state.current_item, 3);
    }
    assert!(state.take_effects().0.is_empty());
}

#[test]
fn immediate_selection_notifies_and_clears_offset() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.do_scroll(12);
    state.take_effects();

    state.set_current_item(4, false);

    assert_eq!(state.scrolling_offset, 0);
    let (events, redraw) = state.take_effects();
    assert_eq!(events, vec![WheelEvent::Changed { old: 0, new: 4 }]);
    assert!(redraw);
}

#[test]
fn selection_without_items_is_ignored() {
    let (mut state, _adapter) = measured_wheel(0, true);
    state.set_current_item(3, false);
    state.set_current_item(3, true);
    state.scroll(2, 0);

    assert_eq!(state.current_item, 0);
    assert!(!state.scroller.needs_frame());
    assert!(state.take_effects().0.is_empty());

    let mut detached = WheelState::<Label>::new(WheelSpec::new());
    detached.set_current_item(1, false);
    assert_eq!(detached.current_item, 0);
}

#[test]
fn animated_cyclic_selection_takes_short_way() {
    let (mut state, _adapter) = measured_wheel(12, true);
    state.set_current_item(1, false);
    state.take_effects();

    state.set_current_item(10, true);
    let events = run_frames(&mut state);

    assert_eq!(state.current_item, 10);
    assert_eq!(state.scrolling_offset, 0);
    let visited = changes(&events);
    assert!(!visited.is_empty());
    // Never passes through 2..=9.
    assert!(visited
        .iter()
        .all(|(_, new)| [0, 11, 10].contains(new)), "{visited:?}");
    assert_eq!(events.first(), Some(&WheelEvent::ScrollStarted));
    assert_eq!(events.last(), Some(&WheelEvent::ScrollFinished));
}

#[test]
fn animated_bounded_selection_goes_direct() {
    let (mut state, _adapter) = measured_wheel(12, false);
    state.set_current_item(1, false);
    state.take_effects();

    state.set_current_item(10, true);
    let events = run_frames(&mut state);

    assert_eq!(state.current_item, 10);
    let visited = changes(&events);
    assert!(visited.iter().all(|(old, new)| new > old), "{visited:?}");
}

#[test]
fn programmatic_scroll_advances_by_item_count() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.set_current_item(5, false);
    state.take_effects();

    state.scroll(2, 0);
    run_frames(&mut state);
    assert_eq!(state.current_item, 7);

    state.scroll(-3, 200);
    run_frames(&mut state);
    assert_eq!(state.current_item, 4);
    assert_eq!(state.scrolling_offset, 0);
}

#[test]
fn zero_delta_scroll_is_idempotent() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.set_current_item(3, false);

    state.do_scroll(35);
    assert_eq!(state.current_item, 2);
    let cursor = state.current_item;
    let offset = state.scrolling_offset;
    assert!(offset.abs() <= ITEM_HEIGHT / 2, "offset {offset}");

    for _ in 0..10 {
        state.do_scroll(0);
        assert_eq!(state.current_item, cursor);
        assert_eq!(state.scrolling_offset, offset);
    }
}

#[test]
fn bounded_scroll_stops_at_first_item() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.set_current_item(1, false);

    state.do_scroll(3 * ITEM_HEIGHT);

    assert_eq!(state.current_item, 0);
    // One item consumed, the rest stays as overscroll.
    assert_eq!(state.scrolling_offset, 2 * ITEM_HEIGHT);
}

#[test]
fn cyclic_scroll_wraps_past_zero() {
    let (mut state, _adapter) = measured_wheel(5, true);

    state.do_scroll(2 * ITEM_HEIGHT);

    assert_eq!(state.current_item, 3);
    assert_eq!(state.scrolling_offset, 0);
}

#[test]
fn scroll_step_clamps_offset_to_viewport() {
    let (mut state, _adapter) = measured_wheel(10, false);
    let height = state.size().height;

    state.on_scroll(10 * height);

    assert_eq!(state.current_item, 0);
    assert_eq!(state.scrolling_offset, height);
}

#[test]
fn residual_offset_folds_past_one_viewport() {
    let (mut state, _adapter) = measured_wheel(10, false);
    let height = state.size().height;
    assert_eq!(height, 192);

    state.do_scroll(1_000);
    assert_eq!(state.current_item, 0);
    // 1000 % 192 = 40, pushed back out by one viewport.
    assert_eq!(state.scrolling_offset, 40 + height);

    let (mut state, _adapter) = measured_wheel(10, false);
    state.set_current_item(9, false);
    state.do_scroll(-1_000);
    assert_eq!(state.current_item, 9);
    assert_eq!(state.scrolling_offset, -40 - height);
}

#[test]
fn offset_within_one_viewport_is_not_folded() {
    let (mut state, _adapter) = measured_wheel(10, false);
    let height = state.size().height;

    state.do_scroll(height);

    assert_eq!(state.current_item, 0);
    assert_eq!(state.scrolling_offset, height);
}

#[test]
fn huge_programmatic_scroll_saturates() {
    for items in [i32::MAX, i32::MIN] {
        let (mut state, _adapter) = measured_wheel(10, false);
        state.set_current_item(5, false);
        state.take_effects();

        state.scroll(items, 0);
        let events = run_frames(&mut state);

        assert!((0..10).contains(&state.current_item));
        assert_eq!(state.scrolling_offset, 0);
        assert_eq!(events.last(), Some(&WheelEvent::ScrollFinished));
    }
}

#[test]
fn adapter_swap_mid_scroll_ends_the_cycle() {
    let (mut state, _adapter) = measured_wheel(50, false);
    state.scroll(10, 400);
    state.on_frame(0);
    state.on_frame(FRAME_NANOS);
    assert!(state.is_scrolling_performed());

    attach(&mut state, &Rc::new(Labels::with_count(30)));

    let (events, _) = state.take_effects();
    let started = events.iter().filter(|e| **e == WheelEvent::ScrollStarted).count();
    let finished = events.iter().filter(|e| **e == WheelEvent::ScrollFinished).count();
    assert_eq!((started, finished), (1, 1));
    assert!(!state.is_scrolling_performed());
    assert!(!state.scroller.needs_frame());
}

#[test]
fn shifted_window_reuses_recycled_view() {
    let (mut state, adapter) = measured_wheel(20, false);
    state.set_current_item(5, false);
    state.rebuild_items();
    assert_eq!(state.first_item(), 3);
    let created = adapter.created.get();

    state.do_scroll(-ITEM_HEIGHT);
    assert_eq!(state.current_item, 6);
    assert!(state.rebuild_items());

    assert_eq!(adapter.created.get(), created);
    assert_eq!(state.first_item(), 4);
    let stats = state.recycle_stats();
    assert_eq!(stats.items_in_use, 5);
    assert_eq!(stats.items_in_pool, 0);
}

#[test]
fn rebuild_is_stable_when_nothing_moves() {
    let (mut state, _adapter) = measured_wheel(20, false);
    state.set_current_item(5, false);
    state.rebuild_items();
    assert!(!state.rebuild_items());
}

#[test]
fn bounded_edges_use_placeholders() {
    let (mut state, _adapter) = measured_wheel(20, false);
    state.rebuild_items();

    let geometry = state.geometry();
    let adapter_indices: Vec<_> = geometry
        .items
        .iter()
        .map(|placement| placement.adapter_index)
        .collect();
    assert_eq!(adapter_indices, vec![None, None, Some(0), Some(1), Some(2)]);
}

#[test]
fn cyclic_edges_wrap_adapter_indices() {
    let (mut state, _adapter) = measured_wheel(20, true);
    state.rebuild_items();

    let indices: Vec<_> = state
        .geometry()
        .items
        .iter()
        .map(|placement| (placement.index, placement.adapter_index))
        .collect();
    assert_eq!(indices[0], (-2, Some(18)));
    assert_eq!(indices[1], (-1, Some(19)));
}

#[test]
fn tap_below_center_reports_click() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.set_current_item(4, false);
    state.take_effects();

    state.on_touch_event(PointerEvent::down(180.0, 0));
    state.on_touch_event(PointerEvent::up(180.0, 60));

    let events = run_frames(&mut state);
    assert_eq!(events, vec![WheelEvent::Clicked(6)]);
    assert_eq!(state.current_item, 4);
}

#[test]
fn tap_on_selection_is_not_a_click() {
    let (mut state, _adapter) = measured_wheel(10, false);
    let center = state.size().height as f32 / 2.0;

    state.on_touch_event(PointerEvent::down(center, 0));
    state.on_touch_event(PointerEvent::up(center, 60));

    assert!(run_frames(&mut state).is_empty());
}

#[test]
fn cyclic_click_is_wrapped() {
    let (mut state, _adapter) = measured_wheel(10, true);

    state.on_touch_event(PointerEvent::down(10.0, 0));
    state.on_touch_event(PointerEvent::up(10.0, 60));

    assert_eq!(run_frames(&mut state), vec![WheelEvent::Clicked(8)]);
}

#[test]
fn drag_suppresses_click() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.set_current_item(5, false);
    state.take_effects();

    state.on_touch_event(PointerEvent::down(100.0, 0));
    state.on_touch_event(PointerEvent::moved(130.0, 16));
    state.on_touch_event(PointerEvent::up(190.0, 400));

    let events = run_frames(&mut state);
    assert!(!events
        .iter()
        .any(|event| matches!(event, WheelEvent::Clicked(_))));
    assert_eq!(
        events.iter().filter(|e| **e == WheelEvent::ScrollStarted).count(),
        1
    );
    assert_eq!(events.last(), Some(&WheelEvent::ScrollFinished));
    assert_eq!(state.current_item, 4);
    assert_eq!(state.scrolling_offset, 0);
    assert!(!state.is_scrolling_performed());
}

#[test]
fn disabled_wheel_swallows_touch() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.enabled = false;

    assert!(state.on_touch_event(PointerEvent::down(100.0, 0)));
    assert!(state.on_touch_event(PointerEvent::moved(160.0, 16)));
    assert!(state.on_touch_event(PointerEvent::up(160.0, 32)));

    assert_eq!(state.interaction_state(), InteractionState::Idle);
    assert_eq!(state.scrolling_offset, 0);
    assert!(state.take_effects().0.is_empty());
}

#[test]
fn interaction_state_follows_gesture() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.set_current_item(5, false);

    state.on_touch_event(PointerEvent::down(100.0, 0));
    assert_eq!(state.interaction_state(), InteractionState::Dragging);
    state.on_touch_event(PointerEvent::moved(110.0, 16));
    state.on_touch_event(PointerEvent::up(110.0, 300));
    assert_eq!(state.interaction_state(), InteractionState::Settling);

    run_frames(&mut state);
    assert_eq!(state.interaction_state(), InteractionState::Idle);

    state.scroll(3, 0);
    assert_eq!(state.interaction_state(), InteractionState::Animating);
    state.stop_scrolling();
    assert_eq!(state.interaction_state(), InteractionState::Settling);
    run_frames(&mut state);
    assert_eq!(state.scrolling_offset, 0);
}

#[test]
fn soft_invalidation_keeps_offset_and_pools() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.set_current_item(5, false);
    state.rebuild_items();
    state.do_scroll(10);

    state.invalidate_wheel(false);

    assert_eq!(state.scrolling_offset, 10);
    let stats = state.recycle_stats();
    assert_eq!(stats.items_in_use, 0);
    assert!(stats.items_in_pool > 0);

    state.invalidate_wheel(true);
    assert_eq!(state.scrolling_offset, 0);
    let stats = state.recycle_stats();
    assert_eq!((stats.items_in_pool, stats.empty_in_pool), (0, 0));
}

#[test]
fn adapter_swap_resets_position() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.set_current_item(6, false);
    state.do_scroll(5);

    let replacement = Rc::new(Labels::with_count(3));
    attach(&mut state, &replacement);

    assert_eq!(state.current_item, 0);
    assert_eq!(state.scrolling_offset, 0);
    assert_eq!(state.item_count(), 3);
    assert_eq!(state.recycle_stats(), RecycleStats::default());
}

#[test]
fn measure_honours_constraints() {
    let (mut state, _adapter) = measured_wheel(10, false);
    let padding = state.spec.padding;

    // Five visible items less a fifth of one.
    let desired = ITEM_HEIGHT * 5 - ITEM_HEIGHT * 10 / 50;
    assert_eq!(state.size(), IntSize::new(60 + 2 * padding, desired));

    let size = state.measure(MeasureSpec::Exactly(300), MeasureSpec::AtMost(100));
    assert_eq!(size, IntSize::new(300, 100));
    let size = state.measure(MeasureSpec::AtMost(50), MeasureSpec::Exactly(500));
    assert_eq!(size, IntSize::new(50, 500));
}

#[test]
fn measure_respects_minimum_size() {
    let mut state = WheelState::new(WheelSpec::new().min_size(400, 300));
    attach(&mut state, &Rc::new(Labels::with_count(3)));

    let size = state.measure(MeasureSpec::Unspecified, MeasureSpec::AtMost(1_000));
    assert_eq!(size, IntSize::new(400, 300));
}

#[test]
fn item_height_falls_back_to_viewport_share() {
    let mut state = WheelState::<Label>::new(WheelSpec::new());
    state.layout(100, 250);
    assert_eq!(state.resolved_item_height(), 50);
    assert!(state.items_range().is_some());

    let mut empty = WheelState::<Label>::new(WheelSpec::new());
    assert_eq!(empty.resolved_item_height(), 0);
    assert_eq!(empty.items_range(), None);
}

#[test]
fn geometry_centers_selected_item() {
    let (mut state, _adapter) = measured_wheel(20, false);
    state.set_current_item(5, false);
    let mut painter = RecordingPainter::default();

    state.draw(&mut painter);

    let height = state.size().height;
    assert_eq!(painter.items.len(), 5);
    let (text, bounds) = &painter.items[2];
    assert_eq!(text, "item-5");
    assert_eq!((bounds.top + bounds.bottom) / 2, height / 2);
    assert_eq!(bounds.left, state.spec.padding);

    let band = painter.center.expect("center filter painted");
    assert_eq!(band.height(), 2 * ((ITEM_HEIGHT / 2) as f64 * 1.2) as i32);
    assert_eq!((band.top + band.bottom) / 2, height / 2);
    // No shadow brushes configured by default.
    assert!(painter.shadows.is_empty());
}

#[test]
fn geometry_follows_scroll_offset() {
    let (mut state, _adapter) = measured_wheel(20, false);
    state.set_current_item(5, false);
    state.rebuild_items();
    let before = state.geometry();

    state.do_scroll(7);
    state.rebuild_items();
    let after = state.geometry();

    let selected = |geometry: &WheelGeometry| {
        geometry
            .items
            .iter()
            .find(|placement| placement.index == 5)
            .map(|placement| placement.bounds.top)
    };
    let top_before = selected(&before).expect("selected item placed");
    assert_eq!(selected(&after), Some(top_before + 7));
}

#[test]
fn shadows_span_one_and_a_half_items() {
    let mut state = WheelState::new(
        WheelSpec::new().decorations(WheelDecorations::with_default_shadows()),
    );
    attach(&mut state, &Rc::new(Labels::with_count(5)));
    let size = state.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
    state.layout(size.width, size.height);
    let mut painter = RecordingPainter::default();

    state.draw(&mut painter);

    let shadow = (ITEM_HEIGHT as f64 * 1.5) as i32;
    assert_eq!(
        painter.shadows,
        vec![
            IntRect::new(0, 0, size.width, shadow),
            IntRect::new(0, size.height - shadow, size.width, size.height),
        ]
    );
}

#[test]
fn empty_adapter_draws_only_shadows() {
    let mut state = WheelState::new(
        WheelSpec::new().decorations(WheelDecorations::with_default_shadows()),
    );
    attach(&mut state, &Rc::new(Labels::with_count(0)));
    state.layout(120, 200);
    let mut painter = RecordingPainter::default();

    state.draw(&mut painter);

    assert!(painter.items.is_empty());
    assert!(painter.center.is_none());
    assert_eq!(painter.shadows.len(), 2);
}

#[test]
fn cyclic_toggle_rebinds_views() {
    let (mut state, _adapter) = measured_wheel(10, false);
    state.rebuild_items();
    assert!(state.is_valid_item_index(3));
    assert!(!state.is_valid_item_index(-1));

    state.set_cyclic(true);

    assert!(state.is_valid_item_index(-1));
    assert_eq!(state.recycle_stats().items_in_use, 0);
    state.rebuild_items();
    let texts: Vec<_> = state.layout.iter().map(|view| view.text.clone()).collect();
    assert_eq!(texts[0], "item-8");
}
