//! Selection state machine behind [`WheelView`](crate::WheelView).
//!
//! Everything here runs with the wheel's state mutably borrowed. Listener
//! notifications are queued as [`WheelEvent`]s and delivered by the view once
//! the borrow is released.

use crate::draw::{ItemPlacement, WheelGeometry, WheelPainter};
use crate::measure::MeasureSpec;
use crate::spec::{WheelDecorations, WheelSpec};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::rc::Rc;
use wheel_animation::SharedInterpolator;
use wheel_core::ListenerId;
use wheel_foundation::{
    visible_items_range, ItemView, ItemsLayout, ItemsRange, PointerEvent, PointerEventKind,
    RecycleContext, RecycleStats, ScrollerEvent, ScrollerEvents, ScrollerPhase, WheelAdapter,
    WheelRecycler, WheelScroller,
};
use wheel_graphics::{IntRect, IntSize};

pub type SharedAdapter<V> = Rc<dyn WheelAdapter<View = V>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WheelEvent {
    Changed { old: i32, new: i32 },
    ScrollStarted,
    ScrollFinished,
    Clicked(i32),
}

/// What the wheel is doing right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionState {
    Idle,
    Dragging,
    /// A fling or programmatic scroll is moving the content.
    Animating,
    /// Snapping back onto the selected item.
    Settling,
}

pub(crate) struct AttachedAdapter<V> {
    pub(crate) adapter: SharedAdapter<V>,
    pub(crate) observer: ListenerId,
}

pub(crate) struct WheelState<V> {
    pub(crate) spec: WheelSpec,
    pub(crate) enabled: bool,
    pub(crate) adapter: Option<AttachedAdapter<V>>,
    pub(crate) current_item: i32,
    pub(crate) scrolling_offset: i32,
    scrolling_performed: bool,
    item_height: i32,
    first_item: i32,
    layout: ItemsLayout<V>,
    recycler: WheelRecycler<V>,
    pub(crate) scroller: WheelScroller,
    width: i32,
    height: i32,
    events: Vec<WheelEvent>,
    redraw: bool,
}

impl<V: ItemView> WheelState<V> {
    pub(crate) fn new(spec: WheelSpec) -> Self {
        Self {
            recycler: WheelRecycler::new(spec.recycle),
            scroller: WheelScroller::new(spec.scroller),
            spec,
            enabled: true,
            adapter: None,
            current_item: 0,
            scrolling_offset: 0,
            scrolling_performed: false,
            item_height: 0,
            first_item: 0,
            layout: ItemsLayout::new(),
            width: 0,
            height: 0,
            events: Vec::new(),
            redraw: false,
        }
    }

    pub(crate) fn take_effects(&mut self) -> (Vec<WheelEvent>, bool) {
        (
            std::mem::take(&mut self.events),
            std::mem::replace(&mut self.redraw, false),
        )
    }

    fn invalidate(&mut self) {
        self.redraw = true;
    }

    pub(crate) fn item_count(&self) -> i32 {
        self.adapter.as_ref().map_or(0, |attached| {
            i32::try_from(attached.adapter.item_count()).unwrap_or(i32::MAX)
        })
    }

    pub(crate) fn size(&self) -> IntSize {
        IntSize::new(self.width, self.height)
    }

    fn recycle_context(&self) -> RecycleContext {
        RecycleContext {
            cursor: self.current_item,
            item_count: self.item_count(),
            cyclic: self.spec.cyclic,
        }
    }

    /// Cached item height, else the first child's height, else an even share
    /// of the viewport.
    pub(crate) fn resolved_item_height(&self) -> i32 {
        if self.item_height != 0 {
            return self.item_height;
        }
        if let Some(child) = self.layout.first_child() {
            return child.measured_size().height;
        }
        if self.spec.visible_items > 0 {
            self.height / self.spec.visible_items
        } else {
            0
        }
    }

    fn item_height(&mut self) -> i32 {
        if self.item_height == 0 {
            if let Some(child) = self.layout.first_child() {
                self.item_height = child.measured_size().height;
            } else {
                log::trace!("item height unknown, falling back to viewport share");
            }
        }
        self.resolved_item_height()
    }

    pub(crate) fn attach_adapter(
        &mut self,
        attached: Option<AttachedAdapter<V>>,
    ) -> Option<AttachedAdapter<V>> {
        let previous = std::mem::replace(&mut self.adapter, attached);
        if self.scrolling_performed {
            // The running cycle ends here; the engine is reset without settling.
            self.events.push(WheelEvent::ScrollFinished);
        }
        self.scroller.reset();
        self.scrolling_performed = false;
        self.current_item = 0;
        self.item_height = 0;
        self.first_item = 0;
        match &self.adapter {
            Some(attached) => log::debug!(
                "attached adapter with {} items",
                attached.adapter.item_count()
            ),
            None => log::debug!("adapter detached"),
        }
        self.invalidate_wheel(true);
        previous
    }

    pub(crate) fn set_cyclic(&mut self, cyclic: bool) {
        self.spec.cyclic = cyclic;
        self.invalidate_wheel(false);
    }

    /// Soft invalidation recycles every child so the next draw rebinds them.
    /// Hard invalidation also drops the pools and the offset.
    pub(crate) fn invalidate_wheel(&mut self, clear_caches: bool) {
        if clear_caches {
            log::debug!("hard wheel invalidation");
            self.recycler.clear_all();
            self.layout.clear();
            self.scrolling_offset = 0;
        } else {
            log::debug!("soft wheel invalidation");
            let context = self.recycle_context();
            self.first_item = self.recycler.recycle_items(
                &mut self.layout,
                self.first_item,
                &ItemsRange::empty(),
                context,
            );
        }
        self.invalidate();
    }

    pub(crate) fn is_valid_item_index(&self, index: i32) -> bool {
        let count = self.item_count();
        count > 0 && (self.spec.cyclic || (index >= 0 && index < count))
    }

    pub(crate) fn set_current_item(&mut self, index: i32, animated: bool) {
        let item_count = self.item_count();
        if item_count == 0 {
            log::debug!("ignoring selection of {index}: no items");
            return;
        }

        let mut index = index;
        if index < 0 || index >= item_count {
            if self.spec.cyclic {
                index = index.rem_euclid(item_count);
            } else {
                log::debug!("ignoring selection of {index}: outside 0..{item_count}");
                return;
            }
        }
        if index == self.current_item {
            return;
        }

        if animated {
            let mut items_to_scroll = index - self.current_item;
            if self.spec.cyclic {
                let around =
                    item_count + index.min(self.current_item) - index.max(self.current_item);
                if around < items_to_scroll.abs() {
                    items_to_scroll = if items_to_scroll < 0 { around } else { -around };
                }
            }
            self.scroll(items_to_scroll, 0);
        } else {
            self.scrolling_offset = 0;
            let old = self.current_item;
            self.current_item = index;
            self.events.push(WheelEvent::Changed { old, new: index });
            self.invalidate();
        }
    }

    /// Animates by `items` whole items; positive values advance the selection.
    pub(crate) fn scroll(&mut self, items: i32, duration_ms: u64) {
        if self.item_count() == 0 {
            return;
        }
        let item_height = self.item_height();
        if item_height <= 0 {
            log::debug!("ignoring scroll by {items}: item height unknown");
            return;
        }
        let distance = items
            .saturating_mul(item_height)
            .saturating_neg()
            .saturating_sub(self.scrolling_offset);
        let events = self.scroller.scroll(distance, duration_ms);
        self.apply_scroller_events(events);
    }

    pub(crate) fn set_interpolator(&mut self, interpolator: SharedInterpolator) {
        let events = self.scroller.set_interpolator(interpolator);
        self.apply_scroller_events(events);
    }

    pub(crate) fn set_visible_items(&mut self, count: i32) {
        self.spec.visible_items = count;
        self.invalidate();
    }

    pub(crate) fn set_decorations(&mut self, update: impl FnOnce(&mut WheelDecorations)) {
        update(&mut self.spec.decorations);
        self.invalidate();
    }

    pub(crate) fn stop_scrolling(&mut self) {
        let events = self.scroller.interrupt();
        self.apply_scroller_events(events);
    }

    pub(crate) fn on_frame(&mut self, frame_time_nanos: u64) {
        let events = self.scroller.on_frame(frame_time_nanos);
        self.apply_scroller_events(events);
    }

    pub(crate) fn on_touch_event(&mut self, event: PointerEvent) -> bool {
        if !self.enabled || self.item_count() == 0 {
            return true;
        }

        // Only a press the engine still tracks can become a click.
        if event.kind == PointerEventKind::Up
            && !self.scrolling_performed
            && self.scroller.phase() == ScrollerPhase::Dragging
        {
            self.resolve_click(event.y);
        }

        let events = self.scroller.on_touch(event);
        self.apply_scroller_events(events);
        true
    }

    fn resolve_click(&mut self, y: f32) {
        let item_height = self.item_height();
        if item_height <= 0 {
            return;
        }
        let mut distance = y as i32 - self.height / 2;
        if distance > 0 {
            distance += item_height / 2;
        } else {
            distance -= item_height / 2;
        }
        let items = distance / item_height;
        let target = self.current_item + items;
        if items != 0 && self.is_valid_item_index(target) {
            let clicked = target.rem_euclid(self.item_count());
            self.events.push(WheelEvent::Clicked(clicked));
        }
    }

    fn apply_scroller_events(&mut self, events: ScrollerEvents) {
        let mut queue: VecDeque<ScrollerEvent> = events.into_iter().collect();
        while let Some(event) = queue.pop_front() {
            match event {
                ScrollerEvent::Started => {
                    self.scrolling_performed = true;
                    self.events.push(WheelEvent::ScrollStarted);
                }
                ScrollerEvent::Progress { delta } => queue.extend(self.on_scroll(delta)),
                ScrollerEvent::JustifyRequested => {
                    let min_delta = self.scroller.config().min_delta_for_scrolling;
                    if self.scrolling_offset.abs() > min_delta {
                        log::trace!("justifying residual offset {}", self.scrolling_offset);
                        queue.extend(self.scroller.settle_by(-self.scrolling_offset));
                    }
                }
                ScrollerEvent::Settled => {
                    if self.scrolling_performed {
                        self.scrolling_performed = false;
                        self.events.push(WheelEvent::ScrollFinished);
                    }
                    self.scrolling_offset = 0;
                    self.invalidate();
                }
            }
        }
    }

    /// Applies a drag or animation step, then keeps the content within one
    /// viewport of the selection.
    fn on_scroll(&mut self, delta: i32) -> ScrollerEvents {
        self.do_scroll(delta);

        let height = self.height;
        if height <= 0 {
            return ScrollerEvents::new();
        }
        if self.scrolling_offset > height {
            self.scrolling_offset = height;
            self.scroller.interrupt()
        } else if self.scrolling_offset < -height {
            self.scrolling_offset = -height;
            self.scroller.interrupt()
        } else {
            ScrollerEvents::new()
        }
    }

    /// Adds `delta` to the offset and commits every item boundary it crossed.
    pub(crate) fn do_scroll(&mut self, delta: i32) {
        self.scrolling_offset = self.scrolling_offset.saturating_add(delta);

        let item_height = self.item_height();
        let item_count = self.item_count();
        if item_height <= 0 || item_count == 0 {
            self.invalidate();
            return;
        }

        let mut count = self.scrolling_offset / item_height;
        let mut pos = self.current_item - count;

        let mut fix_pos = self.scrolling_offset % item_height;
        if fix_pos.abs() <= item_height / 2 {
            fix_pos = 0;
        }

        if self.spec.cyclic {
            if fix_pos > 0 {
                pos -= 1;
                count += 1;
            } else if fix_pos < 0 {
                pos += 1;
                count -= 1;
            }
            pos = pos.rem_euclid(item_count);
        } else if pos < 0 {
            count = self.current_item;
            pos = 0;
        } else if pos >= item_count {
            count = self.current_item - item_count + 1;
            pos = item_count - 1;
        } else if pos > 0 && fix_pos > 0 {
            pos -= 1;
            count += 1;
        } else if pos < item_count - 1 && fix_pos < 0 {
            pos += 1;
            count -= 1;
        }

        let offset = self.scrolling_offset;
        if pos != self.current_item {
            self.set_current_item(pos, false);
        } else {
            self.invalidate();
        }

        self.scrolling_offset = offset - count * item_height;
        let height = self.height;
        if height > 0 && self.scrolling_offset.abs() > height {
            self.scrolling_offset =
                self.scrolling_offset % height + self.scrolling_offset.signum() * height;
        }
    }

    pub(crate) fn items_range(&mut self) -> Option<ItemsRange> {
        let item_height = self.item_height();
        visible_items_range(
            self.current_item,
            self.scrolling_offset,
            item_height,
            self.height,
        )
    }

    /// Brings the layout in line with the visible range. Returns whether the
    /// set of materialized items changed.
    pub(crate) fn rebuild_items(&mut self) -> bool {
        let Some(range) = self.items_range() else {
            return false;
        };

        let context = self.recycle_context();
        let first = self
            .recycler
            .recycle_items(&mut self.layout, self.first_item, &range, context);
        let mut updated = first != self.first_item;
        self.first_item = first;
        if !updated {
            updated = self.first_item != range.first()
                || self.layout.len() as i32 != range.count();
        }

        if self.first_item > range.first() && self.first_item <= range.last() {
            for index in (range.first()..self.first_item).rev() {
                if !self.add_view_item(index, true) {
                    break;
                }
                self.first_item = index;
            }
        } else {
            self.first_item = range.first();
        }

        let mut first = self.first_item;
        for position in self.layout.len() as i32..range.count() {
            if !self.add_view_item(self.first_item + position, false) && self.layout.is_empty() {
                first += 1;
            }
        }
        self.first_item = first;

        updated
    }

    /// Rebuilds just the items around the selection needed to measure.
    fn build_view_for_measuring(&mut self) {
        let context = self.recycle_context();
        self.first_item = self.recycler.recycle_items(
            &mut self.layout,
            self.first_item,
            &ItemsRange::empty(),
            context,
        );

        let add_items = self.spec.visible_items / 2;
        for index in (self.current_item - add_items..=self.current_item + add_items).rev() {
            if self.add_view_item(index, true) {
                self.first_item = index;
            }
        }
    }

    fn add_view_item(&mut self, index: i32, first: bool) -> bool {
        let Some(view) = self.item_view(index) else {
            return false;
        };
        if first {
            self.layout.push_front(view);
        } else {
            self.layout.push_back(view);
        }
        true
    }

    fn item_view(&mut self, index: i32) -> Option<V> {
        let adapter = Rc::clone(&self.adapter.as_ref()?.adapter);
        let count = self.item_count();
        if count == 0 {
            return None;
        }
        if !self.is_valid_item_index(index) {
            return adapter.empty_item(self.recycler.get_empty_item());
        }
        let relative = index - self.current_item;
        let wrapped = index.rem_euclid(count) as usize;
        adapter.item(wrapped, self.recycler.get_item(relative))
    }

    pub(crate) fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> IntSize {
        self.build_view_for_measuring();

        let measured_width = self.calculate_layout_width(width);
        let measured_height = match height {
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(size) => self.desired_height().min(size),
            MeasureSpec::Unspecified => self.desired_height(),
        };
        log::trace!(
            "measured {}x{} against {:?}x{:?} (bound {})",
            measured_width,
            measured_height,
            width,
            height,
            height.size()
        );
        IntSize::new(measured_width, measured_height)
    }

    fn calculate_layout_width(&self, spec: MeasureSpec) -> i32 {
        let content = self
            .layout
            .iter()
            .map(|child| child.measured_size().width)
            .max()
            .unwrap_or(0);
        match spec {
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(size) => {
                let width = (content + 2 * self.spec.padding).max(self.spec.min_width);
                width.min(size)
            }
            MeasureSpec::Unspecified => (content + 2 * self.spec.padding).max(self.spec.min_width),
        }
    }

    fn desired_height(&mut self) -> i32 {
        if let Some(child) = self.layout.first_child() {
            self.item_height = child.measured_size().height;
        }
        let item_height = self.item_height;
        let desired = item_height * self.spec.visible_items
            - item_height * self.spec.item_offset_percent / 50;
        desired.max(self.spec.min_height)
    }

    pub(crate) fn layout(&mut self, width: i32, height: i32) {
        if self.width != width || self.height != height {
            self.invalidate();
        }
        self.width = width;
        self.height = height;
    }

    pub(crate) fn geometry(&self) -> WheelGeometry {
        let item_height = self.resolved_item_height();
        let shadow_height = (1.5 * item_height as f64) as i32;
        let mut geometry = WheelGeometry {
            items: SmallVec::with_capacity(self.layout.len()),
            center: None,
            top_shadow: IntRect::new(0, 0, self.width, shadow_height),
            bottom_shadow: IntRect::new(0, self.height - shadow_height, self.width, self.height),
        };

        let item_count = self.item_count();
        if item_count == 0 {
            return geometry;
        }

        let top = (self.current_item - self.first_item) * item_height
            + (item_height - self.height) / 2;
        let dy = self.scrolling_offset - top;
        let right = self.width - self.spec.padding;
        let mut y = 0;
        for (position, child) in self.layout.iter().enumerate() {
            let index = self.first_item + position as i32;
            let child_height = child.measured_size().height;
            geometry.items.push(ItemPlacement {
                index,
                adapter_index: self
                    .is_valid_item_index(index)
                    .then(|| index.rem_euclid(item_count) as usize),
                bounds: IntRect::new(self.spec.padding, y + dy, right, y + dy + child_height),
            });
            y += child_height;
        }

        let center = self.height / 2;
        let half_band = ((item_height / 2) as f64 * 1.2) as i32;
        geometry.center = Some(IntRect::new(
            0,
            center - half_band,
            self.width,
            center + half_band,
        ));
        geometry
    }

    pub(crate) fn draw(&mut self, painter: &mut impl WheelPainter<V>) {
        if self.item_count() > 0 {
            self.rebuild_items();
        }
        let geometry = self.geometry();

        for (placement, view) in geometry.items.iter().zip(self.layout.iter()) {
            painter.draw_item(view, placement);
        }
        let decorations = &self.spec.decorations;
        if let (Some(bounds), Some(brush)) = (geometry.center, &decorations.center_filter) {
            painter.draw_center_filter(brush, bounds);
        }
        if let Some(brush) = &decorations.top_shadow {
            painter.draw_shadow(brush, geometry.top_shadow);
        }
        if let Some(brush) = &decorations.bottom_shadow {
            painter.draw_shadow(brush, geometry.bottom_shadow);
        }
    }

    pub(crate) fn interaction_state(&self) -> InteractionState {
        match self.scroller.phase() {
            ScrollerPhase::Idle => InteractionState::Idle,
            ScrollerPhase::Dragging => InteractionState::Dragging,
            ScrollerPhase::Flinging | ScrollerPhase::Scrolling => InteractionState::Animating,
            ScrollerPhase::Justifying => InteractionState::Settling,
        }
    }

    pub(crate) fn recycle_stats(&self) -> RecycleStats {
        self.recycler.stats(self.layout.len())
    }

    pub(crate) fn first_item(&self) -> i32 {
        self.first_item
    }

    pub(crate) fn is_scrolling_performed(&self) -> bool {
        self.scrolling_performed
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
