//! Host-facing wheel picker handle.
//!
//! [`WheelView`] is a cheap clonable handle over shared state. Every public
//! operation borrows the state, runs the controller, releases the borrow and
//! only then notifies listeners, so listeners are free to call back into the
//! wheel (for example to adjust a dependent wheel's adapter).

use crate::controller::{
    AttachedAdapter, InteractionState, SharedAdapter, WheelEvent, WheelState,
};
use crate::draw::{WheelGeometry, WheelPainter};
use crate::measure::MeasureSpec;
use crate::spec::{WheelDecorations, WheelSpec, DEFAULT_VISIBLE_ITEMS};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wheel_animation::Interpolator;
use wheel_core::{
    CallbackList, FrameCallbackRegistration, FrameClock, ListenerId, RuntimeHandle,
};
use wheel_foundation::{
    AdapterChange, AdapterObserver, ItemView, ItemsRange, PointerEvent, RecycleStats, WheelError,
};
use wheel_graphics::{Brush, IntSize};

/// Scroll cycle boundaries reported to scroll listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollLifecycle {
    Started,
    Finished,
}

pub type ChangeListener<V> = dyn Fn(&WheelView<V>, i32, i32);
pub type ScrollListener<V> = dyn Fn(&WheelView<V>, ScrollLifecycle);
pub type ClickListener<V> = dyn Fn(&WheelView<V>, i32);

struct WheelShared<V: ItemView + 'static> {
    state: RefCell<WheelState<V>>,
    pending_adapter_change: Cell<Option<AdapterChange>>,
    frame_clock: FrameClock,
    frame_registration: RefCell<Option<FrameCallbackRegistration>>,
    change_listeners: CallbackList<ChangeListener<V>>,
    scroll_listeners: CallbackList<ScrollListener<V>>,
    click_listeners: CallbackList<ClickListener<V>>,
    invalidate_callbacks: CallbackList<dyn Fn()>,
}

impl<V: ItemView + 'static> Drop for WheelShared<V> {
    fn drop(&mut self) {
        if let Some(attached) = self.state.get_mut().adapter.take() {
            attached.adapter.unregister_observer(attached.observer);
        }
    }
}

/// Vertical wheel picker bound to an adapter.
///
/// Animations advance on frames delivered through the [`RuntimeHandle`]
/// passed to [`WheelView::new`]; the host drains the runtime once per frame.
pub struct WheelView<V: ItemView + 'static> {
    shared: Rc<WheelShared<V>>,
}

impl<V: ItemView + 'static> Clone for WheelView<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<V: ItemView + 'static> WheelView<V> {
    pub fn new(runtime: &RuntimeHandle, spec: WheelSpec) -> Self {
        let mut spec = spec;
        if spec.visible_items <= 0 {
            log::warn!(
                "visible item count {} is not positive, using {}",
                spec.visible_items,
                DEFAULT_VISIBLE_ITEMS
            );
            spec.visible_items = DEFAULT_VISIBLE_ITEMS;
        }
        Self {
            shared: Rc::new(WheelShared {
                state: RefCell::new(WheelState::new(spec)),
                pending_adapter_change: Cell::new(None),
                frame_clock: runtime.frame_clock(),
                frame_registration: RefCell::new(None),
                change_listeners: CallbackList::new(),
                scroll_listeners: CallbackList::new(),
                click_listeners: CallbackList::new(),
                invalidate_callbacks: CallbackList::new(),
            }),
        }
    }

    fn from_weak(weak: &Weak<WheelShared<V>>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Runs `f` against the state, then delivers what it produced.
    fn update<R>(&self, f: impl FnOnce(&mut WheelState<V>) -> R) -> R {
        let (result, events, redraw) = {
            let mut state = self.shared.state.borrow_mut();
            let result = f(&mut state);
            let (events, redraw) = state.take_effects();
            (result, events, redraw)
        };
        self.dispatch(events, redraw);
        self.apply_pending_adapter_change();
        self.sync_frame_request();
        result
    }

    fn dispatch(&self, events: Vec<WheelEvent>, redraw: bool) {
        for event in events {
            match event {
                WheelEvent::Changed { old, new } => self
                    .shared
                    .change_listeners
                    .for_each(|listener| listener(self, old, new)),
                WheelEvent::ScrollStarted => self
                    .shared
                    .scroll_listeners
                    .for_each(|listener| listener(self, ScrollLifecycle::Started)),
                WheelEvent::ScrollFinished => self
                    .shared
                    .scroll_listeners
                    .for_each(|listener| listener(self, ScrollLifecycle::Finished)),
                WheelEvent::Clicked(index) => self
                    .shared
                    .click_listeners
                    .for_each(|listener| listener(self, index)),
            }
        }
        if redraw {
            self.shared.invalidate_callbacks.for_each(|callback| callback());
        }
    }

    fn on_adapter_change(&self, change: AdapterChange) {
        let merged = match (self.shared.pending_adapter_change.get(), change) {
            (Some(AdapterChange::Invalidated), _) => AdapterChange::Invalidated,
            (_, change) => change,
        };
        self.shared.pending_adapter_change.set(Some(merged));
        // While the state is borrowed the running operation applies it on exit.
        if self.shared.state.try_borrow_mut().is_ok() {
            self.apply_pending_adapter_change();
        }
    }

    fn apply_pending_adapter_change(&self) {
        if let Some(change) = self.shared.pending_adapter_change.take() {
            log::debug!("adapter reported {change:?}");
            self.update(|state| state.invalidate_wheel(change == AdapterChange::Invalidated));
        }
    }

    fn sync_frame_request(&self) {
        let needs_frame = self.shared.state.borrow().scroller.needs_frame();
        let mut registration = self.shared.frame_registration.borrow_mut();
        if needs_frame {
            if registration.as_ref().is_some_and(|pending| pending.is_active()) {
                return;
            }
            let weak = Rc::downgrade(&self.shared);
            *registration = Some(self.shared.frame_clock.with_frame_nanos(move |nanos| {
                if let Some(view) = Self::from_weak(&weak) {
                    let fired = view.shared.frame_registration.borrow_mut().take();
                    drop(fired);
                    view.update(|state| state.on_frame(nanos));
                }
            }));
        } else if let Some(pending) = registration.take() {
            pending.cancel();
        }
    }

    fn adapter_observer(&self) -> Rc<AdapterObserver> {
        let weak = Rc::downgrade(&self.shared);
        Rc::new(move |change: AdapterChange| {
            if let Some(view) = Self::from_weak(&weak) {
                view.on_adapter_change(change);
            }
        })
    }

    /// Replaces the adapter. Selection, offset and pooled views reset.
    pub fn set_adapter(&self, adapter: Option<SharedAdapter<V>>) {
        let attached = adapter.map(|adapter| {
            let observer = adapter.register_observer(self.adapter_observer());
            AttachedAdapter { adapter, observer }
        });
        self.shared.pending_adapter_change.set(None);
        let previous = self.update(|state| state.attach_adapter(attached));
        if let Some(previous) = previous {
            previous.adapter.unregister_observer(previous.observer);
        }
    }

    pub fn adapter(&self) -> Option<SharedAdapter<V>> {
        self.shared
            .state
            .borrow()
            .adapter
            .as_ref()
            .map(|attached| Rc::clone(&attached.adapter))
    }

    pub fn item_count(&self) -> i32 {
        self.shared.state.borrow().item_count()
    }

    pub fn is_valid_item_index(&self, index: i32) -> bool {
        self.shared.state.borrow().is_valid_item_index(index)
    }

    pub fn is_cyclic(&self) -> bool {
        self.shared.state.borrow().spec.cyclic
    }

    pub fn set_cyclic(&self, cyclic: bool) {
        self.update(|state| state.set_cyclic(cyclic));
    }

    pub fn visible_items(&self) -> i32 {
        self.shared.state.borrow().spec.visible_items
    }

    pub fn set_visible_items(&self, count: i32) -> Result<(), WheelError> {
        if count <= 0 {
            log::warn!("rejecting visible item count {count}");
            return Err(WheelError::InvalidVisibleItems { count });
        }
        self.update(|state| state.set_visible_items(count));
        Ok(())
    }

    pub fn decorations(&self) -> WheelDecorations {
        self.shared.state.borrow().spec.decorations.clone()
    }

    pub fn set_decorations(&self, decorations: WheelDecorations) {
        self.update(|state| state.set_decorations(|current| *current = decorations));
    }

    pub fn set_top_shadow(&self, brush: Option<Brush>) {
        self.update(|state| state.set_decorations(|current| current.top_shadow = brush));
    }

    pub fn set_bottom_shadow(&self, brush: Option<Brush>) {
        self.update(|state| state.set_decorations(|current| current.bottom_shadow = brush));
    }

    pub fn set_center_filter(&self, brush: Option<Brush>) {
        self.update(|state| state.set_decorations(|current| current.center_filter = brush));
    }

    /// Swaps the curve for programmatic scrolls and snapping. A running
    /// animation is finished first.
    pub fn set_interpolator(&self, interpolator: impl Interpolator + 'static) {
        self.update(|state| state.set_interpolator(Rc::new(interpolator)));
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.state.borrow().enabled
    }

    /// A disabled wheel swallows touch input without reacting.
    pub fn set_enabled(&self, enabled: bool) {
        self.shared.state.borrow_mut().enabled = enabled;
    }

    pub fn current_item(&self) -> i32 {
        self.shared.state.borrow().current_item
    }

    /// Selects `index`. Out-of-range indices wrap in cyclic mode and are
    /// ignored otherwise. Animated changes take the shorter way around a
    /// cyclic wheel.
    pub fn set_current_item(&self, index: i32, animated: bool) {
        self.update(|state| state.set_current_item(index, animated));
    }

    /// Animates by `items` whole items; positive values advance the
    /// selection. A zero duration uses the configured default.
    pub fn scroll(&self, items: i32, duration_ms: u64) {
        self.update(|state| state.scroll(items, duration_ms));
    }

    /// Ends a fling or programmatic scroll where it stands and snaps.
    pub fn stop_scrolling(&self) {
        self.update(|state| state.stop_scrolling());
    }

    pub fn add_changing_listener(
        &self,
        listener: impl Fn(&WheelView<V>, i32, i32) + 'static,
    ) -> ListenerId {
        self.shared.change_listeners.add(Rc::new(listener))
    }

    pub fn remove_changing_listener(&self, id: ListenerId) -> bool {
        self.shared.change_listeners.remove(id)
    }

    pub fn add_scrolling_listener(
        &self,
        listener: impl Fn(&WheelView<V>, ScrollLifecycle) + 'static,
    ) -> ListenerId {
        self.shared.scroll_listeners.add(Rc::new(listener))
    }

    pub fn remove_scrolling_listener(&self, id: ListenerId) -> bool {
        self.shared.scroll_listeners.remove(id)
    }

    /// Called with the tapped item's index when a tap lands off the selection.
    /// On a cyclic wheel the index is wrapped into `0..item_count`. The
    /// selection is left alone; call [`set_current_item`](Self::set_current_item)
    /// from the listener to move it.
    pub fn add_clicking_listener(
        &self,
        listener: impl Fn(&WheelView<V>, i32) + 'static,
    ) -> ListenerId {
        self.shared.click_listeners.add(Rc::new(listener))
    }

    pub fn remove_clicking_listener(&self, id: ListenerId) -> bool {
        self.shared.click_listeners.remove(id)
    }

    /// Called once per operation that changed what the wheel would paint.
    pub fn add_invalidate_callback(&self, callback: impl Fn() + 'static) -> ListenerId {
        self.shared.invalidate_callbacks.add(Rc::new(callback))
    }

    pub fn remove_invalidate_callback(&self, id: ListenerId) -> bool {
        self.shared.invalidate_callbacks.remove(id)
    }

    /// Feeds one pointer event. Always consumes it.
    pub fn on_touch_event(&self, event: PointerEvent) -> bool {
        self.update(|state| state.on_touch_event(event))
    }

    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> IntSize {
        self.update(|state| state.measure(width, height))
    }

    pub fn layout(&self, width: i32, height: i32) {
        self.update(|state| state.layout(width, height));
    }

    pub fn size(&self) -> IntSize {
        self.shared.state.borrow().size()
    }

    /// Rebuilds the visible window and paints it through `painter`.
    pub fn draw(&self, painter: &mut impl WheelPainter<V>) {
        self.update(|state| state.draw(painter));
    }

    /// Placement of the currently materialized items, as of the last rebuild.
    pub fn geometry(&self) -> WheelGeometry {
        self.shared.state.borrow().geometry()
    }

    pub fn invalidate_wheel(&self, clear_caches: bool) {
        self.update(|state| state.invalidate_wheel(clear_caches));
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.shared.state.borrow().interaction_state()
    }

    pub fn is_scrolling_performed(&self) -> bool {
        self.shared.state.borrow().is_scrolling_performed()
    }

    pub fn recycle_stats(&self) -> RecycleStats {
        self.shared.state.borrow().recycle_stats()
    }

    pub fn scrolling_offset(&self) -> i32 {
        self.shared.state.borrow().scrolling_offset
    }

    pub fn item_height(&self) -> i32 {
        self.shared.state.borrow().resolved_item_height()
    }

    /// Index of the first materialized item.
    pub fn first_item(&self) -> i32 {
        self.shared.state.borrow().first_item()
    }

    /// Indices needed to fill the viewport right now, `None` while the item
    /// height is unknown.
    pub fn visible_range(&self) -> Option<ItemsRange> {
        self.shared.state.borrow_mut().items_range()
    }
}

impl<V: ItemView + 'static> std::fmt::Debug for WheelView<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.shared.state.try_borrow() {
            Ok(state) => f
                .debug_struct("WheelView")
                .field("current_item", &state.current_item)
                .field("scrolling_offset", &state.scrolling_offset)
                .field("item_count", &state.item_count())
                .field("cyclic", &state.spec.cyclic)
                .field("interaction", &state.interaction_state())
                .finish(),
            Err(_) => f.debug_struct("WheelView").finish_non_exhaustive(),
        }
    }
}
