//! Data source capability consumed by the wheel.

use std::rc::Rc;
use wheel_core::{CallbackList, ListenerId};
use wheel_graphics::IntSize;

/// A materialized item the wheel can measure and stack.
pub trait ItemView {
    /// Size after the host measured the view with unbounded constraints.
    fn measured_size(&self) -> IntSize;
}

/// Kind of change an adapter reports to its observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdapterChange {
    /// Item content changed; views are rebound, the scroll position stays.
    ContentChanged,
    /// Item identity changed; pooled views are dropped and the offset resets.
    Invalidated,
}

pub type AdapterObserver = dyn Fn(AdapterChange);

/// Change subscription shared by adapter implementations.
#[derive(Default)]
pub struct AdapterObservers {
    observers: CallbackList<AdapterObserver>,
}

impl AdapterObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, observer: Rc<AdapterObserver>) -> ListenerId {
        self.observers.add(observer)
    }

    pub fn unregister(&self, id: ListenerId) -> bool {
        self.observers.remove(id)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify(&self, change: AdapterChange) {
        self.observers.for_each(|observer| observer(change));
    }

    pub fn notify_data_changed(&self) {
        self.notify(AdapterChange::ContentChanged);
    }

    pub fn notify_data_invalidated(&self) {
        self.notify(AdapterChange::Invalidated);
    }
}

impl std::fmt::Debug for AdapterObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterObservers")
            .field("len", &self.len())
            .finish()
    }
}

/// Source of item views for a wheel.
///
/// `item` is only called with an index in `0..item_count()`; the wheel wraps
/// or substitutes a placeholder from `empty_item` before asking. Both methods
/// may receive a detached view to rebind instead of building a new one.
pub trait WheelAdapter {
    type View: ItemView;

    fn item_count(&self) -> usize;

    fn item(&self, index: usize, convert_view: Option<Self::View>) -> Option<Self::View>;

    fn empty_item(&self, convert_view: Option<Self::View>) -> Option<Self::View>;

    fn observers(&self) -> &AdapterObservers;

    fn register_observer(&self, observer: Rc<AdapterObserver>) -> ListenerId {
        self.observers().register(observer)
    }

    fn unregister_observer(&self, id: ListenerId) {
        self.observers().unregister(id);
    }

    fn notify_data_changed(&self) {
        self.observers().notify_data_changed();
    }

    fn notify_data_invalidated(&self) {
        self.observers().notify_data_invalidated();
    }
}
