//! Building blocks behind the wheel picker: scroll engine, visible window
//! math, view recycling and the adapter capability.

pub mod adapter;
pub mod adapters;
mod error;
pub mod gesture_constants;
pub mod input;
pub mod layout;
pub mod range;
pub mod recycle;
pub mod scroller;
pub mod velocity_tracker;

pub use adapter::{AdapterChange, AdapterObserver, AdapterObservers, ItemView, WheelAdapter};
pub use adapters::{
    ArrayItems, ItemSource, NumericFormat, NumericItems, TextStyle, TextViewFactory,
    TextWheelAdapter,
};
pub use error::WheelError;
pub use input::{PointerEvent, PointerEventKind};
pub use layout::ItemsLayout;
pub use range::{visible_items_range, ItemsRange};
pub use recycle::{RecycleContext, RecyclePolicy, RecycleStats, WheelRecycler};
pub use scroller::{ScrollerConfig, ScrollerEvent, ScrollerEvents, ScrollerPhase, WheelScroller};
pub use velocity_tracker::VelocityTracker1D;
