//! Wheel picker widget: a vertically scrolling list that snaps one item into
//! a selection band, optionally wrapping around.
//!
//! The host owns a [`wheel_core::Runtime`], feeds pointer events and frame
//! ticks, and paints through a [`WheelPainter`].

mod controller;
pub mod draw;
pub mod measure;
pub mod spec;
mod wheel_view;

pub use controller::{InteractionState, SharedAdapter};
pub use draw::{ItemPlacement, WheelGeometry, WheelPainter};
pub use measure::MeasureSpec;
pub use spec::{WheelDecorations, WheelSpec};
pub use wheel_view::{ChangeListener, ClickListener, ScrollLifecycle, ScrollListener, WheelView};

pub mod prelude {
    pub use crate::{
        InteractionState, MeasureSpec, ScrollLifecycle, WheelDecorations, WheelGeometry,
        WheelPainter, WheelSpec, WheelView,
    };
    pub use wheel_foundation::{ItemView, PointerEvent, WheelAdapter};
}
