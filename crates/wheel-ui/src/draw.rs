//! Paint-pass projection of the wheel state.

use smallvec::SmallVec;
use wheel_graphics::{Brush, IntRect};

/// Where one materialized item lands in wheel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemPlacement {
    /// Window index; may be negative or past the end.
    pub index: i32,
    /// Adapter index the view is bound to, `None` for placeholders.
    pub adapter_index: Option<usize>,
    pub bounds: IntRect,
}

/// Everything the host needs to paint the wheel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WheelGeometry {
    pub items: SmallVec<[ItemPlacement; 8]>,
    /// Band around the selected item; `None` when there is nothing to select.
    pub center: Option<IntRect>,
    pub top_shadow: IntRect,
    pub bottom_shadow: IntRect,
}

/// Host drawing surface.
///
/// Called while the wheel holds its state borrowed: implementations must not
/// call back into the wheel.
pub trait WheelPainter<V> {
    fn draw_item(&mut self, view: &V, placement: &ItemPlacement);

    fn draw_center_filter(&mut self, brush: &Brush, bounds: IntRect);

    fn draw_shadow(&mut self, brush: &Brush, bounds: IntRect);
}
