//! Pure data for painting the wheel picker
//!
//! Colors, integer pixel geometry and the brushes the wheel decorations use.

mod brush;
mod color;
mod geometry;

pub use brush::*;
pub use color::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::brush::Brush;
    pub use crate::color::Color;
    pub use crate::geometry::{IntOffset, IntRect, IntSize};
}
