//! Easing curves and fling physics for the wheel picker.

mod decay;
mod easing;

pub use decay::{spline_distance_fraction, FlingCalculator, FlingInfo};
pub use easing::{Easing, Interpolator, SharedInterpolator};

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
