//! Gesture thresholds shared by the wheel scroll engine.
//!
//! Values are in pixels at density 1.0 and get scaled by the configured density.

/// Release velocity below which a drag ends with a snap instead of a fling.
///
/// Matches Android's `ViewConfiguration` minimum fling velocity.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Release velocities are clamped to this magnitude before computing the fling.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Offsets at or below this magnitude count as settled; no snap animation runs.
pub const MIN_DELTA_FOR_SCROLLING: i32 = 1;

/// Duration of snap and programmatic scroll animations when none is given.
pub const SCROLLING_DURATION_MS: u64 = 400;

/// Upper bound on fling duration.
pub const MAX_FLING_DURATION_MS: u64 = 1_200;
