//! Fling deceleration following the Android scroller spline.
//!
//! A release velocity maps to a total travel distance and a duration; the
//! travelled fraction over time follows a precomputed tension spline.

use std::sync::LazyLock;

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const SAMPLES: usize = 100;

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// `ln(0.78) / ln(0.9)`
const DECELERATION_RATE: f64 = 2.358_201_6;

/// Travelled-distance fractions sampled at evenly spaced time fractions.
struct SplineTable {
    positions: [f32; SAMPLES + 1],
}

impl SplineTable {
    fn build() -> Self {
        let mut positions = [0.0f32; SAMPLES + 1];
        let mut x_min = 0.0f32;
        for (i, slot) in positions.iter_mut().enumerate().take(SAMPLES) {
            let alpha = i as f32 / SAMPLES as f32;
            let mut x_max = 1.0f32;
            let (x, coef) = loop {
                let x_mid = x_min + (x_max - x_min) / 2.0;
                let coef = 3.0 * x_mid * (1.0 - x_mid);
                let tx = coef * ((1.0 - x_mid) * P1 + x_mid * P2) + x_mid * x_mid * x_mid;
                if (tx - alpha).abs() < 1e-5 {
                    break (x_mid, coef);
                }
                if tx > alpha {
                    x_max = x_mid;
                } else {
                    x_min = x_mid;
                }
            };
            *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
        }
        positions[SAMPLES] = 1.0;
        Self { positions }
    }

    /// Linear interpolation between the two samples around `time`.
    fn distance_fraction(&self, time: f32) -> f32 {
        let time = time.clamp(0.0, 1.0);
        let index = (SAMPLES as f32 * time) as usize;
        if index >= SAMPLES {
            return 1.0;
        }
        let t_low = index as f32 / SAMPLES as f32;
        let t_high = (index + 1) as f32 / SAMPLES as f32;
        let d_low = self.positions[index];
        let d_high = self.positions[index + 1];
        let slope = (d_high - d_low) / (t_high - t_low);
        d_low + (time - t_low) * slope
    }
}

static SPLINE: LazyLock<SplineTable> = LazyLock::new(SplineTable::build);

/// Fraction of the fling distance covered after `time` (fraction of duration).
pub fn spline_distance_fraction(time: f32) -> f32 {
    SPLINE.distance_fraction(time)
}

/// A fling resolved from a release velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingInfo {
    /// Release velocity in px/s. Only its sign is used for direction.
    pub initial_velocity: f32,
    /// Unsigned travel distance in px.
    pub distance: f32,
    pub duration_ms: u64,
}

impl FlingInfo {
    /// Signed travel after `elapsed_ms`.
    pub fn position(&self, elapsed_ms: u64) -> f32 {
        let time = if self.duration_ms > 0 {
            elapsed_ms as f32 / self.duration_ms as f32
        } else {
            1.0
        };
        self.distance * self.initial_velocity.signum() * spline_distance_fraction(time)
    }

    pub fn final_position(&self) -> f32 {
        self.distance * self.initial_velocity.signum()
    }

    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    /// Keeps the distance and caps the duration, so the same path is covered faster.
    pub fn with_max_duration(mut self, max_duration_ms: u64) -> Self {
        self.duration_ms = self.duration_ms.min(max_duration_ms);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    pub const DEFAULT_FRICTION: f32 = 0.015;

    /// `density` is the host's pixels-per-dp scale (1.0 for mdpi).
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * 0.84,
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        let friction = (self.friction * self.physical_coefficient) as f64;
        (INFLECTION as f64 * velocity.abs() as f64 / friction).ln()
    }

    pub fn fling_duration_ms(&self, velocity: f32) -> u64 {
        if velocity == 0.0 {
            return 0;
        }
        let l = self.spline_deceleration(velocity);
        (1000.0 * (l / (DECELERATION_RATE - 1.0)).exp()).max(0.0) as u64
    }

    pub fn fling_distance(&self, velocity: f32) -> f32 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.spline_deceleration(velocity);
        let scale = (self.friction * self.physical_coefficient) as f64;
        (scale * (DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l).exp()) as f32
    }

    pub fn fling_info(&self, velocity: f32) -> FlingInfo {
        if !velocity.is_finite() || velocity == 0.0 {
            log::trace!("degenerate fling velocity {velocity}, no travel");
            return FlingInfo {
                initial_velocity: 0.0,
                distance: 0.0,
                duration_ms: 0,
            };
        }
        FlingInfo {
            initial_velocity: velocity,
            distance: self.fling_distance(velocity),
            duration_ms: self.fling_duration_ms(velocity),
        }
    }
}

impl Default for FlingCalculator {
    fn default() -> Self {
        Self::with_density(1.0)
    }
}
