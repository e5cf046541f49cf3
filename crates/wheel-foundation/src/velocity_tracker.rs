//! Release velocity estimation for drag gestures.
//!
//! Uses the impulse strategy: each pair of samples contributes the kinetic
//! energy needed to change from the previous velocity to the current one.

use std::collections::VecDeque;

const HISTORY_SIZE: usize = 20;

/// Only samples within this window before the newest one count.
const HORIZON_MS: u64 = 100;

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: u64,
    position: f32,
}

/// One-axis tracker fed with absolute positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker1D {
    samples: VecDeque<Sample>,
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
        }
    }

    pub fn add_data_point(&mut self, time_ms: u64, position: f32) {
        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { time_ms, position });
    }

    /// Velocity in units per second, `0.0` when fewer than two recent samples exist.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples.back().copied() else {
            return 0.0;
        };

        // Newest first; `times` holds the (non-positive) age of each sample.
        let mut positions = Vec::with_capacity(self.samples.len());
        let mut times = Vec::with_capacity(self.samples.len());
        let mut previous_time = newest.time_ms;
        for sample in self.samples.iter().rev() {
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            let gap = previous_time.abs_diff(sample.time_ms);
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            positions.push(sample.position);
            times.push(-(age as f32));
            previous_time = sample.time_ms;
        }

        if positions.len() < 2 {
            return 0.0;
        }
        impulse_velocity(&positions, &times) * 1000.0
    }

    /// Same as [`calculate_velocity`](Self::calculate_velocity), clamped to `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;
    for i in (1..=oldest).rev() {
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / dt;
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work)
}

#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
