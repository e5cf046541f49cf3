//! Interpolation curves mapping elapsed fraction to travelled fraction.

use std::rc::Rc;

/// Maps a linear time fraction in `[0, 1]` to a progress fraction.
///
/// Implemented for [`Easing`] and for any `Fn(f32) -> f32`, so hosts can
/// supply their own curve.
pub trait Interpolator {
    fn interpolate(&self, fraction: f32) -> f32;
}

impl<F> Interpolator for F
where
    F: Fn(f32) -> f32,
{
    fn interpolate(&self, fraction: f32) -> f32 {
        self(fraction)
    }
}

pub type SharedInterpolator = Rc<dyn Interpolator>;

/// Built-in curves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinear,
    /// The default curve of Android's `Scroller`: a short exponential ramp
    /// followed by a long exponential settle.
    #[default]
    ViscousFluid,
}

impl Easing {
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinear => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
            Easing::ViscousFluid => viscous_fluid_normalized(fraction),
        }
    }

    pub fn shared(self) -> SharedInterpolator {
        Rc::new(self)
    }
}

impl Interpolator for Easing {
    fn interpolate(&self, fraction: f32) -> f32 {
        self.transform(fraction)
    }
}

const VISCOUS_FLUID_SCALE: f32 = 8.0;

fn viscous_fluid(x: f32) -> f32 {
    let x = x * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // 1/e, the value of the ramp at x = 1.
        let start = 0.367_879_44_f32;
        let tail = 1.0 - (1.0 - x).exp();
        start + tail * (1.0 - start)
    }
}

fn viscous_fluid_normalized(fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }
    let normalize = 1.0 / viscous_fluid(1.0);
    let offset = 1.0 - normalize * viscous_fluid(1.0);
    let interpolated = normalize * viscous_fluid(fraction);
    if interpolated > 0.0 {
        interpolated + offset
    } else {
        interpolated
    }
}

/// Solves the bezier x(t) = fraction for t, then samples y(t).
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |t: f32| (3.0 * ax * t + 2.0 * bx) * t + cx;

    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let error = sample(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            solved = true;
            break;
        }
        let dx = slope(t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - error / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut low, mut high) = (0.0_f32, 1.0_f32);
        t = fraction;
        for _ in 0..16 {
            let error = sample(ax, bx, cx, t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
    }

    sample(ay, by, cy, t)
}
