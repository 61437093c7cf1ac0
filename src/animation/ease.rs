use crate::foundation::error::{ReelError, ReelResult};

/// Easing curves mapping normalized progress `[0, 1] -> [0, 1]`.
///
/// Every curve is monotone on the unit interval and pins both endpoints exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// CSS-style cubic bezier with control points `(x1, y1)` and `(x2, y2)` in `[0, 1]`.
    Bezier {
        /// First control point x.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Ease {
    /// Apply this easing function to normalized progress `t`; `t` is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - (t * std::f64::consts::FRAC_PI_2).cos()
                }
            }
            Self::OutSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    (t * std::f64::consts::FRAC_PI_2).sin()
                }
            }
            Self::InOutSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    -((std::f64::consts::PI * t).cos() - 1.0) / 2.0
                }
            }
            Self::Bezier { x1, y1, x2, y2 } => cubic_bezier(t, x1, y1, x2, y2),
        }
    }

    /// Reject bezier control points that would leave the unit square.
    pub fn validate(self) -> ReelResult<()> {
        if let Self::Bezier { x1, y1, x2, y2 } = self {
            for (name, v) in [("x1", x1), ("y1", y1), ("x2", x2), ("y2", y2)] {
                if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                    return Err(ReelError::validation(format!(
                        "bezier ease {name} must be finite and within [0, 1]"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn cubic_bezier(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // B(s) = 3(1-s)^2 s p1 + 3(1-s) s^2 p2 + s^3
    fn axis(s: f64, p1: f64, p2: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }
    fn axis_slope(s: f64, p1: f64, p2: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    }

    let mut s = x;
    for _ in 0..8 {
        let err = axis(s, x1, x2) - x;
        if err.abs() < 1e-12 {
            return axis(s, y1, y2);
        }
        let slope = axis_slope(s, x1, x2);
        if slope.abs() < 1e-9 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    // Newton stalled on a flat spot; x(s) is monotone so bisection always converges.
    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    s = x;
    for _ in 0..64 {
        let v = axis(s, x1, x2);
        if (v - x).abs() < 1e-12 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    axis(s, y1, y2)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
