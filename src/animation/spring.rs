//! Closed-form damped harmonic oscillator.
//!
//! The response is the unit step of `m·x'' + c·x' + k·(x - 1) = 0` with `x(0) = 0`, `x'(0) = 0`,
//! released at `trigger_frame`. Time is measured in seconds (`elapsed_frames / fps`), so the same
//! physical parameters behave identically at any frame rate.
//!
//! Settling is detected analytically: each damping regime has a monotonically decreasing envelope
//! `B(t) >= |x(t) - 1|`, and once `B(t) <= SETTLE_EPSILON` the output is exactly `1.0`.

use crate::{
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
};

/// Width of the band around 1 inside which a spring is reported as settled.
pub const SETTLE_EPSILON: f64 = 1e-4;

/// Physical spring parameters plus the frame the impulse starts at.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringParams {
    /// Damping coefficient `c`.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Stiffness `k`.
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Mass `m`.
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Frame at which the spring is released. Output is 0 before it.
    #[serde(default)]
    pub trigger_frame: f64,
    /// Cap the output at 1 instead of letting under-damped springs overshoot.
    #[serde(default)]
    pub overshoot_clamping: bool,
    /// Stretch time so the spring settles exactly this many frames after the trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<f64>,
}

fn default_damping() -> f64 {
    10.0
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_mass() -> f64 {
    1.0
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            stiffness: default_stiffness(),
            mass: default_mass(),
            trigger_frame: 0.0,
            overshoot_clamping: false,
            duration_frames: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Regime {
    Under { omega_0: f64, zeta: f64 },
    Critical { omega_0: f64 },
    Over { r_slow: f64, r_fast: f64 },
}

impl SpringParams {
    /// Spring with the given damping and stiffness, unit mass, released at frame 0.
    pub fn new(damping: f64, stiffness: f64) -> Self {
        Self {
            damping,
            stiffness,
            ..Self::default()
        }
    }

    /// Same spring released at `frame`.
    pub fn triggered_at(mut self, frame: f64) -> Self {
        self.trigger_frame = frame;
        self
    }

    /// Same spring with mass `mass`.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Same spring with overshoot clamping enabled or disabled.
    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// Same spring stretched to settle `frames` after its trigger.
    pub fn with_duration(mut self, frames: f64) -> Self {
        self.duration_frames = Some(frames);
        self
    }

    /// Validate physical parameters.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(ReelError::validation(
                "spring damping must be finite and >= 0",
            ));
        }
        if !self.stiffness.is_finite() || self.stiffness <= 0.0 {
            return Err(ReelError::validation(
                "spring stiffness must be finite and > 0",
            ));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ReelError::validation("spring mass must be finite and > 0"));
        }
        if !self.trigger_frame.is_finite() {
            return Err(ReelError::validation("spring trigger_frame must be finite"));
        }
        if let Some(d) = self.duration_frames {
            if !d.is_finite() || d <= 0.0 {
                return Err(ReelError::validation(
                    "spring duration_frames must be finite and > 0 when set",
                ));
            }
            if self.damping == 0.0 {
                return Err(ReelError::validation(
                    "an undamped spring never settles and cannot be stretched to a duration",
                ));
            }
        }
        Ok(())
    }

    fn regime(&self) -> Regime {
        let omega_0 = (self.stiffness / self.mass).sqrt();
        let critical = 4.0 * self.mass * self.stiffness;
        let disc = self.damping * self.damping - critical;
        if disc.abs() <= critical * 1e-12 {
            Regime::Critical { omega_0 }
        } else if disc < 0.0 {
            Regime::Under {
                omega_0,
                zeta: self.damping / (2.0 * (self.stiffness * self.mass).sqrt()),
            }
        } else {
            let root = disc.sqrt();
            let two_m = 2.0 * self.mass;
            Regime::Over {
                r_slow: (-self.damping + root) / two_m,
                r_fast: (-self.damping - root) / two_m,
            }
        }
    }

    /// Physical seconds until the envelope falls inside [`SETTLE_EPSILON`]; `None` if undamped.
    fn natural_settle_secs(&self) -> Option<f64> {
        let (amplitude, rate) = match self.regime() {
            Regime::Under { omega_0, zeta } => {
                if zeta <= 0.0 {
                    return None;
                }
                (1.0 / (1.0 - zeta * zeta).sqrt(), zeta * omega_0)
            }
            // (1 + w t) e^{-w t} <= (2 / sqrt(e)) e^{-w t / 2}
            Regime::Critical { omega_0 } => (2.0 / std::f64::consts::E.sqrt(), 0.5 * omega_0),
            Regime::Over { r_slow, r_fast } => (
                (r_slow.abs() + r_fast.abs()) / (r_slow - r_fast).abs(),
                -r_slow,
            ),
        };
        if amplitude <= SETTLE_EPSILON {
            return Some(0.0);
        }
        Some((amplitude / SETTLE_EPSILON).ln() / rate)
    }

    /// Multiplier applied to physical time so a configured duration is honoured.
    fn time_scale(&self, fps: Fps) -> f64 {
        match (self.duration_frames, self.natural_settle_secs()) {
            (Some(d), Some(settle)) if settle > 0.0 => settle * fps.as_f64() / d,
            _ => 1.0,
        }
    }

    /// Frame after which [`SpringParams::evaluate`] returns exactly `1.0`, or `None` if undamped.
    pub fn settle_frame(&self, fps: Fps) -> Option<f64> {
        let settle = self.natural_settle_secs()?;
        let scale = self.time_scale(fps);
        Some(self.trigger_frame + settle * fps.as_f64() / scale)
    }

    /// Spring position at `frame`.
    ///
    /// `0` before the trigger, exactly `1` once settled, otherwise the closed-form response.
    /// Under-damped springs overshoot above 1 unless `overshoot_clamping` is set.
    pub fn evaluate(&self, frame: f64, fps: Fps) -> f64 {
        let elapsed = frame - self.trigger_frame;
        if elapsed.is_nan() || elapsed <= 0.0 {
            return 0.0;
        }

        let t = fps.frames_to_secs(elapsed) * self.time_scale(fps);
        if let Some(settle) = self.natural_settle_secs()
            && t >= settle
        {
            return 1.0;
        }

        let x = match self.regime() {
            Regime::Under { omega_0, zeta } => {
                let root = (1.0 - zeta * zeta).sqrt();
                let omega_d = omega_0 * root;
                let decay = (-zeta * omega_0 * t).exp();
                1.0 - decay * ((omega_d * t).cos() + (zeta / root) * (omega_d * t).sin())
            }
            Regime::Critical { omega_0 } => {
                let decay = (-omega_0 * t).exp();
                (1.0 - decay * (1.0 + omega_0 * t)).clamp(0.0, 1.0)
            }
            Regime::Over { r_slow, r_fast } => {
                let num = r_fast * (r_slow * t).exp() - r_slow * (r_fast * t).exp();
                (1.0 - num / (r_fast - r_slow)).clamp(0.0, 1.0)
            }
        };

        if self.overshoot_clamping { x.min(1.0) } else { x }
    }
}

/// Free-function form of [`SpringParams::evaluate`].
pub fn spring(frame: f64, fps: Fps, params: &SpringParams) -> f64 {
    params.evaluate(frame, fps)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
