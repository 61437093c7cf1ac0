use crate::{
    animation::ease::Ease,
    animation::interpolate::{KeyframeTable, Lerp},
    animation::spring::SpringParams,
    foundation::core::{Fps, Rgba8Premul, Vec2},
    foundation::error::{ReelError, ReelResult},
};

/// A visual parameter as a pure function of a scene's local frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anim<T> {
    /// The same value on every frame.
    Constant {
        /// Held value.
        value: T,
    },
    /// Keyframe table evaluated through the interpolation engine.
    Keyframes {
        /// Validated table keyed by local frame.
        table: KeyframeTable<T>,
        /// Per-segment easing.
        #[serde(default)]
        ease: Ease,
    },
    /// Spring response mapped onto `from -> to`. Overshoot carries through.
    Spring {
        /// Spring parameters; `trigger_frame` is local to the scene.
        spring: SpringParams,
        /// Value at rest before the trigger.
        from: T,
        /// Value once settled.
        to: T,
    },
    /// Sinusoid swinging between `from` and `to`.
    Oscillate {
        /// Value at the trough.
        from: T,
        /// Value at the crest.
        to: T,
        /// Frames per full cycle.
        period_frames: f64,
        /// Phase offset in radians.
        #[serde(default)]
        phase: f64,
    },
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self::Constant { value }
    }

    pub fn keyframes(table: KeyframeTable<T>, ease: Ease) -> Self {
        Self::Keyframes { table, ease }
    }

    pub fn spring(spring: SpringParams, from: T, to: T) -> Self {
        Self::Spring { spring, from, to }
    }

    pub fn oscillate(from: T, to: T, period_frames: f64) -> Self {
        Self::Oscillate {
            from,
            to,
            period_frames,
            phase: 0.0,
        }
    }

    /// Value at `local_frame`.
    pub fn sample(&self, local_frame: f64, fps: Fps) -> T {
        match self {
            Self::Constant { value } => value.clone(),
            Self::Keyframes { table, ease } => table.evaluate(local_frame, *ease),
            Self::Spring { spring, from, to } => T::lerp(from, to, spring.evaluate(local_frame, fps)),
            Self::Oscillate {
                from,
                to,
                period_frames,
                phase,
            } => {
                let angle = std::f64::consts::TAU * local_frame / period_frames + phase;
                T::lerp(from, to, 0.5 + 0.5 * angle.sin())
            }
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Constant { .. } => Ok(()),
            Self::Keyframes { ease, .. } => ease.validate(),
            Self::Spring { spring, .. } => spring.validate(),
            Self::Oscillate {
                period_frames,
                phase,
                ..
            } => {
                if !period_frames.is_finite() || *period_frames <= 0.0 {
                    return Err(ReelError::validation(
                        "oscillate period_frames must be finite and > 0",
                    ));
                }
                if !phase.is_finite() {
                    return Err(ReelError::validation("oscillate phase must be finite"));
                }
                Ok(())
            }
        }
    }
}

/// Typed parameter track attached to a scene under a name.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "anim", rename_all = "snake_case")]
pub enum ParamTrack {
    Scalar(Anim<f64>),
    Vec2(Anim<Vec2>),
    Color(Anim<Rgba8Premul>),
}

/// A sampled [`ParamTrack`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamValue {
    Scalar(f64),
    Vec2(Vec2),
    Color(Rgba8Premul),
}

impl ParamValue {
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(self) -> Option<Vec2> {
        match self {
            Self::Vec2(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(self) -> Option<Rgba8Premul> {
        match self {
            Self::Color(v) => Some(v),
            _ => None,
        }
    }
}

impl ParamTrack {
    pub fn sample(&self, local_frame: f64, fps: Fps) -> ParamValue {
        match self {
            Self::Scalar(a) => ParamValue::Scalar(a.sample(local_frame, fps)),
            Self::Vec2(a) => ParamValue::Vec2(a.sample(local_frame, fps)),
            Self::Color(a) => ParamValue::Color(a.sample(local_frame, fps)),
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Scalar(a) => a.validate(),
            Self::Vec2(a) => a.validate(),
            Self::Color(a) => a.validate(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
