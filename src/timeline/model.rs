use std::collections::BTreeMap;

use crate::{
    animation::anim::ParamTrack,
    animation::ease::Ease,
    animation::spring::SpringParams,
    audio::cue::{AudioAsset, CueSpec},
    effects::presentation::{Presentation, parse_presentation},
    foundation::core::{Canvas, Fps},
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete reel as authored: an alternating scene/transition list plus audio cues.
///
/// The manifest is plain data. It is validated and turned into an immutable
/// [`crate::Reel`] by [`crate::Reel::new`].
pub struct ReelManifest {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// `Scene, Transition, Scene, ..., Scene`.
    pub timeline: Vec<TimelineItem>,
    /// Audio assets keyed by stable user-facing keys.
    #[serde(default)]
    pub audio_assets: BTreeMap<String, AudioAsset>,
    /// Audio cues on the global frame axis.
    #[serde(default)]
    pub cues: Vec<CueSpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// One entry of [`ReelManifest::timeline`].
pub enum TimelineItem {
    Scene(SceneSpec),
    Transition(TransitionSpec),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A content unit; its payload comes from the host's scene renderer.
pub struct SceneSpec {
    /// Unique scene id.
    pub id: String,
    /// Length in frames, > 0.
    pub duration_frames: u64,
    /// Named visual parameter tracks sampled at the scene's local frame.
    #[serde(default)]
    pub props: BTreeMap<String, ParamTrack>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Blend between the two scenes flanking it.
pub struct TransitionSpec {
    /// Presentation kind, see [`crate::parse_presentation`].
    pub kind: String,
    /// Overlap length in frames, > 0.
    pub duration_frames: u64,
    /// Maps linear progress to eased progress.
    #[serde(default)]
    pub timing: Timing,
    /// Presentation parameter object.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Timing curve of a transition. Output is always within `[0, 1]`.
pub enum Timing {
    /// Progress equals linear progress.
    #[default]
    Linear,
    /// Linear progress through an easing curve.
    Eased {
        /// Curve to apply.
        ease: Ease,
    },
    /// Spring response stretched over the transition duration.
    Spring(SpringParams),
}

impl Timing {
    /// Spring parameters actually used for a transition of `duration_frames`.
    fn stretched(spring: SpringParams, duration_frames: u64) -> SpringParams {
        SpringParams {
            trigger_frame: 0.0,
            duration_frames: Some(duration_frames as f64),
            ..spring
        }
    }

    pub fn validate(&self, duration_frames: u64) -> ReelResult<()> {
        match self {
            Self::Linear => Ok(()),
            Self::Eased { ease } => ease.validate(),
            Self::Spring(spring) => Self::stretched(*spring, duration_frames).validate(),
        }
    }

    /// Eased progress for `linear` in `[0, 1]`; `1` maps to exactly `1`.
    pub fn progress(&self, linear: f64, duration_frames: u64, fps: Fps) -> f64 {
        let linear = if linear.is_nan() {
            0.0
        } else {
            linear.clamp(0.0, 1.0)
        };
        if linear >= 1.0 {
            return 1.0;
        }
        let p = match self {
            Self::Linear => linear,
            Self::Eased { ease } => ease.apply(linear),
            Self::Spring(spring) => {
                let d = duration_frames as f64;
                Self::stretched(*spring, duration_frames).evaluate(linear * d, fps)
            }
        };
        p.clamp(0.0, 1.0)
    }
}

impl SceneSpec {
    pub fn validate(&self) -> ReelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ReelError::validation("scene id must be non-empty"));
        }
        if self.duration_frames == 0 {
            return Err(ReelError::validation(format!(
                "scene '{}' duration_frames must be > 0",
                self.id
            )));
        }
        for (name, track) in &self.props {
            if name.trim().is_empty() {
                return Err(ReelError::validation(format!(
                    "scene '{}' has a prop with an empty name",
                    self.id
                )));
            }
            track.validate()?;
        }
        Ok(())
    }
}

impl TransitionSpec {
    pub fn validate(&self) -> ReelResult<()> {
        if self.duration_frames == 0 {
            return Err(ReelError::validation(format!(
                "transition '{}' duration_frames must be > 0",
                self.kind
            )));
        }
        self.timing.validate(self.duration_frames)?;
        self.presentation().map(|_| ())
    }

    pub fn presentation(&self) -> ReelResult<Presentation> {
        parse_presentation(&self.kind, &self.params)
    }
}

impl ReelManifest {
    /// Parse a manifest from JSON without validating it.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(e.to_string()))
    }

    pub fn to_json_string_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Frame-independent checks. Timeline shape and cue windows are checked when the
    /// timeline and cue scheduler are built.
    pub fn validate(&self) -> ReelResult<()> {
        self.fps.validate()?;
        self.canvas.validate()?;
        for item in &self.timeline {
            match item {
                TimelineItem::Scene(s) => s.validate()?,
                TimelineItem::Transition(t) => t.validate()?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
