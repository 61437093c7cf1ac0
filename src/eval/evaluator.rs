use std::collections::BTreeMap;
use std::path::Path;

use crate::{
    animation::anim::ParamValue,
    audio::cue::{ActiveCue, CueScheduler},
    effects::presentation::Presentation,
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{ReelError, ReelResult},
    timeline::model::ReelManifest,
    timeline::scheduler::{ResolvedFrame, ScenePlacement, Timeline},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the scene content collaborator needs to draw one scene frame.
pub struct SceneFrame {
    /// Scene identifier.
    pub scene_id: String,
    /// Position among scenes.
    pub scene_index: usize,
    /// Frame offset into the scene.
    pub local_frame: u64,
    /// Every prop track sampled at `local_frame`.
    pub params: BTreeMap<String, ParamValue>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Visual state at one frame.
pub enum EvaluatedVisual {
    /// A single scene is on screen.
    Scene(SceneFrame),
    /// Two scenes blended by a transition.
    Transition {
        /// Position among transitions.
        transition_index: usize,
        /// Blend strategy.
        presentation: Presentation,
        /// Outgoing scene.
        from: SceneFrame,
        /// Incoming scene.
        to: SceneFrame,
        /// Un-eased progress in `[0, 1)`.
        linear_progress: f64,
        /// Eased progress in `[0, 1]`.
        progress: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Full evaluated state of one global frame.
pub struct EvaluatedFrame {
    /// Evaluated frame index.
    pub frame: FrameIndex,
    /// Scene or transition state.
    pub visual: EvaluatedVisual,
    /// Audible cues, in start order.
    pub cues: Vec<ActiveCue>,
}

/// A validated, immutable reel. Every query is a pure function of the frame number.
#[derive(Clone, Debug)]
pub struct Reel {
    canvas: Canvas,
    timeline: Timeline,
    cues: CueScheduler,
}

impl Reel {
    /// Validate `manifest` and build the timeline and cue tables.
    #[tracing::instrument(skip(manifest))]
    pub fn new(manifest: &ReelManifest) -> ReelResult<Self> {
        manifest.validate()?;
        let timeline = Timeline::new(manifest.fps, &manifest.timeline)?;
        let cues = CueScheduler::new(
            &manifest.audio_assets,
            &manifest.cues,
            timeline.total_frames(),
        )?;
        Ok(Self {
            canvas: manifest.canvas,
            timeline,
            cues,
        })
    }

    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        Self::new(&ReelManifest::from_json_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReelError::Other(
                anyhow::Error::new(e).context(format!("read manifest '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&text)
    }

    pub fn fps(&self) -> Fps {
        self.timeline.fps()
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn total_frames(&self) -> u64 {
        self.timeline.total_frames()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn cue_scheduler(&self) -> &CueScheduler {
        &self.cues
    }

    pub fn resolve(&self, frame: FrameIndex) -> ReelResult<ResolvedFrame> {
        self.timeline.resolve(frame)
    }

    pub fn active_cues(&self, frame: FrameIndex) -> ReelResult<Vec<ActiveCue>> {
        self.cues.active_cues(frame)
    }

    fn sample_scene(&self, scene: &ScenePlacement, local_frame: u64) -> SceneFrame {
        let fps = self.timeline.fps();
        SceneFrame {
            scene_id: scene.id.clone(),
            scene_index: scene.index,
            local_frame,
            params: scene
                .props
                .iter()
                .map(|(name, track)| (name.clone(), track.sample(local_frame as f64, fps)))
                .collect(),
        }
    }

    fn scene_frame(&self, index: usize, local_frame: u64) -> ReelResult<SceneFrame> {
        let scene = self.timeline.scene_at(index).ok_or_else(|| {
            ReelError::evaluation(format!("scene index {index} is not on the timeline"))
        })?;
        Ok(self.sample_scene(scene, local_frame))
    }

    /// Scene state at a scene-local frame, independent of the global timeline position.
    pub fn scene_frame_by_id(&self, id: &str, local_frame: u64) -> ReelResult<SceneFrame> {
        let scene = self.timeline.scene(id)?;
        Ok(self.sample_scene(scene, local_frame))
    }

    /// Resolve, sample, and collect cues for one global frame.
    #[tracing::instrument(skip(self))]
    pub fn eval_frame(&self, frame: FrameIndex) -> ReelResult<EvaluatedFrame> {
        let visual = match self.timeline.resolve(frame)? {
            ResolvedFrame::Scene {
                scene_index,
                local_frame,
                ..
            } => EvaluatedVisual::Scene(self.scene_frame(scene_index, local_frame)?),
            ResolvedFrame::Transition {
                transition_index,
                local_frame_from,
                local_frame_to,
                linear_progress,
                progress,
                ..
            } => {
                let t = self.timeline.transition_at(transition_index).ok_or_else(|| {
                    ReelError::evaluation(format!(
                        "transition index {transition_index} is not on the timeline"
                    ))
                })?;
                EvaluatedVisual::Transition {
                    transition_index,
                    presentation: t.presentation.clone(),
                    from: self.scene_frame(t.from_scene, local_frame_from)?,
                    to: self.scene_frame(t.to_scene(), local_frame_to)?,
                    linear_progress,
                    progress,
                }
            }
        };
        Ok(EvaluatedFrame {
            frame,
            visual,
            cues: self.cues.active_cues(frame)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
