use std::collections::BTreeMap;

use crate::{
    animation::anim::ParamTrack,
    animation::ease::Ease,
    animation::interpolate::KeyframeTable,
    audio::cue::{AudioAsset, CueSpec},
    eval::evaluator::Reel,
    foundation::core::{Canvas, Fps},
    foundation::error::{ReelError, ReelResult},
    timeline::model::{ReelManifest, SceneSpec, TimelineItem, Timing, TransitionSpec},
};

/// Fluent construction of a [`ReelManifest`].
pub struct ReelBuilder {
    fps: Fps,
    canvas: Canvas,
    timeline: Vec<TimelineItem>,
    audio_assets: BTreeMap<String, AudioAsset>,
    cues: Vec<CueSpec>,
}

impl ReelBuilder {
    pub fn new(fps: Fps, canvas: Canvas) -> Self {
        Self {
            fps,
            canvas,
            timeline: Vec::new(),
            audio_assets: BTreeMap::new(),
            cues: Vec::new(),
        }
    }

    pub fn scene(mut self, scene: SceneSpec) -> Self {
        self.timeline.push(TimelineItem::Scene(scene));
        self
    }

    pub fn transition(mut self, transition: TransitionSpec) -> Self {
        self.timeline.push(TimelineItem::Transition(transition));
        self
    }

    pub fn audio_asset(
        mut self,
        key: impl Into<String>,
        src: impl Into<String>,
        duration_frames: Option<u64>,
    ) -> ReelResult<Self> {
        let key = key.into();
        if self.audio_assets.contains_key(&key) {
            return Err(ReelError::validation(format!(
                "duplicate audio asset key '{key}'"
            )));
        }
        self.audio_assets.insert(
            key,
            AudioAsset {
                src: src.into(),
                duration_frames,
            },
        );
        Ok(self)
    }

    pub fn cue(mut self, cue: CueSpec) -> Self {
        self.cues.push(cue);
        self
    }

    /// Manifest after frame-independent validation.
    pub fn build_manifest(self) -> ReelResult<ReelManifest> {
        let manifest = ReelManifest {
            fps: self.fps,
            canvas: self.canvas,
            timeline: self.timeline,
            audio_assets: self.audio_assets,
            cues: self.cues,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Fully validated, ready-to-evaluate reel.
    pub fn build(self) -> ReelResult<Reel> {
        Reel::new(&self.build_manifest()?)
    }
}

pub fn scene(id: impl Into<String>, duration_frames: u64) -> SceneSpec {
    SceneSpec {
        id: id.into(),
        duration_frames,
        props: BTreeMap::new(),
    }
}

impl SceneSpec {
    pub fn with_prop(mut self, name: impl Into<String>, track: ParamTrack) -> Self {
        self.props.insert(name.into(), track);
        self
    }
}

pub fn transition(kind: impl Into<String>, duration_frames: u64) -> TransitionSpec {
    TransitionSpec {
        kind: kind.into(),
        duration_frames,
        timing: Timing::Linear,
        params: serde_json::Value::Null,
    }
}

impl TransitionSpec {
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }
}

pub fn cue(id: impl Into<String>, asset: impl Into<String>, start_frame: u64) -> CueSpec {
    CueSpec {
        id: id.into(),
        asset: asset.into(),
        start_frame,
        end_frame: None,
        gain: 1.0,
        envelope: None,
        ease: Ease::Linear,
    }
}

impl CueSpec {
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn with_envelope(mut self, envelope: KeyframeTable<f64>, ease: Ease) -> Self {
        self.envelope = Some(envelope);
        self.ease = ease;
        self
    }

    pub fn ending_at(mut self, end_frame: u64) -> Self {
        self.end_frame = Some(end_frame);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/dsl.rs"]
mod tests;
