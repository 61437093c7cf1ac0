//! Global frame windows for an alternating scene/transition list.
//!
//! Scenes are laid end to end, then every transition pulls the following scenes back by its
//! duration so it overlaps the last frames of the outgoing scene and the first frames of the
//! incoming one:
//!
//! ```text
//! scene A  [0 ........................ 90)
//! glitch                      [82 .... 90)
//! scene B                     [82 ............................ 202)
//! ```
//!
//! The resulting segments (scene-only stretches and transition windows) partition
//! `[0, total_frames)` with `total_frames = sum(scenes) - sum(transitions)`.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::anim::ParamTrack,
    effects::presentation::Presentation,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    timeline::model::{SceneSpec, TimelineItem, Timing, TransitionSpec},
};

/// A scene with its global window.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePlacement {
    pub id: String,
    /// Position among scenes (transitions not counted).
    pub index: usize,
    /// Full global window `[start, start + duration)`, overlaps included.
    pub window: FrameRange,
    pub props: BTreeMap<String, ParamTrack>,
}

impl ScenePlacement {
    pub fn duration_frames(&self) -> u64 {
        self.window.len_frames()
    }

    /// Scene-local frame of a global frame inside [`ScenePlacement::window`].
    pub fn local_frame(&self, global: FrameIndex) -> u64 {
        global.0 - self.window.start.0
    }
}

/// A transition with its global window and parsed presentation.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPlacement {
    /// Position among transitions.
    pub index: usize,
    pub kind: String,
    pub presentation: Presentation,
    pub timing: Timing,
    /// Index of the outgoing scene; the incoming one is `from_scene + 1`.
    pub from_scene: usize,
    /// `[incoming.start, incoming.start + duration)`.
    pub window: FrameRange,
}

impl TransitionPlacement {
    pub fn duration_frames(&self) -> u64 {
        self.window.len_frames()
    }

    pub fn to_scene(&self) -> usize {
        self.from_scene + 1
    }
}

/// One piece of the `[0, total)` partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Only `scene` is on screen.
    Scene { scene: usize, range: FrameRange },
    /// `transition` blends its two flanking scenes.
    Transition { transition: usize, range: FrameRange },
}

impl Segment {
    pub fn range(&self) -> FrameRange {
        match self {
            Self::Scene { range, .. } | Self::Transition { range, .. } => *range,
        }
    }
}

/// What is on screen at one global frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedFrame {
    Scene {
        scene_id: String,
        scene_index: usize,
        local_frame: u64,
    },
    Transition {
        transition_index: usize,
        from_scene_id: String,
        to_scene_id: String,
        local_frame_from: u64,
        local_frame_to: u64,
        /// Frames since the window start over the transition duration.
        linear_progress: f64,
        /// `linear_progress` through the transition's timing curve.
        progress: f64,
    },
}

/// Immutable placement table built once from the manifest's timeline.
#[derive(Clone, Debug)]
pub struct Timeline {
    fps: Fps,
    scenes: Vec<ScenePlacement>,
    transitions: Vec<TransitionPlacement>,
    segments: Vec<Segment>, // sorted, contiguous from 0
    total_frames: u64,
}

impl Timeline {
    /// Validate an alternating `Scene, Transition, ..., Scene` list and place every item.
    pub fn new(fps: Fps, items: &[TimelineItem]) -> ReelResult<Self> {
        fps.validate()?;
        let (scene_specs, transition_specs) = split_alternating(items)?;

        let mut ids = BTreeSet::new();
        for s in &scene_specs {
            s.validate()?;
            if !ids.insert(s.id.as_str()) {
                return Err(ReelError::validation(format!(
                    "duplicate scene id '{}'",
                    s.id
                )));
            }
        }
        for t in &transition_specs {
            t.validate()?;
        }
        check_overlaps(&scene_specs, &transition_specs)?;

        let mut scenes = Vec::with_capacity(scene_specs.len());
        let mut transitions = Vec::with_capacity(transition_specs.len());
        let mut cursor = 0u64;
        for (i, spec) in scene_specs.iter().enumerate() {
            let start = cursor;
            let end = start
                .checked_add(spec.duration_frames)
                .ok_or_else(|| ReelError::validation("timeline length overflows u64"))?;
            scenes.push(ScenePlacement {
                id: spec.id.clone(),
                index: i,
                window: FrameRange::new(FrameIndex(start), FrameIndex(end))?,
                props: spec.props.clone(),
            });
            cursor = end;
            if let Some(t) = transition_specs.get(i) {
                cursor -= t.duration_frames;
                transitions.push(TransitionPlacement {
                    index: i,
                    kind: t.kind.clone(),
                    presentation: t.presentation()?,
                    timing: t.timing,
                    from_scene: i,
                    window: FrameRange::new(FrameIndex(cursor), FrameIndex(end))?,
                });
            }
        }
        let total_frames = cursor;

        let mut segments = Vec::with_capacity(scenes.len() + transitions.len());
        for scene in &scenes {
            let solo_start = match scene.index.checked_sub(1) {
                Some(prev) => transitions[prev].window.end.0,
                None => scene.window.start.0,
            };
            let outgoing = transitions.get(scene.index);
            let solo_end = outgoing.map_or(scene.window.end.0, |t| t.window.start.0);
            if solo_start < solo_end {
                segments.push(Segment::Scene {
                    scene: scene.index,
                    range: FrameRange::new(FrameIndex(solo_start), FrameIndex(solo_end))?,
                });
            }
            if let Some(t) = outgoing {
                segments.push(Segment::Transition {
                    transition: t.index,
                    range: t.window,
                });
            }
        }

        tracing::debug!(
            total_frames,
            scenes = scenes.len(),
            transitions = transitions.len(),
            segments = segments.len(),
            "timeline built"
        );

        Ok(Self {
            fps,
            scenes,
            transitions,
            segments,
            total_frames,
        })
    }

    /// Resolve what is on screen at a global frame.
    pub fn resolve(&self, frame: FrameIndex) -> ReelResult<ResolvedFrame> {
        if frame.0 >= self.total_frames {
            return Err(ReelError::FrameOutOfRange {
                frame: frame.0,
                total: self.total_frames,
            });
        }
        let idx = self
            .segments
            .partition_point(|s| s.range().start.0 <= frame.0)
            .checked_sub(1)
            .ok_or_else(|| ReelError::evaluation("timeline segments do not start at frame 0"))?;

        match self.segments[idx] {
            Segment::Scene { scene, .. } => {
                let s = &self.scenes[scene];
                Ok(ResolvedFrame::Scene {
                    scene_id: s.id.clone(),
                    scene_index: s.index,
                    local_frame: s.local_frame(frame),
                })
            }
            Segment::Transition { transition, range } => {
                let t = &self.transitions[transition];
                let from = &self.scenes[t.from_scene];
                let to = &self.scenes[t.to_scene()];
                let duration = range.len_frames();
                let linear = (frame.0 - range.start.0) as f64 / duration as f64;
                Ok(ResolvedFrame::Transition {
                    transition_index: t.index,
                    from_scene_id: from.id.clone(),
                    to_scene_id: to.id.clone(),
                    local_frame_from: from.local_frame(frame),
                    local_frame_to: to.local_frame(frame),
                    linear_progress: linear,
                    progress: t.timing.progress(linear, duration, self.fps),
                })
            }
        }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Exclusive end of the global frame axis.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn scenes(&self) -> &[ScenePlacement] {
        &self.scenes
    }

    pub fn transitions(&self) -> &[TransitionPlacement] {
        &self.transitions
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn scene(&self, id: &str) -> ReelResult<&ScenePlacement> {
        self.scenes
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ReelError::UnknownScene(id.to_string()))
    }

    pub fn scene_at(&self, index: usize) -> Option<&ScenePlacement> {
        self.scenes.get(index)
    }

    pub fn transition_at(&self, index: usize) -> Option<&TransitionPlacement> {
        self.transitions.get(index)
    }
}

fn split_alternating(items: &[TimelineItem]) -> ReelResult<(Vec<&SceneSpec>, Vec<&TransitionSpec>)> {
    if items.is_empty() {
        return Err(ReelError::validation(
            "timeline must contain at least one scene",
        ));
    }
    let mut scenes = Vec::with_capacity(items.len() / 2 + 1);
    let mut transitions = Vec::with_capacity(items.len() / 2);
    for (i, item) in items.iter().enumerate() {
        match item {
            TimelineItem::Scene(s) if i % 2 == 0 => scenes.push(s),
            TimelineItem::Transition(t) if i % 2 == 1 => transitions.push(t),
            TimelineItem::Transition(t) => {
                return Err(ReelError::validation(format!(
                    "timeline item {i} is transition '{}' but a scene is required there",
                    t.kind
                )));
            }
            TimelineItem::Scene(s) => {
                return Err(ReelError::validation(format!(
                    "timeline item {i} is scene '{}' but a transition is required there",
                    s.id
                )));
            }
        }
    }
    if transitions.len() >= scenes.len() {
        return Err(ReelError::validation("timeline must end with a scene"));
    }
    Ok((scenes, transitions))
}

fn check_overlaps(scenes: &[&SceneSpec], transitions: &[&TransitionSpec]) -> ReelResult<()> {
    let too_large =
        |i: usize, overlap: u64, scene: &SceneSpec| ReelError::TransitionOverlapTooLarge {
            from: scenes[i].id.clone(),
            to: scenes[i + 1].id.clone(),
            duration: transitions[i].duration_frames,
            scene: scene.id.clone(),
            scene_duration: scene.duration_frames,
            overlap,
        };

    for (i, t) in transitions.iter().enumerate() {
        let d = t.duration_frames;
        let (from, to) = (scenes[i], scenes[i + 1]);
        if d > from.duration_frames {
            return Err(too_large(i, d, from));
        }
        if d > to.duration_frames {
            return Err(too_large(i, d, to));
        }
        // The outgoing scene also gives up frames to its own incoming transition.
        if let Some(prev) = i.checked_sub(1).map(|p| transitions[p].duration_frames)
            && prev.saturating_add(d) > from.duration_frames
        {
            return Err(too_large(i, prev.saturating_add(d), from));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scheduler.rs"]
mod tests;
