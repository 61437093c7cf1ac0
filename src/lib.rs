//! reelcast is a deterministic, frame-driven timeline compositor.
//!
//! A reel is an alternating list of scenes and transitions on a single global frame axis, plus a
//! layer of audio cues on the same axis. Every query is a pure function of the frame number, so
//! frames can be evaluated in any order, in parallel, or one at a time for a thumbnail.
//!
//! # Pipeline overview
//!
//! 1. **Build**: `ReelManifest -> Reel` (all validation happens here, before any frame)
//! 2. **Resolve**: `Reel + FrameIndex -> ResolvedFrame` (which scene or transition is active)
//! 3. **Evaluate**: `Reel + FrameIndex -> EvaluatedFrame` (sampled scene params, transition
//!    progress, audible cues with volumes)
//! 4. **Render** (host side): a [`SceneRenderer`] turns each [`SceneFrame`] into a payload and the
//!    [`TransitionCompositor`] blends payloads into a [`FrameOutput`]
//!
//! Continuous parameters come from two stateless engines: keyframe interpolation
//! ([`KeyframeTable`]) and a closed-form damped spring ([`SpringParams`]).
#![forbid(unsafe_code)]

mod animation;
mod audio;
mod effects;
mod eval;
mod foundation;
mod render;
mod timeline;

pub use animation::anim::{Anim, ParamTrack, ParamValue};
pub use animation::ease::Ease;
pub use animation::interpolate::{Extrapolate, Keyframe, KeyframeTable, Lerp, interpolate};
pub use animation::spring::{SETTLE_EPSILON, SpringParams, spring};
pub use audio::cue::{
    ActiveCue, AudioAsset, CueScheduler, CueSpec, ScheduledCue, frame_to_sample,
};
pub use effects::composite::{FrameOutput, Layer, LayerContent, TransitionCompositor};
pub use effects::presentation::{Direction, Presentation, parse_presentation};
pub use eval::evaluator::{EvaluatedFrame, EvaluatedVisual, Reel, SceneFrame};
pub use foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Rect, Rgba8Premul, Vec2,
};
pub use foundation::error::{ReelError, ReelResult};
pub use render::pipeline::{
    RenderStats, RenderThreading, RenderedFrame, SceneRenderer, render_frame, render_frames,
    render_frames_with_stats, render_thumbnail,
};
pub use timeline::dsl::{ReelBuilder, cue, scene, transition};
pub use timeline::model::{ReelManifest, SceneSpec, TimelineItem, Timing, TransitionSpec};
pub use timeline::scheduler::{
    ResolvedFrame, ScenePlacement, Segment, Timeline, TransitionPlacement,
};
