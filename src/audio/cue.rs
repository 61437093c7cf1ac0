use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::ease::Ease,
    animation::interpolate::KeyframeTable,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// An audio file the playback layer can resolve.
pub struct AudioAsset {
    /// Opaque URI; never dereferenced here.
    pub src: String,
    /// Natural length in frames, used when a cue has no explicit end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<u64>,
}

fn default_gain() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A cue as authored in the manifest.
pub struct CueSpec {
    /// Unique cue id.
    pub id: String,
    /// Key into the manifest's audio asset table.
    pub asset: String,
    /// Global frame the cue starts playing at.
    pub start_frame: u64,
    /// Exclusive global end frame. Derived when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_frame: Option<u64>,
    /// Constant multiplier applied to the envelope, `[0, 1]`.
    #[serde(default = "default_gain")]
    pub gain: f64,
    /// Volume as a function of frames since `start_frame`. Absent means flat `gain`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope: Option<KeyframeTable<f64>>,
    /// Easing applied between envelope points.
    #[serde(default)]
    pub ease: Ease,
}

/// A validated cue with its resolved global window.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledCue {
    pub id: String,
    pub asset_key: String,
    pub src: String,
    /// `[start, end)` on the global frame axis, clipped to the timeline.
    pub window: FrameRange,
    gain: f64,
    envelope: Option<KeyframeTable<f64>>,
    ease: Ease,
}

impl ScheduledCue {
    /// Volume at a global frame inside [`ScheduledCue::window`].
    pub fn volume_at(&self, frame: FrameIndex) -> f64 {
        let local = frame.0.saturating_sub(self.window.start.0) as f64;
        let envelope = self
            .envelope
            .as_ref()
            .map_or(1.0, |e| e.evaluate(local, self.ease));
        (self.gain * envelope).clamp(0.0, 1.0)
    }

    /// Playback sample positions `[start, end)` covered by this cue.
    pub fn sample_span(&self, fps: Fps, sample_rate: u32) -> (u64, u64) {
        (
            frame_to_sample(self.window.start.0, fps, sample_rate),
            frame_to_sample(self.window.end.0, fps, sample_rate),
        )
    }
}

/// An audible cue at one frame. Volumes are reported independently, never mixed.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ActiveCue {
    pub cue_id: String,
    /// Asset URI.
    pub asset: String,
    /// Frames since the cue started.
    pub local_frame: u64,
    pub volume: f64,
}

/// Resolves which cues are audible at a frame.
#[derive(Clone, Debug)]
pub struct CueScheduler {
    cues: Vec<ScheduledCue>, // sorted by start, stable
    total_frames: u64,
}

impl CueScheduler {
    /// Validate `cues` against `assets` and resolve every window against `total_frames`.
    pub fn new(
        assets: &BTreeMap<String, AudioAsset>,
        cues: &[CueSpec],
        total_frames: u64,
    ) -> ReelResult<Self> {
        for (key, asset) in assets {
            if key.trim().is_empty() {
                return Err(ReelError::validation("audio asset key must be non-empty"));
            }
            if asset.src.trim().is_empty() {
                return Err(ReelError::validation(format!(
                    "audio asset '{key}' src must be non-empty"
                )));
            }
            if asset.duration_frames == Some(0) {
                return Err(ReelError::validation(format!(
                    "audio asset '{key}' duration_frames must be > 0 when set"
                )));
            }
        }

        let mut seen = BTreeSet::new();
        let mut scheduled = Vec::with_capacity(cues.len());
        for cue in cues {
            if cue.id.trim().is_empty() {
                return Err(ReelError::validation("cue id must be non-empty"));
            }
            if !seen.insert(cue.id.as_str()) {
                return Err(ReelError::validation(format!(
                    "duplicate cue id '{}'",
                    cue.id
                )));
            }
            scheduled.push(schedule(assets, cue, total_frames)?);
        }

        scheduled.sort_by_key(|c| c.window.start.0);
        tracing::debug!(cues = scheduled.len(), total_frames, "cues scheduled");

        Ok(Self {
            cues: scheduled,
            total_frames,
        })
    }

    /// Cues audible at `frame`, in start order.
    pub fn active_cues(&self, frame: FrameIndex) -> ReelResult<Vec<ActiveCue>> {
        if frame.0 >= self.total_frames {
            return Err(ReelError::FrameOutOfRange {
                frame: frame.0,
                total: self.total_frames,
            });
        }
        let started = self.cues.partition_point(|c| c.window.start.0 <= frame.0);
        Ok(self.cues[..started]
            .iter()
            .filter(|c| c.window.contains(frame))
            .map(|c| ActiveCue {
                cue_id: c.id.clone(),
                asset: c.src.clone(),
                local_frame: frame.0 - c.window.start.0,
                volume: c.volume_at(frame),
            })
            .collect())
    }

    pub fn cue(&self, id: &str) -> ReelResult<&ScheduledCue> {
        self.cues
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ReelError::UnknownCue(format!("no cue with id '{id}'")))
    }

    pub fn cues(&self) -> &[ScheduledCue] {
        &self.cues
    }
}

fn schedule(
    assets: &BTreeMap<String, AudioAsset>,
    cue: &CueSpec,
    total_frames: u64,
) -> ReelResult<ScheduledCue> {
    let asset = assets.get(&cue.asset).ok_or_else(|| {
        ReelError::UnknownCue(format!(
            "cue '{}' references unregistered asset '{}'",
            cue.id, cue.asset
        ))
    })?;

    if !cue.gain.is_finite() || !(0.0..=1.0).contains(&cue.gain) {
        return Err(ReelError::validation(format!(
            "cue '{}' gain must be within [0, 1]",
            cue.id
        )));
    }
    cue.ease.validate()?;
    if let Some(env) = &cue.envelope
        && env
            .points()
            .iter()
            .any(|k| !k.value.is_finite() || !(0.0..=1.0).contains(&k.value))
    {
        return Err(ReelError::validation(format!(
            "cue '{}' envelope values must be within [0, 1]",
            cue.id
        )));
    }

    if cue.start_frame >= total_frames {
        return Err(ReelError::validation(format!(
            "cue '{}' starts at frame {} but the timeline ends at {total_frames}",
            cue.id, cue.start_frame
        )));
    }
    let end = match (cue.end_frame, asset.duration_frames) {
        (Some(end), _) => {
            if end <= cue.start_frame {
                return Err(ReelError::validation(format!(
                    "cue '{}' end_frame must be > start_frame",
                    cue.id
                )));
            }
            end
        }
        (None, Some(len)) => cue.start_frame.saturating_add(len),
        (None, None) => total_frames,
    };

    Ok(ScheduledCue {
        id: cue.id.clone(),
        asset_key: cue.asset.clone(),
        src: asset.src.clone(),
        window: FrameRange::new(FrameIndex(cue.start_frame), FrameIndex(end.min(total_frames)))?,
        gain: cue.gain,
        envelope: cue.envelope.clone(),
        ease: cue.ease,
    })
}

/// Sample position of a frame offset, rounded to nearest. A zero-rate `fps` maps everything to 0.
pub fn frame_to_sample(frame_delta: u64, fps: Fps, sample_rate: u32) -> u64 {
    if fps.num == 0 {
        return 0;
    }
    let num = u128::from(frame_delta) * u128::from(sample_rate) * u128::from(fps.den);
    let den = u128::from(fps.num);
    ((num + (den / 2)) / den) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/audio/cue.rs"]
mod tests;
