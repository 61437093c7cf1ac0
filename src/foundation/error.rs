/// Convenience result type used across reelcast.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy.
///
/// Everything except [`ReelError::FrameOutOfRange`] and [`ReelError::Evaluation`] is raised while
/// a [`crate::Reel`] is being built, before any frame is evaluated.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided manifest data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Keyframe table with fewer than two points or non-increasing offsets.
    #[error("invalid keyframe table: {0}")]
    InvalidKeyframeTable(String),

    /// A transition removes more frames than a flanking scene contributes.
    #[error(
        "transition overlap too large: transition '{from}' -> '{to}' ({duration} frames) leaves scene '{scene}' ({scene_duration} frames) overlapped by {overlap} frames"
    )]
    TransitionOverlapTooLarge {
        /// Outgoing scene id.
        from: String,
        /// Incoming scene id.
        to: String,
        /// Transition duration in frames.
        duration: u64,
        /// Scene whose budget is exceeded.
        scene: String,
        /// That scene's duration in frames.
        scene_duration: u64,
        /// Frames of that scene covered by transitions, counting its other neighbour.
        overlap: u64,
    },

    /// A query frame outside `[0, total)`.
    #[error("frame {frame} is out of range [0, {total})")]
    FrameOutOfRange {
        /// Requested frame.
        frame: u64,
        /// Exclusive upper bound.
        total: u64,
    },

    /// Transition kind that is not part of the presentation set.
    #[error("unknown presentation '{0}'")]
    UnknownPresentation(String),

    /// Cue referencing an unregistered asset, or lookup of an unknown cue.
    #[error("unknown cue reference: {0}")]
    UnknownCue(String),

    /// Lookup of an unknown scene id.
    #[error("unknown scene '{0}'")]
    UnknownScene(String),

    /// Errors raised while driving the per-frame host loop.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing manifests.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::InvalidKeyframeTable`] value.
    pub fn keyframes(msg: impl Into<String>) -> Self {
        Self::InvalidKeyframeTable(msg.into())
    }

    /// Build a [`ReelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
