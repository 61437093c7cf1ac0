use rayon::prelude::*;

use crate::{
    audio::cue::ActiveCue,
    effects::composite::{FrameOutput, TransitionCompositor},
    eval::evaluator::{EvaluatedVisual, Reel, SceneFrame},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    timeline::scheduler::ResolvedFrame,
};

/// Scene content collaborator: turns a sampled scene frame into an opaque payload.
///
/// Implementations must be pure in `scene` for parallel rendering to match sequential output.
pub trait SceneRenderer {
    /// Whatever the host draws with (display list, texture handle, pixels, ...).
    type Payload: Clone + Send;

    fn render_scene(&self, scene: &SceneFrame) -> ReelResult<Self::Payload>;
}

/// Composited visual output plus the cues audible on that frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedFrame<P> {
    pub frame: FrameIndex,
    pub output: FrameOutput<P>,
    pub cues: Vec<ActiveCue>,
}

/// Evaluate + render + composite a single frame.
///
/// Pipeline:
/// 1. [`Reel::eval_frame`](crate::Reel::eval_frame)
/// 2. [`SceneRenderer::render_scene`] for each visible scene
/// 3. [`TransitionCompositor::composite`](crate::TransitionCompositor::composite) when a
///    transition is active
#[tracing::instrument(skip(reel, renderer))]
pub fn render_frame<R>(
    reel: &Reel,
    renderer: &R,
    frame: FrameIndex,
) -> ReelResult<RenderedFrame<R::Payload>>
where
    R: SceneRenderer + ?Sized,
{
    let eval = reel.eval_frame(frame)?;
    let output = match &eval.visual {
        EvaluatedVisual::Scene(scene) => FrameOutput::scene(renderer.render_scene(scene)?),
        EvaluatedVisual::Transition {
            presentation,
            from,
            to,
            progress,
            ..
        } => {
            let from = FrameOutput::scene(renderer.render_scene(from)?);
            let to = FrameOutput::scene(renderer.render_scene(to)?);
            TransitionCompositor::new(reel.canvas()).composite(&from, &to, *progress, presentation)
        }
    };
    Ok(RenderedFrame {
        frame,
        output,
        cues: eval.cues,
    })
}

/// The still artifact: frame 0.
pub fn render_thumbnail<R>(reel: &Reel, renderer: &R) -> ReelResult<RenderedFrame<R::Payload>>
where
    R: SceneRenderer + ?Sized,
{
    render_frame(reel, renderer, FrameIndex(0))
}

/// Render a range of frames (inclusive start, exclusive end) sequentially.
pub fn render_frames<R>(
    reel: &Reel,
    renderer: &R,
    range: FrameRange,
) -> ReelResult<Vec<RenderedFrame<R::Payload>>>
where
    R: SceneRenderer + Sync,
{
    render_frames_with_stats(reel, renderer, range, &RenderThreading::default())
        .map(|(frames, _)| frames)
}

#[derive(Clone, Debug)]
/// Sequential or chunked-parallel rendering.
pub struct RenderThreading {
    /// Render chunks on a rayon pool.
    pub parallel: bool,
    /// Frames per chunk; 0 is treated as 1.
    pub chunk_size: usize,
    /// Worker threads; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    /// Frames composited from two scenes.
    pub transition_frames: u64,
    pub chunks: u64,
}

#[tracing::instrument(skip(reel, renderer))]
pub fn render_frames_with_stats<R>(
    reel: &Reel,
    renderer: &R,
    range: FrameRange,
    threading: &RenderThreading,
) -> ReelResult<(Vec<RenderedFrame<R::Payload>>, RenderStats)>
where
    R: SceneRenderer + Sync,
{
    if range.is_empty() {
        return Err(ReelError::validation("render range must be non-empty"));
    }
    if range.end.0 > reel.total_frames() {
        return Err(ReelError::FrameOutOfRange {
            frame: range.end.0 - 1,
            total: reel.total_frames(),
        });
    }

    let len = range.len_frames();
    let mut out = Vec::with_capacity(len.min(4096) as usize);
    let mut stats = RenderStats::default();
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let mut frames = match &pool {
            Some(pool) => render_chunk_parallel(reel, renderer, chunk_start..chunk_end, pool)?,
            None => (chunk_start..chunk_end)
                .map(|f| render_frame(reel, renderer, FrameIndex(f)))
                .collect::<ReelResult<Vec<_>>>()?,
        };
        for f in chunk_start..chunk_end {
            if matches!(
                reel.resolve(FrameIndex(f))?,
                ResolvedFrame::Transition { .. }
            ) {
                stats.transition_frames += 1;
            }
        }
        stats.frames_total += chunk_end - chunk_start;
        stats.chunks += 1;
        out.append(&mut frames);
        chunk_start = chunk_end;
    }

    tracing::debug!(
        frames = stats.frames_total,
        chunks = stats.chunks,
        parallel = threading.parallel,
        "frames rendered"
    );
    Ok((out, stats))
}

fn render_chunk_parallel<R>(
    reel: &Reel,
    renderer: &R,
    frames: std::ops::Range<u64>,
    pool: &rayon::ThreadPool,
) -> ReelResult<Vec<RenderedFrame<R::Payload>>>
where
    R: SceneRenderer + Sync,
{
    let frames: Vec<u64> = frames.collect();
    let rendered = pool.install(|| {
        frames
            .par_iter()
            .map(|f| render_frame(reel, renderer, FrameIndex(*f)))
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
