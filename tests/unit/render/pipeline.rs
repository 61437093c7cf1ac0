use super::*;
use crate::{
    effects::composite::LayerContent,
    foundation::core::{Canvas, Fps},
    timeline::dsl::{ReelBuilder, scene, transition},
};

struct Labels;

impl SceneRenderer for Labels {
    type Payload = String;

    fn render_scene(&self, scene: &SceneFrame) -> ReelResult<String> {
        Ok(format!("{}@{}", scene.scene_id, scene.local_frame))
    }
}

struct Failing;

impl SceneRenderer for Failing {
    type Payload = ();

    fn render_scene(&self, scene: &SceneFrame) -> ReelResult<()> {
        if scene.scene_id == "b" {
            return Err(ReelError::evaluation("scene b exploded"));
        }
        Ok(())
    }
}

fn reel() -> Reel {
    ReelBuilder::new(
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 640,
            height: 360,
        },
    )
    .scene(scene("a", 30))
    .transition(transition("crossfade", 10))
    .scene(scene("b", 30))
    .build()
    .unwrap()
}

fn whole(reel: &Reel) -> FrameRange {
    FrameRange::new(FrameIndex(0), FrameIndex(reel.total_frames())).unwrap()
}

#[test]
fn scene_frame_is_single_layer() {
    let r = reel();
    let out = render_frame(&r, &Labels, FrameIndex(5)).unwrap();
    assert_eq!(out.output, FrameOutput::scene("a@5".to_string()));
}

#[test]
fn transition_endpoints_match_neighbouring_scene_renders() {
    let r = reel();
    // window [20, 30): first frame is pure outgoing scene
    let first = render_frame(&r, &Labels, FrameIndex(20)).unwrap();
    assert_eq!(first.output, FrameOutput::scene("a@20".to_string()));

    let mid = render_frame(&r, &Labels, FrameIndex(25)).unwrap();
    assert_eq!(mid.output.layers.len(), 2);
    assert_eq!(mid.output.layers[0].content, LayerContent::Payload("a@25".to_string()));
    assert_eq!(mid.output.layers[1].content, LayerContent::Payload("b@5".to_string()));

    let after = render_frame(&r, &Labels, FrameIndex(30)).unwrap();
    assert_eq!(after.output, FrameOutput::scene("b@10".to_string()));
}

#[test]
fn thumbnail_is_frame_zero() {
    let r = reel();
    assert_eq!(
        render_thumbnail(&r, &Labels).unwrap(),
        render_frame(&r, &Labels, FrameIndex(0)).unwrap()
    );
}

#[test]
fn parallel_matches_sequential() {
    let r = reel();
    let (seq, seq_stats) =
        render_frames_with_stats(&r, &Labels, whole(&r), &RenderThreading::default()).unwrap();
    let (par, par_stats) = render_frames_with_stats(
        &r,
        &Labels,
        whole(&r),
        &RenderThreading {
            parallel: true,
            chunk_size: 7,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(seq, par);
    assert_eq!(seq.len(), 50);
    assert_eq!(seq_stats.frames_total, 50);
    assert_eq!(seq_stats.transition_frames, 10);
    assert_eq!(par_stats.transition_frames, 10);
    assert_eq!(par_stats.chunks, 8);
}

#[test]
fn range_is_validated() {
    let r = reel();
    let empty = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    assert!(render_frames(&r, &Labels, empty).is_err());
    let past_end = FrameRange::new(FrameIndex(40), FrameIndex(51)).unwrap();
    assert!(matches!(
        render_frames(&r, &Labels, past_end),
        Err(ReelError::FrameOutOfRange {
            frame: 50,
            total: 50
        })
    ));
    let zero_threads = RenderThreading {
        parallel: true,
        chunk_size: 0,
        threads: Some(0),
    };
    assert!(render_frames_with_stats(&r, &Labels, whole(&r), &zero_threads).is_err());
}

#[test]
fn renderer_errors_propagate() {
    let r = reel();
    assert!(render_frame(&r, &Failing, FrameIndex(0)).is_ok());
    let err = render_frame(&r, &Failing, FrameIndex(25)).unwrap_err();
    assert!(err.to_string().contains("scene b exploded"));
    let parallel = RenderThreading {
        parallel: true,
        ..RenderThreading::default()
    };
    assert!(render_frames_with_stats(&r, &Failing, whole(&r), &parallel).is_err());
}
