use super::*;
use crate::{
    animation::anim::{Anim, ParamTrack},
    animation::interpolate::KeyframeTable,
    animation::spring::SpringParams,
    timeline::dsl::{ReelBuilder, cue, scene, transition},
};

fn reel() -> Reel {
    let fade_in = KeyframeTable::from_pairs([(0.0, 0.0), (15.0, 1.0)]).unwrap();
    ReelBuilder::new(
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 1920,
            height: 1080,
        },
    )
    .scene(
        scene("hook", 90)
            .with_prop(
                "title_opacity",
                ParamTrack::Scalar(Anim::keyframes(fade_in, Default::default())),
            )
            .with_prop(
                "logo_scale",
                ParamTrack::Scalar(Anim::spring(SpringParams::new(12.0, 200.0), 0.0, 1.0)),
            ),
    )
    .transition(transition("glitch", 8).with_params(serde_json::json!({ "seed": 42 })))
    .scene(scene("problem", 120))
    .audio_asset("impact", "https://cdn.example/impact.mp3", Some(30))
    .unwrap()
    .cue(cue("impact", "impact", 0).with_gain(0.7))
    .build()
    .unwrap()
}

#[test]
fn scene_frames_sample_props() {
    let r = reel();
    let f = r.eval_frame(FrameIndex(0)).unwrap();
    match &f.visual {
        EvaluatedVisual::Scene(s) => {
            assert_eq!(s.scene_id, "hook");
            assert_eq!(s.params["title_opacity"], ParamValue::Scalar(0.0));
            assert_eq!(s.params["logo_scale"], ParamValue::Scalar(0.0));
        }
        other => panic!("expected scene, got {other:?}"),
    }
    assert_eq!(f.cues.len(), 1);
    assert_eq!(f.cues[0].volume, 0.7);

    let later = r.eval_frame(FrameIndex(60)).unwrap();
    match later.visual {
        EvaluatedVisual::Scene(s) => {
            assert_eq!(s.params["title_opacity"], ParamValue::Scalar(1.0));
            assert_eq!(s.params["logo_scale"], ParamValue::Scalar(1.0));
        }
        other => panic!("expected scene, got {other:?}"),
    }
    assert!(later.cues.is_empty());
}

#[test]
fn transition_frames_carry_both_scenes() {
    let r = reel();
    match r.eval_frame(FrameIndex(86)).unwrap().visual {
        EvaluatedVisual::Transition {
            presentation,
            from,
            to,
            linear_progress,
            progress,
            ..
        } => {
            assert!(matches!(presentation, Presentation::Glitch { seed: 42, .. }));
            assert_eq!(from.scene_id, "hook");
            assert_eq!(from.local_frame, 86);
            assert_eq!(to.scene_id, "problem");
            assert_eq!(to.local_frame, 4);
            assert_eq!(linear_progress, 0.5);
            assert_eq!(progress, 0.5);
        }
        other => panic!("expected transition, got {other:?}"),
    }
}

#[test]
fn evaluation_is_deterministic_and_order_free() {
    let r = reel();
    let forward: Vec<_> = (0..r.total_frames())
        .map(|f| r.eval_frame(FrameIndex(f)).unwrap())
        .collect();
    for f in (0..r.total_frames()).rev() {
        assert_eq!(r.eval_frame(FrameIndex(f)).unwrap(), forward[f as usize]);
    }
}

#[test]
fn out_of_range_frames_fail() {
    let r = reel();
    assert_eq!(r.total_frames(), 202);
    assert!(matches!(
        r.eval_frame(FrameIndex(202)),
        Err(ReelError::FrameOutOfRange { .. })
    ));
    assert!(r.active_cues(FrameIndex(202)).is_err());
}

#[test]
fn scene_lookup_by_id() {
    let r = reel();
    let s = r.scene_frame_by_id("hook", 15).unwrap();
    assert_eq!(s.params["title_opacity"], ParamValue::Scalar(1.0));
    assert!(matches!(
        r.scene_frame_by_id("outro", 0),
        Err(ReelError::UnknownScene(_))
    ));
}

#[test]
fn manifest_errors_surface_from_new() {
    let json = r#"{
        "fps": { "num": 30, "den": 1 },
        "canvas": { "width": 1920, "height": 1080 },
        "timeline": [
            { "type": "scene", "id": "a", "duration_frames": 30 },
            { "type": "transition", "kind": "glitch", "duration_frames": 40 },
            { "type": "scene", "id": "b", "duration_frames": 30 }
        ]
    }"#;
    assert!(matches!(
        Reel::from_json_str(json),
        Err(ReelError::TransitionOverlapTooLarge { .. })
    ));
    assert!(Reel::from_path("/definitely/not/here.json").is_err());
}

#[test]
fn evaluated_frame_serializes() {
    let r = reel();
    let v = serde_json::to_value(r.eval_frame(FrameIndex(84)).unwrap()).unwrap();
    assert_eq!(v["frame"], 84);
    assert_eq!(v["visual"]["type"], "transition");
    assert_eq!(v["visual"]["presentation"]["kind"], "glitch");
    assert_eq!(v["cues"], serde_json::json!([]));

    let v = serde_json::to_value(r.eval_frame(FrameIndex(5)).unwrap()).unwrap();
    assert_eq!(v["visual"]["type"], "scene");
    assert_eq!(v["visual"]["scene_id"], "hook");
    assert_eq!(v["cues"][0]["cue_id"], "impact");
}
