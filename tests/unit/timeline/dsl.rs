use super::*;
use crate::{animation::anim::Anim, foundation::core::FrameIndex};

fn base() -> ReelBuilder {
    ReelBuilder::new(
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 1920,
            height: 1080,
        },
    )
}

#[test]
fn builds_a_valid_reel() {
    let reel = base()
        .scene(scene("hook", 90).with_prop("opacity", ParamTrack::Scalar(Anim::constant(1.0))))
        .transition(transition("glitch", 8).with_params(serde_json::json!({ "seed": 3 })))
        .scene(scene("problem", 120))
        .audio_asset("burst", "https://cdn.example/burst.mp3", Some(24))
        .unwrap()
        .cue(cue("burst", "burst", 80).with_gain(0.55))
        .build()
        .unwrap();
    assert_eq!(reel.total_frames(), 202);
    assert_eq!(reel.active_cues(FrameIndex(85)).unwrap().len(), 1);
}

#[test]
fn duplicate_asset_keys_are_rejected() {
    let err = base()
        .audio_asset("a", "x.mp3", None)
        .unwrap()
        .audio_asset("a", "y.mp3", None)
        .err()
        .unwrap();
    assert!(err.to_string().contains("duplicate audio asset key 'a'"));
}

#[test]
fn manifest_validation_runs_on_build() {
    let err = base()
        .scene(scene("hook", 0))
        .build_manifest()
        .unwrap_err();
    assert!(err.to_string().contains("duration_frames must be > 0"));
}

#[test]
fn builder_helpers_fill_defaults() {
    let t = transition("wipe", 12).with_timing(Timing::Eased { ease: Ease::InOutQuad });
    assert_eq!(t.params, serde_json::Value::Null);
    assert_eq!(t.timing, Timing::Eased { ease: Ease::InOutQuad });

    let c = cue("bed", "music", 0)
        .with_envelope(
            KeyframeTable::from_pairs([(0.0, 0.0), (10.0, 0.35)]).unwrap(),
            Ease::Linear,
        )
        .ending_at(400);
    assert_eq!(c.gain, 1.0);
    assert_eq!(c.end_frame, Some(400));
    assert!(c.envelope.is_some());
}
