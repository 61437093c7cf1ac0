use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReelError::keyframes("x")
            .to_string()
            .contains("invalid keyframe table:")
    );
    assert!(
        ReelError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn out_of_range_names_bounds() {
    let err = ReelError::FrameOutOfRange {
        frame: 202,
        total: 202,
    };
    assert_eq!(err.to_string(), "frame 202 is out of range [0, 202)");
}

#[test]
fn overlap_error_names_both_scenes() {
    let err = ReelError::TransitionOverlapTooLarge {
        from: "hook".to_string(),
        to: "solution".to_string(),
        duration: 40,
        scene: "hook".to_string(),
        scene_duration: 30,
        overlap: 40,
    };
    let s = err.to_string();
    assert!(s.contains("'hook' -> 'solution' (40 frames)"));
    assert!(s.contains("(30 frames)"));
    assert!(s.contains("overlapped by 40 frames"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn lookup_errors_carry_the_reference() {
    let err = ReelError::UnknownCue("cue 'sfx' references unregistered asset 'boom'".to_string());
    assert_eq!(
        err.to_string(),
        "unknown cue reference: cue 'sfx' references unregistered asset 'boom'"
    );
    assert_eq!(
        ReelError::UnknownPresentation("spiral".to_string()).to_string(),
        "unknown presentation 'spiral'"
    );
}
