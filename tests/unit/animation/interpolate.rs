use super::*;

fn table(pairs: &[(f64, f64)]) -> KeyframeTable<f64> {
    KeyframeTable::from_pairs(pairs.iter().copied()).unwrap()
}

#[test]
fn linear_midpoints() {
    let t = table(&[(0.0, 0.0), (10.0, 100.0)]);
    assert_eq!(t.evaluate(5.0, Ease::Linear), 50.0);
    assert_eq!(interpolate(2.5, &t, Ease::Linear), 25.0);
}

#[test]
fn multi_segment_brackets() {
    // Shake intensity curve: up then back down.
    let t = table(&[(20.0, 0.0), (30.0, 8.0), (50.0, 0.0)]);
    assert_eq!(t.evaluate(30.0, Ease::Linear), 8.0);
    assert_eq!(t.evaluate(40.0, Ease::Linear), 4.0);
    assert_eq!(t.evaluate(25.0, Ease::Linear), 4.0);
}

#[test]
fn clamp_holds_boundary_values() {
    let t = table(&[(5.0, 0.0), (15.0, 0.8)]);
    for f in [-100.0, 0.0, 4.999] {
        assert_eq!(t.evaluate(f, Ease::Linear), 0.0);
    }
    for f in [15.001, 20.0, 1.0e6] {
        assert_eq!(t.evaluate(f, Ease::OutCubic), 0.8);
    }
}

#[test]
fn extend_continues_linear_slope() {
    let t = table(&[(0.0, 0.0), (10.0, 1.0)])
        .with_extrapolation(Extrapolate::Extend, Extrapolate::Extend);
    assert!((t.evaluate(20.0, Ease::Linear) - 2.0).abs() < 1e-12);
    assert!((t.evaluate(-10.0, Ease::Linear) + 1.0).abs() < 1e-12);
    // Easing applies only inside the table.
    assert!((t.evaluate(20.0, Ease::InCubic) - 2.0).abs() < 1e-12);
}

#[test]
fn easing_shapes_segment() {
    let t = table(&[(0.0, 0.0), (8.0, 1.0)]);
    let eased = t.evaluate(4.0, Ease::OutCubic);
    assert!((eased - 0.875).abs() < 1e-12);
    assert_eq!(t.evaluate(0.0, Ease::OutCubic), 0.0);
    assert_eq!(t.evaluate(8.0, Ease::OutCubic), 1.0);
}

#[test]
fn colors_interpolate_per_channel() {
    let a = Rgba8Premul::from_straight_rgba(0, 0, 0, 255);
    let b = Rgba8Premul::from_straight_rgba(200, 100, 50, 255);
    let t = KeyframeTable::from_pairs([(0.0, a), (10.0, b)]).unwrap();
    let mid = t.evaluate(5.0, Ease::Linear);
    assert_eq!((mid.r, mid.g, mid.b, mid.a), (100, 50, 25, 255));
}

#[test]
fn vectors_interpolate_per_component() {
    let t = KeyframeTable::from_pairs([(0.0, Vec2::new(0.0, 10.0)), (4.0, Vec2::new(8.0, 2.0))])
        .unwrap();
    assert_eq!(t.evaluate(1.0, Ease::Linear), Vec2::new(2.0, 8.0));
}

#[test]
fn rejects_single_point() {
    let err = KeyframeTable::from_pairs([(0.0, 1.0)]).unwrap_err();
    assert!(matches!(err, ReelError::InvalidKeyframeTable(_)));
}

#[test]
fn rejects_non_increasing_offsets() {
    let err = KeyframeTable::from_pairs([(0.0, 1.0), (5.0, 2.0), (5.0, 3.0)]).unwrap_err();
    assert!(matches!(err, ReelError::InvalidKeyframeTable(_)));
    let err = KeyframeTable::from_pairs([(5.0, 1.0), (0.0, 2.0)]).unwrap_err();
    assert!(matches!(err, ReelError::InvalidKeyframeTable(_)));
}

#[test]
fn rejects_non_finite_offsets() {
    let err = KeyframeTable::from_pairs([(0.0, 1.0), (f64::INFINITY, 2.0)]).unwrap_err();
    assert!(matches!(err, ReelError::InvalidKeyframeTable(_)));
}

#[test]
fn nan_frame_maps_to_first_value() {
    let t = table(&[(0.0, 3.0), (1.0, 4.0)]);
    assert_eq!(t.evaluate(f64::NAN, Ease::Linear), 3.0);
}

#[test]
fn deserialization_validates() {
    let ok: KeyframeTable<f64> = serde_json::from_str(
        r#"{"points":[{"frame":0,"value":0},{"frame":5,"value":0.55}],"right":"extend"}"#,
    )
    .unwrap();
    assert_eq!(ok.left(), Extrapolate::Clamp);
    assert_eq!(ok.right(), Extrapolate::Extend);

    let bad = serde_json::from_str::<KeyframeTable<f64>>(
        r#"{"points":[{"frame":3,"value":0},{"frame":1,"value":1}]}"#,
    );
    let msg = bad.unwrap_err().to_string();
    assert!(msg.contains("strictly increasing"), "{msg}");
}
