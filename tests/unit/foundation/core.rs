use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(
        FrameRange::new(FrameIndex(3), FrameIndex(3))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_frames_to_secs_is_rational() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.frames_to_secs(30.0) - 1.001).abs() < 1e-12);
    assert_eq!(Fps::new(30, 1).unwrap().frames_to_secs(454.0), 454.0 / 30.0);
}

#[test]
fn hex_colors_premultiply() {
    assert_eq!(
        Rgba8Premul::from_hex("#ffffff").unwrap(),
        Rgba8Premul::white()
    );
    let half = Rgba8Premul::from_hex("ff006e80").unwrap();
    assert_eq!(half.a, 0x80);
    assert_eq!(half.r, 128);
    assert_eq!(half.g, 0);
    assert!(Rgba8Premul::from_hex("#fff").is_err());
    assert!(Rgba8Premul::from_hex("#gg0000").is_err());
}
