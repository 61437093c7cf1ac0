use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 200,
        height: 100,
    }
}

fn all_presentations() -> Vec<Presentation> {
    vec![
        Presentation::Cut,
        Presentation::Crossfade,
        Presentation::Wipe {
            dir: Direction::LeftToRight,
            soft_edge: 0.1,
        },
        Presentation::Flash {
            color: Rgba8Premul::white(),
            peak: 1.0,
        },
        Presentation::WhipPan {
            dir: Direction::RightToLeft,
        },
        Presentation::Glitch {
            seed: 3,
            slices: 5,
            max_shift_px: 20.0,
        },
    ]
}

#[test]
fn endpoints_are_exact_for_every_presentation() {
    let c = TransitionCompositor::new(canvas());
    let from = FrameOutput::scene("from");
    let to = FrameOutput::scene("to");
    for p in all_presentations() {
        assert_eq!(c.composite(&from, &to, 0.0, &p), from, "{p:?}");
        assert_eq!(c.composite(&from, &to, -0.5, &p), from, "{p:?}");
        assert_eq!(c.composite(&from, &to, f64::NAN, &p), from, "{p:?}");
        assert_eq!(c.composite(&from, &to, 1.0, &p), to, "{p:?}");
        assert_eq!(c.composite(&from, &to, 1.2, &p), to, "{p:?}");
    }
}

#[test]
fn composite_is_pure() {
    let c = TransitionCompositor::new(canvas());
    let from = FrameOutput::scene(1u32);
    let to = FrameOutput::scene(2u32);
    for p in all_presentations() {
        for i in 1..10 {
            let t = f64::from(i) / 10.0;
            assert_eq!(
                c.composite(&from, &to, t, &p),
                c.composite(&from, &to, t, &p)
            );
        }
    }
}

#[test]
fn cut_switches_at_midpoint() {
    let c = TransitionCompositor::new(canvas());
    let from = FrameOutput::scene("a");
    let to = FrameOutput::scene("b");
    assert_eq!(c.composite(&from, &to, 0.49, &Presentation::Cut), from);
    assert_eq!(c.composite(&from, &to, 0.5, &Presentation::Cut), to);
}

#[test]
fn crossfade_weights_both_sides() {
    let c = TransitionCompositor::new(canvas());
    let out = c.composite(
        &FrameOutput::scene("a"),
        &FrameOutput::scene("b"),
        0.25,
        &Presentation::Crossfade,
    );
    assert_eq!(out.layers.len(), 2);
    assert_eq!(out.layers[0].content, LayerContent::Payload("a"));
    assert!((out.layers[0].opacity - 0.75).abs() < 1e-12);
    assert_eq!(out.layers[1].content, LayerContent::Payload("b"));
    assert!((out.layers[1].opacity - 0.25).abs() < 1e-12);
}

#[test]
fn wipe_reveals_incoming_by_clip() {
    let c = TransitionCompositor::new(canvas());
    let out = c.composite(
        &FrameOutput::scene("a"),
        &FrameOutput::scene("b"),
        0.25,
        &Presentation::Wipe {
            dir: Direction::RightToLeft,
            soft_edge: 0.1,
        },
    );
    assert_eq!(out.layers[0].clip, None);
    assert_eq!(out.layers[1].clip, Some(Rect::new(150.0, 0.0, 200.0, 100.0)));
    assert!((out.layers[1].feather_px - 20.0).abs() < 1e-12);
}

#[test]
fn flash_peaks_mid_transition() {
    let c = TransitionCompositor::new(canvas());
    let from = FrameOutput::scene("a");
    let to = FrameOutput::scene("b");
    let flash = Presentation::Flash {
        color: Rgba8Premul::white(),
        peak: 0.9,
    };
    let mid = c.composite(&from, &to, 0.5, &flash);
    let fill = mid.layers.last().unwrap();
    assert_eq!(fill.content, LayerContent::Fill(Rgba8Premul::white()));
    assert!((fill.opacity - 0.9).abs() < 1e-12);
    assert_eq!(mid.layers[0].content, LayerContent::Payload("b"));

    let early = c.composite(&from, &to, 0.1, &flash);
    assert_eq!(early.layers[0].content, LayerContent::Payload("a"));
    assert!(early.layers[1].opacity < fill.opacity);
}

#[test]
fn whip_pan_offsets_by_canvas_width() {
    let c = TransitionCompositor::new(canvas());
    let out = c.composite(
        &FrameOutput::scene("a"),
        &FrameOutput::scene("b"),
        0.5,
        &Presentation::WhipPan {
            dir: Direction::RightToLeft,
        },
    );
    assert_eq!(out.layers[0].transform, Affine::translate((-100.0, 0.0)));
    assert_eq!(out.layers[1].transform, Affine::translate((100.0, 0.0)));
}

#[test]
fn glitch_slices_stay_within_shift_bound() {
    let c = TransitionCompositor::new(canvas());
    let out = c.composite(
        &FrameOutput::scene("a"),
        &FrameOutput::scene("b"),
        0.3,
        &Presentation::Glitch {
            seed: 9,
            slices: 4,
            max_shift_px: 20.0,
        },
    );
    assert_eq!(out.layers.len(), 4);
    for (k, layer) in out.layers.iter().enumerate() {
        assert_eq!(layer.content, LayerContent::Payload("a"));
        let dx = layer.transform.translation().x;
        assert!(dx.abs() <= 20.0, "slice {k} shift {dx}");
        let clip = layer.clip.unwrap();
        assert!((clip.y0 - 25.0 * k as f64).abs() < 1e-9);
        assert!((clip.height() - 25.0).abs() < 1e-9);
    }
}

#[test]
fn glitch_depends_on_seed() {
    let c = TransitionCompositor::new(canvas());
    let from = FrameOutput::scene("a");
    let to = FrameOutput::scene("b");
    let g = |seed| Presentation::Glitch {
        seed,
        slices: 6,
        max_shift_px: 30.0,
    };
    assert_ne!(
        c.composite(&from, &to, 0.4, &g(1)),
        c.composite(&from, &to, 0.4, &g(2))
    );
}
