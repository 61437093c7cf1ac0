use reelcast::{
    Anim, Canvas, Ease, Fps, KeyframeTable, ParamTrack, ReelBuilder, SpringParams, Timing, cue,
    scene, transition,
};

fn main() -> anyhow::Result<()> {
    let manifest = ReelBuilder::new(
        Fps::new(30, 1)?,
        Canvas {
            width: 1080,
            height: 1920,
        },
    )
    .scene(scene("intro", 60).with_prop(
        "title_scale",
        ParamTrack::Scalar(Anim::spring(SpringParams::new(12.0, 200.0), 0.8, 1.0)),
    ))
    .transition(
        transition("wipe", 12)
            .with_timing(Timing::Eased {
                ease: Ease::InOutCubic,
            })
            .with_params(serde_json::json!({ "dir": "ttb", "soft_edge": 0.1 })),
    )
    .scene(scene("outro", 45))
    .audio_asset("riser", "https://cdn.example/riser.mp3", Some(40))?
    .cue(
        cue("riser", "riser", 40)
            .with_envelope(KeyframeTable::from_pairs([(0.0, 0.0), (20.0, 0.8)])?, Ease::OutQuad),
    )
    .build_manifest()?;

    println!("{}", manifest.to_json_string_pretty()?);
    Ok(())
}
