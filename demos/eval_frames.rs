use reelcast::{EvaluatedVisual, FrameIndex, Reel};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let reel = Reel::from_json_str(include_str!("../tests/data/promo_reel.json"))?;

    for f in [0u64, 82, 86, 197, 308, 453] {
        let eval = reel.eval_frame(FrameIndex(f))?;
        let visual = match &eval.visual {
            EvaluatedVisual::Scene(s) => format!("scene {}@{}", s.scene_id, s.local_frame),
            EvaluatedVisual::Transition {
                from, to, progress, ..
            } => format!("{} -> {} ({progress:.3})", from.scene_id, to.scene_id),
        };
        println!("frame {f}: {visual}, {} cues", eval.cues.len());
    }

    Ok(())
}
