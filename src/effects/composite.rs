use crate::{
    effects::presentation::{Direction, Presentation},
    foundation::core::{Affine, Canvas, Rect, Rgba8Premul, Vec2},
    foundation::math::noise01,
};

/// What a layer draws.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerContent<P> {
    /// Opaque scene payload produced by the scene renderer.
    Payload(P),
    /// Full-canvas solid color.
    Fill(Rgba8Premul),
}

/// One drawable entry of a [`FrameOutput`], painted back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer<P> {
    pub content: LayerContent<P>,
    /// Applied to the content before clipping.
    pub transform: Affine,
    /// Multiplies the content's own alpha, `[0, 1]`.
    pub opacity: f64,
    /// Clip in canvas coordinates, applied after `transform`.
    pub clip: Option<Rect>,
    /// Feather width of the clip edge in pixels.
    pub feather_px: f64,
}

impl<P> Layer<P> {
    pub fn payload(payload: P) -> Self {
        Self::with_content(LayerContent::Payload(payload))
    }

    pub fn fill(color: Rgba8Premul, opacity: f64) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..Self::with_content(LayerContent::Fill(color))
        }
    }

    fn with_content(content: LayerContent<P>) -> Self {
        Self {
            content,
            transform: Affine::IDENTITY,
            opacity: 1.0,
            clip: None,
            feather_px: 0.0,
        }
    }

    fn faded(mut self, opacity: f64) -> Self {
        self.opacity = (self.opacity * opacity).clamp(0.0, 1.0);
        self
    }

    fn translated(mut self, offset: Vec2) -> Self {
        self.transform = Affine::translate(offset) * self.transform;
        self.clip = self.clip.map(|c| c + offset);
        self
    }

    fn clipped(mut self, rect: Rect, feather_px: f64) -> Self {
        self.clip = Some(match self.clip {
            Some(c) => c.intersect(rect),
            None => rect,
        });
        self.feather_px = self.feather_px.max(feather_px);
        self
    }
}

/// Ordered layer stack for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput<P> {
    pub layers: Vec<Layer<P>>,
}

impl<P> FrameOutput<P> {
    /// A scene's rendered payload as a single untransformed layer.
    pub fn scene(payload: P) -> Self {
        Self {
            layers: vec![Layer::payload(payload)],
        }
    }

    fn map(self, f: impl Fn(Layer<P>) -> Layer<P>) -> Self {
        Self {
            layers: self.layers.into_iter().map(f).collect(),
        }
    }

    fn then(mut self, other: Self) -> Self {
        self.layers.extend(other.layers);
        self
    }
}

/// Glitch offsets re-roll this many times across a transition.
const GLITCH_STEPS: f64 = 16.0;

/// Blends two rendered endpoints according to a [`Presentation`].
#[derive(Clone, Copy, Debug)]
pub struct TransitionCompositor {
    canvas: Canvas,
}

impl TransitionCompositor {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    /// Blend `from` into `to` at `progress`.
    ///
    /// Returns exactly `from` for `progress <= 0` (or NaN) and exactly `to` for `progress >= 1`.
    pub fn composite<P: Clone>(
        &self,
        from: &FrameOutput<P>,
        to: &FrameOutput<P>,
        progress: f64,
        presentation: &Presentation,
    ) -> FrameOutput<P> {
        if progress.is_nan() || progress <= 0.0 {
            return from.clone();
        }
        if progress >= 1.0 {
            return to.clone();
        }
        let p = progress;
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let midpoint = |p: f64| if p < 0.5 { from.clone() } else { to.clone() };

        match presentation {
            Presentation::Cut => midpoint(p),
            Presentation::Crossfade => {
                let out = from.clone().map(|l| l.faded(1.0 - p));
                out.then(to.clone().map(|l| l.faded(p)))
            }
            Presentation::Wipe { dir, soft_edge } => {
                let (reveal, extent) = match dir {
                    Direction::LeftToRight => (Rect::new(0.0, 0.0, w * p, h), w),
                    Direction::RightToLeft => (Rect::new(w * (1.0 - p), 0.0, w, h), w),
                    Direction::TopToBottom => (Rect::new(0.0, 0.0, w, h * p), h),
                    Direction::BottomToTop => (Rect::new(0.0, h * (1.0 - p), w, h), h),
                };
                let feather = soft_edge * extent;
                from.clone()
                    .then(to.clone().map(|l| l.clipped(reveal, feather)))
            }
            Presentation::Flash { color, peak } => {
                let mut out = midpoint(p);
                let opacity = peak * (std::f64::consts::PI * p).sin();
                out.layers.push(Layer::fill(*color, opacity));
                out
            }
            Presentation::WhipPan { dir } => {
                let unit = match dir {
                    Direction::LeftToRight => Vec2::new(w, 0.0),
                    Direction::RightToLeft => Vec2::new(-w, 0.0),
                    Direction::TopToBottom => Vec2::new(0.0, h),
                    Direction::BottomToTop => Vec2::new(0.0, -h),
                };
                let out = from.clone().map(|l| l.translated(unit * p));
                out.then(to.clone().map(|l| l.translated(unit * (p - 1.0))))
            }
            Presentation::Glitch {
                seed,
                slices,
                max_shift_px,
            } => {
                let base = midpoint(p);
                let intensity = (std::f64::consts::PI * p).sin();
                let step = (p * GLITCH_STEPS).floor() as u64;
                let band_h = h / f64::from(*slices);
                let mut layers = Vec::with_capacity(base.layers.len() * (*slices as usize));
                for k in 0..*slices {
                    let n = noise01(*seed, u64::from(k), step);
                    let shift = (n * 2.0 - 1.0) * max_shift_px * intensity;
                    let y0 = band_h * f64::from(k);
                    let band = Rect::new(shift, y0, w + shift, y0 + band_h);
                    for layer in &base.layers {
                        layers.push(
                            layer
                                .clone()
                                .translated(Vec2::new(shift, 0.0))
                                .clipped(band, 0.0),
                        );
                    }
                }
                FrameOutput { layers }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
