use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8Premul, Vec2},
    foundation::error::{ReelError, ReelResult},
};

/// Component-wise linear blend. `t` may leave `[0, 1]` when extrapolating.
pub trait Lerp: Sized {
    /// Blend `a` toward `b` by `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8Premul {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// What a table does outside its first/last offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the boundary value.
    #[default]
    Clamp,
    /// Continue the boundary segment's linear slope.
    Extend,
}

/// One `(offset, value)` point.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Frame offset (real-valued).
    pub frame: f64,
    /// Value at that offset.
    pub value: T,
}

#[derive(serde::Deserialize)]
struct KeyframeTableRepr<T> {
    points: Vec<Keyframe<T>>,
    #[serde(default)]
    left: Extrapolate,
    #[serde(default)]
    right: Extrapolate,
}

/// Validated keyframe table: at least two points with strictly increasing finite offsets.
///
/// The only way to obtain one is through [`KeyframeTable::new`] (or deserialization, which runs
/// the same checks), so evaluation never fails.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    try_from = "KeyframeTableRepr<T>",
    bound(
        serialize = "T: serde::Serialize",
        deserialize = "T: serde::Deserialize<'de>"
    )
)]
pub struct KeyframeTable<T> {
    points: Vec<Keyframe<T>>,
    left: Extrapolate,
    right: Extrapolate,
}

impl<T> TryFrom<KeyframeTableRepr<T>> for KeyframeTable<T> {
    type Error = ReelError;

    fn try_from(repr: KeyframeTableRepr<T>) -> Result<Self, Self::Error> {
        Self::new(repr.points, repr.left, repr.right)
    }
}

impl<T> KeyframeTable<T> {
    /// Validate and build a table.
    pub fn new(points: Vec<Keyframe<T>>, left: Extrapolate, right: Extrapolate) -> ReelResult<Self> {
        if points.len() < 2 {
            return Err(ReelError::keyframes(format!(
                "need at least two points, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|k| !k.frame.is_finite()) {
            return Err(ReelError::keyframes(format!(
                "offset {} is not finite",
                bad.frame
            )));
        }
        if let Some(w) = points.windows(2).find(|w| w[0].frame >= w[1].frame) {
            return Err(ReelError::keyframes(format!(
                "offsets must be strictly increasing ({} then {})",
                w[0].frame, w[1].frame
            )));
        }
        Ok(Self {
            points,
            left,
            right,
        })
    }

    /// Table from `(offset, value)` pairs, clamped on both sides.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, T)>) -> ReelResult<Self> {
        let points = pairs
            .into_iter()
            .map(|(frame, value)| Keyframe { frame, value })
            .collect();
        Self::new(points, Extrapolate::Clamp, Extrapolate::Clamp)
    }

    /// Replace the extrapolation policies.
    pub fn with_extrapolation(mut self, left: Extrapolate, right: Extrapolate) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Points in offset order.
    pub fn points(&self) -> &[Keyframe<T>] {
        &self.points
    }

    /// Left extrapolation policy.
    pub fn left(&self) -> Extrapolate {
        self.left
    }

    /// Right extrapolation policy.
    pub fn right(&self) -> Extrapolate {
        self.right
    }

    /// First offset.
    pub fn first_frame(&self) -> f64 {
        self.points[0].frame
    }

    /// Last offset.
    pub fn last_frame(&self) -> f64 {
        self.points[self.points.len() - 1].frame
    }
}

impl<T> KeyframeTable<T>
where
    T: Lerp + Clone,
{
    /// Evaluate at `frame`, easing each bracketing segment with `ease`.
    ///
    /// Outside the table the extrapolation policy of that side applies; `Extend` continues the
    /// boundary segment linearly (no easing). A NaN frame yields the first value.
    pub fn evaluate(&self, frame: f64, ease: Ease) -> T {
        let n = self.points.len();
        let first = &self.points[0];
        let last = &self.points[n - 1];

        if frame.is_nan() {
            return first.value.clone();
        }
        if frame < first.frame {
            return match self.left {
                Extrapolate::Clamp => first.value.clone(),
                Extrapolate::Extend => linear_segment(first, &self.points[1], frame),
            };
        }
        if frame > last.frame {
            return match self.right {
                Extrapolate::Clamp => last.value.clone(),
                Extrapolate::Extend => linear_segment(&self.points[n - 2], last, frame),
            };
        }

        let idx = self.points.partition_point(|k| k.frame <= frame);
        if idx >= n {
            return last.value.clone();
        }

        let a = &self.points[idx - 1];
        let b = &self.points[idx];
        let t = (frame - a.frame) / (b.frame - a.frame);
        T::lerp(&a.value, &b.value, ease.apply(t))
    }
}

fn linear_segment<T: Lerp>(a: &Keyframe<T>, b: &Keyframe<T>, frame: f64) -> T {
    let t = (frame - a.frame) / (b.frame - a.frame);
    T::lerp(&a.value, &b.value, t)
}

/// Free-function form of [`KeyframeTable::evaluate`].
pub fn interpolate<T>(frame: f64, table: &KeyframeTable<T>, ease: Ease) -> T
where
    T: Lerp + Clone,
{
    table.evaluate(frame, ease)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
