use crate::{
    foundation::core::Rgba8Premul,
    foundation::error::{ReelError, ReelResult},
};

/// Direction of travel for wipes and pans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

/// Closed set of blend strategies a transition can use.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    /// Hard cut at the midpoint.
    Cut,
    /// Outgoing fades out while incoming fades in.
    Crossfade,
    /// Incoming revealed by a growing clip rect.
    Wipe {
        dir: Direction,
        /// Feather width as a fraction of the wipe extent, `[0, 1]`.
        soft_edge: f64,
    },
    /// Hard cut at the midpoint under a full-frame fill with a bell-shaped opacity.
    Flash { color: Rgba8Premul, peak: f64 },
    /// Outgoing slides off while incoming slides in, one canvas extent apart.
    WhipPan { dir: Direction },
    /// Hard cut at the midpoint with seeded horizontal slice displacement.
    Glitch {
        seed: u64,
        slices: u32,
        max_shift_px: f64,
    },
}

const DEFAULT_GLITCH_SLICES: u32 = 12;
const MAX_GLITCH_SLICES: u32 = 256;
const DEFAULT_GLITCH_SHIFT_PX: f64 = 48.0;

type Params<'a> = Option<&'a serde_json::Map<String, serde_json::Value>>;

fn object<'a>(kind: &str, params: &'a serde_json::Value) -> ReelResult<Params<'a>> {
    if params.is_null() {
        return Ok(None);
    }
    params
        .as_object()
        .map(Some)
        .ok_or_else(|| ReelError::validation(format!("{kind} params must be an object")))
}

fn param_f64(kind: &str, params: Params<'_>, key: &str) -> ReelResult<Option<f64>> {
    match params.and_then(|p| p.get(key)) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => match v.as_f64() {
            Some(f) if f.is_finite() => Ok(Some(f)),
            _ => Err(ReelError::validation(format!(
                "{kind}.{key} must be a finite number when set"
            ))),
        },
    }
}

fn param_u64(kind: &str, params: Params<'_>, key: &str) -> ReelResult<Option<u64>> {
    match params.and_then(|p| p.get(key)) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or_else(|| {
            ReelError::validation(format!("{kind}.{key} must be a non-negative integer"))
        }),
    }
}

fn param_dir(kind: &str, params: Params<'_>, default: Direction) -> ReelResult<Direction> {
    let Some(v) = params.and_then(|p| p.get("dir")) else {
        return Ok(default);
    };
    let s = v
        .as_str()
        .ok_or_else(|| ReelError::validation(format!("{kind}.dir must be a string")))?;
    match s.trim().to_ascii_lowercase().as_str() {
        "left_to_right" | "lefttoright" | "ltr" => Ok(Direction::LeftToRight),
        "right_to_left" | "righttoleft" | "rtl" => Ok(Direction::RightToLeft),
        "top_to_bottom" | "toptobottom" | "ttb" => Ok(Direction::TopToBottom),
        "bottom_to_top" | "bottomtotop" | "btt" => Ok(Direction::BottomToTop),
        other => Err(ReelError::validation(format!(
            "unknown {kind}.dir '{other}'"
        ))),
    }
}

/// Parse a transition `kind` plus its free-form `params` into a [`Presentation`].
pub fn parse_presentation(kind: &str, params: &serde_json::Value) -> ReelResult<Presentation> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(ReelError::validation("transition kind must be non-empty"));
    }
    let p = object(&kind, params)?;

    match kind.as_str() {
        "cut" => Ok(Presentation::Cut),
        "crossfade" | "fade" => Ok(Presentation::Crossfade),
        "wipe" => Ok(Presentation::Wipe {
            dir: param_dir(&kind, p, Direction::LeftToRight)?,
            soft_edge: param_f64(&kind, p, "soft_edge")?
                .unwrap_or(0.0)
                .clamp(0.0, 1.0),
        }),
        "flash" | "flash_white" | "flashwhite" => {
            let color = match p.and_then(|p| p.get("color")) {
                None => Rgba8Premul::white(),
                Some(v) => {
                    let s = v.as_str().ok_or_else(|| {
                        ReelError::validation("flash.color must be a '#rrggbb[aa]' string")
                    })?;
                    Rgba8Premul::from_hex(s)?
                }
            };
            let peak = param_f64(&kind, p, "peak")?.unwrap_or(1.0);
            if !(0.0..=1.0).contains(&peak) {
                return Err(ReelError::validation("flash.peak must be within [0, 1]"));
            }
            Ok(Presentation::Flash { color, peak })
        }
        "whip_pan" | "whippan" | "slide" => Ok(Presentation::WhipPan {
            dir: param_dir(&kind, p, Direction::RightToLeft)?,
        }),
        "glitch" => {
            let slices = param_u64(&kind, p, "slices")?.unwrap_or(u64::from(DEFAULT_GLITCH_SLICES));
            if slices == 0 || slices > u64::from(MAX_GLITCH_SLICES) {
                return Err(ReelError::validation(format!(
                    "glitch.slices must be within [1, {MAX_GLITCH_SLICES}]"
                )));
            }
            let max_shift_px = param_f64(&kind, p, "max_shift_px")?.unwrap_or(DEFAULT_GLITCH_SHIFT_PX);
            if max_shift_px < 0.0 {
                return Err(ReelError::validation("glitch.max_shift_px must be >= 0"));
            }
            Ok(Presentation::Glitch {
                seed: param_u64(&kind, p, "seed")?.unwrap_or(0),
                slices: slices as u32,
                max_shift_px,
            })
        }
        _ => Err(ReelError::UnknownPresentation(kind)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/presentation.rs"]
mod tests;
