//! Easing curves for tweened handlers.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]` with `f(0) = 0` and `f(1) = 1`.
//! Inputs outside that range are clamped first.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Clone, Copy, Default)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InSine,
    OutSine,
    #[default]
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    /// Caller-supplied curve.
    Custom(fn(f32) -> f32),
}

impl Ease {
    /// Progress along the curve at normalized time `t`.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Ease::Linear => t,
            Ease::InQuad => t * t,
            Ease::OutQuad => t * (2.0 - t),
            Ease::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Ease::InCubic => t * t * t,
            Ease::OutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Ease::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Ease::InSine => 1.0 - (t * PI / 2.0).cos(),
            Ease::OutSine => (t * PI / 2.0).sin(),
            Ease::InOutSine => -0.5 * ((PI * t).cos() - 1.0),
            Ease::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * (t - 1.0))
                }
            }
            Ease::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Ease::InOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    0.5 * 2f32.powf(20.0 * t - 10.0)
                } else {
                    1.0 - 0.5 * 2f32.powf(-20.0 * t + 10.0)
                }
            }
            Ease::Custom(f) => f(t),
        }
    }

    /// Value between `start` and `end` at normalized time `t`.
    #[inline]
    pub fn interpolate(self, start: f32, end: f32, t: f32) -> f32 {
        start + (end - start) * self.apply(t)
    }

    fn name(self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::InQuad => "easeInQuad",
            Ease::OutQuad => "easeOutQuad",
            Ease::InOutQuad => "easeInOutQuad",
            Ease::InCubic => "easeInCubic",
            Ease::OutCubic => "easeOutCubic",
            Ease::InOutCubic => "easeInOutCubic",
            Ease::InSine => "easeInSine",
            Ease::OutSine => "easeOutSine",
            Ease::InOutSine => "easeInOutSine",
            Ease::InExpo => "easeInExpo",
            Ease::OutExpo => "easeOutExpo",
            Ease::InOutExpo => "easeInOutExpo",
            Ease::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ease {
    type Err = Error;

    /// Parses names like `easeInOutSine`, `ease-in-out-sine` or `inOutSine`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let key = key.strip_prefix("ease").unwrap_or(&key);
        let ease = match key {
            "linear" | "none" => Ease::Linear,
            "inquad" => Ease::InQuad,
            "outquad" => Ease::OutQuad,
            "inoutquad" => Ease::InOutQuad,
            "incubic" => Ease::InCubic,
            "outcubic" => Ease::OutCubic,
            "inoutcubic" => Ease::InOutCubic,
            "insine" => Ease::InSine,
            "outsine" => Ease::OutSine,
            "inoutsine" => Ease::InOutSine,
            "inexpo" => Ease::InExpo,
            "outexpo" => Ease::OutExpo,
            "inoutexpo" => Ease::InOutExpo,
            _ => return Err(Error::UnknownEase(s.to_string())),
        };
        Ok(ease)
    }
}
