use serde::{Deserialize, Serialize};

/// Easing curve applied to linear progress.
///
/// Wire names are camelCase (`"easeInOut"`). Unknown names decode as
/// [`Ease::Linear`] so scenes written by newer editors still load; `null`
/// counts as absent and decodes as the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    /// `p`
    Linear,
    /// Quadratic ease-in.
    EaseIn,
    /// Quadratic ease-out. Default for objects that do not name an easing.
    #[default]
    EaseOut,
    /// Quadratic ease-in-out.
    EaseInOut,
    /// Four-segment bounce-out.
    Bounce,
}

impl Ease {
    /// Every easing kind, in declaration order.
    pub const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::EaseIn,
        Ease::EaseOut,
        Ease::EaseInOut,
        Ease::Bounce,
    ];

    /// Look up an easing by wire name, falling back to [`Ease::Linear`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Self::Linear,
            "easeIn" => Self::EaseIn,
            "easeOut" => Self::EaseOut,
            "easeInOut" => Self::EaseInOut,
            "bounce" => Self::Bounce,
            _ => Self::Linear,
        }
    }

    /// Wire name of this easing.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "easeIn",
            Self::EaseOut => "easeOut",
            Self::EaseInOut => "easeInOut",
            Self::Bounce => "bounce",
        }
    }

    /// Map progress to eased progress.
    ///
    /// The input is not clamped here; callers clamp before easing.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::Bounce => bounce_out(t),
        }
    }
}

/// Free-function form of [`Ease::apply`].
pub fn ease(kind: Ease, p: f64) -> f64 {
    kind.apply(p)
}

impl<'de> Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Self::default(),
            serde_json::Value::String(name) => Self::from_name(&name),
            _ => Self::Linear,
        })
    }
}

fn bounce_out(t: f64) -> f64 {
    // Standard piecewise bounce.
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
