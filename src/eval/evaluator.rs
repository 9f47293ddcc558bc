use serde::Serialize;

use crate::animation::ease::Ease;
use crate::eval::path_follow::sample_at_progress;
use crate::eval::reveal::{allocate_counts, allocate_lengths};
use crate::foundation::core::{Affine, Point, Size, Vec2};
use crate::scene::model::{AnimationKind, ObjectKind, SceneObject};

/// Distance `slideIn` objects travel toward their resting x.
pub const SLIDE_IN_OFFSET: f64 = 100.0;

/// Effective animation for an object after per-type policies.
///
/// Vector paths only support a linear draw-in (or nothing): their stored
/// animation type is replaced by `drawIn` unless it is explicitly `none`, and
/// their easing is always `linear`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationPlan {
    pub kind: AnimationKind,
    pub ease: Ease,
}

impl AnimationPlan {
    pub fn for_object(obj: &SceneObject) -> Self {
        match obj.kind {
            ObjectKind::SvgPath => Self {
                kind: match obj.animation_type {
                    Some(AnimationKind::None) => AnimationKind::None,
                    _ => AnimationKind::DrawIn,
                },
                ease: Ease::Linear,
            },
            _ => Self {
                kind: obj.animation_type.unwrap_or_default(),
                ease: obj.animation_easing,
            },
        }
    }
}

/// How much of a draw-in object is visible.
///
/// Flattened into the patch on the wire: stroke reveals emit `revealCount`,
/// path reveals emit `revealLength`, and both carry `revealUnit` and
/// `revealPerSegment`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "revealUnit", rename_all = "camelCase")]
pub enum Reveal {
    /// Stroke points revealed, overall and per stroke.
    Points {
        #[serde(rename = "revealCount")]
        count: usize,
        #[serde(rename = "revealPerSegment")]
        per_segment: Vec<usize>,
    },
    /// Path length revealed, overall and per sub-path.
    Lengths {
        #[serde(rename = "revealLength")]
        length: f64,
        #[serde(rename = "revealPerSegment")]
        per_segment: Vec<f64>,
    },
}

impl Reveal {
    /// Total revealed points, for stroke reveals.
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Points { count, .. } => Some(*count),
            Self::Lengths { .. } => None,
        }
    }
}

/// Sparse set of property overrides produced for one frame.
///
/// Only the keys an animation actually drives are `Some`; everything else
/// keeps the object's static value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimatedPropertyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(flatten)]
    pub reveal: Option<Reveal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_text: Option<String>,
}

impl AnimatedPropertyPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Points revealed by a stroke draw-in, if this patch carries one.
    pub fn reveal_count(&self) -> Option<usize> {
        self.reveal.as_ref().and_then(Reveal::count)
    }

    /// Merge the patch over `obj`'s static properties.
    pub fn resolve(&self, obj: &SceneObject) -> ResolvedVisual {
        let base = obj.position();
        ResolvedVisual {
            position: Point::new(self.x.unwrap_or(base.x), self.y.unwrap_or(base.y)),
            extent: obj.extent(),
            rotation_deg: self.rotation.unwrap_or(obj.rotation),
            scale: Vec2::new(self.scale_x.unwrap_or(1.0), self.scale_y.unwrap_or(1.0)),
            opacity: self.opacity.unwrap_or(1.0),
            reveal: self.reveal.clone(),
            text: self
                .visible_text
                .clone()
                .or_else(|| obj.text().map(str::to_owned)),
        }
    }
}

/// Fully merged visual state of an object for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVisual {
    /// Top-left corner in canvas units.
    pub position: Point,
    pub extent: Size,
    pub rotation_deg: f64,
    pub scale: Vec2,
    pub opacity: f64,
    #[serde(flatten)]
    pub reveal: Option<Reveal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ResolvedVisual {
    /// Object-local to canvas transform.
    ///
    /// Rotation and scale pivot on the centre of the object's extent, so a
    /// `scaleIn` grows from the middle.
    pub fn transform(&self) -> Affine {
        let pivot = Vec2::new(self.extent.width / 2.0, self.extent.height / 2.0);
        let t_translate = Affine::translate(self.position.to_vec2());
        let t_anchor = Affine::translate(pivot);
        let t_unanchor = Affine::translate(-pivot);
        let t_rotate = Affine::rotate(self.rotation_deg.to_radians());
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(position) * T(pivot) * R(rot) * S(scale) * T(-pivot)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

/// Compute the property overrides for `obj` at an already-eased progress.
///
/// Safe for any combination of object type and animation type: missing or
/// malformed properties produce an empty patch, never a panic. NaN progress is
/// treated as 0 and everything else is clamped to `[0, 1]`.
pub fn evaluate(obj: &SceneObject, eased_progress: f64) -> AnimatedPropertyPatch {
    let p = if eased_progress.is_nan() {
        0.0
    } else {
        eased_progress.clamp(0.0, 1.0)
    };

    match AnimationPlan::for_object(obj).kind {
        AnimationKind::None => AnimatedPropertyPatch::default(),
        AnimationKind::FadeIn => AnimatedPropertyPatch {
            opacity: Some(p),
            ..Default::default()
        },
        AnimationKind::SlideIn => {
            let base = obj.position();
            AnimatedPropertyPatch {
                x: Some(base.x + (1.0 - p) * SLIDE_IN_OFFSET),
                y: Some(base.y),
                ..Default::default()
            }
        }
        AnimationKind::ScaleIn => AnimatedPropertyPatch {
            scale_x: Some(p),
            scale_y: Some(p),
            ..Default::default()
        },
        AnimationKind::DrawIn => AnimatedPropertyPatch {
            reveal: draw_in(obj, p),
            ..Default::default()
        },
        AnimationKind::PathFollow => path_follow(obj, p),
        AnimationKind::Typewriter => AnimatedPropertyPatch {
            visible_text: obj.text().map(|text| typewriter(text, p)),
            ..Default::default()
        },
    }
}

fn draw_in(obj: &SceneObject, p: f64) -> Option<Reveal> {
    let points = || {
        let sizes: Vec<usize> = obj.stroke_segments().iter().map(Vec::len).collect();
        (!sizes.is_empty()).then(|| {
            let per_segment = allocate_counts(&sizes, p);
            Reveal::Points {
                count: per_segment.iter().sum(),
                per_segment,
            }
        })
    };
    let lengths = || {
        let lens: Vec<f64> = obj.path_segments().iter().map(|s| s.path_length).collect();
        (!lens.is_empty()).then(|| {
            let per_segment = allocate_lengths(&lens, p);
            Reveal::Lengths {
                length: per_segment.iter().sum(),
                per_segment,
            }
        })
    };

    match obj.kind {
        ObjectKind::SvgPath => lengths().or_else(points),
        _ => points().or_else(lengths),
    }
}

fn path_follow(obj: &SceneObject, p: f64) -> AnimatedPropertyPatch {
    let points = obj.path_points();
    if points.is_empty() {
        return AnimatedPropertyPatch::default();
    }
    let sample = sample_at_progress(&points, p);
    AnimatedPropertyPatch {
        x: Some(sample.point.x),
        y: Some(sample.point.y),
        rotation: if obj.prop_bool("rotateWithPath") {
            sample.tangent_deg
        } else {
            None
        },
        ..Default::default()
    }
}

fn typewriter(text: &str, p: f64) -> String {
    if p >= 1.0 {
        return text.to_owned();
    }
    let n = text.chars().count();
    let visible = ((n as f64) * p).floor() as usize;
    text.chars().take(visible).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
