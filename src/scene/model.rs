use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::animation::ease::Ease;
use crate::animation::progress::resolve_progress;
use crate::foundation::core::{Point, Size, finite_or};
use crate::foundation::error::{SketchError, SketchResult};
use crate::scene::decode;

/// Extent used for objects that carry no `width`/`height`.
pub const DEFAULT_EXTENT: f64 = 100.0;

/// Animation duration used when a scene object does not carry one.
pub const DEFAULT_DURATION_SECS: f64 = 5.0;

/// Closed set of scene object categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKind {
    /// Rectangles, ellipses and other parametric shapes.
    Shape,
    /// Text block.
    Text,
    /// Raster image.
    Image,
    /// Single hand-drawn stroke.
    DrawPath,
    /// Pre-sampled vector path made of one or more sub-paths.
    SvgPath,
    /// Object that travels along `pathPoints`.
    PathFollower,
    /// Multi-stroke freehand drawing.
    Drawing,
    /// Embedded video frame.
    VideoEmbed,
    /// Any category this crate does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Animation family assigned to an object.
///
/// Unknown wire names decode as [`AnimationKind::None`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationKind {
    /// Static; the object renders at its resting properties.
    #[default]
    None,
    /// Opacity follows progress.
    FadeIn,
    /// Slides in from the right toward the resting x.
    SlideIn,
    /// Uniform scale from 0 to 1.
    ScaleIn,
    /// Progressive reveal of strokes or sub-paths.
    DrawIn,
    /// Position (and optionally rotation) follows `pathPoints`.
    PathFollow,
    /// Text is revealed character by character.
    Typewriter,
}

impl AnimationKind {
    /// Every animation kind, in declaration order.
    pub const ALL: [AnimationKind; 7] = [
        AnimationKind::None,
        AnimationKind::FadeIn,
        AnimationKind::SlideIn,
        AnimationKind::ScaleIn,
        AnimationKind::DrawIn,
        AnimationKind::PathFollow,
        AnimationKind::Typewriter,
    ];

    /// Look up an animation kind by wire name, falling back to [`AnimationKind::None`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "fadeIn" => Self::FadeIn,
            "slideIn" => Self::SlideIn,
            "scaleIn" => Self::ScaleIn,
            "drawIn" => Self::DrawIn,
            "pathFollow" => Self::PathFollow,
            "typewriter" => Self::Typewriter,
            _ => Self::None,
        }
    }

    /// Wire name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FadeIn => "fadeIn",
            Self::SlideIn => "slideIn",
            Self::ScaleIn => "scaleIn",
            Self::DrawIn => "drawIn",
            Self::PathFollow => "pathFollow",
            Self::Typewriter => "typewriter",
        }
    }
}

impl<'de> Deserialize<'de> for AnimationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = Value::deserialize(deserializer)?;
        Ok(v.as_str().map(Self::from_name).unwrap_or(Self::None))
    }
}

/// One sub-path of a vector path object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSegment {
    /// Arc length of the sub-path in canvas units.
    pub path_length: f64,
    /// Path command data, passed through to the renderer untouched.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub d: String,
}

/// Static definition of an object on the canvas.
///
/// Evaluation only ever reads this; animated state is produced as an
/// [`AnimatedPropertyPatch`](crate::AnimatedPropertyPatch).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    #[serde(default, deserialize_with = "decode::id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ObjectKind,
    #[serde(default, deserialize_with = "decode::f64_or_zero")]
    pub x: f64,
    #[serde(default, deserialize_with = "decode::f64_or_zero")]
    pub y: f64,
    #[serde(
        default,
        deserialize_with = "decode::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<f64>,
    #[serde(
        default,
        deserialize_with = "decode::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<f64>,
    /// Resting rotation in degrees.
    #[serde(default, deserialize_with = "decode::f64_or_zero")]
    pub rotation: f64,
    /// Open, type-dependent property bag.
    #[serde(default, deserialize_with = "decode::object_map")]
    pub properties: Map<String, Value>,
    /// Seconds; negative means already underway at t=0.
    #[serde(default, deserialize_with = "decode::f64_or_zero")]
    pub animation_start: f64,
    /// Seconds; zero or negative means instantly complete.
    #[serde(
        default = "default_duration",
        deserialize_with = "decode::duration_secs"
    )]
    pub animation_duration: f64,
    /// `None` when the document did not name an animation at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_type: Option<AnimationKind>,
    #[serde(default)]
    pub animation_easing: Ease,
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_SECS
}

impl SceneObject {
    /// Minimal object of `kind` at the origin with no animation.
    pub fn new(id: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            kind,
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
            rotation: 0.0,
            properties: Map::new(),
            animation_start: 0.0,
            animation_duration: DEFAULT_DURATION_SECS,
            animation_type: None,
            animation_easing: Ease::default(),
        }
    }

    /// Builder-style position setter.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Builder-style animation setter.
    pub fn animated(mut self, kind: AnimationKind, ease: Ease, start: f64, duration: f64) -> Self {
        self.animation_type = Some(kind);
        self.animation_easing = ease;
        self.animation_start = start;
        self.animation_duration = duration;
        self
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn position(&self) -> Point {
        Point::new(finite_or(self.x, 0.0), finite_or(self.y, 0.0))
    }

    /// Width/height, defaulting each to [`DEFAULT_EXTENT`].
    pub fn extent(&self) -> Size {
        let dim = |v: Option<f64>| v.filter(|v| v.is_finite()).unwrap_or(DEFAULT_EXTENT);
        Size::new(dim(self.width), dim(self.height))
    }

    /// Linear progress of this object's animation window at `time`.
    pub fn progress_at(&self, time: f64) -> f64 {
        resolve_progress(time, self.animation_start, self.animation_duration)
    }

    /// `true` once any part of the animation is visible at `time`.
    pub fn has_started(&self, time: f64) -> bool {
        self.progress_at(time) > 0.0
    }

    /// `true` when the animation has fully played out at `time`.
    pub fn is_complete(&self, time: f64) -> bool {
        self.progress_at(time) >= 1.0
    }

    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    pub fn prop_bool(&self, key: &str) -> bool {
        self.properties
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn prop_number(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(decode::number)
    }

    /// Text content for text-bearing objects (`text`, falling back to `content`).
    pub fn text(&self) -> Option<&str> {
        self.prop_str("text").or_else(|| self.prop_str("content"))
    }

    /// Polyline that a `pathFollow` animation travels along.
    pub fn path_points(&self) -> Vec<Point> {
        self.properties
            .get("pathPoints")
            .map(decode::points)
            .unwrap_or_default()
    }

    /// Independent pen strokes, in drawing order.
    ///
    /// Reads `strokes` (a list of point lists) or, failing that, a single
    /// `points` stroke. Empty strokes are dropped.
    pub fn stroke_segments(&self) -> Vec<Vec<Point>> {
        if let Some(strokes) = self.properties.get("strokes").and_then(Value::as_array) {
            return strokes
                .iter()
                .map(decode::points)
                .filter(|s| !s.is_empty())
                .collect();
        }
        let single = self
            .properties
            .get("points")
            .map(decode::points)
            .unwrap_or_default();
        if single.is_empty() {
            Vec::new()
        } else {
            vec![single]
        }
    }

    /// Sub-paths of a vector path, in document order.
    ///
    /// Reads `pathSegments` or, failing that, a single top-level `pathLength`.
    /// Entries without a usable positive length are dropped.
    pub fn path_segments(&self) -> Vec<PathSegment> {
        if let Some(segs) = self
            .properties
            .get("pathSegments")
            .and_then(Value::as_array)
        {
            return segs
                .iter()
                .filter_map(|s| {
                    let o = s.as_object()?;
                    let path_length = decode::number(o.get("pathLength")?)?;
                    let d = o
                        .get("d")
                        .or_else(|| o.get("commandData"))
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_owned();
                    (path_length > 0.0).then_some(PathSegment { path_length, d })
                })
                .collect();
        }
        match self.prop_number("pathLength") {
            Some(path_length) if path_length > 0.0 => vec![PathSegment {
                path_length,
                d: self.prop_str("d").unwrap_or_default().to_owned(),
            }],
            _ => Vec::new(),
        }
    }
}

/// Ordered list of objects handed over by the scene store.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Decode a scene from JSON.
    ///
    /// Accepts either a bare array of objects or `{ "objects": [...] }`.
    /// Entries that are not objects are skipped with a warning; only a
    /// document that is not JSON, or has no object list at all, is an error.
    pub fn from_json(s: &str) -> SketchResult<Self> {
        let doc: Value = serde_json::from_str(s)?;
        let list = match doc {
            Value::Array(a) => a,
            Value::Object(mut o) => match o.remove("objects") {
                Some(Value::Array(a)) => a,
                _ => return Err(SketchError::scene("expected an \"objects\" array")),
            },
            _ => {
                return Err(SketchError::scene(
                    "expected an array of objects or { \"objects\": [...] }",
                ));
            }
        };

        let mut objects = Vec::with_capacity(list.len());
        for (index, entry) in list.into_iter().enumerate() {
            match serde_json::from_value::<SceneObject>(entry) {
                Ok(obj) => objects.push(obj),
                Err(err) => tracing::warn!(index, %err, "skipping undecodable scene object"),
            }
        }
        Ok(Self { objects })
    }

    /// Read and decode a scene file.
    pub fn from_path(path: &Path) -> SketchResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            SketchError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
        })?;
        Self::from_json(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
