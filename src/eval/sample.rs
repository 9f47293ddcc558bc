//! Per-frame sampling: shared time in, one patch per object out.

use serde::Serialize;

use crate::eval::evaluator::{AnimatedPropertyPatch, AnimationPlan, evaluate};
use crate::foundation::core::Fps;
use crate::foundation::error::{SketchError, SketchResult};
use crate::scene::model::SceneObject;

/// Resolve, ease and evaluate one object at `time` seconds.
pub fn sample_object(obj: &SceneObject, time: f64) -> AnimatedPropertyPatch {
    let plan = AnimationPlan::for_object(obj);
    evaluate(obj, plan.ease.apply(obj.progress_at(time)))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectFrame {
    pub id: String,
    /// Linear progress of the object's animation window.
    pub progress: f64,
    pub started: bool,
    pub patch: AnimatedPropertyPatch,
}

/// Every object's patch at a single shared time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneFrame {
    pub time: f64,
    pub objects: Vec<ObjectFrame>,
}

/// Sample every object against the same `time` value.
#[tracing::instrument(skip(objects), fields(objects = objects.len()))]
pub fn sample_scene(objects: &[SceneObject], time: f64) -> SceneFrame {
    let objects = objects
        .iter()
        .map(|obj| {
            let progress = obj.progress_at(time);
            ObjectFrame {
                id: obj.id.clone(),
                progress,
                started: progress > 0.0,
                patch: sample_object(obj, time),
            }
        })
        .collect();
    SceneFrame { time, objects }
}

/// Time at which the last object's animation has finished.
pub fn scene_end_secs(objects: &[SceneObject]) -> f64 {
    objects
        .iter()
        .map(|o| o.animation_start + o.animation_duration.max(0.0))
        .filter(|t| t.is_finite())
        .fold(0.0, f64::max)
}

/// Upper bound on the frames a single [`sample_timeline`] call produces.
pub const MAX_TIMELINE_FRAMES: u64 = 1_000_000;

/// Options for stepping a time range at a fixed frame rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineOpts {
    pub fps: Fps,
    pub start_secs: f64,
    /// `None` runs until the last animation completes.
    pub end_secs: Option<f64>,
}

impl Default for TimelineOpts {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            start_secs: 0.0,
            end_secs: None,
        }
    }
}

impl TimelineOpts {
    pub fn validate(&self) -> SketchResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(SketchError::validation("fps must have num>0 and den>0"));
        }
        if !self.start_secs.is_finite() {
            return Err(SketchError::validation("timeline start must be finite"));
        }
        if let Some(end) = self.end_secs {
            if !end.is_finite() || end < self.start_secs {
                return Err(SketchError::validation(
                    "timeline end must be finite and >= start",
                ));
            }
        }
        Ok(())
    }
}

/// Sample the scene once per frame from `start_secs` through `end_secs` inclusive.
#[tracing::instrument(skip(objects), fields(objects = objects.len()))]
pub fn sample_timeline(objects: &[SceneObject], opts: TimelineOpts) -> SketchResult<Vec<SceneFrame>> {
    opts.validate()?;
    let end = opts
        .end_secs
        .unwrap_or_else(|| scene_end_secs(objects).max(opts.start_secs));
    let last = opts.fps.secs_to_frames_floor(end - opts.start_secs);
    if last >= MAX_TIMELINE_FRAMES {
        return Err(SketchError::validation(format!(
            "timeline from {:.3}s to {end:.3}s needs {} frames, limit is {MAX_TIMELINE_FRAMES}",
            opts.start_secs,
            last.saturating_add(1)
        )));
    }

    Ok((0..=last)
        .map(|i| sample_scene(objects, opts.start_secs + opts.fps.frames_to_secs(i)))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/eval/sample.rs"]
mod tests;
