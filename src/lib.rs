//! sketchreel evaluates whiteboard-style animations.
//!
//! Given an object's static definition and a global clock time, it computes the
//! object's instantaneous visual state as a sparse [`AnimatedPropertyPatch`]
//! that renderers merge over the object's static properties.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `(time, start, duration) -> progress` via [`resolve_progress`]
//! 2. **Ease**: `progress -> eased progress` via [`Ease`] (after per-type
//!    policies in [`AnimationPlan`])
//! 3. **Evaluate**: `(SceneObject, eased progress) -> AnimatedPropertyPatch` via
//!    [`evaluate`], which delegates to [`allocate_counts`] and
//!    [`allocate_lengths`] for draw-in and [`sample_at_progress`] for path
//!    following
//!
//! [`sample_object`] and [`sample_scene`] run all three steps; an
//! [`AnimationClock`] supplies the shared time when playing live.
//!
//! Evaluation is pure and never fails: malformed object data degrades to an
//! empty or minimal patch so a bad object renders at rest instead of breaking
//! the frame.
#![forbid(unsafe_code)]

mod animation;
mod clock;
mod eval;
mod foundation;
mod scene;

pub use animation::ease::{Ease, ease};
pub use animation::progress::resolve_progress;
pub use clock::frame::{
    FrameQueue, FrameRequestId, FrameScheduler, ManualTime, MonotonicTime, TimeSource,
};
pub use clock::ticker::{AnimationClock, Subscriber, SubscriberId, Subscription};
pub use eval::evaluator::{
    AnimatedPropertyPatch, AnimationPlan, ResolvedVisual, Reveal, SLIDE_IN_OFFSET, evaluate,
};
pub use eval::path_follow::{PathSample, sample_at_progress};
pub use eval::reveal::{
    REVEAL_EPSILON, allocate_counts, allocate_lengths, allocate_reveal, target_length,
    target_units,
};
pub use eval::sample::{
    MAX_TIMELINE_FRAMES, ObjectFrame, SceneFrame, TimelineOpts, sample_object, sample_scene,
    sample_timeline, scene_end_secs,
};
pub use foundation::core::{Affine, Fps, Point, Size, Vec2};
pub use foundation::error::{SketchError, SketchResult};
pub use scene::model::{
    AnimationKind, DEFAULT_DURATION_SECS, DEFAULT_EXTENT, ObjectKind, PathSegment, Scene,
    SceneObject,
};
pub use scene::strokes::{StrokeArena, StrokeId};
