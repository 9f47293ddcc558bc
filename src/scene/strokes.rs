//! Append-only storage for strokes captured during live drawing.
//!
//! Buffers are copy-on-write: a frame that grabbed a snapshot keeps seeing
//! exactly the points it was handed even while the pen keeps moving, and
//! appends with no snapshot outstanding push in place.

use std::rc::Rc;

use serde_json::{Value, json};

use crate::foundation::core::Point;

/// Index of a stroke inside a [`StrokeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrokeId(pub u32);

#[derive(Clone, Debug)]
struct StrokeBuffer {
    points: Rc<Vec<Point>>,
    open: bool,
}

/// Point buffers indexed by stroke id, in pen-down order.
#[derive(Clone, Debug, Default)]
pub struct StrokeArena {
    strokes: Vec<StrokeBuffer>,
}

impl StrokeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stroke and return its id.
    pub fn begin_stroke(&mut self) -> StrokeId {
        let id = StrokeId(self.strokes.len() as u32);
        self.strokes.push(StrokeBuffer {
            points: Rc::new(Vec::new()),
            open: true,
        });
        id
    }

    /// Append a point to an open stroke.
    ///
    /// Returns `false` (and stores nothing) for unknown or finished strokes
    /// and for non-finite points.
    pub fn push_point(&mut self, id: StrokeId, p: Point) -> bool {
        if !p.is_finite() {
            return false;
        }
        let Some(buf) = self.strokes.get_mut(id.0 as usize) else {
            return false;
        };
        if !buf.open {
            return false;
        }
        Rc::make_mut(&mut buf.points).push(p);
        true
    }

    /// Close a stroke; later appends are rejected.
    pub fn end_stroke(&mut self, id: StrokeId) {
        if let Some(buf) = self.strokes.get_mut(id.0 as usize) {
            buf.open = false;
        }
    }

    pub fn is_open(&self, id: StrokeId) -> bool {
        self.strokes
            .get(id.0 as usize)
            .is_some_and(|buf| buf.open)
    }

    /// Current points of a stroke. Later appends never show up in the
    /// returned buffer.
    pub fn snapshot(&self, id: StrokeId) -> Option<Rc<Vec<Point>>> {
        self.strokes
            .get(id.0 as usize)
            .map(|buf| Rc::clone(&buf.points))
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Non-empty strokes in pen-down order, ready for reveal allocation.
    pub fn segments(&self) -> Vec<Vec<Point>> {
        self.strokes
            .iter()
            .filter(|buf| !buf.points.is_empty())
            .map(|buf| buf.points.as_ref().clone())
            .collect()
    }

    /// Encode the drawing as a `strokes` property value.
    pub fn to_properties(&self) -> Value {
        let strokes: Vec<Value> = self
            .segments()
            .into_iter()
            .map(|s| Value::Array(s.into_iter().map(|p| json!([p.x, p.y])).collect()))
            .collect();
        Value::Array(strokes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/strokes.rs"]
mod tests;
