use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

/// Wall-clock source for [`AnimationClock`](crate::AnimationClock), in seconds.
pub trait TimeSource {
    fn now_secs(&self) -> f64;
}

/// Monotonic time measured from construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Externally driven time. Clones share the same reading.
#[derive(Clone, Debug, Default)]
pub struct ManualTime {
    now: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new(start_secs: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_secs)),
        }
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl TimeSource for ManualTime {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

/// Handle for one requested paint frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequestId(pub u64);

/// "Call me on the next paint frame" primitive.
///
/// The host answers a request by calling
/// [`AnimationClock::on_frame`](crate::AnimationClock::on_frame) once.
pub trait FrameScheduler {
    fn request_frame(&self) -> FrameRequestId;
    fn cancel_frame(&self, id: FrameRequestId);
}

#[derive(Debug, Default)]
struct FrameQueueState {
    next_id: u64,
    pending: Option<FrameRequestId>,
}

/// Frame scheduler for hosts that run their own loop.
///
/// Holds at most one outstanding request; the loop drains it with
/// [`FrameQueue::take_pending`] (or [`FrameQueue::pump`]) once per frame.
/// Clones share the same queue.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    state: Rc<RefCell<FrameQueueState>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    pub fn take_pending(&self) -> Option<FrameRequestId> {
        self.state.borrow_mut().pending.take()
    }

    /// Deliver the pending frame, if any, to `clock`.
    pub fn pump(&self, clock: &crate::clock::ticker::AnimationClock) -> bool {
        if self.take_pending().is_some() {
            clock.on_frame();
            true
        } else {
            false
        }
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self) -> FrameRequestId {
        let mut st = self.state.borrow_mut();
        let id = FrameRequestId(st.next_id);
        st.next_id += 1;
        st.pending = Some(id);
        id
    }

    fn cancel_frame(&self, id: FrameRequestId) {
        let mut st = self.state.borrow_mut();
        if st.pending == Some(id) {
            st.pending = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/frame.rs"]
mod tests;
