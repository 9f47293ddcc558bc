//! Shared animation clock.
//!
//! One clock drives every animating object: each tick computes a single
//! elapsed time and hands that same value to every subscriber, which keeps
//! dozens of objects in lockstep. The clock is single-threaded and
//! cooperative; it never blocks and only advances when the host delivers a
//! requested paint frame through [`AnimationClock::on_frame`].

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use crate::clock::frame::{FrameRequestId, FrameScheduler, TimeSource};

/// Per-tick callback. Receives elapsed seconds since the clock's origin.
///
/// Returning an error (or panicking) is logged and otherwise ignored.
pub type Subscriber = Box<dyn FnMut(f64) -> anyhow::Result<()>>;

/// Identity of one registered subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(pub u64);

#[derive(Debug, Default)]
struct ClockState {
    running: bool,
    origin: f64,
    elapsed: f64,
    pending: Option<FrameRequestId>,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    // `None` while the callback is out being invoked.
    slots: BTreeMap<SubscriberId, Option<Subscriber>>,
}

struct ClockInner {
    state: RefCell<ClockState>,
    subscribers: RefCell<Subscribers>,
    time: Box<dyn TimeSource>,
    scheduler: Box<dyn FrameScheduler>,
}

/// Subscriber-based ticking engine.
///
/// Cheap to clone; clones are handles to the same clock, which lets
/// subscribers hold one and subscribe, unsubscribe or stop from inside a tick.
#[derive(Clone)]
pub struct AnimationClock {
    inner: Rc<ClockInner>,
}

impl fmt::Debug for AnimationClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.inner.state.borrow();
        f.debug_struct("AnimationClock")
            .field("running", &st.running)
            .field("elapsed", &st.elapsed)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl AnimationClock {
    pub fn new(time: impl TimeSource + 'static, scheduler: impl FrameScheduler + 'static) -> Self {
        Self {
            inner: Rc::new(ClockInner {
                state: RefCell::new(ClockState::default()),
                subscribers: RefCell::new(Subscribers::default()),
                time: Box::new(time),
                scheduler: Box::new(scheduler),
            }),
        }
    }

    /// Begin ticking from a fresh origin. No-op while already running.
    pub fn start(&self) {
        let now = self.now();
        {
            let mut st = self.inner.state.borrow_mut();
            if st.running {
                return;
            }
            st.running = true;
            st.origin = now;
            st.elapsed = 0.0;
        }
        tracing::debug!(origin = now, "animation clock started");
        self.schedule_next();
    }

    /// Stop ticking. The last elapsed time is kept.
    pub fn stop(&self) {
        let pending = {
            let mut st = self.inner.state.borrow_mut();
            if !st.running {
                return;
            }
            st.running = false;
            st.pending.take()
        };
        if let Some(id) = pending {
            self.inner.scheduler.cancel_frame(id);
        }
        tracing::debug!(elapsed = self.time(), "animation clock stopped");
    }

    /// Re-base the origin to now and zero the elapsed time, running or not.
    pub fn reset(&self) {
        let now = self.now();
        let mut st = self.inner.state.borrow_mut();
        st.origin = now;
        st.elapsed = 0.0;
        tracing::debug!(origin = now, "animation clock reset");
    }

    /// Register a per-tick callback.
    ///
    /// Callbacks added during a tick start receiving values on the next one.
    pub fn subscribe(
        &self,
        callback: impl FnMut(f64) -> anyhow::Result<()> + 'static,
    ) -> Subscription {
        let mut subs = self.inner.subscribers.borrow_mut();
        let id = SubscriberId(subs.next_id);
        subs.next_id += 1;
        subs.slots.insert(id, Some(Box::new(callback)));
        Subscription {
            id,
            clock: Rc::downgrade(&self.inner),
        }
    }

    /// Elapsed seconds computed by the last tick; `0` before the first tick
    /// and right after [`reset`](Self::reset).
    pub fn time(&self) -> f64 {
        self.inner.state.borrow().elapsed
    }

    pub fn is_active(&self) -> bool {
        self.inner.state.borrow().running
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().slots.len()
    }

    /// Per-frame callback; the host calls this once for each frame the clock
    /// requested.
    ///
    /// Does nothing once stopped. Otherwise computes the elapsed time once,
    /// delivers it to every subscriber registered at the start of the tick,
    /// and requests the next frame.
    pub fn on_frame(&self) {
        let now = self.now();
        let elapsed = {
            let mut st = self.inner.state.borrow_mut();
            st.pending = None;
            if !st.running {
                return;
            }
            // Non-decreasing even if the time source stutters backwards.
            st.elapsed = (now - st.origin).max(st.elapsed);
            st.elapsed
        };

        self.dispatch(elapsed);
        self.schedule_next();
    }

    fn now(&self) -> f64 {
        let now = self.inner.time.now_secs();
        if now.is_finite() { now } else { 0.0 }
    }

    fn schedule_next(&self) {
        let wanted = {
            let st = self.inner.state.borrow();
            st.running && st.pending.is_none()
        };
        if wanted {
            let id = self.inner.scheduler.request_frame();
            self.inner.state.borrow_mut().pending = Some(id);
        }
    }

    fn dispatch(&self, elapsed: f64) {
        let ids: Vec<SubscriberId> = self.inner.subscribers.borrow().slots.keys().copied().collect();

        for id in ids {
            // Take the callback out while it runs so it can freely touch the
            // subscriber map (including removing itself).
            let Some(mut callback) = self
                .inner
                .subscribers
                .borrow_mut()
                .slots
                .get_mut(&id)
                .and_then(Option::take)
            else {
                continue;
            };

            match panic::catch_unwind(AssertUnwindSafe(|| callback(elapsed))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::warn!(subscriber = id.0, elapsed, error = %err, "clock subscriber failed");
                }
                Err(payload) => {
                    tracing::error!(
                        subscriber = id.0,
                        elapsed,
                        panic = panic_message(payload.as_ref()),
                        "clock subscriber panicked"
                    );
                }
            }

            if let Some(slot) = self.inner.subscribers.borrow_mut().slots.get_mut(&id) {
                *slot = Some(callback);
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

/// Registration handle returned by [`AnimationClock::subscribe`].
#[derive(Clone, Debug)]
pub struct Subscription {
    id: SubscriberId,
    clock: Weak<ClockInner>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Remove exactly this subscriber. Safe to call from inside a tick and
    /// more than once; returns whether anything was removed.
    pub fn unsubscribe(&self) -> bool {
        let Some(inner) = self.clock.upgrade() else {
            return false;
        };
        let removed = inner.subscribers.borrow_mut().slots.remove(&self.id);
        removed.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/ticker.rs"]
mod tests;
