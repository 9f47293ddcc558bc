use super::*;
use crate::clock::frame::{FrameQueue, ManualTime};
use std::cell::{Cell, RefCell};

fn clock() -> (AnimationClock, ManualTime, FrameQueue) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let time = ManualTime::new(100.0);
    let frames = FrameQueue::new();
    let clock = AnimationClock::new(time.clone(), frames.clone());
    (clock, time, frames)
}

fn counter(clock: &AnimationClock) -> (Rc<Cell<u32>>, Subscription) {
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let sub = clock.subscribe(move |_| {
        h.set(h.get() + 1);
        Ok(())
    });
    (hits, sub)
}

#[test]
fn fresh_clock_is_idle_at_zero() {
    let (clock, _, frames) = clock();
    assert!(!clock.is_active());
    assert_eq!(clock.time(), 0.0);
    assert_eq!(clock.subscriber_count(), 0);
    assert!(!frames.is_pending());

    // Frames delivered while stopped do nothing.
    clock.on_frame();
    assert_eq!(clock.time(), 0.0);
}

#[test]
fn ticks_deliver_elapsed_and_reschedule() {
    let (clock, time, frames) = clock();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    clock.subscribe(move |t| {
        s.borrow_mut().push(t);
        Ok(())
    });

    clock.start();
    assert!(clock.is_active());
    assert!(frames.is_pending());

    time.advance(0.5);
    assert!(frames.pump(&clock));
    time.advance(0.25);
    assert!(frames.pump(&clock));

    assert_eq!(*seen.borrow(), vec![0.5, 0.75]);
    assert_eq!(clock.time(), 0.75);
    assert!(frames.is_pending());
}

#[test]
fn start_while_running_keeps_origin() {
    let (clock, time, frames) = clock();
    clock.start();
    time.advance(1.0);
    clock.start();
    frames.pump(&clock);
    assert_eq!(clock.time(), 1.0);
}

#[test]
fn panicking_subscriber_does_not_block_others() {
    let (clock, time, frames) = clock();
    clock.subscribe(|_| panic!("subscriber exploded"));
    let (hits, _) = counter(&clock);

    clock.start();
    time.advance(0.1);
    frames.pump(&clock);
    assert_eq!(hits.get(), 1);

    // The faulty subscriber stays registered and ticks keep coming.
    assert_eq!(clock.subscriber_count(), 2);
    assert!(frames.is_pending());
    frames.pump(&clock);
    assert_eq!(hits.get(), 2);
}

#[test]
fn failing_subscriber_is_logged_not_propagated() {
    let (clock, _, frames) = clock();
    let (before, _) = counter(&clock);
    clock.subscribe(|t| anyhow::bail!("cannot render at {t}"));
    let (after, _) = counter(&clock);

    clock.start();
    frames.pump(&clock);
    frames.pump(&clock);
    assert_eq!(before.get(), 2);
    assert_eq!(after.get(), 2);
}

#[test]
fn every_subscriber_sees_the_same_time_in_a_tick() {
    let (clock, time, frames) = clock();
    let seen = Rc::new(RefCell::new(Vec::new()));
    for _ in 0..3 {
        let s = Rc::clone(&seen);
        let t = time.clone();
        clock.subscribe(move |elapsed| {
            s.borrow_mut().push(elapsed);
            // Moving the wall clock mid-tick must not leak into this tick.
            t.advance(1.0);
            Ok(())
        });
    }
    clock.start();
    time.advance(2.0);
    frames.pump(&clock);
    assert_eq!(*seen.borrow(), vec![2.0, 2.0, 2.0]);
}

#[test]
fn stop_keeps_elapsed_and_cancels_the_next_frame() {
    let (clock, time, frames) = clock();
    let (hits, _) = counter(&clock);
    clock.start();
    time.advance(3.0);
    frames.pump(&clock);
    clock.stop();

    assert!(!clock.is_active());
    assert!(!frames.is_pending());
    assert_eq!(clock.time(), 3.0);

    time.advance(1.0);
    clock.on_frame();
    assert_eq!(clock.time(), 3.0);
    assert_eq!(hits.get(), 1);
}

#[test]
fn reset_rebases_in_any_state() {
    let (clock, time, frames) = clock();
    clock.start();
    time.advance(2.0);
    frames.pump(&clock);
    clock.reset();
    assert_eq!(clock.time(), 0.0);
    time.advance(0.5);
    frames.pump(&clock);
    assert_eq!(clock.time(), 0.5);

    clock.stop();
    clock.reset();
    assert_eq!(clock.time(), 0.0);
    assert!(!clock.is_active());
}

#[test]
fn restart_begins_a_fresh_run() {
    let (clock, time, frames) = clock();
    clock.start();
    time.advance(4.0);
    frames.pump(&clock);
    clock.stop();

    time.advance(10.0);
    clock.start();
    time.advance(1.0);
    frames.pump(&clock);
    assert_eq!(clock.time(), 1.0);
}

#[test]
fn elapsed_never_decreases_while_running() {
    let (clock, time, frames) = clock();
    clock.start();
    time.advance(2.0);
    frames.pump(&clock);
    time.advance(-1.5);
    frames.pump(&clock);
    assert_eq!(clock.time(), 2.0);
}

#[test]
fn unsubscribe_removes_exactly_one_and_is_idempotent() {
    let (clock, _, frames) = clock();
    let (a, sub_a) = counter(&clock);
    let (b, _sub_b) = counter(&clock);
    assert_eq!(clock.subscriber_count(), 2);

    assert!(sub_a.unsubscribe());
    assert!(!sub_a.unsubscribe());
    assert_eq!(clock.subscriber_count(), 1);

    clock.start();
    frames.pump(&clock);
    assert_eq!(a.get(), 0);
    assert_eq!(b.get(), 1);
}

#[test]
fn subscriber_can_unsubscribe_itself_mid_tick() {
    let (clock, _, frames) = clock();
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let hits = Rc::new(Cell::new(0));
    let (s, h) = (Rc::clone(&slot), Rc::clone(&hits));
    let sub = clock.subscribe(move |_| {
        h.set(h.get() + 1);
        if let Some(me) = s.borrow().as_ref() {
            me.unsubscribe();
        }
        Ok(())
    });
    *slot.borrow_mut() = Some(sub);
    let (other, _) = counter(&clock);

    clock.start();
    frames.pump(&clock);
    frames.pump(&clock);
    assert_eq!(hits.get(), 1);
    assert_eq!(other.get(), 2);
    assert_eq!(clock.subscriber_count(), 1);
}

#[test]
fn removing_another_subscriber_mid_tick_skips_only_that_one() {
    let (clock, _, frames) = clock();
    let victim_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let v = Rc::clone(&victim_slot);
    clock.subscribe(move |_| {
        if let Some(victim) = v.borrow_mut().take() {
            victim.unsubscribe();
        }
        Ok(())
    });
    let (victim_hits, victim) = counter(&clock);
    *victim_slot.borrow_mut() = Some(victim);
    let (bystander, _) = counter(&clock);

    clock.start();
    frames.pump(&clock);
    assert_eq!(victim_hits.get(), 0);
    assert_eq!(bystander.get(), 1);
}

#[test]
fn subscribing_mid_tick_starts_on_the_next_tick() {
    let (clock, _, frames) = clock();
    let late_hits = Rc::new(Cell::new(0));
    let handle = clock.clone();
    let lh = Rc::clone(&late_hits);
    let mut added = false;
    clock.subscribe(move |_| {
        if !added {
            added = true;
            let lh = Rc::clone(&lh);
            handle.subscribe(move |_| {
                lh.set(lh.get() + 1);
                Ok(())
            });
        }
        Ok(())
    });

    clock.start();
    frames.pump(&clock);
    assert_eq!(late_hits.get(), 0);
    frames.pump(&clock);
    assert_eq!(late_hits.get(), 1);
}

#[test]
fn stopping_from_a_subscriber_ends_the_loop() {
    let (clock, _, frames) = clock();
    let handle = clock.clone();
    clock.subscribe(move |_| {
        handle.stop();
        Ok(())
    });
    let (after, _) = counter(&clock);

    clock.start();
    frames.pump(&clock);
    // The tick in flight still reaches later subscribers.
    assert_eq!(after.get(), 1);
    assert!(!clock.is_active());
    assert!(!frames.is_pending());
}

#[test]
fn subscription_outliving_clock_is_harmless() {
    let (clock, _, _) = clock();
    let (_, sub) = counter(&clock);
    drop(clock);
    assert!(!sub.unsubscribe());
}
