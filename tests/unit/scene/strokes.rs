use super::*;
use crate::scene::model::{ObjectKind, SceneObject};

#[test]
fn snapshots_are_not_aliased_by_later_appends() {
    let mut arena = StrokeArena::new();
    let id = arena.begin_stroke();
    assert!(arena.push_point(id, Point::new(0.0, 0.0)));
    let before = arena.snapshot(id).unwrap();
    assert!(arena.push_point(id, Point::new(1.0, 1.0)));
    let after = arena.snapshot(id).unwrap();

    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 2);
}

#[test]
fn appends_copy_only_while_a_snapshot_is_held() {
    let mut arena = StrokeArena::new();
    let id = arena.begin_stroke();
    arena.push_point(id, Point::new(0.0, 0.0));

    let held = arena.snapshot(id).unwrap();
    assert_eq!(Rc::strong_count(&held), 2);
    arena.push_point(id, Point::new(1.0, 0.0));
    // The arena moved to its own copy; the held buffer is untouched.
    assert_eq!(Rc::strong_count(&held), 1);
    assert_eq!(*held, vec![Point::new(0.0, 0.0)]);
    drop(held);

    let current = arena.snapshot(id).unwrap();
    let ptr = Rc::as_ptr(&current);
    drop(current);
    arena.push_point(id, Point::new(2.0, 0.0));
    let current = arena.snapshot(id).unwrap();
    assert_eq!(Rc::as_ptr(&current), ptr);
    assert_eq!(current.len(), 3);
}

#[test]
fn finished_and_unknown_strokes_reject_points() {
    let mut arena = StrokeArena::new();
    let id = arena.begin_stroke();
    arena.end_stroke(id);
    assert!(!arena.is_open(id));
    assert!(!arena.push_point(id, Point::new(0.0, 0.0)));
    assert!(!arena.push_point(StrokeId(9), Point::new(0.0, 0.0)));

    let open = arena.begin_stroke();
    assert!(!arena.push_point(open, Point::new(f64::NAN, 0.0)));
    assert_eq!(arena.snapshot(open).unwrap().len(), 0);
    assert!(arena.snapshot(StrokeId(9)).is_none());
}

#[test]
fn segments_keep_pen_order_and_skip_empty_strokes() {
    let mut arena = StrokeArena::new();
    let a = arena.begin_stroke();
    let _empty = arena.begin_stroke();
    let c = arena.begin_stroke();
    arena.push_point(c, Point::new(9.0, 9.0));
    arena.push_point(a, Point::new(1.0, 1.0));
    arena.push_point(a, Point::new(2.0, 2.0));

    assert_eq!(arena.len(), 3);
    assert_eq!(
        arena.segments(),
        vec![
            vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
            vec![Point::new(9.0, 9.0)],
        ]
    );
}

#[test]
fn properties_feed_back_into_scene_objects() {
    let mut arena = StrokeArena::new();
    let a = arena.begin_stroke();
    arena.push_point(a, Point::new(0.0, 0.0));
    arena.push_point(a, Point::new(3.0, 4.0));
    let b = arena.begin_stroke();
    arena.push_point(b, Point::new(10.0, 10.0));

    let obj = SceneObject::new("d", ObjectKind::Drawing).with_property("strokes", arena.to_properties());
    assert_eq!(obj.stroke_segments(), arena.segments());
}
