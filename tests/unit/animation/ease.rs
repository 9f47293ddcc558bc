use super::*;

#[test]
fn endpoints_are_stable() {
    for kind in [Ease::Linear, Ease::EaseIn, Ease::EaseOut, Ease::EaseInOut] {
        assert_eq!(kind.apply(0.0), 0.0);
        assert_eq!(kind.apply(1.0), 1.0);
    }
    assert_eq!(Ease::Bounce.apply(0.0), 0.0);
    assert!((Ease::Bounce.apply(1.0) - 1.0).abs() < 1e-12);
}

#[test]
fn monotonic_spot_check() {
    for kind in [Ease::Linear, Ease::EaseIn, Ease::EaseOut, Ease::EaseInOut] {
        let a = kind.apply(0.25);
        let b = kind.apply(0.5);
        let c = kind.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn ease_out_matches_closed_form() {
    assert_eq!(ease(Ease::EaseOut, 0.75), 0.9375);
    assert_eq!(ease(Ease::EaseIn, 0.5), 0.25);
    assert_eq!(ease(Ease::EaseInOut, 0.25), 0.125);
    assert_eq!(ease(Ease::EaseInOut, 0.75), 0.875);
}

#[test]
fn bounce_segments_meet_their_plateaus() {
    // Segment boundaries land on the additive terms.
    assert!((Ease::Bounce.apply(1.5 / 2.75) - 0.75).abs() < 1e-12);
    assert!((Ease::Bounce.apply(2.25 / 2.75) - 0.9375).abs() < 1e-12);
    assert!((Ease::Bounce.apply(2.625 / 2.75) - 0.984375).abs() < 1e-12);
    assert!((Ease::Bounce.apply(1.0 / 2.75) - 1.0).abs() < 1e-12);
}

#[test]
fn apply_does_not_clamp() {
    assert_eq!(Ease::Linear.apply(1.5), 1.5);
    assert_eq!(Ease::EaseIn.apply(-1.0), 1.0);
}

#[test]
fn names_roundtrip_and_unknown_falls_back() {
    for kind in Ease::ALL {
        assert_eq!(Ease::from_name(kind.name()), kind);
    }
    assert_eq!(Ease::from_name("elasticOut"), Ease::Linear);
    assert_eq!(Ease::from_name(""), Ease::Linear);
}

#[test]
fn deserialize_is_lenient() {
    let v: Ease = serde_json::from_str("\"easeInOut\"").unwrap();
    assert_eq!(v, Ease::EaseInOut);
    let v: Ease = serde_json::from_str("\"spring\"").unwrap();
    assert_eq!(v, Ease::Linear);
    let v: Ease = serde_json::from_str("42").unwrap();
    assert_eq!(v, Ease::Linear);
    let v: Ease = serde_json::from_str("null").unwrap();
    assert_eq!(v, Ease::EaseOut);
    assert_eq!(serde_json::to_string(&Ease::Bounce).unwrap(), "\"bounce\"");
}
