// Host-side tests for the orb controller state machine and listener fan-out.

use orb_core::{OrbController, OrbMode, OrbSignal};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn defaults_are_idle_at_baseline_energy() {
    let c = OrbController::new();
    assert_eq!(c.mode(), OrbMode::Idle);
    assert!((c.energy() - 0.3).abs() < 1e-6);
}

#[test]
fn ingest_event_maps_kinds_to_modes() {
    let c = OrbController::new();
    c.ingest_event("question");
    assert_eq!(c.mode(), OrbMode::Listening);
    c.ingest_event("answer");
    assert_eq!(c.mode(), OrbMode::Speaking);
    c.ingest_event("error");
    assert_eq!(c.mode(), OrbMode::Thinking);
    c.ingest_event("ping");
    assert_eq!(c.mode(), OrbMode::Idle);
    c.ingest_event("error");
    c.ingest_event("something-else");
    assert_eq!(c.mode(), OrbMode::Idle);
}

#[test]
fn question_triggers_default_sparkle() {
    let c = OrbController::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_in = seen.clone();
    let _sub = c.on(OrbSignal::Sparkle, move |n| seen_in.borrow_mut().push(n));
    c.ingest_event("answer");
    c.ingest_event("question");
    assert_eq!(*seen.borrow(), vec![24.0]);
}

#[test]
fn set_energy_is_clamped() {
    let c = OrbController::new();
    for v in [-3.0, 0.0, 0.42, 1.0, 9.5, f32::NAN, f32::INFINITY] {
        c.set_energy(v);
        let e = c.energy();
        assert!((0.0..=1.0).contains(&e), "energy {e} after set_energy({v})");
    }
}

#[test]
fn listeners_only_see_their_signal() {
    let c = OrbController::new();
    let pulses = Rc::new(RefCell::new(Vec::new()));
    let sparkles = Rc::new(RefCell::new(Vec::new()));
    let p = pulses.clone();
    let s = sparkles.clone();
    let _a = c.on(OrbSignal::Pulse, move |v| p.borrow_mut().push(v));
    let _b = c.on(OrbSignal::Sparkle, move |v| s.borrow_mut().push(v));
    c.pulse(0.7);
    c.sparkle(5);
    c.pulse(1.0);
    assert_eq!(*pulses.borrow(), vec![0.7, 1.0]);
    assert_eq!(*sparkles.borrow(), vec![5.0]);
}

#[test]
fn registry_supports_many_listeners_and_unsubscribe() {
    let c = OrbController::new();
    let hits = Rc::new(RefCell::new(0));
    let subs: Vec<_> = (0..3)
        .map(|_| {
            let h = hits.clone();
            c.on(OrbSignal::Pulse, move |_| *h.borrow_mut() += 1)
        })
        .collect();
    assert_eq!(c.listener_count(OrbSignal::Pulse), 3);
    c.pulse(1.0);
    assert_eq!(*hits.borrow(), 3);
    for sub in subs {
        sub.unsubscribe();
    }
    c.pulse(1.0);
    assert_eq!(*hits.borrow(), 3);
    assert_eq!(c.listener_count(OrbSignal::Pulse), 0);
}

#[test]
fn listener_may_unsubscribe_others_during_dispatch() {
    let c = OrbController::new();
    let victim = Rc::new(RefCell::new(None));
    let victim_in = victim.clone();
    let _killer = c.on(OrbSignal::Pulse, move |_| {
        if let Some(sub) = victim_in.borrow_mut().take() {
            orb_core::Subscription::unsubscribe(sub);
        }
    });
    *victim.borrow_mut() = Some(c.on(OrbSignal::Pulse, |_| {}));
    c.pulse(1.0);
    assert_eq!(c.listener_count(OrbSignal::Pulse), 1);
}

#[test]
fn disposed_controller_ignores_everything() {
    let c = OrbController::new();
    let hits = Rc::new(RefCell::new(0));
    let h = hits.clone();
    let _sub = c.on(OrbSignal::Sparkle, move |_| *h.borrow_mut() += 1);
    c.set_mode(OrbMode::Speaking);
    c.dispose();
    assert!(c.is_disposed());
    c.set_mode(OrbMode::Thinking);
    c.set_energy(0.9);
    c.pulse(1.0);
    c.sparkle(10);
    c.ingest_event("question");
    assert_eq!(c.mode(), OrbMode::Speaking);
    assert!((c.energy() - 0.3).abs() < 1e-6);
    assert_eq!(*hits.borrow(), 0);
    // late subscription is accepted but inert
    let _late = c.on(OrbSignal::Pulse, |_| panic!("must not fire"));
    c.pulse(1.0);
}

#[test]
fn weak_handle_does_not_keep_controller_alive() {
    let c = OrbController::new();
    let weak = c.downgrade();
    assert!(weak.upgrade().is_some());
    drop(c);
    assert!(weak.upgrade().is_none());
}
