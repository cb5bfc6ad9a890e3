// Host-side tests for the event bus, event payload parsing and the manual
// scheduler.

use orb_core::{ManualClock, OrbBus, OrbError, OrbEvent, OrbEventKind, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[test]
fn publish_reaches_every_subscriber() {
    let bus = OrbBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let a = seen.clone();
    let b = seen.clone();
    let _s1 = bus.subscribe(move |e| a.borrow_mut().push(format!("a:{}", e.kind)));
    let _s2 = bus.subscribe(move |e| b.borrow_mut().push(format!("b:{}", e.kind)));
    assert_eq!(bus.publish(&OrbEvent::new("answer")), 2);
    let mut got = seen.borrow().clone();
    got.sort();
    assert_eq!(got, vec!["a:answer", "b:answer"]);
}

#[test]
fn isolated_buses_do_not_cross_talk() {
    let one = OrbBus::new();
    let two = OrbBus::new();
    let hits = Rc::new(RefCell::new(0));
    let h = hits.clone();
    let _s = one.subscribe(move |_| *h.borrow_mut() += 1);
    two.publish(&OrbEvent::new("question"));
    assert_eq!(*hits.borrow(), 0);
    one.publish(&OrbEvent::new("question"));
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn unsubscribe_stops_delivery() {
    let bus = OrbBus::new();
    let hits = Rc::new(RefCell::new(0));
    let h = hits.clone();
    let sub = bus.subscribe(move |_| *h.borrow_mut() += 1);
    bus.publish(&OrbEvent::new("ping"));
    sub.unsubscribe();
    bus.publish(&OrbEvent::new("ping"));
    assert_eq!(*hits.borrow(), 1);
    assert_eq!(bus.listener_count(), 0);
}

#[test]
fn listener_may_publish_reentrantly() {
    let bus = OrbBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let inner_bus = bus.clone();
    let s = seen.clone();
    let _sub = bus.subscribe(move |e| {
        s.borrow_mut().push(e.kind.clone());
        if e.kind == "question" {
            inner_bus.publish(&OrbEvent::new("answer"));
        }
    });
    bus.publish(&OrbEvent::new("question"));
    assert_eq!(*seen.borrow(), vec!["question", "answer"]);
}

#[test]
fn event_json_round_trips_type_field() {
    let ev = OrbEvent::from_json(r#"{"type":"error","extra":1}"#).unwrap();
    assert_eq!(ev.kind(), OrbEventKind::Error);
    assert_eq!(OrbEvent::new("question").to_json(), r#"{"type":"question"}"#);
    let other = OrbEvent::from_json(r#"{"type":"ping"}"#).unwrap();
    assert_eq!(other.kind(), OrbEventKind::Other("ping".into()));
}

#[test]
fn malformed_event_payloads_are_rejected() {
    for bad in [
        "null",
        "42",
        r#""error""#,
        r#"["error"]"#,
        "[]",
        "{}",
        r#"{"type":7}"#,
        r#"{"type":null}"#,
        "{not json",
    ] {
        match OrbEvent::from_json(bad) {
            Err(OrbError::MalformedEvent(_)) => {}
            other => panic!("{bad} parsed as {other:?}"),
        }
    }
}

#[test]
fn timers_fire_in_due_order() {
    let clock = ManualClock::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for (label, ms) in [("late", 300u64), ("early", 100), ("mid", 200)] {
        let o = order.clone();
        let _ = clock.after(
            Duration::from_millis(ms),
            Box::new(move || o.borrow_mut().push(label)),
        );
    }
    clock.advance(Duration::from_millis(250));
    assert_eq!(*order.borrow(), vec!["early", "mid"]);
    assert_eq!(clock.pending_timers(), 1);
    clock.advance(Duration::from_millis(100));
    assert_eq!(*order.borrow(), vec!["early", "mid", "late"]);
}

#[test]
fn cancelled_work_never_runs() {
    let clock = ManualClock::new();
    let hits = Rc::new(RefCell::new(0));
    let h1 = hits.clone();
    let timer = clock.after(Duration::from_millis(10), Box::new(move || *h1.borrow_mut() += 1));
    let h2 = hits.clone();
    let frame = clock.every_frame(Box::new(move |_| *h2.borrow_mut() += 100));
    clock.step(0.005);
    assert_eq!(*hits.borrow(), 100);
    timer.cancel();
    frame.cancel();
    frame.cancel();
    clock.run(5, 0.016);
    assert_eq!(*hits.borrow(), 100);
    assert_eq!(clock.active_frames(), 0);
    assert_eq!(clock.pending_timers(), 0);
}

#[test]
fn canceller_hook_runs_once() {
    let clock = ManualClock::new();
    let ticket = clock.every_frame(Box::new(|_| {}));
    let calls = Rc::new(RefCell::new(0));
    let c = calls.clone();
    ticket.set_canceller(move || *c.borrow_mut() += 1);
    ticket.cancel();
    ticket.clone().cancel();
    assert_eq!(*calls.borrow(), 1);
    assert!(ticket.is_cancelled());
}
