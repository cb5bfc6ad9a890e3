//! Frame and timer scheduling capability.
//!
//! Hosts never talk to `requestAnimationFrame` or `setTimeout` directly; they
//! receive a [`Scheduler`]. The web frontend provides one backed by the
//! browser, tests drive a [`ManualClock`] with simulated frame deltas.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Callback run once per frame with the current time in seconds.
pub type FrameFn = Box<dyn FnMut(f64)>;
/// Callback run once after a delay.
pub type TimerFn = Box<dyn FnOnce()>;

pub trait Scheduler {
    fn every_frame(&self, callback: FrameFn) -> Ticket;
    fn after(&self, delay: Duration, callback: TimerFn) -> Ticket;
}

struct TicketInner {
    cancelled: Cell<bool>,
    on_cancel: RefCell<Option<Box<dyn FnOnce()>>>,
}

/// Cancellation handle for a scheduled frame loop or timer.
///
/// Dropping a ticket does not cancel it; call [`Ticket::cancel`].
#[derive(Clone)]
pub struct Ticket {
    inner: Rc<TicketInner>,
}

impl Default for Ticket {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticket {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(TicketInner {
                cancelled: Cell::new(false),
                on_cancel: RefCell::new(None),
            }),
        }
    }

    /// Register a hook run once on the first `cancel`.
    pub fn set_canceller(&self, f: impl FnOnce() + 'static) {
        *self.inner.on_cancel.borrow_mut() = Some(Box::new(f));
    }

    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        let hook = self.inner.on_cancel.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }
}

struct FrameEntry {
    ticket: Ticket,
    callback: Rc<RefCell<FrameFn>>,
}

struct TimerEntry {
    due: f64,
    seq: u64,
    ticket: Ticket,
    callback: TimerFn,
}

#[derive(Default)]
struct ClockState {
    now: f64,
    seq: u64,
    frames: Vec<FrameEntry>,
    timers: Vec<TimerEntry>,
}

/// Deterministic scheduler for tests and headless runs.
#[derive(Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.state.borrow().now
    }

    /// Advance by `dt` seconds: fire due timers, then run one frame.
    pub fn step(&self, dt: f64) {
        self.state.borrow_mut().now += dt.max(0.0);
        self.fire_due_timers();
        self.run_frames();
    }

    /// Run `frames` steps of `dt` seconds each.
    pub fn run(&self, frames: usize, dt: f64) {
        for _ in 0..frames {
            self.step(dt);
        }
    }

    /// Advance wall time without producing frames (e.g. a suspended tab).
    pub fn advance(&self, by: Duration) {
        self.state.borrow_mut().now += by.as_secs_f64();
        self.fire_due_timers();
    }

    pub fn active_frames(&self) -> usize {
        let mut st = self.state.borrow_mut();
        st.frames.retain(|f| !f.ticket.is_cancelled());
        st.frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        let mut st = self.state.borrow_mut();
        st.timers.retain(|t| !t.ticket.is_cancelled());
        st.timers.len()
    }

    fn fire_due_timers(&self) {
        loop {
            // pop one at a time; a timer may schedule further timers
            let next = {
                let mut st = self.state.borrow_mut();
                let now = st.now;
                let idx = st
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= now)
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
                    .map(|(i, _)| i);
                idx.map(|i| st.timers.remove(i))
            };
            match next {
                Some(timer) => {
                    if !timer.ticket.is_cancelled() {
                        (timer.callback)();
                    }
                }
                None => break,
            }
        }
    }

    fn run_frames(&self) {
        let (now, live) = {
            let mut st = self.state.borrow_mut();
            st.frames.retain(|f| !f.ticket.is_cancelled());
            let live: Vec<(Ticket, Rc<RefCell<FrameFn>>)> = st
                .frames
                .iter()
                .map(|f| (f.ticket.clone(), f.callback.clone()))
                .collect();
            (st.now, live)
        };
        for (ticket, callback) in live {
            // an earlier callback this frame may have cancelled this one
            if ticket.is_cancelled() {
                continue;
            }
            (callback.borrow_mut())(now);
        }
    }
}

impl Scheduler for ManualClock {
    fn every_frame(&self, callback: FrameFn) -> Ticket {
        let ticket = Ticket::new();
        self.state.borrow_mut().frames.push(FrameEntry {
            ticket: ticket.clone(),
            callback: Rc::new(RefCell::new(callback)),
        });
        ticket
    }

    fn after(&self, delay: Duration, callback: TimerFn) -> Ticket {
        let ticket = Ticket::new();
        let mut st = self.state.borrow_mut();
        st.seq += 1;
        let entry = TimerEntry {
            due: st.now + delay.as_secs_f64(),
            seq: st.seq,
            ticket: ticket.clone(),
            callback,
        };
        st.timers.push(entry);
        ticket
    }
}
