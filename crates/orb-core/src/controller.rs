//! Imperative handle host code uses to drive an orb.
//!
//! The controller holds the mode and energy state and fans `sparkle`/`pulse`
//! requests out to whoever subscribed, normally the render host that owns the
//! particle system. Once disposed every call is a silent no-op.

use crate::constants::*;
use crate::state::{OrbEventKind, OrbMode};
use fnv::FnvHashMap;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Notifications a controller fans out to its listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrbSignal {
    /// Payload is the particle count.
    Sparkle,
    /// Payload is the pulse intensity.
    Pulse,
}

type SignalListener = Rc<dyn Fn(f32)>;

struct ControllerInner {
    mode: Cell<OrbMode>,
    energy: Cell<f32>,
    disposed: Cell<bool>,
    next_id: Cell<u64>,
    listeners: RefCell<FnvHashMap<u64, (OrbSignal, SignalListener)>>,
}

#[derive(Clone)]
pub struct OrbController {
    inner: Rc<ControllerInner>,
}

impl Default for OrbController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbController {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                mode: Cell::new(OrbMode::Idle),
                energy: Cell::new(ENERGY_BASELINE),
                disposed: Cell::new(false),
                next_id: Cell::new(0),
                listeners: RefCell::new(FnvHashMap::default()),
            }),
        }
    }

    pub fn mode(&self) -> OrbMode {
        self.inner.mode.get()
    }

    pub fn energy(&self) -> f32 {
        self.inner.energy.get()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    pub fn set_mode(&self, mode: OrbMode) {
        if self.is_disposed() {
            return;
        }
        self.inner.mode.set(mode);
    }

    pub fn set_energy(&self, v: f32) {
        if self.is_disposed() || !v.is_finite() {
            return;
        }
        self.inner.energy.set(v.clamp(0.0, 1.0));
    }

    pub fn pulse(&self, intensity: f32) {
        self.emit(OrbSignal::Pulse, intensity);
    }

    pub fn sparkle(&self, count: usize) {
        self.emit(OrbSignal::Sparkle, count as f32);
    }

    pub fn ingest_event(&self, kind: &str) {
        if self.is_disposed() {
            return;
        }
        let kind = OrbEventKind::parse(kind);
        self.set_mode(kind.target_mode());
        if kind == OrbEventKind::Question {
            self.sparkle(DEFAULT_SPARKLE_COUNT);
        }
    }

    pub fn on(&self, signal: OrbSignal, listener: impl Fn(f32) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        if !self.is_disposed() {
            self.inner
                .listeners
                .borrow_mut()
                .insert(id, (signal, Rc::new(listener)));
        }
        Subscription {
            owner: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self, signal: OrbSignal) -> usize {
        self.inner
            .listeners
            .borrow()
            .values()
            .filter(|(s, _)| *s == signal)
            .count()
    }

    /// Drop every listener and turn all further calls into no-ops.
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        self.inner.listeners.borrow_mut().clear();
    }

    pub fn downgrade(&self) -> WeakOrbController {
        WeakOrbController {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn emit(&self, signal: OrbSignal, payload: f32) {
        if self.is_disposed() || !payload.is_finite() {
            return;
        }
        let snapshot: Vec<SignalListener> = self
            .inner
            .listeners
            .borrow()
            .values()
            .filter(|(s, _)| *s == signal)
            .map(|(_, l)| l.clone())
            .collect();
        for listener in snapshot {
            listener(payload);
        }
    }
}

/// Non-owning controller reference for listeners and timers.
#[derive(Clone)]
pub struct WeakOrbController {
    inner: Weak<ControllerInner>,
}

impl WeakOrbController {
    pub fn upgrade(&self) -> Option<OrbController> {
        self.inner.upgrade().map(|inner| OrbController { inner })
    }
}

/// Handle returned by [`OrbController::on`].
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    owner: Weak<ControllerInner>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(inner) = self.owner.upgrade() {
            inner.listeners.borrow_mut().remove(&self.id);
        }
    }
}
