//! In-process event bus for orb events.
//!
//! The bus is an explicit object handed to whoever needs it (the dock, the
//! browser bridge, tests) rather than process-wide state. There is no
//! queueing: an event published while nobody listens is dropped.

use crate::state::OrbEvent;
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type BusListener = Rc<dyn Fn(&OrbEvent)>;

#[derive(Default)]
struct BusState {
    next_id: u64,
    listeners: FnvHashMap<u64, BusListener>,
}

#[derive(Clone, Default)]
pub struct OrbBus {
    state: Rc<RefCell<BusState>>,
}

impl OrbBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&OrbEvent) + 'static) -> BusSubscription {
        let mut st = self.state.borrow_mut();
        let id = st.next_id;
        st.next_id += 1;
        st.listeners.insert(id, Rc::new(listener));
        BusSubscription {
            bus: Rc::downgrade(&self.state),
            id,
        }
    }

    /// Deliver `event` to every current listener. Returns how many saw it.
    pub fn publish(&self, event: &OrbEvent) -> usize {
        let snapshot: Vec<BusListener> = self.state.borrow().listeners.values().cloned().collect();
        if snapshot.is_empty() {
            log::debug!("[bus] dropped '{}' (no listeners)", event.kind);
        }
        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

/// Handle returned by [`OrbBus::subscribe`].
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct BusSubscription {
    bus: Weak<RefCell<BusState>>,
    id: u64,
}

impl BusSubscription {
    pub fn unsubscribe(self) {
        if let Some(state) = self.bus.upgrade() {
            state.borrow_mut().listeners.remove(&self.id);
        }
    }
}
