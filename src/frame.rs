use instant::Instant;
use orb_core::{FrameFn, Scheduler, Ticket, TimerFn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Browser scheduler: `requestAnimationFrame` for frames, `setTimeout` for
/// timers. Frame timestamps are seconds since the scheduler was created.
pub struct RafScheduler {
    origin: Instant,
}

impl Default for RafScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RafScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

type RafSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

impl Scheduler for RafScheduler {
    fn every_frame(&self, mut callback: FrameFn) -> Ticket {
        let ticket = Ticket::new();
        let Some(window) = web::window() else {
            log::warn!("[frame] no window; frame loop not started");
            ticket.cancel();
            return ticket;
        };
        let origin = self.origin;
        let handle = Rc::new(Cell::new(0i32));
        let tick: RafSlot = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let handle_in = handle.clone();
        let ticket_in = ticket.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if ticket_in.is_cancelled() {
                return;
            }
            callback(origin.elapsed().as_secs_f64());
            if ticket_in.is_cancelled() {
                return;
            }
            if let Some(w) = web::window() {
                if let Some(cb) = tick_clone.borrow().as_ref() {
                    if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        handle_in.set(id);
                    }
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = tick.borrow().as_ref() {
            match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => handle.set(id),
                Err(e) => log::error!("requestAnimationFrame error: {:?}", e),
            }
        }

        ticket.set_canceller(move || {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(handle.get());
            }
            // cancel may run from inside the loop's own callback; drop later
            if let Some(closure) = tick.borrow_mut().take() {
                defer_drop(closure);
            }
        });
        ticket
    }

    fn after(&self, delay: Duration, callback: TimerFn) -> Ticket {
        let ticket = Ticket::new();
        let Some(window) = web::window() else {
            return ticket;
        };
        let ticket_in = ticket.clone();
        let js = Closure::once_into_js(move || {
            if !ticket_in.is_cancelled() {
                callback();
            }
        });
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(js.unchecked_ref(), ms) {
            Ok(id) => ticket.set_canceller(move || {
                if let Some(w) = web::window() {
                    w.clear_timeout_with_handle(id);
                }
            }),
            Err(e) => log::error!("setTimeout error: {:?}", e),
        }
        ticket
    }
}

fn defer_drop(closure: Closure<dyn FnMut()>) {
    let Some(window) = web::window() else {
        return;
    };
    let release = Closure::once_into_js(move || drop(closure));
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(release.unchecked_ref(), 0);
}
