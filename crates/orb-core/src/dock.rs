//! Dock: two orbs (back glow + foreground) anchored to a screen corner.
//!
//! The dock listens once on the injected [`OrbBus`] and forwards every event
//! to the foreground controller. With autoplay enabled a single oscillator
//! loop keeps both orbs breathing with soft pulses and periodic sparkles.

use crate::bus::{BusSubscription, OrbBus};
use crate::constants::*;
use crate::controller::OrbController;
use crate::error::{OrbError, OrbResult};
use crate::host::{OrbProps, OrbRenderHost};
use crate::schedule::{Scheduler, Ticket};
use crate::state::Quality;
use crate::surface::Surface2d;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Corner {
    /// CSS properties anchoring to this corner: (vertical, horizontal).
    pub fn edges(self) -> (&'static str, &'static str) {
        match self {
            Corner::TopLeft => ("top", "left"),
            Corner::TopRight => ("top", "right"),
            Corner::BottomLeft => ("bottom", "left"),
            Corner::BottomRight => ("bottom", "right"),
        }
    }
}

/// Size and offsets of one orb inside the dock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbPlacement {
    pub size: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub z_index: i32,
    pub quality: Quality,
    pub seed: u64,
}

impl Default for OrbPlacement {
    fn default() -> Self {
        Self::front()
    }
}

impl OrbPlacement {
    pub fn front() -> Self {
        Self {
            size: 72.0,
            offset_x: 0.0,
            offset_y: 0.0,
            z_index: 9001,
            quality: Quality::Medium,
            seed: 42,
        }
    }

    pub fn back() -> Self {
        Self {
            size: 132.0,
            offset_x: -30.0,
            offset_y: -30.0,
            z_index: 9000,
            quality: Quality::Low,
            seed: 7,
        }
    }

    fn props(&self, palette_index: usize, device_pixel_ratio: f32) -> OrbProps {
        OrbProps {
            size: self.size,
            quality: self.quality,
            seed: self.seed,
            palette_index,
            device_pixel_ratio,
            ..OrbProps::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockLayout {
    pub corner: Corner,
    pub padding: f32,
    pub back: OrbPlacement,
    pub front: OrbPlacement,
    pub autoplay: bool,
    pub palette_index: usize,
    pub device_pixel_ratio: f32,
}

impl Default for DockLayout {
    fn default() -> Self {
        Self {
            corner: Corner::BottomRight,
            padding: 24.0,
            back: OrbPlacement::back(),
            front: OrbPlacement::front(),
            autoplay: true,
            palette_index: 0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl DockLayout {
    pub fn from_json(json: &str) -> OrbResult<Self> {
        serde_json::from_str(json).map_err(|e| OrbError::InvalidConfig(e.to_string()))
    }

    pub fn back_style(&self) -> String {
        resolve_style(self.corner, self.padding, &self.back)
    }

    pub fn front_style(&self) -> String {
        resolve_style(self.corner, self.padding, &self.front)
    }
}

/// Fixed-position CSS for one orb. Offsets are measured away from the
/// anchored edges, on top of padding and the device safe-area inset.
pub fn resolve_style(corner: Corner, padding: f32, placement: &OrbPlacement) -> String {
    let (vertical, horizontal) = corner.edges();
    format!(
        "position:fixed;{v}:calc(env(safe-area-inset-{v}, 0px) + {dy}px);\
         {h}:calc(env(safe-area-inset-{h}, 0px) + {dx}px);\
         width:{s}px;height:{s}px;z-index:{z};pointer-events:none;",
        v = vertical,
        h = horizontal,
        dy = padding + placement.offset_y,
        dx = padding + placement.offset_x,
        s = placement.size,
        z = placement.z_index,
    )
}

/// Phase accumulator for the idle autoplay loop.
#[derive(Clone, Debug, Default)]
pub struct Autoplay {
    t: f32,
    since_pulse: f32,
    since_sparkle: f32,
    last_frame: Option<f64>,
}

impl Autoplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, now: f64, front: &OrbController, back: &OrbController) {
        let dt = match self.last_frame {
            Some(prev) => ((now - prev) as f32).clamp(0.0, FRAME_DT_MAX),
            None => 0.0,
        };
        self.last_frame = Some(now);
        self.t += dt;
        self.since_pulse += dt;
        self.since_sparkle += dt;

        if self.since_pulse >= AUTOPLAY_PULSE_PERIOD_SEC {
            self.since_pulse -= AUTOPLAY_PULSE_PERIOD_SEC;
            front.pulse(AUTOPLAY_FRONT_BASE + AUTOPLAY_FRONT_SPAN * (self.t * AUTOPLAY_FRONT_RATE).sin());
            back.pulse(
                AUTOPLAY_BACK_BASE
                    + AUTOPLAY_BACK_SPAN * (self.t * AUTOPLAY_BACK_RATE + AUTOPLAY_BACK_PHASE).sin(),
            );
        }
        if self.since_sparkle >= AUTOPLAY_SPARKLE_PERIOD_SEC {
            self.since_sparkle -= AUTOPLAY_SPARKLE_PERIOD_SEC;
            front.sparkle(AUTOPLAY_SPARKLE_COUNT);
        }
    }
}

pub struct OrbDock {
    layout: DockLayout,
    back: OrbRenderHost,
    front: OrbRenderHost,
    bus_subscription: Option<BusSubscription>,
    autoplay: Option<Ticket>,
}

impl OrbDock {
    pub fn mount(
        layout: DockLayout,
        bus: &OrbBus,
        scheduler: Rc<dyn Scheduler>,
        back_surface: Option<Box<dyn Surface2d>>,
        front_surface: Option<Box<dyn Surface2d>>,
    ) -> Self {
        let dpr = layout.device_pixel_ratio;
        let back = OrbRenderHost::mount(
            layout.back.props(layout.palette_index, dpr),
            back_surface,
            scheduler.clone(),
        );
        let front = OrbRenderHost::mount(
            layout.front.props(layout.palette_index, dpr),
            front_surface,
            scheduler.clone(),
        );

        let target = front.controller().downgrade();
        let bus_subscription = bus.subscribe(move |event| {
            if let Some(controller) = target.upgrade() {
                controller.ingest_event(&event.kind);
            }
        });

        let autoplay = if layout.autoplay {
            let front_ctrl = front.controller().downgrade();
            let back_ctrl = back.controller().downgrade();
            let mut osc = Autoplay::new();
            Some(scheduler.every_frame(Box::new(move |now| {
                if let (Some(f), Some(b)) = (front_ctrl.upgrade(), back_ctrl.upgrade()) {
                    osc.step(now, &f, &b);
                }
            })))
        } else {
            None
        };

        log::debug!(
            "[dock] mounted corner={:?} autoplay={}",
            layout.corner,
            layout.autoplay
        );
        Self {
            layout,
            back,
            front,
            bus_subscription: Some(bus_subscription),
            autoplay,
        }
    }

    pub fn layout(&self) -> &DockLayout {
        &self.layout
    }

    pub fn front(&self) -> OrbController {
        self.front.controller()
    }

    pub fn back(&self) -> OrbController {
        self.back.controller()
    }

    pub fn front_host(&self) -> &OrbRenderHost {
        &self.front
    }

    pub fn back_host(&self) -> &OrbRenderHost {
        &self.back
    }

    pub fn unmount(&mut self) {
        if let Some(ticket) = self.autoplay.take() {
            ticket.cancel();
        }
        if let Some(sub) = self.bus_subscription.take() {
            sub.unsubscribe();
        }
        self.front.unmount();
        self.back.unmount();
    }
}

impl Drop for OrbDock {
    fn drop(&mut self) {
        self.unmount();
    }
}
