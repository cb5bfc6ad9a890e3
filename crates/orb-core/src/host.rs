//! Render host ("EchoOrb"): one surface, one particle system, one frame loop.
//!
//! The host binds its controller's `sparkle`/`pulse` notifications to the
//! live particle system and, every frame, fades previous trails, advances the
//! simulation and draws it. Unmounting cancels the loop and disposes the
//! controller so late timers and host calls cannot touch a dropped system.

use crate::constants::*;
use crate::controller::{OrbController, OrbSignal, Subscription, WeakOrbController};
use crate::error::{OrbError, OrbResult};
use crate::particles::{ParticleSystem, ParticleSystemConfig, Tint};
use crate::schedule::{Scheduler, Ticket};
use crate::state::Quality;
use crate::surface::{Composite, Paint, Surface2d};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Construction-time configuration of a single orb.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbProps {
    /// Logical size in CSS pixels.
    pub size: f32,
    pub quality: Quality,
    pub seed: u64,
    pub render_style: String,
    pub palette_index: usize,
    pub device_pixel_ratio: f32,
}

impl Default for OrbProps {
    fn default() -> Self {
        Self {
            size: 96.0,
            quality: Quality::Medium,
            seed: 7,
            render_style: String::from("flow"),
            palette_index: 0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl OrbProps {
    pub fn from_json(json: &str) -> OrbResult<Self> {
        serde_json::from_str(json).map_err(|e| OrbError::InvalidConfig(e.to_string()))
    }

    /// Device pixel ratio clamped to `[1, DPR_MAX]`.
    pub fn effective_dpr(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() {
            self.device_pixel_ratio.clamp(1.0, DPR_MAX)
        } else {
            1.0
        }
    }

    /// Square backing-store edge in device pixels.
    pub fn backing_px(&self) -> u32 {
        let size = if self.size.is_finite() { self.size.max(1.0) } else { 1.0 };
        (size * self.effective_dpr()).round().max(1.0) as u32
    }

    /// Simulation radius in backing-store pixels.
    pub fn radius_px(&self) -> f32 {
        self.backing_px() as f32 * ORB_RADIUS_FRACTION
    }

    fn setup_key_matches(&self, other: &OrbProps) -> bool {
        self.size == other.size
            && self.quality == other.quality
            && self.seed == other.seed
            && self.render_style == other.render_style
    }
}

/// Slowly rotating base hue with occasional saturation/lightness drift.
#[derive(Clone, Debug)]
pub struct HueDrift {
    tint: Tint,
    frame: u32,
    rng: StdRng,
}

impl HueDrift {
    pub fn new(palette_index: usize, seed: u64) -> Self {
        let hue = PALETTE_BASE_HUES[palette_index % PALETTE_BASE_HUES.len()];
        Self {
            tint: Tint {
                hue,
                ..Tint::default()
            },
            frame: 0,
            rng: StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
        }
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn advance(&mut self) {
        self.tint.hue = (self.tint.hue + HUE_STEP_PER_FRAME_DEG) % 360.0;
        self.frame = self.frame.wrapping_add(1);
        if self.frame % TINT_PERTURB_EVERY_FRAMES == 0 {
            self.tint.saturation =
                BASE_SATURATION + self.rng.gen_range(-SATURATION_JITTER..=SATURATION_JITTER);
            self.tint.lightness =
                BASE_LIGHTNESS + self.rng.gen_range(-LIGHTNESS_JITTER..=LIGHTNESS_JITTER);
        }
    }
}

struct HostState {
    system: ParticleSystem,
    surface: Box<dyn Surface2d>,
    hue: HueDrift,
    last_frame: Option<f64>,
}

impl HostState {
    fn frame(&mut self, now: f64, controller: &OrbController) {
        let dt = match self.last_frame {
            Some(prev) => ((now - prev) as f32).clamp(FRAME_DT_MIN, FRAME_DT_MAX),
            None => FRAME_DT_MIN,
        };
        self.last_frame = Some(now);

        self.system.set_energy(controller.energy());

        let w = self.surface.width() as f32;
        let h = self.surface.height() as f32;
        self.surface.set_composite(Composite::DestinationOut);
        self.surface.set_fill(&Paint::Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: TRAIL_FADE_ALPHA,
        });
        self.surface.fill_rect(0.0, 0.0, w, h);
        self.surface.set_composite(Composite::Lighter);

        self.system.tick(dt, controller.mode());
        self.hue.advance();
        self.system.draw(self.surface.as_mut(), self.hue.tint());
    }
}

pub struct OrbRenderHost {
    props: OrbProps,
    controller: OrbController,
    scheduler: Rc<dyn Scheduler>,
    state: Option<Rc<RefCell<HostState>>>,
    // kept so a re-setup can reuse the surface
    spare_surface: Option<Box<dyn Surface2d>>,
    frame: Option<Ticket>,
    subscriptions: Vec<Subscription>,
    mounted: bool,
}

impl OrbRenderHost {
    /// Mount an orb. `None` for the surface yields a host that keeps its
    /// controller working but never renders.
    pub fn mount(
        props: OrbProps,
        surface: Option<Box<dyn Surface2d>>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        let mut host = Self {
            props,
            controller: OrbController::new(),
            scheduler,
            state: None,
            spare_surface: surface,
            frame: None,
            subscriptions: Vec::new(),
            mounted: true,
        };
        host.setup();
        host
    }

    pub fn controller(&self) -> OrbController {
        self.controller.clone()
    }

    pub fn props(&self) -> &OrbProps {
        &self.props
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a surface is attached and the frame loop is running.
    pub fn is_rendering(&self) -> bool {
        self.state.is_some()
    }

    /// Run `f` against the live particle system, if any.
    pub fn with_system<R>(&self, f: impl FnOnce(&ParticleSystem) -> R) -> Option<R> {
        self.state.as_ref().map(|s| f(&s.borrow().system))
    }

    /// Apply new props. The simulation is rebuilt only when size, quality,
    /// seed or render style changed; a palette change alone restarts the hue
    /// drift on the live system.
    pub fn update(&mut self, props: OrbProps) {
        if !self.mounted {
            return;
        }
        let rebuild = !self.props.setup_key_matches(&props);
        let repaint = self.props.palette_index != props.palette_index;
        self.props = props;
        if rebuild {
            self.teardown();
            self.setup();
        } else if repaint {
            if let Some(state) = &self.state {
                state.borrow_mut().hue = HueDrift::new(self.props.palette_index, self.props.seed);
            }
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.teardown();
        self.spare_surface = None;
        self.controller.dispose();
        log::debug!("[host] unmounted seed={}", self.props.seed);
    }

    fn setup(&mut self) {
        let radius = self.props.radius_px();
        let backing = self.props.backing_px();
        let mut config = ParticleSystemConfig::new(radius, self.props.quality, self.props.seed);
        config.palette_index = self.props.palette_index;
        config.render_style = self.props.render_style.clone();

        let state = match self.spare_surface.take() {
            Some(mut surface) => {
                surface.resize(backing, backing);
                let half = backing as f32 * 0.5;
                let mut system = ParticleSystem::new(config);
                system.set_center(half, half);
                Some(Rc::new(RefCell::new(HostState {
                    system,
                    surface,
                    hue: HueDrift::new(self.props.palette_index, self.props.seed),
                    last_frame: None,
                })))
            }
            None => {
                log::warn!("[host] no drawing surface; orb will not render");
                None
            }
        };

        self.bind_controller(state.as_ref().map(Rc::downgrade));

        if let Some(state) = &state {
            let weak = Rc::downgrade(state);
            let controller = self.controller.downgrade();
            let ticket = self.scheduler.every_frame(Box::new(move |now| {
                if let (Some(state), Some(controller)) = (weak.upgrade(), controller.upgrade()) {
                    state.borrow_mut().frame(now, &controller);
                }
            }));
            self.frame = Some(ticket);
        }
        log::debug!(
            "[host] setup size={} dpr={:.2} backing={} radius={:.1} rendering={}",
            self.props.size,
            self.props.effective_dpr(),
            backing,
            radius,
            state.is_some()
        );
        self.state = state;
    }

    fn bind_controller(&mut self, state: Option<Weak<RefCell<HostState>>>) {
        let sparkle_state = state.clone();
        let sparkle = self.controller.on(OrbSignal::Sparkle, move |count| {
            if let Some(state) = sparkle_state.as_ref().and_then(Weak::upgrade) {
                state.borrow_mut().system.sparkle(count.max(0.0) as usize);
            }
        });

        let weak_ctrl: WeakOrbController = self.controller.downgrade();
        let scheduler = self.scheduler.clone();
        let pulse = self.controller.on(OrbSignal::Pulse, move |intensity| {
            let Some(controller) = weak_ctrl.upgrade() else {
                return;
            };
            controller.set_energy((PULSE_ENERGY_BASE + intensity * PULSE_ENERGY_GAIN).clamp(0.0, 1.0));
            // Unconditional reversion: overlapping pulses are not coalesced.
            let revert_ctrl = weak_ctrl.clone();
            let _ = scheduler.after(
                Duration::from_millis(PULSE_REVERT_MS),
                Box::new(move || {
                    if let Some(controller) = revert_ctrl.upgrade() {
                        controller.set_energy(ENERGY_BASELINE);
                    }
                }),
            );
        });
        self.subscriptions.push(sparkle);
        self.subscriptions.push(pulse);
    }

    fn teardown(&mut self) {
        if let Some(ticket) = self.frame.take() {
            ticket.cancel();
        }
        for sub in self.subscriptions.drain(..) {
            sub.unsubscribe();
        }
        if let Some(state) = self.state.take() {
            match Rc::try_unwrap(state) {
                Ok(cell) => self.spare_surface = Some(cell.into_inner().surface),
                Err(_) => log::warn!("[host] state still shared at teardown; surface dropped"),
            }
        }
    }
}

impl Drop for OrbRenderHost {
    fn drop(&mut self) {
        self.unmount();
    }
}
