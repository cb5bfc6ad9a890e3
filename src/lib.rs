#![cfg(target_arch = "wasm32")]
use orb_core::{DockLayout, OrbBus, OrbDock, OrbEvent, OrbMode, OrbProps, OrbRenderHost};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod canvas;
mod constants;
mod dom;
mod events;
mod frame;

use constants::{BACK_CANVAS_ID, DEFAULT_PULSE_INTENSITY, DEFAULT_SPARKLE, FRONT_CANVAS_ID};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orb-web starting");
    Ok(())
}

/// Dispatch `{ type: kind }` on the window's `"echo:orb"` event.
#[wasm_bindgen]
pub fn emit_orb_event(kind: &str) {
    if let Err(e) = events::dispatch(&OrbEvent::new(kind)) {
        log::error!("emit error: {:?}", e);
    }
}

fn parse_or_default<T: Default>(
    json: Option<String>,
    parse: impl Fn(&str) -> orb_core::OrbResult<T>,
) -> T {
    match json.as_deref().map(parse) {
        Some(Ok(v)) => v,
        Some(Err(e)) => {
            log::warn!("{}; using defaults", e);
            T::default()
        }
        None => T::default(),
    }
}

// ---------------- Single orb on an existing canvas ----------------

#[wasm_bindgen]
pub struct EchoOrb {
    host: Option<OrbRenderHost>,
}

fn mount_orb(canvas_id: &str, mut props: OrbProps) -> anyhow::Result<OrbRenderHost> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    props.device_pixel_ratio = dom::device_pixel_ratio() as f32;
    dom::set_css_size(&canvas, props.size);
    let surface = canvas::surface_for(&canvas);
    Ok(OrbRenderHost::mount(
        props,
        surface,
        Rc::new(frame::RafScheduler::new()),
    ))
}

#[wasm_bindgen]
impl EchoOrb {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> EchoOrb {
        let props = parse_or_default(config_json, OrbProps::from_json);
        let host = match mount_orb(canvas_id, props) {
            Ok(h) => Some(h),
            Err(e) => {
                log::error!("orb mount error: {:?}", e);
                None
            }
        };
        EchoOrb { host }
    }

    pub fn set_mode(&self, mode: &str) {
        if let Some(h) = &self.host {
            h.controller().set_mode(OrbMode::from_name(mode));
        }
    }

    pub fn pulse(&self, intensity: Option<f32>) {
        if let Some(h) = &self.host {
            h.controller()
                .pulse(intensity.unwrap_or(DEFAULT_PULSE_INTENSITY));
        }
    }

    pub fn sparkle(&self, count: Option<u32>) {
        if let Some(h) = &self.host {
            h.controller()
                .sparkle(count.unwrap_or(DEFAULT_SPARKLE) as usize);
        }
    }

    pub fn ingest_event(&self, kind: &str) {
        if let Some(h) = &self.host {
            h.controller().ingest_event(kind);
        }
    }

    pub fn set_energy(&self, v: f32) {
        if let Some(h) = &self.host {
            h.controller().set_energy(v);
        }
    }

    pub fn mode(&self) -> String {
        self.host
            .as_ref()
            .map(|h| h.controller().mode().as_str().to_string())
            .unwrap_or_else(|| OrbMode::Idle.as_str().to_string())
    }

    pub fn energy(&self) -> f32 {
        self.host
            .as_ref()
            .map(|h| h.controller().energy())
            .unwrap_or(0.0)
    }

    pub fn unmount(&mut self) {
        if let Some(mut h) = self.host.take() {
            h.unmount();
        }
    }
}

// ---------------- Dock: two portal orbs wired to the window bus ----------------

struct DockParts {
    dock: OrbDock,
    bridge: Option<events::WindowBridge>,
    canvases: Vec<web::HtmlCanvasElement>,
}

impl Drop for DockParts {
    fn drop(&mut self) {
        self.bridge.take();
        self.dock.unmount();
        for c in self.canvases.drain(..) {
            c.remove();
        }
    }
}

fn mount_dock(mut layout: DockLayout) -> anyhow::Result<DockParts> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    layout.device_pixel_ratio = dom::device_pixel_ratio() as f32;

    let back_canvas = dom::portal_canvas(&document, BACK_CANVAS_ID, &layout.back_style())?;
    let front_canvas = dom::portal_canvas(&document, FRONT_CANVAS_ID, &layout.front_style())?;
    let back_surface = canvas::surface_for(&back_canvas);
    let front_surface = canvas::surface_for(&front_canvas);

    let bus = OrbBus::new();
    let bridge = match events::WindowBridge::attach(bus.clone()) {
        Ok(b) => Some(b),
        Err(e) => {
            log::error!("bus bridge error: {:?}", e);
            None
        }
    };
    let dock = OrbDock::mount(
        layout,
        &bus,
        Rc::new(frame::RafScheduler::new()),
        back_surface,
        front_surface,
    );
    Ok(DockParts {
        dock,
        bridge,
        canvases: vec![back_canvas, front_canvas],
    })
}

#[wasm_bindgen]
pub struct EchoOrbDock {
    parts: Option<DockParts>,
}

#[wasm_bindgen]
impl EchoOrbDock {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> EchoOrbDock {
        let layout = parse_or_default(config_json, DockLayout::from_json);
        let parts = match mount_dock(layout) {
            Ok(p) => Some(p),
            Err(e) => {
                log::error!("dock mount error: {:?}", e);
                None
            }
        };
        EchoOrbDock { parts }
    }

    /// Feed an event straight to the foreground orb, bypassing the window.
    pub fn ingest_event(&self, kind: &str) {
        if let Some(p) = &self.parts {
            p.dock.front().ingest_event(kind);
        }
    }

    pub fn front_mode(&self) -> String {
        self.parts
            .as_ref()
            .map(|p| p.dock.front().mode().as_str().to_string())
            .unwrap_or_else(|| OrbMode::Idle.as_str().to_string())
    }

    /// Tear down both orbs, the window listener and the portal canvases.
    pub fn unmount(&mut self) {
        self.parts.take();
    }
}
