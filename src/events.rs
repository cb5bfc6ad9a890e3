use orb_core::constants::ORB_EVENT_NAME;
use orb_core::{OrbBus, OrbError, OrbEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Forwards window `"echo:orb"` events onto an [`OrbBus`]. The window
/// listener is removed when the bridge is dropped.
pub struct WindowBridge {
    listener: Option<Closure<dyn FnMut(web::Event)>>,
}

impl WindowBridge {
    pub fn attach(bus: OrbBus) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let closure = Closure::wrap(Box::new(move |ev: web::Event| match parse_detail(&ev) {
            Ok(event) => {
                bus.publish(&event);
            }
            Err(e) => log::debug!("[bridge] ignored event: {}", e),
        }) as Box<dyn FnMut(web::Event)>);
        window
            .add_event_listener_with_callback(ORB_EVENT_NAME, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        log::info!("[bridge] listening for '{}'", ORB_EVENT_NAME);
        Ok(Self {
            listener: Some(closure),
        })
    }
}

impl Drop for WindowBridge {
    fn drop(&mut self) {
        if let Some(closure) = self.listener.take() {
            if let Some(window) = web::window() {
                _ = window.remove_event_listener_with_callback(
                    ORB_EVENT_NAME,
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

fn parse_detail(ev: &web::Event) -> Result<OrbEvent, OrbError> {
    let custom = ev
        .dyn_ref::<web::CustomEvent>()
        .ok_or_else(|| OrbError::MalformedEvent("not a CustomEvent".into()))?;
    let detail = custom.detail();
    if detail.is_undefined() || detail.is_function() {
        return Err(OrbError::MalformedEvent("detail is not serializable".into()));
    }
    // shape checks live in OrbEvent::from_json
    let json = js_sys::JSON::stringify(&detail)
        .map(String::from)
        .map_err(|e| OrbError::MalformedEvent(format!("{:?}", e)))?;
    OrbEvent::from_json(&json)
}

/// Publish an orb event to every window listener.
pub fn dispatch(event: &OrbEvent) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let detail = js_sys::JSON::parse(&event.to_json()).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let init = web::CustomEventInit::new();
    init.set_detail(&detail);
    let custom = web::CustomEvent::new_with_event_init_dict(ORB_EVENT_NAME, &init)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    window
        .dispatch_event(&custom)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
