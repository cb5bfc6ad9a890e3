use crate::constants::{FALLBACK_DPR, ORB_CANVAS_CLASS};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|dpr| dpr.is_finite() && *dpr > 0.0)
        .unwrap_or(FALLBACK_DPR)
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Create a fixed-position canvas appended to `document.body`, so it floats
/// above the application layout regardless of where the dock is mounted.
pub fn portal_canvas(
    document: &web::Document,
    id: &str,
    style: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_id(id);
    canvas.set_class_name(ORB_CANVAS_CLASS);
    _ = canvas.set_attribute("style", style);
    _ = canvas.set_attribute("aria-hidden", "true");
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Keep the CSS box at the logical size; the backing store is sized by the
/// orb host in device pixels.
pub fn set_css_size(canvas: &web::HtmlCanvasElement, size_px: f32) {
    let existing = canvas.get_attribute("style").unwrap_or_default();
    let style = format!("{}width:{}px;height:{}px;", existing, size_px, size_px);
    _ = canvas.set_attribute("style", &style);
}
