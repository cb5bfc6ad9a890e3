use orb_core::{Composite, Paint, Surface2d};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// [`Surface2d`] over a canvas 2D context.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn acquire(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }
}

/// Acquire a surface, or log and return `None` so the orb degrades to a
/// silent no-render host.
pub fn surface_for(canvas: &web::HtmlCanvasElement) -> Option<Box<dyn Surface2d>> {
    match CanvasSurface::acquire(canvas) {
        Ok(s) => Some(Box::new(s)),
        Err(e) => {
            log::warn!("[canvas] {}: {:?}", canvas.id(), e);
            None
        }
    }
}

impl Surface2d for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width.max(1));
        self.canvas.set_height(height.max(1));
    }

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_composite(&mut self, op: Composite) {
        _ = self.ctx.set_global_composite_operation(op.as_css());
    }

    fn set_fill(&mut self, paint: &Paint) {
        #[allow(deprecated)]
        self.ctx.set_fill_style(&JsValue::from_str(&paint.to_css()));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        if !(radius.is_finite() && radius > 0.0) {
            return;
        }
        self.ctx.begin_path();
        if self
            .ctx
            .arc(x as f64, y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }
}
