//! Drawing surface abstraction.
//!
//! The orb only needs a tiny slice of the canvas 2D API: sizing the backing
//! store, switching composite mode, and filling rectangles and circles. The
//! web frontend implements [`Surface2d`] over `CanvasRenderingContext2d`;
//! tests implement it with a command recorder.

/// Canvas composite operations used by the orb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
    SourceOver,
    /// Additive blending ("lighter"): overlapping colours sum into a glow.
    Lighter,
    /// Erases destination by source alpha; used to fade previous trails.
    DestinationOut,
}

impl Composite {
    pub fn as_css(self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::Lighter => "lighter",
            Composite::DestinationOut => "destination-out",
        }
    }
}

/// Fill colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Rgba { r: u8, g: u8, b: u8, a: f32 },
    /// Hue in degrees, saturation and lightness in percent, alpha in 0..1.
    Hsla { h: f32, s: f32, l: f32, a: f32 },
}

impl Paint {
    pub fn to_css(&self) -> String {
        match *self {
            Paint::Rgba { r, g, b, a } => format!("rgba({},{},{},{:.3})", r, g, b, a),
            Paint::Hsla { h, s, l, a } => {
                format!("hsla({:.1},{:.1}%,{:.1}%,{:.3})", h.rem_euclid(360.0), s, l, a)
            }
        }
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Paint::Rgba { a, .. } | Paint::Hsla { a, .. } => a,
        }
    }
}

pub trait Surface2d {
    /// Resize the backing store in device pixels.
    fn resize(&mut self, width: u32, height: u32);
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_composite(&mut self, op: Composite);
    fn set_fill(&mut self, paint: &Paint);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsla_wraps_hue_into_range() {
        let p = Paint::Hsla {
            h: 370.0,
            s: 85.0,
            l: 65.0,
            a: 0.5,
        };
        assert_eq!(p.to_css(), "hsla(10.0,85.0%,65.0%,0.500)");
    }

    #[test]
    fn composite_names_match_canvas() {
        assert_eq!(Composite::Lighter.as_css(), "lighter");
        assert_eq!(Composite::DestinationOut.as_css(), "destination-out");
    }
}
