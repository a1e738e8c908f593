// Canvas placement of the diagram's authored coordinate space.
use crate::model::{Bounds, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Viewport {
    /// Largest uniform scale that fits `bounds` (plus `margin` px each side) into
    /// a `width` x `height` canvas, centred.
    pub fn fit(bounds: Bounds, width: f64, height: f64, margin: f64) -> Self {
        let avail_w = (width - 2.0 * margin).max(1.0);
        let avail_h = (height - 2.0 * margin).max(1.0);
        let scale = (avail_w / bounds.width).min(avail_h / bounds.height).max(0.05);
        Self {
            scale,
            offset_x: (width - bounds.width * scale) * 0.5,
            offset_y: (height - bounds.height * scale) * 0.5,
        }
    }

    /// Canvas pixel -> diagram space.
    pub fn to_world(&self, px: f64, py: f64) -> Point {
        Point::new((px - self.offset_x) / self.scale, (py - self.offset_y) / self.scale)
    }

    /// Diagram space -> canvas pixel.
    pub fn to_screen(&self, p: Point) -> (f64, f64) {
        (p.x * self.scale + self.offset_x, p.y * self.scale + self.offset_y)
    }
}
