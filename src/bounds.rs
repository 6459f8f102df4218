use crate::geometry::Point;
use wasm_bindgen::prelude::*;

/// Axis-aligned bounding rectangle that the diagram is clipped against.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen]
impl BoundingBox {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

impl BoundingBox {
    pub(crate) fn outside(&self, p: Point) -> bool {
        p.x < self.min_x || p.x > self.max_x || p.y < self.min_y || p.y > self.max_y
    }

    /// Exact corner check; clipped boundary points carry exact box coordinates.
    pub(crate) fn corner(&self, p: Point) -> bool {
        (p.x == self.min_x || p.x == self.max_x) && (p.y == self.min_y || p.y == self.max_y)
    }
}
