//! The main container for constructing 2D Voronoi diagrams with the sweep
//! line. Holds the bounding rectangle, the flat site array and the computed
//! cells.

use crate::bounds::BoundingBox;
use crate::cell::Cell;
use crate::faces;
use crate::geometry::Point;
use crate::sweep::Sweep;
use rand::prelude::*;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Diagram {
    bounds: BoundingBox,
    sites: Vec<f64>,
    cells: Vec<Cell>,
}

#[wasm_bindgen]
impl Diagram {
    #[wasm_bindgen(constructor)]
    pub fn new(bounds: BoundingBox) -> Diagram {
        Diagram {
            bounds,
            sites: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Replaces the sites with a flat [x, y, x, y, ...] array. Sites outside
    /// the bounding rectangle are dropped; previously computed cells are
    /// discarded.
    pub fn set_sites(&mut self, sites: &[f64]) {
        self.sites.clear();
        self.cells.clear();
        for pair in sites.chunks_exact(2) {
            if !self.bounds.outside(Point::new(pair[0], pair[1])) {
                self.sites.push(pair[0]);
                self.sites.push(pair[1]);
            }
        }
    }

    pub fn random_sites(&mut self, count: usize) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let w = self.bounds.max_x - self.bounds.min_x;
        let h = self.bounds.max_y - self.bounds.min_y;

        let mut points = Vec::with_capacity(count * 2);
        for _ in 0..count {
            points.push(self.bounds.min_x + rng.r#gen::<f64>() * w);
            points.push(self.bounds.min_y + rng.r#gen::<f64>() * h);
        }
        self.set_sites(&points);
    }

    #[wasm_bindgen(getter)]
    pub fn sites(&self) -> Vec<f64> {
        self.sites.clone()
    }

    pub fn count_sites(&self) -> usize {
        self.sites.len() / 2
    }

    pub fn count_cells(&self) -> usize {
        self.cells.len()
    }

    /// Runs the sweep and traces one cell per site. A duplicate site, or any
    /// site when fewer than two distinct positions exist, gets an empty cell.
    pub fn calculate(&mut self) {
        self.cells.clear();

        // Exact duplicates would put two events at the same sweep position;
        // only the first occurrence takes part, the rest keep empty cells.
        let mut distinct: Vec<Point> = Vec::new();
        let mut original: Vec<usize> = Vec::new();
        for (i, pair) in self.sites.chunks_exact(2).enumerate() {
            let p = Point::new(pair[0], pair[1]);
            if !distinct.contains(&p) {
                distinct.push(p);
                original.push(i);
            }
        }

        let count = self.sites.len() / 2;
        let mut cells: Vec<Cell> = (0..count)
            .map(|id| Cell { id, points: Vec::new() })
            .collect();

        if distinct.len() >= 2 {
            let edges = Sweep::run(&distinct, self.bounds);
            let polygons = faces::build_polygons(&distinct, edges, &self.bounds);
            for (points, &id) in polygons.into_iter().zip(&original) {
                cells[id].points = points;
            }
        }
        self.cells = cells;
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).cloned()
    }
}

impl Diagram {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789
    }
}
