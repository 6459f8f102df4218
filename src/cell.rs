use crate::geometry::{Point, point_in_polygon};
use wasm_bindgen::prelude::*;

/// One Voronoi region: the convex polygon of all points closer to its site
/// than to any other. Vertices are stored counter-clockwise, without the
/// first point repeated at the end.
#[wasm_bindgen]
#[derive(Clone)]
pub struct Cell {
    pub(crate) id: usize,
    pub(crate) points: Vec<Point>,
}

#[wasm_bindgen]
impl Cell {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Flat array of vertices [x, y, x, y, ...].
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.points.len() * 2);
        for p in &self.points {
            flat.push(p.x);
            flat.push(p.y);
        }
        flat
    }

    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Area by the shoelace formula.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum.abs() / 2.0
    }

    /// Centroid as [x, y]; empty for a degenerate cell.
    pub fn centroid(&self) -> Vec<f64> {
        let n = self.points.len();
        if n < 3 {
            return Vec::new();
        }
        let mut area2 = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let cross = a.x * b.y - b.x * a.y;
            area2 += cross;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        if area2.abs() < 1e-12 {
            return Vec::new();
        }
        vec![cx / (3.0 * area2), cy / (3.0 * area2)]
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        point_in_polygon(Point::new(x, y), &self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Cell {
        Cell {
            id: 0,
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
        }
    }

    #[test]
    fn test_area_and_centroid() {
        let cell = unit_square();
        assert!((cell.area() - 1.0).abs() < 1e-12);
        let c = cell.centroid();
        assert!((c[0] - 0.5).abs() < 1e-12 && (c[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_contains() {
        let cell = unit_square();
        assert!(cell.contains(0.5, 0.5));
        assert!(!cell.contains(1.5, 0.5));
    }

    #[test]
    fn test_empty_cell() {
        let cell = Cell { id: 3, points: Vec::new() };
        assert!(cell.is_empty());
        assert_eq!(cell.area(), 0.0);
        assert!(cell.centroid().is_empty());
        assert!(!cell.contains(0.0, 0.0));
    }

    #[test]
    fn test_vertices_flat_layout() {
        let cell = unit_square();
        let flat = cell.vertices();
        assert_eq!(flat.len(), 8);
        assert_eq!(&flat[..4], &[0.0, 0.0, 1.0, 0.0]);
    }
}
