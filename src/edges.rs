//! Half-edge arena for the diagram under construction. Edges are always
//! created as twin pairs stored in adjacent slots, so a twin lookup is a
//! single index flip and the pairing can never dangle.

use crate::geometry::{Point, Vector, difference, intersect};
use std::ops::{Index, IndexMut};

pub(crate) type EdgeId = usize;

/// How far past the current directrix `circle_vector` looks to sample the
/// merged breakpoint's direction of travel.
const LOOKAHEAD: f64 = 0.1;

/// One direction of a bisector line; the twin carries the opposite one.
#[derive(Debug)]
pub(crate) struct HalfEdge {
    /// Anchor of the ray this edge grows along.
    pub point: Point,
    /// Growth direction, set as soon as the owning breakpoint knows it.
    pub vector: Option<Vector>,
    /// Resolved endpoint of this end of the bisector, once pinned.
    pub origin: Option<Point>,
}

pub(crate) struct EdgeList {
    edges: Vec<HalfEdge>,
}

impl EdgeList {
    pub fn new() -> EdgeList {
        EdgeList { edges: Vec::new() }
    }

    /// Creates a twin pair anchored at `point` and returns the first half.
    pub fn add_edge(&mut self, point: Point) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(HalfEdge {
            point,
            vector: None,
            origin: None,
        });
        self.edges.push(HalfEdge {
            point,
            vector: None,
            origin: None,
        });
        id
    }

    pub fn twin(&self, id: EdgeId) -> EdgeId {
        id ^ 1
    }

    /// Ids of the first half of every twin pair.
    pub fn pair_ids(&self) -> impl Iterator<Item = EdgeId> + use<> {
        (0..self.edges.len()).step_by(2)
    }

    /// Assigns perpendicular-bisector directions to an edge created by a site
    /// event. Vertical and horizontal bisectors get explicit axis directions
    /// so no slope is ever divided out of a zero.
    pub fn site_vector(&mut self, id: EdgeId, site1: Point, site2: Point) {
        let (site1, site2) = if site1.x > site2.x {
            (site2, site1)
        } else {
            (site1, site2)
        };

        let (left, right) = if site1.x == site2.x {
            (Vector::new(-1.0, 0.0), Vector::new(1.0, 0.0))
        } else if site1.y == site2.y {
            (Vector::new(0.0, -1.0), Vector::new(0.0, 1.0))
        } else {
            let slope = (site2.y - site1.y) / (site2.x - site1.x);
            (Vector::new(-1.0, 1.0 / slope), Vector::new(1.0, -1.0 / slope))
        };

        self.edges[id].vector = Some(left);
        self.edges[id ^ 1].vector = Some(right);
    }

    /// Orients an edge created by a circle-event merge: the breakpoint's
    /// position is sampled at a directrix slightly past the current one and
    /// the displacement toward it gives the direction of travel.
    pub fn circle_vector(&mut self, id: EdgeId, left_site: Point, right_site: Point, directrix: f64) {
        let future = intersect(left_site, right_site, directrix - LOOKAHEAD);
        let vector = difference(self.edges[id].point, future);
        self.edges[id].vector = Some(vector);
        self.edges[id].origin = Some(self.edges[id].point);
        self.edges[id ^ 1].vector = Some(vector.reversed());
    }
}

impl Index<EdgeId> for EdgeList {
    type Output = HalfEdge;

    fn index(&self, id: EdgeId) -> &HalfEdge {
        &self.edges[id]
    }
}

impl IndexMut<EdgeId> for EdgeList {
    fn index_mut(&mut self, id: EdgeId) -> &mut HalfEdge {
        &mut self.edges[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twin_pairing() {
        let mut edges = EdgeList::new();
        let e1 = edges.add_edge(Point::new(0.0, 0.0));
        let e2 = edges.add_edge(Point::new(1.0, 1.0));

        assert_eq!(edges.twin(e1), e1 + 1);
        assert_eq!(edges.twin(edges.twin(e1)), e1);
        assert_eq!(edges.twin(e2), e2 + 1);
        assert_eq!(edges.pair_ids().collect::<Vec<_>>(), vec![e1, e2]);
        assert_eq!(edges[e1].point, edges[edges.twin(e1)].point);
    }

    #[test]
    fn test_site_vector_axis_cases() {
        let mut edges = EdgeList::new();

        // Equal x: vertical site pair, horizontal bisector directions.
        let e = edges.add_edge(Point::new(0.0, 2.0));
        edges.site_vector(e, Point::new(0.0, 0.0), Point::new(0.0, 4.0));
        let v = edges[e].vector.expect("direction set");
        assert!(v.x == -1.0 && v.y == 0.0);
        let w = edges[e ^ 1].vector.expect("direction set");
        assert!(w.x == 1.0 && w.y == 0.0);

        // Equal y: horizontal site pair, vertical bisector directions.
        let e = edges.add_edge(Point::new(2.0, 5.0));
        edges.site_vector(e, Point::new(4.0, 0.0), Point::new(0.0, 0.0));
        let v = edges[e].vector.expect("direction set");
        assert!(v.x == 0.0 && v.y == -1.0);
    }

    #[test]
    fn test_site_vector_perpendicular() {
        let mut edges = EdgeList::new();
        let e = edges.add_edge(Point::new(0.0, 0.0));
        edges.site_vector(e, Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        let v = edges[e].vector.expect("direction set");
        // Perpendicular to the site difference (2, 2).
        assert!((v.x * 2.0 + v.y * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle_vector_sets_origin() {
        let mut edges = EdgeList::new();
        let center = Point::new(1.0, 1.0);
        let e = edges.add_edge(center);
        edges.circle_vector(e, Point::new(0.0, 4.0), Point::new(2.0, 4.0), 0.0);

        assert_eq!(edges[e].origin, Some(center));
        assert!(edges[e ^ 1].origin.is_none());
        let v = edges[e].vector.expect("direction set");
        let w = edges[e ^ 1].vector.expect("direction set");
        assert!((v.x + w.x).abs() < 1e-12 && (v.y + w.y).abs() < 1e-12);
        // Equal-height sites: the breakpoint travels straight down x = 1.
        assert!(v.x.abs() < 1e-9);
    }
}
