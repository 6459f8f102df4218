//! Turns the unbounded half-edge graph into bounded polygons: clips every
//! edge pair against the rectangle, stitches a synthetic boundary loop,
//! traces faces by repeated farthest-left-turn walks and assigns each face
//! to the site it contains.

use crate::bounds::BoundingBox;
use crate::edges::EdgeList;
use crate::geometry::{EPSILON, Point, Vector, cross_product, extend, point_in_polygon, shorten};
use std::collections::{HashMap, HashSet};

/// Hashable identity of a clipped endpoint. Coordinates are quantized to the
/// geometry tolerance, so endpoints that coincide within it share a key even
/// when they were computed along different paths and round differently.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey(i64, i64);

impl PointKey {
    fn new(p: Point) -> PointKey {
        PointKey((p.x / EPSILON).round() as i64, (p.y / EPSILON).round() as i64)
    }
}

/// Directed adjacency between endpoint coordinates. Insertion order of the
/// vertices is kept so face tracing starts are deterministic.
struct Adjacency {
    map: HashMap<PointKey, Vec<Point>>,
    order: Vec<Point>,
}

impl Adjacency {
    fn new() -> Adjacency {
        Adjacency {
            map: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn add(&mut self, from: Point, to: Point) {
        let key = PointKey::new(from);
        if !self.map.contains_key(&key) {
            self.order.push(from);
        }
        self.map.entry(key).or_default().push(to);
    }
}

/// Builds one polygon per site, indexed like `sites`; a site that no traced
/// face contains keeps an empty polygon.
pub(crate) fn build_polygons(
    sites: &[Point],
    mut edges: EdgeList,
    bounds: &BoundingBox,
) -> Vec<Vec<Point>> {
    let segments = prune_edges(&mut edges, bounds);
    let boundary = boundary_points(&segments, bounds);

    let mut adjacency = Adjacency::new();
    // Internal edges are walkable in both directions.
    for &(a, b) in &segments {
        adjacency.add(a, b);
        adjacency.add(b, a);
    }
    // The boundary loop only in counter-clockwise direction, so the outer
    // face can never be traced.
    for i in 0..boundary.len() {
        adjacency.add(boundary[i], boundary[(i + 1) % boundary.len()]);
    }

    let polygons = construct_polygons(adjacency);
    assign_polygons(sites, polygons)
}

fn ray_escapes(origin: Option<Point>, vector: Option<Vector>, bounds: &BoundingBox) -> bool {
    match (origin, vector) {
        (Some(origin), Some(vector)) => extend(origin, vector, bounds).is_none(),
        _ => false,
    }
}

/// Clips every twin pair to the rectangle and collects the surviving
/// segments, keyed undirected. Pairs are classified by how many endpoints
/// the sweep already resolved.
fn prune_edges(edges: &mut EdgeList, bounds: &BoundingBox) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();
    let mut seen: HashSet<(PointKey, PointKey)> = HashSet::new();

    let ids: Vec<_> = edges.pair_ids().collect();
    for e in ids {
        let t = edges.twin(e);
        let (Some(ev), Some(tv)) = (edges[e].vector, edges[t].vector) else {
            continue;
        };

        if edges[e].origin.is_none() && edges[t].origin.is_none() {
            // Both ends unresolved: the pair is a full line through its
            // anchor.
            let anchor = edges[e].point;
            if bounds.outside(anchor) {
                // Only the half pointing back toward the rectangle can
                // reach it; clip that one at both crossings.
                let inward = if extend(anchor, tv, bounds).is_none() { e } else { t };
                let iv = if inward == e { ev } else { tv };
                edges[inward].origin = shorten(anchor, iv, bounds);
                let outward = edges.twin(inward);
                edges[outward].origin = extend(anchor, iv, bounds);
            } else {
                edges[e].origin = shorten(anchor, ev, bounds);
                edges[t].origin = shorten(edges[t].point, tv, bounds);
            }
        } else {
            // A resolved end whose continuation cannot reach the rectangle
            // lies entirely outside; drop the pair.
            if ray_escapes(edges[e].origin, Some(ev), bounds)
                || ray_escapes(edges[t].origin, Some(tv), bounds)
            {
                continue;
            }
            if let (Some(eo), Some(to)) = (edges[e].origin, edges[t].origin) {
                // Finite segment: pull any escaped endpoint back onto the
                // boundary.
                if bounds.outside(eo) {
                    edges[e].origin = shorten(eo, ev, bounds);
                }
                if bounds.outside(to) {
                    edges[t].origin = shorten(to, tv, bounds);
                }
            } else {
                // Exactly one resolved end: extend the other to the
                // rectangle, then re-check the resolved one.
                let (known, kv) = if edges[e].origin.is_some() { (e, ev) } else { (t, tv) };
                let Some(ko) = edges[known].origin else {
                    continue;
                };
                let unknown = edges.twin(known);
                edges[unknown].origin = extend(ko, kv, bounds);
                if bounds.outside(ko) {
                    edges[known].origin = shorten(ko, kv, bounds);
                }
            }
        }

        if let (Some(a), Some(b)) = (edges[e].origin, edges[t].origin) {
            let (ka, kb) = (PointKey::new(a), PointKey::new(b));
            if ka != kb && !seen.contains(&(kb, ka)) && seen.insert((ka, kb)) {
                segments.push((a, b));
            }
        }
    }
    segments
}

/// Collects every clipped endpoint lying on the rectangle boundary (corners
/// excluded), sorts each side along its counter-clockwise direction, and
/// stitches the four corners in to close the loop.
fn boundary_points(segments: &[(Point, Point)], bounds: &BoundingBox) -> Vec<Point> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut bottom = Vec::new();
    let mut top = Vec::new();

    let mut classify = |p: Point| {
        if bounds.corner(p) {
            return;
        }
        if p.x == bounds.min_x {
            left.push(p);
        } else if p.x == bounds.max_x {
            right.push(p);
        } else if p.y == bounds.min_y {
            bottom.push(p);
        } else if p.y == bounds.max_y {
            top.push(p);
        }
    };
    for &(a, b) in segments {
        classify(a);
        classify(b);
    }

    bottom.sort_unstable_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    right.sort_unstable_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));
    top.sort_unstable_by(|a, b| b.x.partial_cmp(&a.x).unwrap_or(std::cmp::Ordering::Equal));
    left.sort_unstable_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal));
    // A vertex shared by several clipped segments must appear once.
    bottom.dedup_by_key(|p| PointKey::new(*p));
    right.dedup_by_key(|p| PointKey::new(*p));
    top.dedup_by_key(|p| PointKey::new(*p));
    left.dedup_by_key(|p| PointKey::new(*p));

    let mut loop_points = Vec::with_capacity(4 + bottom.len() + right.len() + top.len() + left.len());
    loop_points.push(Point::new(bounds.min_x, bounds.min_y));
    loop_points.extend(bottom);
    loop_points.push(Point::new(bounds.max_x, bounds.min_y));
    loop_points.extend(right);
    loop_points.push(Point::new(bounds.max_x, bounds.max_y));
    loop_points.extend(top);
    loop_points.push(Point::new(bounds.min_x, bounds.max_y));
    loop_points.extend(left);
    loop_points
}

/// Repeatedly walks the adjacency, always taking the farthest left turn
/// (maximum signed cross product against the incoming direction), consuming
/// each directed edge once. Every closed walk is one convex face traced
/// counter-clockwise.
fn construct_polygons(mut adjacency: Adjacency) -> Vec<Vec<Point>> {
    let mut polygons = Vec::new();
    let mut cursor = 0;

    while !adjacency.map.is_empty() {
        while cursor < adjacency.order.len()
            && !adjacency.map.contains_key(&PointKey::new(adjacency.order[cursor]))
        {
            cursor += 1;
        }
        if cursor >= adjacency.order.len() {
            break;
        }
        let start = adjacency.order[cursor];
        let start_key = PointKey::new(start);

        let mut polygon = vec![start];
        let Some(first) = take_any(&mut adjacency, start_key) else {
            break;
        };
        polygon.push(first);

        let closed = loop {
            let prev = polygon[polygon.len() - 2];
            let current = polygon[polygon.len() - 1];
            let Some(next) = take_farthest_left(&mut adjacency, prev, current) else {
                break false;
            };
            if PointKey::new(next) == start_key {
                break true;
            }
            polygon.push(next);
        };
        if closed {
            polygons.push(polygon);
        }
    }
    polygons
}

fn take_any(adjacency: &mut Adjacency, key: PointKey) -> Option<Point> {
    let list = adjacency.map.get_mut(&key)?;
    let taken = list.pop();
    if list.is_empty() {
        adjacency.map.remove(&key);
    }
    taken
}

fn take_farthest_left(adjacency: &mut Adjacency, prev: Point, current: Point) -> Option<Point> {
    let key = PointKey::new(current);
    let list = adjacency.map.get_mut(&key)?;
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &candidate) in list.iter().enumerate() {
        let value = cross_product(prev, current, candidate);
        if value > best_value {
            best = i;
            best_value = value;
        }
    }
    let taken = list.swap_remove(best);
    if list.is_empty() {
        adjacency.map.remove(&key);
    }
    Some(taken)
}

/// Binds each polygon to the first still-unassigned site it contains; the
/// result is indexed like `sites`.
fn assign_polygons(sites: &[Point], polygons: Vec<Vec<Point>>) -> Vec<Vec<Point>> {
    let mut result: Vec<Vec<Point>> = vec![Vec::new(); sites.len()];
    let mut assigned = vec![false; sites.len()];
    for polygon in polygons {
        for (i, &site) in sites.iter().enumerate() {
            if !assigned[i] && point_in_polygon(site, &polygon) {
                assigned[i] = true;
                result[i] = polygon;
                break;
            }
        }
    }
    result
}
