//! Floating-point geometry kernel for the sweep: circumcircles, parabola
//! intersections, rectangle clipping of rays and convex containment tests.

use crate::bounds::BoundingBox;

/// Tolerance for near-singular determinants and denominators.
pub(crate) const EPSILON: f64 = 1e-9;

/// A 2D point with its squared magnitude cached for the circumcenter formulas.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Point {
    pub x: f64,
    pub y: f64,
    pub mag_sq: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point {
            x,
            y,
            mag_sq: x * x + y * y,
        }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// A direction; never required to be normalized.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64) -> Vector {
        Vector { x, y }
    }

    pub fn reversed(&self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
        }
    }
}

pub(crate) fn difference(a: Point, b: Point) -> Vector {
    Vector::new(b.x - a.x, b.y - a.y)
}

/// Circumcenter of three points, or `None` when they are (near-)collinear
/// and the determinant vanishes.
pub(crate) fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < EPSILON {
        return None;
    }
    let x = (a.mag_sq * (b.y - c.y) + b.mag_sq * (c.y - a.y) + c.mag_sq * (a.y - b.y)) / d;
    let y = (a.mag_sq * (c.x - b.x) + b.mag_sq * (a.x - c.x) + c.mag_sq * (b.x - a.x)) / d;
    Some(Point::new(x, y))
}

/// Bottom-most point of the circle through three points: the sweep position
/// at which the corresponding circle event fires.
pub(crate) fn circle_bottom(a: Point, b: Point, c: Point) -> Option<Point> {
    let center = circumcenter(a, b, c)?;
    let radius = ((a.x - center.x).powi(2) + (a.y - center.y).powi(2)).sqrt();
    Some(Point::new(center.x, center.y - radius))
}

/// Whether two rays meet strictly ahead of both anchors. Parallel rays,
/// including the ones traced from a collinear site triple, never converge.
pub(crate) fn converge(a: Point, v1: Vector, b: Point, v2: Vector) -> bool {
    let denom = v1.x * v2.y - v1.y * v2.x;
    if denom.abs() < EPSILON {
        return false;
    }
    let s = (v1.x * a.y - v1.x * b.y + v1.y * b.x - v1.y * a.x) / denom;
    let t = if v1.x != 0.0 {
        (b.x - a.x + s * v2.x) / v1.x
    } else {
        (b.y - a.y + s * v2.y) / v1.y
    };
    s > 0.0 && t > 0.0
}

/// Image of `a` on the parabola with the given focus and the directrix
/// through `a.y`; seeds the starting point of a new edge.
pub(crate) fn projection(a: Point, focus: Point) -> Point {
    let y = (a.x - focus.x).powi(2) / (2.0 * (focus.y - a.y)) + (a.y + focus.y) / 2.0;
    Point::new(a.x, y)
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> (f64, f64) {
    let disc = (b * b - 4.0 * a * c).sqrt();
    let root1 = (-b - disc) / (2.0 * a);
    let root2 = (-b + disc) / (2.0 * a);
    if root1 > root2 { (root2, root1) } else { (root1, root2) }
}

/// Crossing of the two parabolas defined by `focus1`, `focus2` and a shared
/// directrix, on the side where `focus1`'s arc is left of `focus2`'s.
pub(crate) fn intersect(focus1: Point, focus2: Point, directrix: f64) -> Point {
    // A focus on the directrix is a degenerate vertical "parabola"; the
    // crossing is the projection of that focus onto the other parabola.
    if focus1.y == directrix || focus2.y == directrix {
        let (higher, lower) = if focus1.y > focus2.y {
            (focus1, focus2)
        } else {
            (focus2, focus1)
        };
        return projection(lower, higher);
    }

    let distance1 = 2.0 * (focus1.y - directrix);
    let distance2 = 2.0 * (focus2.y - directrix);
    let b = 2.0 * (focus2.x / distance2 - focus1.x / distance1);
    let c = (focus1.mag_sq - directrix * directrix) / distance1
        - (focus2.mag_sq - directrix * directrix) / distance2;

    // Equal heights: the bisector is vertical and the system is linear.
    if focus1.y == focus2.y {
        let x = -(c / b);
        let y = (x * x - 2.0 * focus1.x * x + focus1.mag_sq - directrix * directrix) / distance1;
        return Point::new(x, y);
    }

    let a = 1.0 / distance1 - 1.0 / distance2;
    let (x1, x2) = quadratic_roots(a, b, c);
    let y1 = (x1 * x1 - 2.0 * focus1.x * x1 + focus1.mag_sq - directrix * directrix) / distance1;
    let y2 = (x2 * x2 - 2.0 * focus1.x * x2 + focus1.mag_sq - directrix * directrix) / distance1;
    let (left, right) = (Point::new(x1, y1), Point::new(x2, y2));

    // The higher focus owns the outer parabola near the crossing; pick the
    // root on the side where focus1's arc really is the left one.
    if focus1.y < focus2.y { right } else { left }
}

/// Parametric time at which a ray with direction `v` covers `d`.
fn get_time(d: Vector, v: Vector) -> f64 {
    if v.x != 0.0 { d.x / v.x } else { d.y / v.y }
}

/// Pulls a computed crossing coordinate onto a wall it misses by less than
/// the tolerance, so coincident crossings share exact bits.
fn snap(value: f64, low: f64, high: f64) -> f64 {
    if (value - low).abs() < EPSILON {
        low
    } else if (value - high).abs() < EPSILON {
        high
    } else {
        value
    }
}

/// Candidate crossings of the line through `point` along `vector` with the
/// rectangle boundary: at most two, with exact box coordinates. A crossing
/// within tolerance of a wall is snapped onto it, so a ray aimed at a
/// corner clips to the exact corner rather than a point one rounding error
/// away from it.
fn bound_intersection(point: Point, vector: Vector, bounds: &BoundingBox) -> Vec<Point> {
    if vector.x == 0.0 {
        let x = snap(point.x, bounds.min_x, bounds.max_x);
        return vec![
            Point::new(x, bounds.min_y),
            Point::new(x, bounds.max_y),
        ];
    }
    if vector.y == 0.0 {
        let y = snap(point.y, bounds.min_y, bounds.max_y);
        return vec![
            Point::new(bounds.min_x, y),
            Point::new(bounds.max_x, y),
        ];
    }

    let slope = vector.y / vector.x;
    let left_y = snap(slope * (bounds.min_x - point.x) + point.y, bounds.min_y, bounds.max_y);
    let right_y = snap(slope * (bounds.max_x - point.x) + point.y, bounds.min_y, bounds.max_y);
    let bottom_x = snap((bounds.min_y - point.y) / slope + point.x, bounds.min_x, bounds.max_x);
    let top_x = snap((bounds.max_y - point.y) / slope + point.x, bounds.min_x, bounds.max_x);

    let mut candidates = Vec::new();
    if left_y >= bounds.min_y && left_y <= bounds.max_y {
        candidates.push(Point::new(bounds.min_x, left_y));
    }
    if right_y >= bounds.min_y && right_y <= bounds.max_y {
        candidates.push(Point::new(bounds.max_x, right_y));
    }
    if bottom_x > bounds.min_x && bottom_x < bounds.max_x {
        candidates.push(Point::new(bottom_x, bounds.min_y));
    }
    if top_x > bounds.min_x && top_x < bounds.max_x {
        candidates.push(Point::new(top_x, bounds.max_y));
    }
    candidates
}

fn pick_crossing(
    point: Point,
    vector: Vector,
    bounds: &BoundingBox,
    farthest: bool,
) -> Option<Point> {
    let candidates = bound_intersection(point, vector, bounds);
    match candidates.len() {
        0 => None,
        1 => {
            let t = get_time(difference(point, candidates[0]), vector);
            if t >= 0.0 { Some(candidates[0]) } else { None }
        }
        _ => {
            let t = get_time(difference(point, candidates[0]), vector);
            let s = get_time(difference(point, candidates[1]), vector);
            if t >= 0.0 && s >= 0.0 {
                let first = if farthest { t >= s } else { t <= s };
                Some(if first { candidates[0] } else { candidates[1] })
            } else if t >= 0.0 {
                Some(candidates[0])
            } else if s >= 0.0 {
                Some(candidates[1])
            } else {
                None
            }
        }
    }
}

/// Farthest boundary crossing reachable at non-negative time, used to extend
/// an unresolved edge end out to the rectangle.
pub(crate) fn extend(point: Point, vector: Vector, bounds: &BoundingBox) -> Option<Point> {
    pick_crossing(point, vector, bounds, true)
}

/// Nearest boundary crossing reachable at non-negative time, used to pull an
/// endpoint that escaped the rectangle back onto it.
pub(crate) fn shorten(point: Point, vector: Vector, bounds: &BoundingBox) -> Option<Point> {
    pick_crossing(point, vector, bounds, false)
}

pub(crate) fn cross_product(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

fn point_on_line(p: Point, a: Point, b: Point) -> bool {
    if p == a || p == b {
        return true;
    }
    if cross_product(a, b, p) != 0.0 {
        return false;
    }
    p.y > a.y.min(b.y) && p.y < a.y.max(b.y)
}

/// Quick accept against the triangle spanned by three spread-out vertices.
fn point_in_triangle(p: Point, polygon: &[Point]) -> bool {
    let first = polygon[0];
    let second = polygon[polygon.len() / 3];
    let third = polygon[polygon.len() * 2 / 3];
    cross_product(first, second, p) >= 0.0
        && cross_product(second, third, p) >= 0.0
        && cross_product(third, first, p) >= 0.0
}

/// Binary search over the vertex fan rooted at vertex 0; valid because the
/// polygon is convex and counter-clockwise.
fn binary_search_fan(p: Point, polygon: &[Point]) -> Option<usize> {
    let center = polygon[0];
    let mut left = 1;
    let mut right = polygon.len() - 1;
    while left <= right {
        let mid = (left + right) / 2;
        let direction = cross_product(center, polygon[mid], p);
        if direction >= 0.0 {
            left = mid + 1;
        } else if left == mid {
            return Some(mid);
        } else {
            right = mid;
        }
    }
    None
}

/// Containment test for a convex counter-clockwise polygon: O(log k) after a
/// constant-time triangle pre-check.
pub(crate) fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    if point_on_line(p, polygon[0], polygon[polygon.len() - 1]) {
        return true;
    }
    if point_in_triangle(p, polygon) {
        return true;
    }
    match binary_search_fan(p, polygon) {
        Some(i) => cross_product(polygon[i], polygon[i - 1], p) <= 0.0,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circumcenter() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);
        let c = Point::new(0.0, 4.0);
        let center = circumcenter(a, b, c).expect("non-collinear triple");
        assert!((center.x - 2.0).abs() < 1e-9);
        assert!((center.y - 2.0).abs() < 1e-9);

        let bottom = circle_bottom(a, b, c).expect("non-collinear triple");
        assert!((bottom.x - 2.0).abs() < 1e-9);
        assert!((bottom.y - (2.0 - 8.0_f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_circumcenter_collinear() {
        let a = Point::new(-2.0, 0.0);
        let b = Point::new(0.0, 0.0);
        let c = Point::new(2.0, 0.0);
        assert!(circumcenter(a, b, c).is_none());
        assert!(circle_bottom(a, b, c).is_none());
    }

    #[test]
    fn test_converge() {
        // Rays aimed at each other meet ahead of both anchors.
        assert!(converge(
            Point::new(0.0, 0.0),
            Vector::new(1.0, 1.0),
            Point::new(4.0, 0.0),
            Vector::new(-1.0, 1.0),
        ));
        // Reversed directions diverge.
        assert!(!converge(
            Point::new(0.0, 0.0),
            Vector::new(-1.0, -1.0),
            Point::new(4.0, 0.0),
            Vector::new(1.0, -1.0),
        ));
        // Parallel rays never meet.
        assert!(!converge(
            Point::new(0.0, 0.0),
            Vector::new(0.0, 1.0),
            Point::new(4.0, 0.0),
            Vector::new(0.0, 1.0),
        ));
    }

    #[test]
    fn test_projection() {
        let p = projection(Point::new(0.0, 0.0), Point::new(0.0, 4.0));
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
    }

    fn assert_on_both_parabolas(p: Point, focus1: Point, focus2: Point, directrix: f64) {
        let d1 = ((p.x - focus1.x).powi(2) + (p.y - focus1.y).powi(2)).sqrt();
        let d2 = ((p.x - focus2.x).powi(2) + (p.y - focus2.y).powi(2)).sqrt();
        let dl = p.y - directrix;
        assert!((d1 - dl).abs() < 1e-9, "not on parabola 1: {} vs {}", d1, dl);
        assert!((d2 - dl).abs() < 1e-9, "not on parabola 2: {} vs {}", d2, dl);
    }

    #[test]
    fn test_intersect_equal_heights() {
        let f1 = Point::new(-1.0, 2.0);
        let f2 = Point::new(3.0, 2.0);
        let p = intersect(f1, f2, 0.0);
        assert!((p.x - 1.0).abs() < 1e-9);
        assert_on_both_parabolas(p, f1, f2, 0.0);
    }

    #[test]
    fn test_intersect_general() {
        let f1 = Point::new(0.0, 3.0);
        let f2 = Point::new(2.0, 1.0);
        let p = intersect(f1, f2, 0.0);
        assert_on_both_parabolas(p, f1, f2, 0.0);
        // focus1 is higher, so the crossing keeps focus1's arc on the left.
        let swapped = intersect(f2, f1, 0.0);
        assert_on_both_parabolas(swapped, f1, f2, 0.0);
        assert!(p.x < swapped.x);
    }

    #[test]
    fn test_intersect_focus_on_directrix() {
        let f1 = Point::new(0.0, 4.0);
        let f2 = Point::new(2.0, 0.0);
        let p = intersect(f1, f2, 0.0);
        // Projection of the degenerate focus onto the other parabola.
        assert!((p.x - 2.0).abs() < 1e-9);
        assert!((p.y - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_extend_and_shorten() {
        let bounds = BoundingBox::new(-5.0, -5.0, 5.0, 5.0);
        let anchor = Point::new(0.0, 0.0);
        let east = Vector::new(1.0, 0.0);

        let near = shorten(anchor, east, &bounds).expect("ray crosses the box");
        assert!((near.x - 5.0).abs() < 1e-9 && near.y.abs() < 1e-9);
        let far = extend(anchor, east, &bounds).expect("ray crosses the box");
        assert!((far.x - 5.0).abs() < 1e-9);

        // From outside the box, pointing away: no crossing at t >= 0.
        let outside = Point::new(10.0, 0.0);
        assert!(extend(outside, east, &bounds).is_none());
        // Pointing back in: nearest crossing is the right wall.
        let back = shorten(outside, east.reversed(), &bounds).expect("points inward");
        assert!((back.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_extend_snaps_to_corner() {
        let bounds = BoundingBox::new(-5.0, -5.0, 5.0, 5.0);
        // A ray aimed at the corner, carrying the rounding error typical of
        // a sampled direction, must clip to the exact corner bits and must
        // not produce a second candidate on the adjacent wall.
        let v = Vector::new(1.0 + 1e-13, -1.0);
        let far = extend(Point::new(1.0, -1.0), v, &bounds).expect("ray crosses the box");
        assert_eq!(far.x, 5.0);
        assert_eq!(far.y, -5.0);

        let near = shorten(Point::new(1.0, -1.0), v, &bounds).expect("ray crosses the box");
        assert_eq!(near.x, 5.0);
        assert_eq!(near.y, -5.0);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        assert!(point_in_polygon(Point::new(2.0, 2.0), &square));
        assert!(point_in_polygon(Point::new(0.5, 3.5), &square));
        assert!(!point_in_polygon(Point::new(5.0, 2.0), &square));
        assert!(!point_in_polygon(Point::new(-0.1, 2.0), &square));
        // On the closing edge.
        assert!(point_in_polygon(Point::new(0.0, 2.0), &square));
        // Vertices.
        assert!(point_in_polygon(Point::new(0.0, 0.0), &square));
    }
}
