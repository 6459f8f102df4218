//! The event-driven sweep over the sites, processed in decreasing y. Pops
//! site and circle events, restructures the beachline, grows the half-edge
//! graph and schedules or cancels future circle events.

use crate::beachline::{Beachline, NodeId};
use crate::bounds::BoundingBox;
use crate::edges::EdgeList;
use crate::events::{EventKind, EventQueue};
use crate::geometry::{Point, circle_bottom, circumcenter, converge, projection};

/// All construction state in one place: the queue, the beachline, the edge
/// arena and the bounds, exclusively owned for the duration of one build.
pub(crate) struct Sweep {
    queue: EventQueue,
    beachline: Beachline,
    edges: EdgeList,
    bounds: BoundingBox,
}

impl Sweep {
    /// Runs the full sweep over the given sites and returns the half-edge
    /// graph, ready for clipping. Unresolved edge ends are the outward rays
    /// that never met another edge.
    pub fn run(sites: &[Point], bounds: BoundingBox) -> EdgeList {
        let mut sweep = Sweep {
            queue: EventQueue::new(),
            beachline: Beachline::new(),
            edges: EdgeList::new(),
            bounds,
        };

        for &site in sites {
            sweep.queue.insert_site(site);
        }

        // If the first two sites share a y, neither parabola degenerates
        // ahead of the other and the usual split is undefined; seed the
        // two-arc beachline directly.
        if let Some((first, second)) = sweep.queue.double_peek() {
            if first == second {
                sweep.double_site_start();
            }
        }

        while let Some(event) = sweep.queue.pop() {
            match event {
                EventKind::Site { site } => sweep.site_event(site),
                EventKind::Circle { arc } => sweep.circle_event(arc),
            }
        }

        sweep.edges
    }

    fn site_event(&mut self, site: Point) {
        if self.beachline.is_empty() {
            let root = self.beachline.new_arc(site);
            self.beachline.insert_root(root);
            return;
        }

        // The new site lands on exactly one arc; any circle event pending on
        // that arc is now stale.
        let Some(old_node) = self.beachline.find_arc(site) else {
            return;
        };
        self.cancel_circle_event(old_node);
        let old_site = self.beachline.site(old_node);

        // Split the found arc in place:
        //  A    ->    [A,B]
        //             /   \
        //            A    [B,A]
        //                 /   \
        //                B     A
        let left_breakpoint = self.beachline.new_breakpoint(old_site, site);
        let right_breakpoint = self.beachline.new_breakpoint(site, old_site);
        let old_arc_left = self.beachline.new_arc(old_site);
        let new_arc = self.beachline.new_arc(site);
        let old_arc_right = self.beachline.new_arc(old_site);
        self.beachline.insert_right(old_node, left_breakpoint);
        self.beachline.insert_right(left_breakpoint, right_breakpoint);
        self.beachline.insert_left(left_breakpoint, old_arc_left);
        self.beachline.insert_left(right_breakpoint, new_arc);
        self.beachline.insert_right(right_breakpoint, old_arc_right);
        self.beachline.replace_parent(left_breakpoint);

        // One new edge pair for the breakpoint between the two sites,
        // anchored where the new site projects onto the split arc.
        let start = projection(site, old_site);
        let edge = self.edges.add_edge(start);
        let twin = self.edges.twin(edge);
        self.beachline.set_edge(left_breakpoint, edge);
        self.beachline.set_edge(right_breakpoint, twin);
        self.edges.site_vector(edge, old_site, site);

        let pred = self.beachline.predecessor_leaf(old_arc_left);
        self.check_circle_event(pred, old_arc_left, Some(new_arc));
        let succ = self.beachline.successor_leaf(old_arc_right);
        self.check_circle_event(Some(new_arc), old_arc_right, succ);
    }

    fn circle_event(&mut self, leaf: NodeId) {
        self.beachline.set_circle_event(leaf, None);

        // A circle event is only ever scheduled with both flanks present.
        let (Some(pred_leaf), Some(succ_leaf)) = (
            self.beachline.predecessor_leaf(leaf),
            self.beachline.successor_leaf(leaf),
        ) else {
            return;
        };
        let (Some(pred_node), Some(succ_node)) = (
            self.beachline.predecessor_node(leaf),
            self.beachline.successor_node(leaf),
        ) else {
            return;
        };
        let left_site = self.beachline.site(pred_leaf);
        let center_site = self.beachline.site(leaf);
        let right_site = self.beachline.site(succ_leaf);
        let Some(circle_center) = circumcenter(left_site, center_site, right_site) else {
            return;
        };

        // The collapsed arc's two breakpoints have met: both bordering edges
        // end at the circumcenter.
        let succ_is_parent = self.beachline.parent(leaf) == Some(succ_node);
        self.beachline.remove(leaf);
        if let Some(edge) = self.beachline.edge(pred_node) {
            let twin = self.edges.twin(edge);
            self.edges[twin].origin = Some(circle_center);
        }
        if let Some(edge) = self.beachline.edge(succ_node) {
            let twin = self.edges.twin(edge);
            self.edges[twin].origin = Some(circle_center);
        }

        // One of the two breakpoints loses its arc pair and is spliced out;
        // the survivor is relabeled for the new adjacency:
        //     [A,B]                   [A,C]
        //     /   \                   /   \
        //   ...    [B,C]            ...   ...
        //   /\     /   \     ->     / \   / \
        // ... A   B    ...        ...  A C  ...
        //              / \
        //             C  ...
        let (removed, remaining) = if succ_is_parent {
            (succ_node, pred_node)
        } else {
            (pred_node, succ_node)
        };
        let survivor = if succ_is_parent {
            self.beachline.right_child(removed)
        } else {
            self.beachline.left_child(removed)
        };
        let Some(survivor) = survivor else {
            return;
        };
        self.beachline.replace_parent(survivor);
        self.beachline
            .set_breakpoint_sites(remaining, left_site, right_site);

        // The merged breakpoint traces a fresh edge out of the circumcenter.
        let edge = self.edges.add_edge(circle_center);
        self.beachline.set_edge(remaining, edge);
        if let Some(bottom) = circle_bottom(left_site, center_site, right_site) {
            self.edges.circle_vector(edge, left_site, right_site, bottom.y);
        }

        // The neighbors' pending circle events referenced the dead arc.
        self.cancel_circle_event(pred_leaf);
        self.cancel_circle_event(succ_leaf);

        let pred = self.beachline.predecessor_leaf(pred_leaf);
        self.check_circle_event(pred, pred_leaf, Some(succ_leaf));
        let succ = self.beachline.successor_leaf(succ_leaf);
        self.check_circle_event(Some(pred_leaf), succ_leaf, succ);
    }

    /// Seeds the beachline for two starting sites at the same y: one
    /// breakpoint, two arcs, and an edge dropping from the midpoint at the
    /// top of the bounding rectangle.
    fn double_site_start(&mut self) {
        let Some(EventKind::Site { site: first }) = self.queue.pop() else {
            return;
        };
        let Some(EventKind::Site { site: second }) = self.queue.pop() else {
            return;
        };

        let root = self.beachline.new_breakpoint(first, second);
        let left_arc = self.beachline.new_arc(first);
        let right_arc = self.beachline.new_arc(second);
        self.beachline.insert_root(root);
        self.beachline.insert_left(root, left_arc);
        self.beachline.insert_right(root, right_arc);

        let start = Point::new((first.x + second.x) / 2.0, self.bounds.max_y);
        let edge = self.edges.add_edge(start);
        self.beachline.set_edge(root, edge);
        self.edges.site_vector(edge, first, second);
        // The anchor sits on the rectangle boundary, so this end is already
        // resolved; leaving it open would clip the pair to a degenerate
        // segment at the anchor.
        self.edges[edge].origin = Some(start);
    }

    fn cancel_circle_event(&mut self, leaf: NodeId) {
        if let Some(event) = self.beachline.circle_event(leaf) {
            self.queue.remove(event);
            self.beachline.set_circle_event(leaf, None);
        }
    }

    /// Schedules a circle event for `center` if the edges bordering it
    /// converge ahead of their current positions. Collinear triples never
    /// converge and are skipped outright.
    fn check_circle_event(
        &mut self,
        left: Option<NodeId>,
        center: NodeId,
        right: Option<NodeId>,
    ) {
        let (Some(left), Some(right)) = (left, right) else {
            return;
        };
        let e1 = self
            .beachline
            .predecessor_node(center)
            .and_then(|node| self.beachline.edge(node));
        let e2 = self
            .beachline
            .successor_node(center)
            .and_then(|node| self.beachline.edge(node));
        let (Some(e1), Some(e2)) = (e1, e2) else {
            return;
        };
        let (Some(v1), Some(v2)) = (self.edges[e1].vector, self.edges[e2].vector) else {
            return;
        };
        if !converge(self.edges[e1].point, v1, self.edges[e2].point, v2) {
            return;
        }
        let Some(bottom) = circle_bottom(
            self.beachline.site(left),
            self.beachline.site(center),
            self.beachline.site(right),
        ) else {
            return;
        };
        let event = self.queue.insert_circle(center, bottom.y);
        self.beachline.set_circle_event(center, Some(event));
    }
}
