//! The beachline: a binary tree whose leaves are parabolic arcs and whose
//! internal nodes are breakpoints between neighboring arcs.
//!
//! Nodes live in a flat arena and link to each other by index, so splicing a
//! node over its parent or cutting a collapsed arc out is plain index
//! rewiring. Spliced-out nodes simply become unreachable; the arena is never
//! compacted during a sweep. No rebalancing is performed.

use crate::edges::EdgeId;
use crate::events::EventId;
use crate::geometry::{Point, intersect};

pub(crate) type NodeId = usize;

#[derive(Debug)]
pub(crate) enum NodeKind {
    /// Leaf: one arc of the beachline, owned by a site.
    Arc {
        site: Point,
        /// Pending circle event that would collapse this arc, if any.
        circle_event: Option<EventId>,
    },
    /// Internal: the moving crossing of the two neighboring arcs' parabolas.
    Breakpoint {
        left_site: Point,
        right_site: Point,
        /// Half-edge this breakpoint traces as the sweep advances.
        edge: Option<EdgeId>,
    },
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    kind: NodeKind,
}

pub(crate) struct Beachline {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Beachline {
    pub fn new() -> Beachline {
        Beachline {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            parent: None,
            left: None,
            right: None,
            kind,
        });
        self.nodes.len() - 1
    }

    /// Allocates a detached arc leaf.
    pub fn new_arc(&mut self, site: Point) -> NodeId {
        self.push(NodeKind::Arc {
            site,
            circle_event: None,
        })
    }

    /// Allocates a detached breakpoint for the ordered site pair.
    pub fn new_breakpoint(&mut self, left_site: Point, right_site: Point) -> NodeId {
        self.push(NodeKind::Breakpoint {
            left_site,
            right_site,
            edge: None,
        })
    }

    pub fn site(&self, id: NodeId) -> Point {
        match self.nodes[id].kind {
            NodeKind::Arc { site, .. } => site,
            NodeKind::Breakpoint { .. } => unreachable!("site() on a breakpoint node"),
        }
    }

    pub fn circle_event(&self, id: NodeId) -> Option<EventId> {
        match self.nodes[id].kind {
            NodeKind::Arc { circle_event, .. } => circle_event,
            NodeKind::Breakpoint { .. } => None,
        }
    }

    pub fn set_circle_event(&mut self, id: NodeId, event: Option<EventId>) {
        match &mut self.nodes[id].kind {
            NodeKind::Arc { circle_event, .. } => *circle_event = event,
            NodeKind::Breakpoint { .. } => unreachable!("set_circle_event() on a breakpoint"),
        }
    }

    pub fn set_breakpoint_sites(&mut self, id: NodeId, left: Point, right: Point) {
        match &mut self.nodes[id].kind {
            NodeKind::Breakpoint {
                left_site,
                right_site,
                ..
            } => {
                *left_site = left;
                *right_site = right;
            }
            NodeKind::Arc { .. } => unreachable!("set_breakpoint_sites() on an arc"),
        }
    }

    pub fn edge(&self, id: NodeId) -> Option<EdgeId> {
        match self.nodes[id].kind {
            NodeKind::Breakpoint { edge, .. } => edge,
            NodeKind::Arc { .. } => None,
        }
    }

    pub fn set_edge(&mut self, id: NodeId, new_edge: EdgeId) {
        match &mut self.nodes[id].kind {
            NodeKind::Breakpoint { edge, .. } => *edge = Some(new_edge),
            NodeKind::Arc { .. } => unreachable!("set_edge() on an arc"),
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn right_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].right
    }

    pub fn left_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].left
    }

    fn is_left(&self, id: NodeId) -> bool {
        self.nodes[id]
            .parent
            .is_some_and(|p| self.nodes[p].left == Some(id))
    }

    fn is_right(&self, id: NodeId) -> bool {
        self.nodes[id]
            .parent
            .is_some_and(|p| self.nodes[p].right == Some(id))
    }

    pub fn insert_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    pub fn insert_left(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent].left = Some(child);
        self.nodes[child].parent = Some(parent);
    }

    pub fn insert_right(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent].right = Some(child);
        self.nodes[child].parent = Some(parent);
    }

    /// Detaches a node from its parent (used to delete a collapsed arc).
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent {
            if self.nodes[parent].left == Some(id) {
                self.nodes[parent].left = None;
            } else {
                self.nodes[parent].right = None;
            }
            self.nodes[id].parent = None;
        }
    }

    /// Splices a node up into its parent's position, dropping the parent out
    /// of the tree. The rest of the structure is untouched.
    pub fn replace_parent(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id].parent else {
            return;
        };
        if self.root == Some(parent) {
            self.root = Some(id);
            self.nodes[id].parent = None;
            return;
        }
        let Some(grandparent) = self.nodes[parent].parent else {
            return;
        };
        if self.is_left(parent) {
            self.nodes[grandparent].left = Some(id);
        } else {
            self.nodes[grandparent].right = Some(id);
        }
        self.nodes[id].parent = Some(grandparent);
    }

    fn min_node(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn max_node(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    /// In-order predecessor via parent-chain walk.
    pub fn predecessor_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.nodes[id].left {
            return Some(self.max_node(left));
        }
        let mut child = id;
        let mut node = self.nodes[id].parent;
        while let Some(n) = node {
            if self.is_right(child) {
                return Some(n);
            }
            child = n;
            node = self.nodes[n].parent;
        }
        None
    }

    /// In-order successor via parent-chain walk.
    pub fn successor_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.nodes[id].right {
            return Some(self.min_node(right));
        }
        let mut child = id;
        let mut node = self.nodes[id].parent;
        while let Some(n) = node {
            if self.is_left(child) {
                return Some(n);
            }
            child = n;
            node = self.nodes[n].parent;
        }
        None
    }

    /// Arc leaf immediately left of this leaf on the beachline.
    pub fn predecessor_leaf(&self, id: NodeId) -> Option<NodeId> {
        let root = self.root?;
        if id == self.min_node(root) {
            return None;
        }
        let mut node = self.nodes[self.predecessor_node(id)?].left?;
        loop {
            if let Some(right) = self.nodes[node].right {
                node = right;
            } else if let Some(left) = self.nodes[node].left {
                node = left;
            } else {
                return Some(node);
            }
        }
    }

    /// Arc leaf immediately right of this leaf on the beachline.
    pub fn successor_leaf(&self, id: NodeId) -> Option<NodeId> {
        let root = self.root?;
        if id == self.max_node(root) {
            return None;
        }
        let mut node = self.nodes[self.successor_node(id)?].right?;
        loop {
            if let Some(left) = self.nodes[node].left {
                node = left;
            } else if let Some(right) = self.nodes[node].right {
                node = right;
            } else {
                return Some(node);
            }
        }
    }

    /// Descends from the root to the arc vertically above the query site,
    /// evaluating each breakpoint's current position against the directrix
    /// through the site.
    pub fn find_arc(&self, site: Point) -> Option<NodeId> {
        let mut node = self.root?;
        loop {
            match self.nodes[node].kind {
                NodeKind::Breakpoint {
                    left_site,
                    right_site,
                    ..
                } => {
                    let crossing = intersect(left_site, right_site, site.y);
                    let next = if site.x < crossing.x {
                        self.nodes[node].left
                    } else {
                        self.nodes[node].right
                    };
                    node = next.expect("beachline breakpoint must have two children");
                }
                NodeKind::Arc { .. } => return Some(node),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the five-node beachline produced by one site split:
    ///        [A,B]
    ///        /   \
    ///       A    [B,A]
    ///            /   \
    ///           B     A
    fn split_tree() -> (Beachline, NodeId, NodeId, NodeId) {
        let a = Point::new(0.0, 4.0);
        let b = Point::new(1.0, 2.0);
        let mut tree = Beachline::new();
        let left_bp = tree.new_breakpoint(a, b);
        let right_bp = tree.new_breakpoint(b, a);
        let arc_left = tree.new_arc(a);
        let arc_mid = tree.new_arc(b);
        let arc_right = tree.new_arc(a);
        tree.insert_root(left_bp);
        tree.insert_left(left_bp, arc_left);
        tree.insert_right(left_bp, right_bp);
        tree.insert_left(right_bp, arc_mid);
        tree.insert_right(right_bp, arc_right);
        (tree, arc_left, arc_mid, arc_right)
    }

    #[test]
    fn test_leaf_navigation() {
        let (tree, arc_left, arc_mid, arc_right) = split_tree();

        assert_eq!(tree.predecessor_leaf(arc_left), None);
        assert_eq!(tree.predecessor_leaf(arc_mid), Some(arc_left));
        assert_eq!(tree.predecessor_leaf(arc_right), Some(arc_mid));
        assert_eq!(tree.successor_leaf(arc_left), Some(arc_mid));
        assert_eq!(tree.successor_leaf(arc_mid), Some(arc_right));
        assert_eq!(tree.successor_leaf(arc_right), None);
    }

    #[test]
    fn test_node_navigation() {
        let (tree, _, arc_mid, _) = split_tree();

        // The two breakpoints flank the middle arc in in-order position.
        let pred = tree.predecessor_node(arc_mid).expect("has predecessor");
        let succ = tree.successor_node(arc_mid).expect("has successor");
        let (pl, pr) = match tree.nodes[pred].kind {
            NodeKind::Breakpoint {
                left_site,
                right_site,
                ..
            } => (left_site, right_site),
            _ => panic!("expected breakpoint"),
        };
        assert!(pl.y == 4.0 && pr.y == 2.0);
        let (sl, sr) = match tree.nodes[succ].kind {
            NodeKind::Breakpoint {
                left_site,
                right_site,
                ..
            } => (left_site, right_site),
            _ => panic!("expected breakpoint"),
        };
        assert!(sl.y == 2.0 && sr.y == 4.0);
    }

    #[test]
    fn test_find_arc() {
        let (tree, arc_left, arc_mid, arc_right) = split_tree();

        // Query below the middle site: directly under it we hit its arc,
        // far to either side we hit the split arc's halves.
        assert_eq!(tree.find_arc(Point::new(1.0, 1.0)), Some(arc_mid));
        assert_eq!(tree.find_arc(Point::new(-8.0, 1.0)), Some(arc_left));
        assert_eq!(tree.find_arc(Point::new(10.0, 1.0)), Some(arc_right));
    }

    #[test]
    fn test_replace_parent_at_root() {
        let (mut tree, _, arc_mid, arc_right) = split_tree();

        // Collapse the middle arc: its successor breakpoint is its parent.
        let succ = tree.successor_node(arc_mid).expect("has successor");
        assert_eq!(tree.parent(arc_mid), Some(succ));
        tree.remove(arc_mid);
        let survivor = tree.right_child(succ).expect("right child survives");
        assert_eq!(survivor, arc_right);
        tree.replace_parent(survivor);

        // The tree is now  [A,B] with two arc leaves.
        let root = tree.root.expect("non-empty");
        assert_eq!(tree.left_child(root).map(|n| tree.site(n).y), Some(4.0));
        assert_eq!(tree.right_child(root), Some(arc_right));
        assert_eq!(tree.parent(arc_right), Some(root));
    }
}
