//! Priority queue for the sweep: a 1-indexed binary heap of site and circle
//! events that supports O(log n) cancellation of an arbitrary live event.
//!
//! Every stored event tracks its own heap slot, so a circle event referenced
//! from a beachline arc can be removed without scanning the heap.

use crate::beachline::NodeId;
use crate::geometry::Point;

pub(crate) type EventId = usize;

#[derive(Clone, Copy, Debug)]
pub(crate) enum EventKind {
    /// A site enters the beachline when the sweep reaches its y.
    Site { site: Point },
    /// The referenced arc collapses when the sweep reaches the bottom of the
    /// circle through it and its two neighbors.
    Circle { arc: NodeId },
}

#[derive(Debug)]
struct Event {
    kind: EventKind,
    /// Sweep position (y) at which this event fires.
    key: f64,
    /// Current slot in the heap array, updated on every swap.
    slot: usize,
}

pub(crate) struct EventQueue {
    /// Arena of all events ever scheduled; extraction and removal only detach
    /// an event from the heap, its arena entry stays put.
    events: Vec<Event>,
    /// Heap of arena ids; slot 0 is unused so parent/child arithmetic is the
    /// classic index/2 and 2*index.
    heap: Vec<EventId>,
}

impl EventQueue {
    pub fn new() -> EventQueue {
        EventQueue {
            events: Vec::new(),
            heap: vec![usize::MAX],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.len() == 1
    }

    pub fn insert_site(&mut self, site: Point) -> EventId {
        self.insert(EventKind::Site { site }, site.y)
    }

    pub fn insert_circle(&mut self, arc: NodeId, circle_bottom: f64) -> EventId {
        self.insert(EventKind::Circle { arc }, circle_bottom)
    }

    fn insert(&mut self, kind: EventKind, key: f64) -> EventId {
        let id = self.events.len();
        let slot = self.heap.len();
        self.events.push(Event { kind, key, slot });
        self.heap.push(id);
        self.heap_up(slot);
        id
    }

    /// Pops the next event to process: maximum y, circle events first on ties.
    pub fn pop(&mut self) -> Option<EventKind> {
        if self.is_empty() {
            return None;
        }
        let id = self.heap[1];
        self.remove_slot(1);
        Some(self.events[id].kind)
    }

    /// Cancels a scheduled event wherever it currently sits in the heap.
    pub fn remove(&mut self, id: EventId) {
        let slot = self.events[id].slot;
        if slot == 0 || slot >= self.heap.len() || self.heap[slot] != id {
            // Already extracted; stale cancellations are a logic error upstream.
            debug_assert!(false, "removing an event that is not in the heap");
            return;
        }
        self.remove_slot(slot);
    }

    pub fn peek(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.events[self.heap[1]].key)
    }

    /// Keys of the two next events, used once at startup to detect the
    /// degenerate case of the first two sites sharing a y-coordinate.
    pub fn double_peek(&self) -> Option<(f64, f64)> {
        if self.heap.len() < 3 {
            return None;
        }
        let second = if self.heap.len() <= 3 || self.compare(2, 3) {
            2
        } else {
            3
        };
        Some((
            self.events[self.heap[1]].key,
            self.events[self.heap[second]].key,
        ))
    }

    /// True if the event in slot `a` sorts strictly before the one in `b`:
    /// larger key first; on a tie a circle event outranks a site event, and
    /// site events fall back to smaller x.
    fn compare(&self, a: usize, b: usize) -> bool {
        let ea = &self.events[self.heap[a]];
        let eb = &self.events[self.heap[b]];
        if ea.key > eb.key {
            return true;
        }
        if ea.key < eb.key {
            return false;
        }
        match (ea.kind, eb.kind) {
            (EventKind::Circle { .. }, _) | (_, EventKind::Circle { .. }) => true,
            (EventKind::Site { site: sa }, EventKind::Site { site: sb }) => sa.x < sb.x,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.events[self.heap[a]].slot = a;
        self.events[self.heap[b]].slot = b;
    }

    fn remove_slot(&mut self, slot: usize) {
        let last = self.heap.len() - 1;
        self.swap(slot, last);
        self.heap.pop();
        if slot > 1 && slot < self.heap.len() && self.compare(slot, slot / 2) {
            self.heap_up(slot);
        } else {
            self.heap_down(slot);
        }
    }

    fn heap_up(&mut self, slot: usize) {
        if slot == 1 {
            return;
        }
        let parent = slot / 2;
        if self.compare(slot, parent) {
            self.swap(slot, parent);
            self.heap_up(parent);
        }
    }

    fn heap_down(&mut self, slot: usize) {
        let left = 2 * slot;
        if left >= self.heap.len() {
            return;
        }
        let right = left + 1;
        if right < self.heap.len() {
            if self.compare(left, slot) && self.compare(left, right) {
                self.swap(slot, left);
                self.heap_down(left);
            } else if self.compare(right, slot) {
                self.swap(slot, right);
                self.heap_down(right);
            }
        } else if self.compare(left, slot) {
            self.swap(slot, left);
            self.heap_down(left);
        }
    }
}
