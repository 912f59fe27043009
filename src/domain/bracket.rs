//! Arena-backed binary tree of bracket seats.
//!
//! Nodes live in a generational arena owned by the [`Bracket`]; children are
//! referenced by [`NodeId`]. Placement follows strict binary-search order over
//! the seat position, and every node remembers the depth it was inserted at.

use std::cmp::Ordering;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::entities::{Payload, Position, Seat};
use crate::domain::relation::{PositionalRelation, Side};

/// Handle of a node inside its bracket's arena.
pub type NodeId = Index;

/// A single seat in the bracket.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    position: Position,
    /// Caller data attached to the seat
    pub payload: Payload,
    left: Option<NodeId>,
    right: Option<NodeId>,
    depth: usize,
}

impl Node {
    fn new(position: Position, payload: Payload, depth: usize) -> Self {
        Self {
            position,
            payload,
            left: None,
            right: None,
            depth,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// 1-based depth at which the node was inserted (root = 1).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Convenience accessor for the `name` payload field.
    pub fn name(&self) -> Option<&str> {
        self.payload.get("name").and_then(|v| v.as_str())
    }
}

/// Deepest insertion tier overall and on each side of the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Depth {
    pub total: usize,
    /// Deepest node positioned below the root (winners side)
    pub left: usize,
    /// Deepest node positioned above the root (losers side)
    pub right: usize,
}

impl Depth {
    pub fn side(&self, side: Side) -> usize {
        match side {
            Side::Winners => self.left,
            Side::Losers => self.right,
        }
    }
}

/// Binary tree of seats keyed by position.
#[derive(Debug, Default)]
pub struct Bracket {
    arena: Arena<Node>,
    root: Option<NodeId>,
    size: usize,
    depth: Depth,
}

impl Bracket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bracket from seat records, skipping records without a position.
    ///
    /// Records are inserted in order; a repeated position keeps the first record.
    pub fn from_seats<I>(seats: I) -> Self
    where
        I: IntoIterator<Item = Seat>,
    {
        let mut bracket = Self::new();
        for seat in seats {
            match seat.position {
                Some(position) => {
                    if !bracket.add(position, seat.payload) {
                        trace!(position, "from_seats: duplicate position skipped");
                    }
                }
                None => trace!("from_seats: seat without position skipped"),
            }
        }
        bracket
    }

    /// Insert a seat. Returns `false` and leaves the tree untouched if the
    /// position is already taken.
    #[instrument(level = "trace", skip(self, payload))]
    pub fn add(&mut self, position: Position, payload: Payload) -> bool {
        let Some(root_idx) = self.root else {
            let idx = self.arena.insert(Node::new(position, payload, 1));
            self.root = Some(idx);
            self.size = 1;
            self.depth = Depth {
                total: 1,
                left: 1,
                right: 1,
            };
            return true;
        };

        let root_position = self.arena[root_idx].position;
        let mut current = root_idx;
        let mut depth = 2;

        loop {
            let node = &self.arena[current];
            let next = match position.cmp(&node.position) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return false,
            };

            match next {
                Some(child) => {
                    current = child;
                    depth += 1;
                }
                None => break,
            }
        }

        let idx = self.arena.insert(Node::new(position, payload, depth));
        let parent = &mut self.arena[current];
        if position < parent.position {
            parent.left = Some(idx);
        } else {
            parent.right = Some(idx);
        }
        self.size += 1;

        self.depth.total = self.depth.total.max(depth);
        match position.cmp(&root_position) {
            Ordering::Less => self.depth.left = self.depth.left.max(depth),
            Ordering::Greater => self.depth.right = self.depth.right.max(depth),
            Ordering::Equal => {}
        }

        true
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.root.and_then(|idx| self.arena.get(idx))
    }

    pub fn get(&self, idx: NodeId) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(idx)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Root of the subtree holding the given side, if that side has any seats.
    pub fn side_root(&self, side: Side) -> Option<NodeId> {
        let root = self.root_node()?;
        match side {
            Side::Winners => root.left,
            Side::Losers => root.right,
        }
    }

    fn find(&self, position: Position) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.arena[idx];
            current = match position.cmp(&node.position) {
                Ordering::Equal => return Some(idx),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Look up the node at `position`.
    #[instrument(level = "trace", skip(self))]
    pub fn at(&self, position: Position) -> Option<&Node> {
        self.find(position).map(|idx| &self.arena[idx])
    }

    pub fn at_mut(&mut self, position: Position) -> Option<&mut Node> {
        self.find(position).map(move |idx| &mut self.arena[idx])
    }

    pub fn iter_top_down(&self) -> TopDownIter<'_> {
        TopDownIter::new(self, self.root)
    }

    /// Pre-order iterator over the subtree rooted at `start`.
    pub fn iter_top_down_from(&self, start: NodeId) -> TopDownIter<'_> {
        TopDownIter::new(self, Some(start))
    }

    pub fn iter_in_order(&self) -> InOrderIter<'_> {
        InOrderIter::new(self, self.root)
    }

    pub fn iter_in_order_from(&self, start: NodeId) -> InOrderIter<'_> {
        InOrderIter::new(self, Some(start))
    }

    /// Visit nodes in ascending position order.
    pub fn in_order<F: FnMut(&Node)>(&self, visitor: F) {
        self.iter_in_order().for_each(visitor);
    }

    pub fn in_order_from<F: FnMut(&Node)>(&self, start: NodeId, visitor: F) {
        self.iter_in_order_from(start).for_each(visitor);
    }

    /// Visit nodes hierarchically: a node before its descendants, left before right.
    pub fn top_down<F: FnMut(&Node)>(&self, visitor: F) {
        self.iter_top_down().for_each(visitor);
    }

    pub fn top_down_from<F: FnMut(&Node)>(&self, start: NodeId, visitor: F) {
        self.iter_top_down_from(start).for_each(visitor);
    }

    /// Pre-order visit with mutable access to each node's payload.
    pub fn top_down_mut<F: FnMut(&mut Node)>(&mut self, mut visitor: F) {
        let order: Vec<NodeId> = self.iter_top_down().ids().collect();
        for idx in order {
            visitor(&mut self.arena[idx]);
        }
    }

    pub fn in_order_mut<F: FnMut(&mut Node)>(&mut self, mut visitor: F) {
        let order: Vec<NodeId> = self.iter_in_order().ids().collect();
        for idx in order {
            visitor(&mut self.arena[idx]);
        }
    }

    /// All nodes in top-down order, suitable for rebuilding the same tree.
    pub fn to_vec(&self) -> Vec<&Node> {
        self.iter_top_down().collect()
    }

    /// Start a relation query with no conditions.
    pub fn relation(&self) -> PositionalRelation<'_> {
        PositionalRelation::new(self)
    }

    pub fn winners(&self) -> PositionalRelation<'_> {
        self.relation().winners()
    }

    pub fn losers(&self) -> PositionalRelation<'_> {
        self.relation().losers()
    }

    pub fn round(&self, number: usize) -> PositionalRelation<'_> {
        self.relation().round(number)
    }
}

/// Pre-order iterator, stack based.
pub struct TopDownIter<'a> {
    bracket: &'a Bracket,
    stack: Vec<NodeId>,
}

impl<'a> TopDownIter<'a> {
    fn new(bracket: &'a Bracket, start: Option<NodeId>) -> Self {
        Self {
            bracket,
            stack: start.into_iter().collect(),
        }
    }

    fn next_entry(&mut self) -> Option<(NodeId, &'a Node)> {
        let current_idx = self.stack.pop()?;
        let node = self.bracket.get(current_idx)?;
        // right first so left is popped first
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some((current_idx, node))
    }

    /// Yield node handles instead of references.
    pub fn ids(self) -> impl Iterator<Item = NodeId> + 'a {
        let mut iter = self;
        std::iter::from_fn(move || iter.next_entry().map(|(idx, _)| idx))
    }
}

impl<'a> Iterator for TopDownIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().map(|(_, node)| node)
    }
}

/// In-order iterator: ascending positions.
pub struct InOrderIter<'a> {
    bracket: &'a Bracket,
    stack: Vec<NodeId>,
    current: Option<NodeId>,
}

impl<'a> InOrderIter<'a> {
    fn new(bracket: &'a Bracket, start: Option<NodeId>) -> Self {
        Self {
            bracket,
            stack: Vec::new(),
            current: start,
        }
    }

    fn next_entry(&mut self) -> Option<(NodeId, &'a Node)> {
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.bracket.get(idx).and_then(|n| n.left);
        }
        let idx = self.stack.pop()?;
        let node = self.bracket.get(idx)?;
        self.current = node.right;
        Some((idx, node))
    }

    pub fn ids(self) -> impl Iterator<Item = NodeId> + 'a {
        let mut iter = self;
        std::iter::from_fn(move || iter.next_entry().map(|(idx, _)| idx))
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().map(|(_, node)| node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::payload;

    fn positions<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<Position> {
        nodes.into_iter().map(Node::position).collect()
    }

    fn named(name: &str) -> Payload {
        payload([("name", name.into())])
    }

    fn foo_bar_baz() -> Bracket {
        let mut bracket = Bracket::new();
        assert!(bracket.add(2, named("Foo")));
        assert!(bracket.add(1, named("Bar")));
        assert!(bracket.add(3, named("Baz")));
        bracket
    }

    #[test]
    fn test_empty_bracket_has_no_root_and_zero_depth() {
        let bracket = Bracket::new();
        assert!(bracket.root().is_none());
        assert_eq!(bracket.size(), 0);
        assert_eq!(bracket.depth(), Depth::default());
        assert!(bracket.at(1).is_none());
        assert!(bracket.to_vec().is_empty());
    }

    #[test]
    fn test_add_sets_root() {
        let mut bracket = Bracket::new();
        assert!(bracket.add(2, named("Bob")));

        let root = bracket.root_node().unwrap();
        assert_eq!(root.position(), 2);
        assert_eq!(root.name(), Some("Bob"));
        assert_eq!(root.depth(), 1);
        assert_eq!(
            bracket.depth(),
            Depth {
                total: 1,
                left: 1,
                right: 1
            }
        );
    }

    #[test]
    fn test_add_duplicate_returns_false_and_keeps_payload() {
        let mut bracket = foo_bar_baz();
        let before: Vec<Position> = positions(bracket.to_vec());

        assert!(!bracket.add(1, named("Other")));
        assert!(!bracket.add(2, named("Other")));

        assert_eq!(bracket.size(), 3);
        assert_eq!(positions(bracket.to_vec()), before);
        assert_eq!(bracket.at(1).unwrap().name(), Some("Bar"));
    }

    #[test]
    fn test_add_places_children_by_order() {
        let bracket = foo_bar_baz();
        let root = bracket.root_node().unwrap();
        let left = bracket.get(root.left().unwrap()).unwrap();
        let right = bracket.get(root.right().unwrap()).unwrap();

        assert_eq!(left.position(), 1);
        assert_eq!(left.name(), Some("Bar"));
        assert_eq!(right.position(), 3);
        assert_eq!(right.name(), Some("Baz"));
        assert_eq!(left.depth(), 2);
    }

    #[test]
    fn test_side_depth_tracks_only_its_side() {
        let mut bracket = Bracket::new();
        bracket.add(10, Payload::new());
        bracket.add(5, Payload::new());
        assert_eq!(bracket.depth().left, 2);
        assert_eq!(bracket.depth().right, 1);

        bracket.add(3, Payload::new());
        bracket.add(15, Payload::new());
        assert_eq!(
            bracket.depth(),
            Depth {
                total: 3,
                left: 3,
                right: 2
            }
        );
    }

    #[test]
    fn test_traversal_orders() {
        let bracket = foo_bar_baz();

        let mut in_order = Vec::new();
        bracket.in_order(|n| in_order.push(n.position()));
        assert_eq!(in_order, vec![1, 2, 3]);

        let mut top_down = Vec::new();
        bracket.top_down(|n| top_down.push(n.position()));
        assert_eq!(top_down, vec![2, 1, 3]);

        let names: Vec<_> = bracket.to_vec().iter().filter_map(|n| n.name()).collect();
        assert_eq!(names, vec!["Foo", "Bar", "Baz"]);
    }

    #[test]
    fn test_subtree_traversal() {
        let mut bracket = Bracket::new();
        for p in [4, 2, 6, 1, 3, 5, 7] {
            bracket.add(p, Payload::new());
        }
        let left = bracket.side_root(Side::Winners).unwrap();

        let mut seen = Vec::new();
        bracket.top_down_from(left, |n| seen.push(n.position()));
        assert_eq!(seen, vec![2, 1, 3]);

        let mut seen = Vec::new();
        bracket.in_order_from(bracket.side_root(Side::Losers).unwrap(), |n| {
            seen.push(n.position())
        });
        assert_eq!(seen, vec![5, 6, 7]);
    }

    #[test]
    fn test_at_finds_present_and_misses_absent() {
        let bracket = foo_bar_baz();
        assert_eq!(bracket.at(3).unwrap().name(), Some("Baz"));
        assert!(bracket.at(4).is_none());
        assert!(bracket.at(0).is_none());
    }

    #[test]
    fn test_mutable_visitor_edits_payload() {
        let mut bracket = foo_bar_baz();
        bracket.top_down_mut(|n| {
            n.payload.insert("seen".into(), true.into());
        });
        assert!(bracket.iter_in_order().all(|n| n.payload.contains_key("seen")));

        bracket.at_mut(1).unwrap().payload.insert("name".into(), "Qux".into());
        assert_eq!(bracket.at(1).unwrap().name(), Some("Qux"));
    }

    #[test]
    fn test_from_seats_skips_missing_positions() {
        let seats = vec![
            Seat::new(Some(2), named("Foo")),
            Seat::new(None, named("Nobody")),
            Seat::new(Some(1), named("Bar")),
            Seat::new(Some(2), named("Again")),
        ];
        let bracket = Bracket::from_seats(seats);

        assert_eq!(bracket.size(), 2);
        assert_eq!(bracket.at(2).unwrap().name(), Some("Foo"));
    }

    #[test]
    fn test_rebuild_from_top_down_listing_keeps_shape() {
        let mut bracket = Bracket::new();
        for p in [7, 3, 11, 1, 5, 9, 13, 4] {
            bracket.add(p, Payload::new());
        }
        let mut rebuilt = Bracket::new();
        for node in bracket.to_vec() {
            rebuilt.add(node.position(), node.payload.clone());
        }

        assert_eq!(positions(rebuilt.to_vec()), positions(bracket.to_vec()));
        assert_eq!(rebuilt.depth(), bracket.depth());
    }
}
