//! Linked-prefix deck model (component F).
//!
//! A deck of size n is a chain of `n` nodes, each owning a refcounted
//! handle to its parent. Many sibling decks share the same parent, so
//! the common prefix is stored once. `pos` is the node's position in
//! `pack_effective` (not the card's raw pack index) — that's what the
//! ascending-order invariant and the extend step are defined over, so
//! that `include` cards (reordered to the front of `pack_effective`)
//! participate in the same invariant as everything else.

use std::cell::Cell;
use std::rc::Rc;

use crate::card::Card;

/// One card appended onto a deck-in-progress. Evaluation state
/// (`tested`/`are_sets`) is write-once: `-1` means "not yet evaluated",
/// enforced by [`DeckNode::record_evaluation`]'s debug assertion.
pub struct DeckNode {
    parent: Option<Rc<DeckNode>>,
    card: Card,
    pos: usize,
    size: usize,
    tested: Cell<i64>,
    are_sets: Cell<i64>,
}

impl DeckNode {
    /// A deck of size 1: `card` sits at position `pos` in
    /// `pack_effective` with no parent.
    pub fn root(card: Card, pos: usize) -> Rc<DeckNode> {
        Rc::new(DeckNode {
            parent: None,
            card,
            pos,
            size: 1,
            tested: Cell::new(-1),
            are_sets: Cell::new(-1),
        })
    }

    /// Appends `card` (at `pos` in `pack_effective`) onto `parent`.
    /// `pos` must be strictly greater than `parent.pos()` — the caller
    /// (the extend step in the engine) is responsible for only ever
    /// offering positions after the parent's own.
    pub fn child(parent: &Rc<DeckNode>, card: Card, pos: usize) -> Rc<DeckNode> {
        debug_assert!(
            pos > parent.pos,
            "extend must only offer positions strictly after the parent's"
        );
        Rc::new(DeckNode {
            parent: Some(Rc::clone(parent)),
            card,
            pos,
            size: parent.size + 1,
            tested: Cell::new(-1),
            are_sets: Cell::new(-1),
        })
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_evaluated(&self) -> bool {
        self.tested.get() >= 0
    }

    /// Records the write-once evaluation result. Panics (debug builds
    /// only) if called twice on the same node — an internal invariant
    /// violation, not a recoverable error.
    pub fn record_evaluation(&self, tested: u64, are_sets: u64) {
        debug_assert!(!self.is_evaluated(), "deck node evaluated twice");
        self.tested.set(tested as i64);
        self.are_sets.set(are_sets as i64);
    }

    pub fn tested(&self) -> u64 {
        debug_assert!(self.is_evaluated());
        self.tested.get() as u64
    }

    pub fn are_sets(&self) -> u64 {
        debug_assert!(self.is_evaluated());
        self.are_sets.get() as u64
    }

    /// Writes this node's card sequence, in append order, into
    /// `buf[..self.size()]`. `buf` must be at least `self.size()` long.
    pub fn materialize_into(&self, buf: &mut [Card]) {
        assert!(buf.len() >= self.size, "scratch buffer too small for deck");
        let mut node = self;
        let mut i = self.size;
        loop {
            i -= 1;
            buf[i] = node.card;
            match &node.parent {
                Some(parent) => node = parent,
                None => break,
            }
        }
    }

    /// Materializes this node's card sequence as a fresh, owned `Vec`.
    pub fn materialize(&self) -> Vec<Card> {
        let mut cards = vec![Card::default(); self.size];
        self.materialize_into(&mut cards);
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card;

    #[test]
    fn root_has_size_one() {
        let node = DeckNode::root(card::pack()[0], 0);
        assert_eq!(node.size(), 1);
        assert!(!node.is_evaluated());
    }

    #[test]
    fn materialize_returns_cards_in_append_order() {
        let pack = card::pack();
        let root = DeckNode::root(pack[3], 3);
        let child = DeckNode::child(&root, pack[9], 9);
        let grandchild = DeckNode::child(&child, pack[40], 40);
        assert_eq!(grandchild.materialize(), vec![pack[3], pack[9], pack[40]]);
    }

    #[test]
    fn siblings_share_the_same_parent() {
        let pack = card::pack();
        let root = DeckNode::root(pack[0], 0);
        let a = DeckNode::child(&root, pack[1], 1);
        let b = DeckNode::child(&root, pack[2], 2);
        assert_eq!(a.materialize(), vec![pack[0], pack[1]]);
        assert_eq!(b.materialize(), vec![pack[0], pack[2]]);
    }

    #[test]
    fn record_evaluation_is_readable_afterwards() {
        let node = DeckNode::root(card::pack()[0], 0);
        node.record_evaluation(3, 1);
        assert!(node.is_evaluated());
        assert_eq!(node.tested(), 3);
        assert_eq!(node.are_sets(), 1);
    }

    #[test]
    #[should_panic(expected = "evaluated twice")]
    fn recording_evaluation_twice_panics_in_debug() {
        let node = DeckNode::root(card::pack()[0], 0);
        node.record_evaluation(0, 0);
        node.record_evaluation(0, 0);
    }
}
