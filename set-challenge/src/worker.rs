//! Per-worker state and the batch step (components G and part of H).
//!
//! Each worker owns its `decks` stack (LIFO, for depth-first growth) and
//! `reported` queue, and holds only a shared reference to
//! `pack_effective`. Workers never touch each other's state; the
//! coordinator (in [`crate::engine`]) only reads `reported` and
//! re-dispatches between batches.

use std::rc::Rc;

use crate::card::{Card, PACK_SIZE};
use crate::deck::count_sets;
use crate::node::DeckNode;

/// A single initial deck assigned to a worker at start-up. `Base` is
/// only ever used when `include.len() == deck_size`: the include chain
/// itself is the one candidate, so there is nothing left to extend.
/// `Extend` appends one card (at its `pack_effective` position) onto
/// the shared include-chain prefix.
#[derive(Clone, Copy, Debug)]
pub enum Seed {
    Base,
    Extend(Card, usize),
}

/// A deck handed from a worker to the coordinator: plain, `Send` data,
/// since the `Rc`-based [`DeckNode`] it came from never leaves its
/// worker's thread.
pub struct ReportedDeck {
    pub cards: Vec<Card>,
    pub tested: u64,
    pub are_sets: u64,
}

pub struct WorkerContext<'a> {
    pack_effective: &'a [Card],
    decks: Vec<Rc<DeckNode>>,
    reported: Vec<ReportedDeck>,
}

impl<'a> WorkerContext<'a> {
    pub fn new(pack_effective: &'a [Card]) -> Self {
        Self {
            pack_effective,
            decks: Vec::new(),
            reported: Vec::new(),
        }
    }

    /// Builds this worker's initial deck(s) from the include-chain
    /// prefix (shared, rebuilt independently by every worker since
    /// `Rc<DeckNode>` cannot cross threads) and its assigned seeds.
    pub fn seed(&mut self, include_chain: &[Card], assigned: &[Seed]) {
        let base: Option<Rc<DeckNode>> = include_chain
            .iter()
            .enumerate()
            .fold(None, |parent, (pos, &card)| {
                Some(match &parent {
                    Some(p) => DeckNode::child(p, card, pos),
                    None => DeckNode::root(card, pos),
                })
            });
        for seed in assigned {
            match *seed {
                Seed::Base => {
                    let base = base
                        .clone()
                        .expect("Seed::Base requires a non-empty include chain");
                    self.decks.push(base);
                }
                Seed::Extend(card, pos) => {
                    let node = match &base {
                        Some(parent) => DeckNode::child(parent, card, pos),
                        None => DeckNode::root(card, pos),
                    };
                    self.decks.push(node);
                }
            }
        }
    }

    pub fn decks_is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    pub fn take_reported(&mut self) -> Vec<ReportedDeck> {
        std::mem::take(&mut self.reported)
    }

    /// Performs up to `batch_size` evaluation/extension steps, checking
    /// `should_stop` before each one so cancellation can take effect
    /// mid-batch instead of only at the boundary.
    pub fn run_batch(
        &mut self,
        deck_size: usize,
        batch_size: usize,
        should_stop: &impl Fn() -> bool,
    ) {
        let mut scratch = [Card::default(); PACK_SIZE];
        for _ in 0..batch_size {
            if should_stop() {
                return;
            }
            let Some(node) = self.decks.pop() else {
                return;
            };
            if !node.is_evaluated() {
                let len = node.size();
                node.materialize_into(&mut scratch[..len]);
                let (tested, are_sets) = count_sets(&scratch[..len], true);
                node.record_evaluation(tested, are_sets);
            }
            // The `tested() == 0` disjunct only matters for decks of
            // size < 3, which can't yet form a triple; it's redundant
            // once a deck is large enough to have been actually tested.
            if node.size() < deck_size && (node.are_sets() == 0 || node.tested() == 0) {
                for (pos, &card) in self
                    .pack_effective
                    .iter()
                    .enumerate()
                    .skip(node.pos() + 1)
                {
                    self.decks.push(DeckNode::child(&node, card, pos));
                }
            }
            self.reported.push(ReportedDeck {
                cards: node.materialize(),
                tested: node.tested(),
                are_sets: node.are_sets(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card;

    fn never_stop() -> bool {
        false
    }

    #[test]
    fn seeding_with_no_include_builds_roots_directly() {
        let pack = card::pack();
        let mut ctx = WorkerContext::new(pack);
        ctx.seed(&[], &[Seed::Extend(pack[0], 0), Seed::Extend(pack[1], 1)]);
        assert!(!ctx.decks_is_empty());
        assert_eq!(ctx.decks.len(), 2);
    }

    #[test]
    fn seeding_with_include_shares_the_prefix() {
        let pack = card::pack();
        let include = vec![pack[5], pack[1]];
        let mut effective = include.clone();
        effective.extend(pack.iter().filter(|c| !include.contains(c)));
        let mut ctx = WorkerContext::new(&effective);
        ctx.seed(&include, &[Seed::Extend(effective[2], 2), Seed::Extend(effective[3], 3)]);
        assert_eq!(ctx.decks.len(), 2);
        for node in &ctx.decks {
            let cards = node.materialize();
            assert_eq!(&cards[..2], &include[..]);
        }
    }

    #[test]
    fn base_seed_pushes_the_include_chain_itself() {
        let pack = card::pack();
        let include = vec![pack[0], pack[10], pack[20]];
        let mut ctx = WorkerContext::new(&include);
        ctx.seed(&include, &[Seed::Base]);
        assert_eq!(ctx.decks.len(), 1);
        assert_eq!(ctx.decks[0].materialize(), include);
    }

    #[test]
    fn run_batch_evaluates_and_extends_until_deck_size() {
        let pack = card::pack();
        let mut ctx = WorkerContext::new(pack);
        ctx.seed(&[], &[Seed::Extend(pack[0], 0)]);
        // Drive enough steps to reach size-3 decks from a single root.
        for _ in 0..5 {
            ctx.run_batch(3, 100, &never_stop);
        }
        assert!(!ctx.reported.is_empty());
        // Every reported deck must be a prefix-valid, ascending-position chain.
        for deck in &ctx.reported {
            assert!(deck.cards.len() <= 3);
        }
    }

    #[test]
    fn run_batch_stops_extending_decks_that_contain_a_set() {
        let pack = card::pack();
        // indices 0, 1, 2 form a Set (see set_predicate tests).
        let mut effective = vec![pack[0], pack[1], pack[2], pack[3]];
        effective.sort_by_key(|c| c.index());
        let mut ctx = WorkerContext::new(&effective);
        let root = DeckNode::root(effective[0], 0);
        let child = DeckNode::child(&root, effective[1], 1);
        let grandchild = DeckNode::child(&child, effective[2], 2);
        ctx.decks.push(grandchild);
        ctx.run_batch(4, 10, &never_stop);
        assert_eq!(ctx.reported.len(), 1);
        assert_eq!(ctx.reported[0].are_sets, 1);
        // A Set-containing deck below deck_size must not be extended.
        assert!(ctx.decks_is_empty());
    }

    #[test]
    fn run_batch_honors_should_stop() {
        let pack = card::pack();
        let mut ctx = WorkerContext::new(pack);
        ctx.seed(&[], &[Seed::Extend(pack[0], 0)]);
        ctx.run_batch(5, 100, &|| true);
        assert!(ctx.reported.is_empty());
        assert!(!ctx.decks_is_empty());
    }
}
