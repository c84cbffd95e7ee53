//! Deck validation and triple-set counting (component D).

use itertools::Itertools;

use crate::card::{self, Card};
use crate::set_predicate::is_set;

/// `true` iff `cards` is non-empty, every card's index is in `[0, 81)`,
/// every card matches the pack's canonical entry for its own index (so
/// no corrupted/forged ids slip through), and no two positions share a
/// card.
pub fn deck_valid(cards: &[Card]) -> bool {
    if cards.is_empty() {
        return false;
    }
    let pack = card::pack();
    for card in cards {
        let idx = card.index() as usize;
        if idx >= pack.len() || pack[idx] != *card {
            return false;
        }
    }
    let mut seen = [false; card::PACK_SIZE];
    for card in cards {
        let idx = card.index() as usize;
        if seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// Counts triples `(i < j < k)` in `cards` that form a Set. When
/// `short_circuit` is true, returns `(tested_so_far, 1)` as soon as the
/// first Set is found; otherwise tests every triple and returns the full
/// counts.
pub fn count_sets(cards: &[Card], short_circuit: bool) -> (u64, u64) {
    let mut tested = 0u64;
    let mut are_sets = 0u64;
    for (a, b, c) in cards.iter().copied().tuple_combinations() {
        tested += 1;
        if is_set(&a, &b, &c) {
            are_sets += 1;
            if short_circuit {
                return (tested, 1);
            }
        }
    }
    (tested, are_sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinations::binomial;
    use rstest::rstest;

    #[test]
    fn empty_deck_is_invalid() {
        assert!(!deck_valid(&[]));
    }

    #[test]
    fn full_pack_is_valid() {
        assert!(deck_valid(card::pack()));
    }

    #[test]
    fn duplicate_card_makes_deck_invalid() {
        let pack = card::pack();
        assert!(!deck_valid(&[pack[0], pack[1], pack[0]]));
    }

    #[rstest]
    #[case(3)]
    #[case(5)]
    #[case(10)]
    fn triples_tested_equals_n_choose_3(#[case] n: usize) {
        let deck: Vec<Card> = card::pack()[..n].to_vec();
        let (tested, _) = count_sets(&deck, false);
        assert_eq!(tested as u128, binomial(n as u64, 3));
    }

    #[test]
    fn short_circuit_stops_at_first_set() {
        // indices 0, 1, 2 form a Set (see set_predicate tests).
        let pack = card::pack();
        let deck = vec![pack[0], pack[1], pack[2]];
        let (tested, are_sets) = count_sets(&deck, true);
        assert_eq!(tested, 1);
        assert_eq!(are_sets, 1);
    }

    #[test]
    fn no_set_deck_reports_zero_are_sets() {
        let pack = card::pack();
        let deck = vec![pack[0], pack[1], pack[3]];
        let (tested, are_sets) = count_sets(&deck, true);
        assert_eq!(tested, 1);
        assert_eq!(are_sets, 0);
    }
}
