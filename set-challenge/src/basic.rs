//! Single-threaded reference engine (component E): enumerate every
//! candidate deck lexicographically and count each one directly. Exists
//! to cross-check the parallel incremental engine (testable property 7)
//! and as a small-`k` sanity baseline; the parallel engine is the one
//! [`crate::run`] actually calls.

use tracing::instrument;

use crate::cancel::CancelToken;
use crate::card::{self, Card};
use crate::combinations::Combinations;
use crate::deck::count_sets;
use crate::error::SetChallengeError;
use crate::validate::validate_args;

/// Runs the basic algorithm: build `pool` = pack minus `exclude` minus
/// `include`, enumerate every way to pick the remaining
/// `deck_size - include.len()` cards from `pool`, and count the
/// candidates with no Set. `observer` is invoked for every candidate,
/// in lexicographic enumeration order.
#[instrument(skip(include, exclude, cancel, observer))]
pub fn run_basic(
    deck_size: usize,
    include: &[Card],
    exclude: &[Card],
    cancel: &CancelToken,
    mut observer: impl FnMut(&[Card], u64, u64),
) -> Result<i64, SetChallengeError> {
    validate_args(deck_size, include, exclude)?;

    let pool: Vec<Card> = card::pack()
        .iter()
        .copied()
        .filter(|c| !include.contains(c) && !exclude.contains(c))
        .collect();
    let pick_k = deck_size - include.len();

    if pick_k > pool.len() {
        // Not enough cards remain to reach deck_size once include is
        // fixed in place; no candidate deck exists. Matches the parallel
        // engine's "no seed can grow to size k" edge case (spec §4.H),
        // which returns 0 rather than treating this as an error.
        return Ok(0);
    }

    let mut no_set_count: i64 = 0;
    let mut combos = Combinations::new(pool.len(), pick_k)?;
    while combos.advance() {
        if cancel.is_cancelled() {
            return Err(SetChallengeError::Cancelled);
        }
        let mut deck: Vec<Card> = include.to_vec();
        deck.extend(combos.current().iter().map(|&i| pool[i]));
        deck.sort_by_key(Card::index);

        let (tested, are_sets) = count_sets(&deck, true);
        observer(&deck, tested, are_sets);
        if tested > 0 && are_sets == 0 {
            no_set_count += 1;
        }
    }
    Ok(no_set_count)
}
