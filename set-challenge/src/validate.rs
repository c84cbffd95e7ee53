//! Shared pre-run validation and `pack_effective` construction, used by
//! both the basic algorithm and the parallel incremental engine so the
//! two never drift on what counts as a valid request.

use crate::card::{self, Card, PACK_SIZE};
use crate::deck::deck_valid;
use crate::error::SetChallengeError;

/// All the validation errors from spec §6, raised before any evaluation
/// begins.
pub fn validate_args(
    deck_size: usize,
    include: &[Card],
    exclude: &[Card],
) -> Result<(), SetChallengeError> {
    if !(3..=PACK_SIZE).contains(&deck_size) {
        return Err(SetChallengeError::InvalidArgument(format!(
            "deck_size {deck_size} must be in [3, {PACK_SIZE}]"
        )));
    }
    if !include.is_empty() {
        if !deck_valid(include) {
            return Err(SetChallengeError::InvalidArgument(
                "include is not a valid deck".to_string(),
            ));
        }
        if include.len() > deck_size {
            return Err(SetChallengeError::InvalidArgument(format!(
                "include has {} cards, more than deck_size {deck_size}",
                include.len()
            )));
        }
    }
    if !exclude.is_empty() && !deck_valid(exclude) {
        return Err(SetChallengeError::InvalidArgument(
            "exclude is not a valid deck".to_string(),
        ));
    }
    if include.iter().any(|c| exclude.contains(c)) {
        return Err(SetChallengeError::InvalidArgument(
            "include and exclude overlap".to_string(),
        ));
    }
    Ok(())
}

/// `pack_effective`: the pack minus `exclude`, with `include` moved to
/// the front in the order the caller gave it, the rest following in
/// canonical order. Callers must validate first; this does not re-check.
pub fn build_pack_effective(include: &[Card], exclude: &[Card]) -> Vec<Card> {
    let mut effective = Vec::with_capacity(PACK_SIZE);
    effective.extend_from_slice(include);
    for &card in card::pack() {
        if include.contains(&card) || exclude.contains(&card) {
            continue;
        }
        effective.push(card);
    }
    effective
}
